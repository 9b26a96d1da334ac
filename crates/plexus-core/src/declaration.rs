//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Component declaration files and folder discovery."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use walkdir::WalkDir;

use crate::error::{ComponentError, Result};

/// File name a host looks for inside each component folder.
pub const DECLARATION_FILE: &str = "component.yaml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeclaration {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(default)]
    params: Value,
}

/// Parsed `component.yaml`: which registered type to load and with which params.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDeclaration {
    pub component_type: String,
    /// Raw, not yet validated params. `Null` when the file has no `params` key.
    pub params: Value,
    /// Path of the declaration file itself.
    pub path: PathBuf,
}

impl ComponentDeclaration {
    /// Read a declaration from a file, or from `component.yaml` inside a folder.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.is_dir() {
            path.join(DECLARATION_FILE)
        } else {
            path.to_path_buf()
        };
        let raw = fs::read_to_string(&file)
            .map_err(|err| ComponentError::declaration(&file, err))?;
        Self::parse(&raw, file)
    }

    /// Parse declaration text; `path` is recorded for diagnostics and context resolution.
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw: RawDeclaration =
            serde_yaml::from_str(content).map_err(|err| ComponentError::declaration(&path, err))?;
        let component_type = raw.component_type.trim().to_owned();
        if component_type.is_empty() {
            return Err(ComponentError::declaration(&path, "type cannot be empty"));
        }
        Ok(Self {
            component_type,
            params: raw.params,
            path,
        })
    }

    /// Folder containing the declaration; this is the component's location.
    pub fn location(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Collect every declaration below `root`, ordered by path.
///
/// `root` may also point directly at a declaration file or a single component folder.
pub fn discover_declarations(root: impl AsRef<Path>) -> Result<Vec<ComponentDeclaration>> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![ComponentDeclaration::from_path(root)?]);
    }
    if !root.is_dir() {
        return Err(ComponentError::declaration(
            root,
            "path does not exist or is not a directory",
        ));
    }

    let mut declarations = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| ComponentError::declaration(root, err))?;
        if entry.file_type().is_file() && entry.file_name() == DECLARATION_FILE {
            declarations.push(ComponentDeclaration::from_path(entry.path())?);
        }
    }
    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_type_and_params() {
        let decl = ComponentDeclaration::parse(
            "type: my_component\nparams:\n  a_string: hello\n  an_int: 42\n",
            "defs/sample/component.yaml",
        )
        .unwrap();
        assert_eq!(decl.component_type, "my_component");
        assert_eq!(decl.params["an_int"].as_i64(), Some(42));
        assert_eq!(decl.location(), Path::new("defs/sample"));
    }

    #[test]
    fn params_default_to_null() {
        let decl = ComponentDeclaration::parse("type: my_component\n", "component.yaml").unwrap();
        assert!(decl.params.is_null());
    }

    #[test]
    fn blank_type_and_unknown_keys_are_rejected() {
        assert!(ComponentDeclaration::parse("type: '  '\n", "component.yaml").is_err());
        let err =
            ComponentDeclaration::parse("type: a\nparms: {}\n", "component.yaml").unwrap_err();
        assert!(err.to_string().contains("parms"));
    }

    #[test]
    fn discovery_walks_nested_folders_in_order() {
        let dir = tempdir().unwrap();
        for name in ["b_second", "a_first/nested"] {
            let folder = dir.path().join(name);
            fs::create_dir_all(&folder).unwrap();
            fs::write(folder.join(DECLARATION_FILE), "type: my_component\n").unwrap();
        }
        fs::write(dir.path().join("README.md"), "not a declaration").unwrap();

        let found = discover_declarations(dir.path()).unwrap();
        let folders: Vec<PathBuf> = found
            .iter()
            .map(|d| d.location().strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            folders,
            vec![PathBuf::from("a_first/nested"), PathBuf::from("b_second")]
        );
    }

    #[test]
    fn discovery_of_missing_root_fails() {
        let dir = tempdir().unwrap();
        let err = discover_declarations(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ComponentError::Declaration { .. }));
    }
}
