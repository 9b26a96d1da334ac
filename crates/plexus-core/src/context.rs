//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Capabilities offered by hosts while loading and building components."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use path_absolutize::Absolutize;
use serde_yaml::Value;

use crate::error::{ComponentError, Result};

/// Named external resources a host makes available to components.
pub type Resources = IndexMap<String, Value>;

/// Capabilities available while a component instance is constructed.
pub trait LoadContext: Send + Sync {
    /// Resolved location of the component's declaration folder.
    fn path(&self) -> &Path;

    /// Look up a named external resource.
    fn resource(&self, key: &str) -> Option<&Value>;

    /// Like [`LoadContext::resource`] but reports a missing capability as an error.
    fn require_resource(&self, key: &str) -> Result<&Value> {
        self.resource(key)
            .ok_or_else(|| ComponentError::ContextMissing {
                capability: format!("resource `{key}`"),
            })
    }
}

/// Capabilities available while a component produces its definitions.
pub trait BuildContext: LoadContext {
    /// Registered type name of the component being built.
    fn component_name(&self) -> &str;
}

/// Load context assembled by the host for one declaration.
#[derive(Debug, Clone)]
pub struct HostLoadContext {
    path: PathBuf,
    resources: Arc<Resources>,
}

impl HostLoadContext {
    /// Build a context rooted at `path`, made absolute against the working directory.
    pub fn new(path: impl AsRef<Path>, resources: Arc<Resources>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = path
            .absolutize()
            .map_err(|err| ComponentError::declaration(path, err))?
            .into_owned();
        Ok(Self {
            path: resolved,
            resources,
        })
    }

    /// Borrow this context as the build context for `component`.
    pub fn for_component<'a>(&'a self, component: &'a str) -> HostBuildContext<'a> {
        HostBuildContext {
            load: self,
            component,
        }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }
}

impl LoadContext for HostLoadContext {
    fn path(&self) -> &Path {
        &self.path
    }

    fn resource(&self, key: &str) -> Option<&Value> {
        self.resources.get(key)
    }
}

/// Build context handed to [`crate::Component::build_defs`].
#[derive(Debug, Clone, Copy)]
pub struct HostBuildContext<'a> {
    load: &'a HostLoadContext,
    component: &'a str,
}

impl LoadContext for HostBuildContext<'_> {
    fn path(&self) -> &Path {
        self.load.path()
    }

    fn resource(&self, key: &str) -> Option<&Value> {
        self.load.resource(key)
    }
}

impl BuildContext for HostBuildContext<'_> {
    fn component_name(&self) -> &str {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> Arc<Resources> {
        let mut resources = Resources::new();
        resources.insert("warehouse".into(), Value::String("duckdb://local".into()));
        Arc::new(resources)
    }

    #[test]
    fn relative_paths_are_resolved() {
        let ctx = HostLoadContext::new("defs/orders", resources()).unwrap();
        assert!(ctx.path().is_absolute());
        assert!(ctx.path().ends_with("defs/orders"));
    }

    #[test]
    fn missing_resource_is_a_context_error() {
        let ctx = HostLoadContext::new("/srv/defs", resources()).unwrap();
        assert!(ctx.require_resource("warehouse").is_ok());
        match ctx.require_resource("api_token").unwrap_err() {
            ComponentError::ContextMissing { capability } => {
                assert!(capability.contains("api_token"))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn build_context_shares_load_capabilities() {
        let ctx = HostLoadContext::new("/srv/defs", resources()).unwrap();
        let build = ctx.for_component("my_component");
        let dyn_ctx: &dyn BuildContext = &build;
        assert_eq!(dyn_ctx.component_name(), "my_component");
        assert_eq!(dyn_ctx.path(), Path::new("/srv/defs"));
        assert!(dyn_ctx.resource("warehouse").is_some());
    }
}
