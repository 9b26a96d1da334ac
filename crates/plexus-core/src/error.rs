//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Error taxonomy shared by components and hosts."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

use crate::definitions::ArtifactKind;

pub type Result<T> = std::result::Result<T, ComponentError>;

/// Errors raised while validating, loading or building components.
///
/// Components never recover from these locally; they are handed back to the
/// host unchanged.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("invalid params for component `{component}` at `{path}`: {message}")]
    Validation {
        component: String,
        path: String,
        message: String,
    },
    #[error("context is missing required capability: {capability}")]
    ContextMissing { capability: String },
    #[error("duplicate {kind} definition `{name}`")]
    DefinitionConflict { kind: ArtifactKind, name: String },
    #[error("component type `{0}` is not registered")]
    UnknownComponentType(String),
    #[error("component type `{0}` is already registered")]
    DuplicateComponentType(String),
    #[error("invalid component declaration {}: {message}", .path.display())]
    Declaration { path: PathBuf, message: String },
}

impl ComponentError {
    pub(crate) fn declaration(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ComponentError::Declaration {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Returns true for schema validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, ComponentError::Validation { .. })
    }
}
