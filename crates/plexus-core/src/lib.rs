//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Component contract and definitions pipeline."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
//! Contract between a component host and pluggable components.
//!
//! A component type declares a typed schema, a loader and a definitions
//! builder. Hosts register types explicitly in a [`ComponentRegistry`], read
//! `component.yaml` declarations and run them through
//! validate → load → build → merge.

pub mod component;
pub mod context;
pub mod declaration;
pub mod definitions;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod schema;

pub use component::{Component, ComponentType};
pub use context::{BuildContext, HostBuildContext, HostLoadContext, LoadContext, Resources};
pub use declaration::{discover_declarations, ComponentDeclaration, DECLARATION_FILE};
pub use definitions::{
    Artifact, ArtifactKind, AssetSpec, Definitions, JobDefinition, ScheduleDefinition,
    SensorDefinition,
};
pub use error::{ComponentError, Result};
pub use pipeline::{
    build_component_defs, build_defs_from_folder, load_component, load_components_from_folder,
    LoadedComponent,
};
pub use registry::{ComponentRegistry, RegisteredComponentType};
pub use schema::{
    deserialize_integer, validate_params, ComponentSchema, FieldDescriptor, FieldKind,
    FieldViolation,
};
