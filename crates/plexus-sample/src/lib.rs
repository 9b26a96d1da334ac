//! ---
//! px_section: "04-sample-components"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Sample component exercising the registration, load and build contract."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
//! `my_component`: the smallest component that satisfies the host contract.
//!
//! It validates two scalar params, ignores its contexts and contributes an
//! empty definitions set. Hosts use it to confirm the pipeline is wired up.

use plexus_core::{
    deserialize_integer, BuildContext, Component, ComponentRegistry, ComponentSchema,
    ComponentType, Definitions, FieldDescriptor, FieldKind, LoadContext, Result,
};
use serde::Deserialize;
use tracing::trace;

/// Params accepted by [`MyComponent`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MyComponentSchema {
    pub a_string: String,
    #[serde(deserialize_with = "deserialize_integer")]
    pub an_int: i64,
}

impl ComponentSchema for MyComponentSchema {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::required("a_string", FieldKind::String),
            FieldDescriptor::required("an_int", FieldKind::Integer),
        ];
        FIELDS
    }
}

/// Stateless marker component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MyComponent;

impl Component for MyComponent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn build_defs(&self, _context: &dyn BuildContext) -> Result<Definitions> {
        Ok(Definitions::default())
    }
}

impl ComponentType for MyComponent {
    const NAME: &'static str = "my_component";
    type Schema = MyComponentSchema;

    fn load(params: MyComponentSchema, _context: &dyn LoadContext) -> Result<Self> {
        trace!(a_string = %params.a_string, an_int = params.an_int, "loading sample component");
        Ok(MyComponent)
    }
}

/// Register every component type this crate provides.
pub fn register(registry: &mut ComponentRegistry) -> Result<()> {
    registry.register::<MyComponent>()
}

/// Registry preloaded with the sample components.
pub fn sample_registry() -> Result<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    register(&mut registry)?;
    Ok(registry)
}
