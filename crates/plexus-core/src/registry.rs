//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Explicit registry of component types known to a host."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use indexmap::IndexMap;
use serde_yaml::Value;
use tracing::debug;

use crate::component::{Component, ComponentType};
use crate::context::LoadContext;
use crate::error::{ComponentError, Result};
use crate::schema::{validate_params, ComponentSchema, FieldDescriptor};

type LoadFn = fn(&Value, &dyn LoadContext) -> Result<Box<dyn Component>>;

/// Registry entry for one component type.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredComponentType {
    name: &'static str,
    fields: &'static [FieldDescriptor],
    loader: LoadFn,
}

impl RegisteredComponentType {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Validate `params` against the type's schema, then run its loader.
    ///
    /// The loader is not invoked when validation fails.
    pub fn load(&self, params: &Value, context: &dyn LoadContext) -> Result<Box<dyn Component>> {
        (self.loader)(params, context)
    }
}

fn load_erased<T: ComponentType>(
    params: &Value,
    context: &dyn LoadContext,
) -> Result<Box<dyn Component>> {
    let schema = validate_params::<T::Schema>(T::NAME, params)?;
    let component = T::load(schema, context)?;
    Ok(Box::new(component))
}

/// Component types a host can instantiate, keyed by registered name.
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    types: IndexMap<&'static str, RegisteredComponentType>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `T` under [`ComponentType::NAME`]. Names must be unique.
    pub fn register<T: ComponentType>(&mut self) -> Result<()> {
        if self.types.contains_key(T::NAME) {
            return Err(ComponentError::DuplicateComponentType(T::NAME.to_owned()));
        }
        self.types.insert(
            T::NAME,
            RegisteredComponentType {
                name: T::NAME,
                fields: <T::Schema as ComponentSchema>::fields(),
                loader: load_erased::<T>,
            },
        );
        debug!(component = T::NAME, "component type registered");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&RegisteredComponentType> {
        self.types
            .get(name)
            .ok_or_else(|| ComponentError::UnknownComponentType(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredComponentType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
