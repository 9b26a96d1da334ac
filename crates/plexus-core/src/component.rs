//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Traits every pluggable component implements."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::fmt;

use crate::context::{BuildContext, LoadContext};
use crate::definitions::Definitions;
use crate::error::Result;
use crate::schema::ComponentSchema;

/// A loaded component instance owned by the host for one build cycle.
pub trait Component: fmt::Debug + Send + Sync + 'static {
    /// Registered type name of this component.
    fn name(&self) -> &str;

    /// Produce the artifacts this component contributes to the host aggregate.
    fn build_defs(&self, context: &dyn BuildContext) -> Result<Definitions>;
}

/// Static half of the contract: how a component type is named, configured and constructed.
///
/// Types are made visible to a host through
/// [`ComponentRegistry::register`](crate::registry::ComponentRegistry::register).
pub trait ComponentType: Component + Sized {
    /// Identifier used by declarations to select this type.
    const NAME: &'static str;

    /// Parameter record validated before [`ComponentType::load`] runs.
    type Schema: ComponentSchema;

    /// Construct an instance from validated params.
    fn load(params: Self::Schema, context: &dyn LoadContext) -> Result<Self>;
}
