//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Host-side validate, load, build and merge pipeline."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plexus_logging::{
    log_component_event, px_debug, px_error, px_info, EventOutcome, LogContext, Phase,
};

use crate::component::Component;
use crate::context::{BuildContext, HostLoadContext, Resources};
use crate::declaration::{discover_declarations, ComponentDeclaration};
use crate::definitions::Definitions;
use crate::error::Result;
use crate::registry::ComponentRegistry;

/// A component instance together with the context it was loaded in.
#[derive(Debug)]
pub struct LoadedComponent {
    declaration: PathBuf,
    context: HostLoadContext,
    component: Box<dyn Component>,
}

impl LoadedComponent {
    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    pub fn name(&self) -> &str {
        self.component.name()
    }

    /// Declaration file this component came from.
    pub fn declaration_path(&self) -> &Path {
        &self.declaration
    }

    pub fn context(&self) -> &HostLoadContext {
        &self.context
    }

    /// Run the component's builder with a build context derived from its load context.
    pub fn build_defs(&self) -> Result<Definitions> {
        let build_context = self.context.for_component(self.name());
        build_component_defs(self.component(), &build_context)
    }
}

/// Resolve the declaration's type, validate its params and construct the component.
pub fn load_component(
    registry: &ComponentRegistry,
    declaration: &ComponentDeclaration,
    resources: Arc<Resources>,
) -> Result<LoadedComponent> {
    let outcome = registry
        .get(&declaration.component_type)
        .and_then(|entry| {
            let context = HostLoadContext::new(declaration.location(), resources)?;
            let component = entry.load(&declaration.params, &context)?;
            Ok(LoadedComponent {
                declaration: declaration.path.clone(),
                context,
                component,
            })
        });

    let declared_at = declaration.path.display().to_string();
    let log_ctx = LogContext::new()
        .with_component(&declaration.component_type)
        .with_declaration(&declared_at);
    match &outcome {
        Ok(_) => log_component_event(
            Some(&log_ctx.with_phase(Phase::Load)),
            "component.load",
            "component loaded",
            EventOutcome::Success,
        ),
        Err(err) => {
            let phase = if err.is_validation() {
                Phase::Validate
            } else {
                Phase::Load
            };
            log_component_event(
                Some(&log_ctx.with_phase(phase)),
                "component.load",
                &err.to_string(),
                EventOutcome::Fault,
            )
        }
    }
    outcome
}

/// Ask `component` for its definitions.
pub fn build_component_defs(
    component: &dyn Component,
    context: &dyn BuildContext,
) -> Result<Definitions> {
    let location = context.path().display().to_string();
    let log_ctx = LogContext::new()
        .with_component(context.component_name())
        .with_declaration(&location)
        .with_phase(Phase::Build);
    match component.build_defs(context) {
        Ok(defs) => {
            px_debug!(context = log_ctx, "built {} definitions", defs.len());
            Ok(defs)
        }
        Err(err) => {
            px_error!(context = log_ctx, "building definitions failed: {}", err);
            Err(err)
        }
    }
}

/// Load every declaration found below `root`, stopping at the first failure.
pub fn load_components_from_folder(
    registry: &ComponentRegistry,
    root: impl AsRef<Path>,
    resources: Arc<Resources>,
) -> Result<Vec<LoadedComponent>> {
    discover_declarations(root)?
        .iter()
        .map(|declaration| load_component(registry, declaration, Arc::clone(&resources)))
        .collect()
}

/// Load, build and merge the definitions of every component below `root`.
pub fn build_defs_from_folder(
    registry: &ComponentRegistry,
    root: impl AsRef<Path>,
    resources: Arc<Resources>,
) -> Result<Definitions> {
    let loaded = load_components_from_folder(registry, root, resources)?;
    let built = loaded
        .iter()
        .map(LoadedComponent::build_defs)
        .collect::<Result<Vec<_>>>()?;
    let aggregate = Definitions::merge_all(built)?;
    px_info!(
        context = LogContext::new().with_phase(Phase::Merge),
        "merged definitions from {} components into {} artifacts",
        loaded.len(),
        aggregate.len()
    );
    Ok(aggregate)
}
