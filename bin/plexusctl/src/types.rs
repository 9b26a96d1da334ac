//! ---
//! px_section: "05-external-interfaces"
//! px_subsection: "binary"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Control CLI for inspecting component types and definitions."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use anyhow::Result;
use clap::Args;
use plexus_core::{ComponentRegistry, FieldDescriptor};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Emit machine readable JSON instead of a table.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ComponentTypeSummary {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl ListCommand {
    pub fn execute(self, registry: &ComponentRegistry) -> Result<()> {
        let summaries: Vec<ComponentTypeSummary> = registry
            .iter()
            .map(|entry| ComponentTypeSummary {
                name: entry.name(),
                fields: entry.fields(),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        for summary in &summaries {
            println!("{}", summary.name);
            for field in summary.fields {
                let required = if field.required { "required" } else { "optional" };
                println!("  {:<24} {:<8} {}", field.name, kind_label(field), required);
            }
        }
        Ok(())
    }
}

fn kind_label(field: &FieldDescriptor) -> String {
    serde_json::to_value(field.kind)
        .ok()
        .and_then(|value| value.as_str().map(str::to_owned))
        .unwrap_or_default()
}
