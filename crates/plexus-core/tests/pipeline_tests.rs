//! ---
//! px_section: "02-component-contract"
//! px_subsection: "integration-tests"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Host pipeline behaviour across registry, declarations and definitions."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use plexus_core::{
    build_defs_from_folder, load_component, AssetSpec, BuildContext, Component,
    ComponentDeclaration, ComponentError, ComponentRegistry, ComponentSchema, ComponentType,
    Definitions, FieldDescriptor, FieldKind, JobDefinition, LoadContext, Resources, Result,
    DECLARATION_FILE,
};
use serde::Deserialize;
use tempfile::tempdir;

static GUARDED_LOADS: AtomicUsize = AtomicUsize::new(0);
static GUARDED_BUILDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GuardedParams {
    #[allow(dead_code)]
    size: i64,
}

impl ComponentSchema for GuardedParams {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::required("size", FieldKind::Integer)];
        FIELDS
    }
}

/// Records every loader and builder invocation.
#[derive(Debug)]
struct GuardedComponent;

impl Component for GuardedComponent {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn build_defs(&self, _context: &dyn BuildContext) -> Result<Definitions> {
        GUARDED_BUILDS.fetch_add(1, Ordering::SeqCst);
        Ok(Definitions::default())
    }
}

impl ComponentType for GuardedComponent {
    const NAME: &'static str = "guarded";
    type Schema = GuardedParams;

    fn load(_params: GuardedParams, _context: &dyn LoadContext) -> Result<Self> {
        GUARDED_LOADS.fetch_add(1, Ordering::SeqCst);
        Ok(GuardedComponent)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableParams {
    table: String,
    #[serde(default)]
    job: Option<String>,
}

impl ComponentSchema for TableParams {
    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::required("table", FieldKind::String),
            FieldDescriptor::optional("job", FieldKind::String),
        ];
        FIELDS
    }
}

/// Publishes one asset per table, qualified by the warehouse resource.
#[derive(Debug)]
struct WarehouseTable {
    warehouse: String,
    table: String,
    job: Option<String>,
}

impl Component for WarehouseTable {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn build_defs(&self, context: &dyn BuildContext) -> Result<Definitions> {
        let mut defs = Definitions::new();
        let key = format!("{}/{}", self.warehouse, self.table);
        defs.add_asset(AssetSpec::new(key.clone()).with_description(format!(
            "declared by {} in {}",
            context.component_name(),
            context.path().display()
        )))?;
        if let Some(job) = &self.job {
            defs.add_job(JobDefinition::new(job.clone(), vec![key]))?;
        }
        Ok(defs)
    }
}

impl ComponentType for WarehouseTable {
    const NAME: &'static str = "warehouse_table";
    type Schema = TableParams;

    fn load(params: TableParams, context: &dyn LoadContext) -> Result<Self> {
        let warehouse = context
            .require_resource("warehouse")?
            .as_str()
            .unwrap_or("default")
            .to_owned();
        Ok(Self {
            warehouse,
            table: params.table,
            job: params.job,
        })
    }
}

/// Loads unconditionally but needs the `catalog` resource to build.
#[derive(Debug)]
struct CatalogView;

impl Component for CatalogView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn build_defs(&self, context: &dyn BuildContext) -> Result<Definitions> {
        let catalog = context.require_resource("catalog")?;
        let mut defs = Definitions::new();
        let key = format!("{}/view", catalog.as_str().unwrap_or("catalog"));
        defs.add_asset(AssetSpec::new(key))?;
        Ok(defs)
    }
}

impl ComponentType for CatalogView {
    const NAME: &'static str = "catalog_view";
    type Schema = GuardedParams;

    fn load(_params: GuardedParams, _context: &dyn LoadContext) -> Result<Self> {
        Ok(CatalogView)
    }
}

fn registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register::<GuardedComponent>().unwrap();
    registry.register::<WarehouseTable>().unwrap();
    registry.register::<CatalogView>().unwrap();
    registry
}

fn resources() -> Arc<Resources> {
    let mut resources = Resources::new();
    resources.insert("warehouse".into(), serde_yaml::Value::String("lake".into()));
    Arc::new(resources)
}

fn write_declaration(root: &Path, folder: &str, body: &str) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(DECLARATION_FILE), body).unwrap();
}

#[test]
fn invalid_params_never_reach_loader_or_builder() {
    let body = "type: guarded\nparams:\n  size: big\n";
    let decl = ComponentDeclaration::parse(body, "x/component.yaml").unwrap();
    let loads_before = GUARDED_LOADS.load(Ordering::SeqCst);
    let builds_before = GUARDED_BUILDS.load(Ordering::SeqCst);

    let err = load_component(&registry(), &decl, resources()).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(GUARDED_LOADS.load(Ordering::SeqCst), loads_before);
    assert_eq!(GUARDED_BUILDS.load(Ordering::SeqCst), builds_before);
}

#[test]
fn unknown_type_in_declaration_is_reported() {
    let decl = ComponentDeclaration::parse("type: nope\n", "component.yaml").unwrap();
    let err = load_component(&registry(), &decl, resources()).unwrap_err();
    assert!(matches!(err, ComponentError::UnknownComponentType(name) if name == "nope"));
}

#[test]
fn missing_resource_surfaces_as_context_error() {
    let body = "type: warehouse_table\nparams:\n  table: orders\n";
    let decl = ComponentDeclaration::parse(body, "component.yaml").unwrap();
    let err = load_component(&registry(), &decl, Arc::new(Resources::new())).unwrap_err();
    assert!(matches!(err, ComponentError::ContextMissing { .. }));
}

#[test]
fn loaded_component_builds_with_its_own_location() {
    let dir = tempdir().unwrap();
    write_declaration(
        dir.path(),
        "orders",
        "type: warehouse_table\nparams:\n  table: orders\n",
    );
    let decl = ComponentDeclaration::from_path(dir.path().join("orders")).unwrap();

    let loaded = load_component(&registry(), &decl, resources()).unwrap();
    assert_eq!(loaded.name(), "warehouse_table");
    assert!(loaded.context().path().ends_with("orders"));
    assert!(loaded.declaration_path().ends_with("orders/component.yaml"));

    let defs = loaded.build_defs().unwrap();
    assert_eq!(defs.assets().len(), 1);
    assert_eq!(defs.assets()[0].key, "lake/orders");
    let description = defs.assets()[0].description.as_deref().unwrap();
    assert!(description.starts_with("declared by warehouse_table"));
}

#[test]
fn folder_build_merges_all_components() {
    let dir = tempdir().unwrap();
    write_declaration(
        dir.path(),
        "orders",
        "type: warehouse_table\nparams:\n  table: orders\n  job: refresh\n",
    );
    write_declaration(
        dir.path(),
        "customers",
        "type: warehouse_table\nparams:\n  table: customers\n",
    );
    write_declaration(dir.path(), "noop", "type: guarded\nparams:\n  size: 3\n");

    let defs = build_defs_from_folder(&registry(), dir.path(), resources()).unwrap();
    let keys: Vec<&str> = defs.assets().iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, vec!["lake/customers", "lake/orders"]);
    assert_eq!(defs.jobs().len(), 1);
    assert_eq!(defs.len(), 3);
}

#[test]
fn folder_build_reports_definition_conflicts() {
    let dir = tempdir().unwrap();
    write_declaration(dir.path(), "a", "type: warehouse_table\nparams:\n  table: orders\n");
    write_declaration(dir.path(), "b", "type: warehouse_table\nparams:\n  table: orders\n");

    let err = build_defs_from_folder(&registry(), dir.path(), resources()).unwrap_err();
    match err {
        ComponentError::DefinitionConflict { name, .. } => assert_eq!(name, "lake/orders"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn folder_build_stops_at_first_invalid_declaration() {
    let dir = tempdir().unwrap();
    write_declaration(dir.path(), "a", "type: warehouse_table\nparams:\n  table: orders\n");
    write_declaration(dir.path(), "b", "type: warehouse_table\nparams: {}\n");

    let err = build_defs_from_folder(&registry(), dir.path(), resources()).unwrap_err();
    assert!(err.to_string().contains("missing field `table`"));
}

#[test]
fn build_failure_is_returned_unchanged() {
    let dir = tempdir().unwrap();
    write_declaration(dir.path(), "orders", "type: warehouse_table\nparams:\n  table: orders\n");
    write_declaration(dir.path(), "view", "type: catalog_view\nparams:\n  size: 1\n");

    let err = build_defs_from_folder(&registry(), dir.path(), resources()).unwrap_err();
    match err {
        ComponentError::ContextMissing { capability } => {
            assert_eq!(capability, "resource `catalog`")
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Arc::new(registry());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let body = format!("type: warehouse_table\nparams:\n  table: t{i}\n");
                let decl = ComponentDeclaration::parse(&body, "component.yaml").unwrap();
                let loaded = load_component(&registry, &decl, resources()).unwrap();
                loaded.build_defs().unwrap().len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
