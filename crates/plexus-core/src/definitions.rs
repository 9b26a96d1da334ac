//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Orchestration artifact declarations produced by components."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ComponentError, Result};

/// Kinds of orchestration artifacts a component may contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Asset,
    Job,
    Schedule,
    Sensor,
}

impl ArtifactKind {
    pub const fn all() -> &'static [ArtifactKind] {
        &[
            ArtifactKind::Asset,
            ArtifactKind::Job,
            ArtifactKind::Schedule,
            ArtifactKind::Sensor,
        ]
    }

    pub fn slug(self) -> &'static str {
        match self {
            ArtifactKind::Asset => "asset",
            ArtifactKind::Job => "job",
            ArtifactKind::Schedule => "schedule",
            ArtifactKind::Sensor => "sensor",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Named artifact declaration that can live inside [`Definitions`].
pub trait Artifact {
    const KIND: ArtifactKind;

    /// Identifier that must be unique among artifacts of the same kind.
    fn name(&self) -> &str;
}

/// Declaration of a data asset keyed by a slash separated path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
}

impl AssetSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: None,
            deps: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Artifact for AssetSpec {
    const KIND: ArtifactKind = ArtifactKind::Asset;

    fn name(&self) -> &str {
        &self.key
    }
}

/// Job selecting a set of assets by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<String>,
}

impl JobDefinition {
    pub fn new(name: impl Into<String>, selection: Vec<String>) -> Self {
        Self {
            name: name.into(),
            selection,
        }
    }
}

impl Artifact for JobDefinition {
    const KIND: ArtifactKind = ArtifactKind::Job;

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cron-triggered schedule targeting a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    pub name: String,
    pub job: String,
    pub cron: String,
}

impl ScheduleDefinition {
    pub fn new(name: impl Into<String>, job: impl Into<String>, cron: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
            cron: cron.into(),
        }
    }
}

impl Artifact for ScheduleDefinition {
    const KIND: ArtifactKind = ArtifactKind::Schedule;

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sensor that may request runs of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDefinition {
    pub name: String,
    pub job: String,
}

impl SensorDefinition {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

impl Artifact for SensorDefinition {
    const KIND: ArtifactKind = ArtifactKind::Sensor;

    fn name(&self) -> &str {
        &self.name
    }
}

/// Set of artifact declarations contributed by one or more components.
///
/// Names are unique per [`ArtifactKind`]; insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Definitions {
    assets: Vec<AssetSpec>,
    jobs: Vec<JobDefinition>,
    schedules: Vec<ScheduleDefinition>,
    sensors: Vec<SensorDefinition>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_asset(&mut self, asset: AssetSpec) -> Result<()> {
        insert_unique(&mut self.assets, asset)
    }

    pub fn add_job(&mut self, job: JobDefinition) -> Result<()> {
        insert_unique(&mut self.jobs, job)
    }

    pub fn add_schedule(&mut self, schedule: ScheduleDefinition) -> Result<()> {
        insert_unique(&mut self.schedules, schedule)
    }

    pub fn add_sensor(&mut self, sensor: SensorDefinition) -> Result<()> {
        insert_unique(&mut self.sensors, sensor)
    }

    pub fn assets(&self) -> &[AssetSpec] {
        &self.assets
    }

    pub fn jobs(&self) -> &[JobDefinition] {
        &self.jobs
    }

    pub fn schedules(&self) -> &[ScheduleDefinition] {
        &self.schedules
    }

    pub fn sensors(&self) -> &[SensorDefinition] {
        &self.sensors
    }

    /// Number of artifacts of the given kind.
    pub fn count(&self, kind: ArtifactKind) -> usize {
        match kind {
            ArtifactKind::Asset => self.assets.len(),
            ArtifactKind::Job => self.jobs.len(),
            ArtifactKind::Schedule => self.schedules.len(),
            ArtifactKind::Sensor => self.sensors.len(),
        }
    }

    /// Total number of artifacts across all kinds.
    pub fn len(&self) -> usize {
        ArtifactKind::all().iter().map(|kind| self.count(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combine two sets, failing on the first name collision within a kind.
    pub fn merge(mut self, other: Definitions) -> Result<Definitions> {
        for asset in other.assets {
            self.add_asset(asset)?;
        }
        for job in other.jobs {
            self.add_job(job)?;
        }
        for schedule in other.schedules {
            self.add_schedule(schedule)?;
        }
        for sensor in other.sensors {
            self.add_sensor(sensor)?;
        }
        Ok(self)
    }

    /// Merge every set yielded by `sets` into a single aggregate.
    pub fn merge_all<I>(sets: I) -> Result<Definitions>
    where
        I: IntoIterator<Item = Definitions>,
    {
        sets.into_iter()
            .try_fold(Definitions::default(), |acc, defs| acc.merge(defs))
    }
}

fn insert_unique<A: Artifact>(items: &mut Vec<A>, item: A) -> Result<()> {
    if items.iter().any(|existing| existing.name() == item.name()) {
        return Err(ComponentError::DefinitionConflict {
            kind: A::KIND,
            name: item.name().to_owned(),
        });
    }
    items.push(item);
    Ok(())
}
