use std::{path::Path, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    building::Building,
    config::DirectoryConfig,
    error::{LoadError, LoadResult, QueryError},
    loader,
    schedule_entry::{ClassLocation, ScheduleEntry},
};

/// Record counts served after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub buildings: usize,
    pub schedules: usize,
}

/// An immutable view of the loaded buildings and schedules.
///
/// Every query runs against one snapshot, so it never observes a load that
/// is only partly applied.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    buildings: Arc<[Building]>,
    schedules: Arc<[ScheduleEntry]>,
}

impl Default for DirectorySnapshot {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl DirectorySnapshot {
    pub fn new(buildings: Vec<Building>, schedules: Vec<ScheduleEntry>) -> Self {
        Self {
            buildings: buildings.into(),
            schedules: schedules.into(),
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn schedules(&self) -> &[ScheduleEntry] {
        &self.schedules
    }

    /// First building whose short name matches exactly (case-sensitive).
    pub fn find_building_by_short_name(&self, short_name: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.short_name == short_name)
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            buildings: self.buildings.len(),
            schedules: self.schedules.len(),
        }
    }

    fn with_buildings(&self, buildings: Arc<[Building]>) -> Self {
        Self {
            buildings,
            schedules: Arc::clone(&self.schedules),
        }
    }

    fn with_schedules(&self, schedules: Arc<[ScheduleEntry]>) -> Self {
        Self {
            buildings: Arc::clone(&self.buildings),
            schedules,
        }
    }
}

/// Owned, shareable holder of the current [`DirectorySnapshot`].
///
/// Loads parse into fresh collections first and then publish a new snapshot
/// under a short write lock; readers only hold the lock long enough to clone
/// the `Arc`.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    current: RwLock<Arc<DirectorySnapshot>>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: DirectorySnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn snapshot(&self) -> Arc<DirectorySnapshot> {
        self.current.read().clone()
    }

    // `update` only swaps `Arc`s; collections are built before the lock is taken.
    fn publish<F>(&self, update: F) -> Arc<DirectorySnapshot>
    where
        F: FnOnce(&DirectorySnapshot) -> DirectorySnapshot,
    {
        let mut current = self.current.write();
        let next = Arc::new(update(&current));
        *current = Arc::clone(&next);
        next
    }

    /// Replaces every building with the ones parsed from `lines`.
    pub fn load_buildings<I, S>(&self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let buildings = lines
            .into_iter()
            .map(|line| Building::from_line(line.as_ref()))
            .collect();
        self.replace_buildings(buildings)
    }

    /// Replaces every schedule entry with the ones parsed from `lines`.
    pub fn load_schedules<I, S>(&self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let schedules = lines
            .into_iter()
            .map(|line| ScheduleEntry::from_line(line.as_ref()))
            .collect();
        self.replace_schedules(schedules)
    }

    pub fn replace_buildings(&self, buildings: Vec<Building>) -> usize {
        let buildings: Arc<[Building]> = buildings.into();
        let snapshot = self.publish(|current| current.with_buildings(buildings));
        let count = snapshot.buildings().len();
        let unplaced = snapshot
            .buildings()
            .iter()
            .filter(|b| b.x.is_nan() || b.y.is_nan())
            .count();
        tracing::info!(count, unplaced, "published buildings");
        count
    }

    pub fn replace_schedules(&self, schedules: Vec<ScheduleEntry>) -> usize {
        let schedules: Arc<[ScheduleEntry]> = schedules.into();
        let snapshot = self.publish(|current| current.with_schedules(schedules));
        let count = snapshot.schedules().len();
        tracing::info!(count, "published schedules");
        count
    }

    pub fn load_buildings_from_path<P: AsRef<Path>>(&self, path: P) -> LoadResult<usize> {
        let buildings = loader::read_buildings(path)?;
        Ok(self.replace_buildings(buildings))
    }

    pub fn load_schedules_from_path<P: AsRef<Path>>(&self, path: P) -> LoadResult<usize> {
        let schedules = loader::read_schedules(path)?;
        Ok(self.replace_schedules(schedules))
    }

    /// Re-reads every configured data file and publishes them together.
    ///
    /// Nothing is published unless all configured files read successfully.
    pub fn reload(&self, config: &DirectoryConfig) -> LoadResult<LoadSummary> {
        if !config.has_sources() {
            return Err(LoadError::NoSources);
        }
        let buildings = config
            .buildings_path
            .as_deref()
            .map(loader::read_buildings)
            .transpose()
            .inspect_err(|err| tracing::warn!(%err, "failed to read buildings"))?
            .map(Arc::<[Building]>::from);
        let schedules = config
            .schedules_path
            .as_deref()
            .map(loader::read_schedules)
            .transpose()
            .inspect_err(|err| tracing::warn!(%err, "failed to read schedules"))?
            .map(Arc::<[ScheduleEntry]>::from);

        let snapshot = self.publish(|current| {
            let mut next = current.clone();
            if let Some(buildings) = buildings {
                next = next.with_buildings(buildings);
            }
            if let Some(schedules) = schedules {
                next = next.with_schedules(schedules);
            }
            next
        });
        let summary = snapshot.summary();
        tracing::info!(
            buildings = summary.buildings,
            schedules = summary.schedules,
            "reloaded directory"
        );
        Ok(summary)
    }

    pub fn find_building_by_short_name(&self, short_name: &str) -> Option<Building> {
        self.snapshot()
            .find_building_by_short_name(short_name)
            .cloned()
    }

    pub fn search_buildings_by_name(&self, text: Option<&str>) -> Vec<Building> {
        self.snapshot().search_buildings_by_name(text)
    }

    pub fn nearest_buildings(
        &self,
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<Vec<Building>, QueryError> {
        self.snapshot().nearest_buildings(x, y)
    }

    pub fn classes_for_friend(&self, text: Option<&str>) -> Vec<ClassLocation> {
        self.snapshot().classes_for_friend(text)
    }

    pub fn classes_at_time(&self, text: Option<&str>) -> Vec<ClassLocation> {
        self.snapshot().classes_at_time(text)
    }

    pub fn nearest_friends(
        &self,
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<Vec<ClassLocation>, QueryError> {
        self.snapshot().nearest_friends(x, y)
    }
}
