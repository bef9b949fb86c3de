use std::{cmp::Ordering, collections::HashSet};

use crate::{
    building::Building,
    error::QueryError,
    numeric::parse_finite_f64,
    schedule_entry::{ClassLocation, ScheduleEntry},
    store::DirectorySnapshot,
};

/// Most buildings any building query returns.
pub const BUILDING_RESULT_LIMIT: usize = 3;
/// Number of distinct friends `nearest_friends` must find.
pub const NEAREST_FRIEND_COUNT: usize = 3;

/// A validated query position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Parses raw `x`/`y` query values; both must be present and finite.
    pub fn parse(x: Option<&str>, y: Option<&str>) -> Result<Self, QueryError> {
        let x = x.and_then(parse_finite_f64);
        let y = y.and_then(parse_finite_f64);
        match (x, y) {
            (Some(x), Some(y)) => Ok(Self { x, y }),
            _ => Err(QueryError::InvalidCoordinates),
        }
    }
}

// NaN distances come from unplaced buildings and rank after every real one.
fn compare_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

fn parse_point(x: Option<&str>, y: Option<&str>) -> Result<Point, QueryError> {
    Point::parse(x, y).inspect_err(|_| {
        tracing::warn!(
            x = x.unwrap_or_default(),
            y = y.unwrap_or_default(),
            "rejected coordinates"
        );
    })
}

impl DirectorySnapshot {
    /// First three buildings, in load order, whose long name contains `text`
    /// ignoring case. Absent text matches everything.
    pub fn search_buildings_by_name(&self, text: Option<&str>) -> Vec<Building> {
        let needle = text.unwrap_or_default().to_lowercase();
        let results: Vec<Building> = self
            .buildings()
            .iter()
            .filter(|b| b.long_name.to_lowercase().contains(&needle))
            .take(BUILDING_RESULT_LIMIT)
            .cloned()
            .collect();
        tracing::debug!(text = %needle, count = results.len(), "search buildings by name");
        results
    }

    pub fn nearest_buildings(
        &self,
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<Vec<Building>, QueryError> {
        let point = parse_point(x, y)?;
        Ok(self.nearest_buildings_to(point))
    }

    /// Up to three buildings ordered by distance to `point`; ties keep load
    /// order.
    pub fn nearest_buildings_to(&self, point: Point) -> Vec<Building> {
        let mut ranked: Vec<(f64, &Building)> = self
            .buildings()
            .iter()
            .map(|b| (b.squared_distance_to(point.x, point.y), b))
            .collect();
        ranked.sort_by(|a, b| compare_distance(a.0, b.0));
        let results: Vec<Building> = ranked
            .into_iter()
            .take(BUILDING_RESULT_LIMIT)
            .map(|(_, b)| b.clone())
            .collect();
        tracing::debug!(
            x = point.x,
            y = point.y,
            count = results.len(),
            "nearest buildings"
        );
        results
    }

    /// Every class of the friend named `text` (whole name, ignoring case)
    /// whose building is known.
    pub fn classes_for_friend(&self, text: Option<&str>) -> Vec<ClassLocation> {
        let name = text.unwrap_or_default().to_lowercase();
        let results = self.locate_where(|entry| entry.friend.to_lowercase() == name);
        tracing::debug!(friend = %name, count = results.len(), "classes for friend");
        results
    }

    /// Every class held at exactly `time` whose building is known.
    pub fn classes_at_time(&self, text: Option<&str>) -> Vec<ClassLocation> {
        let Some(time) = text else {
            return Vec::new();
        };
        let results = self.locate_where(|entry| entry.time == time);
        tracing::debug!(time, count = results.len(), "classes at time");
        results
    }

    pub fn nearest_friends(
        &self,
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<Vec<ClassLocation>, QueryError> {
        let point = parse_point(x, y)?;
        Ok(self.nearest_friends_to(point))
    }

    /// The closest class of each of the three nearest distinct friends.
    ///
    /// Returns an empty list unless exactly three distinct friends have a
    /// class in a known building.
    pub fn nearest_friends_to(&self, point: Point) -> Vec<ClassLocation> {
        let mut ranked: Vec<(f64, &ScheduleEntry, &Building)> = self
            .schedules()
            .iter()
            .filter_map(|entry| {
                let building = self.find_building_by_short_name(&entry.short_name)?;
                Some((building.squared_distance_to(point.x, point.y), entry, building))
            })
            .collect();
        ranked.sort_by(|a, b| compare_distance(a.0, b.0));

        let mut seen = HashSet::with_capacity(NEAREST_FRIEND_COUNT);
        let mut results = Vec::with_capacity(NEAREST_FRIEND_COUNT);
        for (_, entry, building) in ranked {
            if seen.insert(entry.friend.as_str()) {
                results.push(entry.located_at(building));
                if results.len() == NEAREST_FRIEND_COUNT {
                    break;
                }
            }
        }

        if results.len() < NEAREST_FRIEND_COUNT {
            tracing::debug!(
                x = point.x,
                y = point.y,
                found = results.len(),
                "too few friends nearby"
            );
            return Vec::new();
        }
        tracing::debug!(x = point.x, y = point.y, "nearest friends");
        results
    }

    fn locate_where<F>(&self, mut predicate: F) -> Vec<ClassLocation>
    where
        F: FnMut(&ScheduleEntry) -> bool,
    {
        self.schedules()
            .iter()
            .filter(|entry| predicate(entry))
            .filter_map(|entry| {
                self.find_building_by_short_name(&entry.short_name)
                    .map(|building| entry.located_at(building))
            })
            .collect()
    }
}
