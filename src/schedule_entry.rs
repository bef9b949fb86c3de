use serde::{Deserialize, Serialize};

use crate::building::Building;

/// One class a friend attends: who, when, and in which building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub friend: String,
    /// Opaque time slot, only ever compared for exact equality.
    pub time: String,
    /// Building key; may name a building that was never loaded.
    pub short_name: String,
}

impl ScheduleEntry {
    pub fn new(
        friend: impl Into<String>,
        time: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            friend: friend.into(),
            time: time.into(),
            short_name: short_name.into(),
        }
    }

    /// Builds a record from `friend, time, short name` fields.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let friend = fields.next().unwrap_or_default();
        let time = fields.next().unwrap_or_default();
        let short_name = fields.next().unwrap_or_default();
        Self::new(friend, time, short_name)
    }

    pub fn from_line(line: &str) -> Self {
        Self::from_fields(line.split(','))
    }

    /// Attaches the coordinates of `building` to this entry.
    pub fn located_at(&self, building: &Building) -> ClassLocation {
        ClassLocation {
            friend: self.friend.clone(),
            time: self.time.clone(),
            short_name: self.short_name.clone(),
            x: building.x,
            y: building.y,
        }
    }
}

/// A schedule entry joined with the coordinates of its building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLocation {
    pub friend: String,
    pub time: String,
    pub short_name: String,
    pub x: f64,
    pub y: f64,
}
