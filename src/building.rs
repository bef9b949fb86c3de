use serde::{Deserialize, Serialize};

use crate::numeric::parse_lenient_f64;

/// A named campus location with planar coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    /// Unique key that schedule entries refer to.
    pub short_name: String,
    /// Human-readable name, searched case-insensitively.
    pub long_name: String,
    pub x: f64,
    pub y: f64,
}

impl Building {
    pub fn new(
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
            x,
            y,
        }
    }

    /// Builds a record from `short name, long name, x, y` fields.
    ///
    /// Missing text fields become empty and unreadable coordinates become NaN.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let short_name = fields.next().unwrap_or_default();
        let long_name = fields.next().unwrap_or_default();
        let x = fields.next().map_or(f64::NAN, parse_lenient_f64);
        let y = fields.next().map_or(f64::NAN, parse_lenient_f64);
        Self::new(short_name, long_name, x, y)
    }

    pub fn from_line(line: &str) -> Self {
        Self::from_fields(line.split(','))
    }

    pub(crate) fn squared_distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}
