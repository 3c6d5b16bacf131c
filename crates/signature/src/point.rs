//! Timestamped input samples and the distance/velocity between them

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PRESSURE;

/// A single pen sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Pressure 0.0-1.0
    pub pressure: f64,
    /// Timestamp in milliseconds
    pub time: i64,
}

impl Point {
    /// Create a point with the default pressure
    pub fn new(x: f64, y: f64, time: i64) -> Self {
        Self {
            x,
            y,
            pressure: DEFAULT_PRESSURE,
            time,
        }
    }

    /// Return a copy with the given pressure
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Speed travelled from `start` to this point, in units per millisecond.
    ///
    /// Samples that share a timestamp (common with coarse input clocks) have
    /// zero velocity. Out-of-order timestamps are treated the same way.
    pub fn velocity_from(&self, start: &Point) -> f64 {
        // Widened so timestamps at the ends of the i64 range cannot overflow
        let elapsed = i128::from(self.time) - i128::from(start.time);
        if elapsed <= 0 {
            return 0.0;
        }
        self.distance_to(start) / elapsed as f64
    }

    /// Midpoint between this point and `other`, carrying no pressure or time
    pub(crate) fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            pressure: 0.0,
            time: 0,
        }
    }

    /// Translate by (dx, dy), dropping pressure and time
    pub(crate) fn offset(&self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
            pressure: 0.0,
            time: 0,
        }
    }
}

/// Euclidean distance between two points
pub fn distance(a: &Point, b: &Point) -> f64 {
    b.distance_to(a)
}

/// Velocity travelling from `a` to `b`; zero when no time has elapsed
pub fn velocity(a: &Point, b: &Point) -> f64 {
    b.velocity_from(a)
}
