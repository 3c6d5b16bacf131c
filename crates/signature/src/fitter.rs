//! Curve fitter for turning pen samples into cubic segments
//!
//! The fitter keeps a short sliding window of recent points for the stroke
//! in progress. Once three points are available it emits one cubic segment
//! per new sample, with a stroke width derived from low-pass filtered pen
//! velocity.

use std::collections::VecDeque;

use tracing::debug;

use crate::constants::WINDOW_CAPACITY;
use crate::options::StrokeOptions;
use crate::point::Point;
use crate::types::BezierSegment;

/// Control points flanking `s2` for the consecutive samples `s1`, `s2`, `s3`.
///
/// The midpoints of both chords are blended by relative chord length and the
/// blend is shifted onto `s2`. Returns `(before, after)`.
pub fn control_points(s1: &Point, s2: &Point, s3: &Point) -> (Point, Point) {
    let m1 = s1.midpoint(s2);
    let m2 = s2.midpoint(s3);

    let l1 = s1.distance_to(s2);
    let l2 = s2.distance_to(s3);

    // Stationary samples have no chord to weigh
    let k = if l1 + l2 != 0.0 { l2 / (l1 + l2) } else { 0.0 };
    let cm = m2.offset((m1.x - m2.x) * k, (m1.y - m2.y) * k);

    let tx = s2.x - cm.x;
    let ty = s2.y - cm.y;

    (m1.offset(tx, ty), m2.offset(tx, ty))
}

/// Curve fitter state for a single stroke
///
/// Call [`CurveFitter::reset`] before the first point of every stroke.
pub struct CurveFitter {
    /// Most recent points, oldest first
    window: VecDeque<Point>,
    /// Filtered velocity of the last emitted segment
    last_velocity: f64,
    /// End width of the last emitted segment
    last_width: f64,
}

impl Default for CurveFitter {
    fn default() -> Self {
        Self::new(&StrokeOptions::default())
    }
}

impl CurveFitter {
    /// Create a fitter ready for a stroke with the given options
    pub fn new(options: &StrokeOptions) -> Self {
        Self {
            window: VecDeque::with_capacity(WINDOW_CAPACITY),
            last_velocity: 0.0,
            last_width: options.mid_width(),
        }
    }

    /// Start a new stroke
    pub fn reset(&mut self, options: &StrokeOptions) {
        self.window.clear();
        self.last_velocity = 0.0;
        self.last_width = options.mid_width();
    }

    /// Number of points currently held
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }

    pub fn last_width(&self) -> f64 {
        self.last_width
    }

    /// Feed the next sample of the stroke.
    ///
    /// Returns a segment from the second to the third point of the window
    /// once at least three points have been seen. The first point is
    /// duplicated when the third arrives so the opening segment starts at
    /// the first sample.
    pub fn add_point(&mut self, point: Point, options: &StrokeOptions) -> Option<BezierSegment> {
        self.window.push_back(point);
        while self.window.len() > WINDOW_CAPACITY {
            self.window.pop_front();
        }

        if self.window.len() < 3 {
            return None;
        }

        if self.window.len() == 3 {
            let first = self.window[0];
            self.window.push_front(first);
        }

        let (p0, p1, p2, p3) = (
            self.window[0],
            self.window[1],
            self.window[2],
            self.window[3],
        );

        let control1 = control_points(&p0, &p1, &p2).1;
        let control2 = control_points(&p1, &p2, &p3).0;

        let velocity = options.velocity_filter_weight * p2.velocity_from(&p1)
            + (1.0 - options.velocity_filter_weight) * self.last_velocity;
        let width = options.width_for_velocity(velocity);

        let segment = BezierSegment {
            start: p1,
            control1,
            control2,
            end: p2,
            start_width: self.last_width,
            end_width: width,
        };

        debug!(
            "CurveFitter::add_point: segment ({:.1}, {:.1}) -> ({:.1}, {:.1}), v={:.4}, width {:.3} -> {:.3}",
            p1.x, p1.y, p2.x, p2.y, velocity, self.last_width, width
        );

        self.last_velocity = velocity;
        self.last_width = width;
        self.window.pop_front();

        Some(segment)
    }
}
