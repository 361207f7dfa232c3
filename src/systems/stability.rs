use log::debug;

use crate::error::TrackingError;

use super::velocity_history::{HISTORY_CAPACITY, VelocityHistory};

/// Finite-difference velocity for one tracked point. Undefined until a
/// baseline sample exists, which is not the same thing as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Velocity {
    Undefined,
    Defined(f64),
}

impl Velocity {
    pub fn value(&self) -> Option<f64> {
        match self {
            Velocity::Undefined => None,
            Velocity::Defined(v) => Some(*v),
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Velocity::Defined(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleVelocities {
    pub left: Velocity,
    pub right: Velocity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
struct Baseline {
    timestamp: f64,
    left_x: f64,
    right_x: f64,
}

/// Tracks the velocity of two points (left/right) over a bounded window,
/// and answers whether both have stayed slow across the whole window.
///
/// On an invalid (non-positive) time delta nothing is mutated: the baseline
/// is kept, so the next valid sample is differenced against the older one.
#[derive(Debug, Clone)]
pub struct MotionStabilityTracker {
    left_history: VelocityHistory,
    right_history: VelocityHistory,
    baseline: Option<Baseline>,
}

impl MotionStabilityTracker {
    pub fn new() -> Self {
        MotionStabilityTracker {
            left_history: VelocityHistory::new(HISTORY_CAPACITY),
            right_history: VelocityHistory::new(HISTORY_CAPACITY),
            baseline: None,
        }
    }

    pub fn record_sample(
        &mut self,
        timestamp: f64,
        left_x: f64,
        right_x: f64,
    ) -> Result<SampleVelocities, TrackingError> {
        let current = Baseline {
            timestamp,
            left_x,
            right_x,
        };

        let Some(last) = self.baseline else {
            debug!("First sample at {}s stored as baseline", timestamp);
            self.baseline = Some(current);
            return Ok(SampleVelocities {
                left: Velocity::Undefined,
                right: Velocity::Undefined,
            });
        };

        let dt = timestamp - last.timestamp;
        // NaN fails this comparison too
        if !(dt > 0. && dt.is_finite()) {
            return Err(TrackingError::InvalidTimeDelta {
                previous: last.timestamp,
                current: timestamp,
            });
        }

        let left = (left_x - last.left_x) / dt;
        let right = (right_x - last.right_x) / dt;
        debug!("leftSpeed: {}, rightSpeed: {}", left, right);

        self.left_history.push(left);
        self.right_history.push(right);
        self.baseline = Some(current);

        Ok(SampleVelocities {
            left: Velocity::Defined(left),
            right: Velocity::Defined(right),
        })
    }

    /// Both histories must be non-empty, and no retained velocity may exceed
    /// the threshold in magnitude
    pub fn is_stable(&self, threshold: f64) -> bool {
        self.left_history.all_within(threshold) && self.right_history.all_within(threshold)
    }

    pub fn reset(&mut self) {
        self.left_history.clear();
        self.right_history.clear();
        self.baseline = None;
    }

    pub fn history(&self, side: TrackedSide) -> &VelocityHistory {
        match side {
            TrackedSide::Left => &self.left_history,
            TrackedSide::Right => &self.right_history,
        }
    }

    /// Most recently computed velocities, if any sample pair has been recorded
    pub fn last_velocities(&self) -> Option<(f64, f64)> {
        match (self.left_history.latest(), self.right_history.latest()) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        }
    }

    pub fn baseline_timestamp(&self) -> Option<f64> {
        self.baseline.map(|b| b.timestamp)
    }
}

impl Default for MotionStabilityTracker {
    fn default() -> Self {
        MotionStabilityTracker::new()
    }
}
