use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TrackingError {
    /// Consecutive samples must have strictly increasing timestamps
    #[error("invalid time delta: sample at {current}s does not follow previous sample at {previous}s")]
    InvalidTimeDelta { previous: f64, current: f64 },
}
