use thiserror::Error;

/// Failures in the pure domain layer: clock/window construction and
/// allocation preconditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("time must be HH:MM")]
    Clock,
    #[error("end time must be after start time")]
    Window,
    #[error("no efforts provided")]
    NoEfforts,
    #[error("invalid effort {0}")]
    NegativeEffort(i64),
}
