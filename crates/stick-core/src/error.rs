use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StickError {
    #[error("invalid configuration: direction count must be at least 1 (got {0})")]
    InvalidConfiguration(usize),
    #[error("invalid configuration: throttle interval must be positive")]
    ZeroThrottleInterval,
}
