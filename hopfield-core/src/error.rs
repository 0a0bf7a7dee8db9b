use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HopfieldError {
    /// Pattern or state vector length differs from the network size
    #[error("dimension mismatch: expected {expected} units, got {actual}")]
    Dimension { expected: usize, actual: usize },
    #[error("weight matrix must be {expected}x{expected}, got {rows}x{cols}")]
    WeightShape { expected: usize, rows: usize, cols: usize },
    #[error("invalid unit value: cannot set unit {index} to {value}, units must be +1 or -1")]
    InvalidUnitValue { index: usize, value: f64 },
    #[error("unit index {index} out of bounds for network of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },
    #[error("invalid configuration: {0}")]
    Configuration(&'static str),
    #[error("network must have at least one unit")]
    EmptyNetwork,
    /// The update budget ran out before the dynamics reached a fixed point
    #[error("no convergence after {updates} updates")]
    NotConverged { updates: u64 },
}

pub type HopfieldResult<T, E = HopfieldError> = core::result::Result<T, E>;
