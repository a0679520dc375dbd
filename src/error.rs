use std::error::Error;
use std::fmt;

/// Typed validation failures raised by the split and scoring layers.
///
/// Everything else in the crate surfaces errors through `anyhow`; these
/// variants exist so callers (and tests) can match on the conditions the
/// pipeline treats as configuration mistakes.
#[derive(Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Two row-aligned collections disagree in length.
    LengthMismatch { expected: usize, actual: usize },
    /// Held-out fraction outside the open interval (0, 1).
    InvalidFraction(f32),
    /// Dataset with too few rows to partition.
    EmptyDataset,
    /// Buffer length does not match the requested matrix shape.
    ShapeMismatch { rows: usize, cols: usize, len: usize },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BenchError::LengthMismatch { expected, actual } => {
                write!(f, "expected {} aligned entries, got {}", expected, actual)
            }
            BenchError::InvalidFraction(v) => {
                write!(f, "held-out fraction must lie in (0, 1), got {}", v)
            }
            BenchError::EmptyDataset => {
                write!(f, "dataset needs at least two rows to be split")
            }
            BenchError::ShapeMismatch { rows, cols, len } => {
                write!(f, "invalid shape ({}, {}) for buffer of length {}", rows, cols, len)
            }
        }
    }
}

impl Error for BenchError {}
