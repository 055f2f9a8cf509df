//! Error types for sampler operations

use std::fmt;

/// Errors that can occur during sampler construction or feeding
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// Invalid parameter provided to a sampler constructor
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Invalid value provided
        value: String,
        /// Constraint that was violated
        constraint: String,
    },

    /// Weight outside the range accepted by the algorithm
    IllegalWeight {
        /// The rejected weight
        weight: f64,
        /// Human-readable weight range accepted by the algorithm
        range: &'static str,
    },

    /// The stream counter or a weight accumulator has saturated; the
    /// sampler is unusable afterwards
    StreamOverflow,

    /// Paired item/weight iterators disagree on length
    MismatchedLengths {
        /// Items consumed before the mismatch surfaced
        items: u64,
        /// Weights consumed before the mismatch surfaced
        weights: u64,
    },

    /// Attempted to combine two partial samplers
    IncompatibleSamplers {
        /// Reason for incompatibility
        reason: String,
    },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}': value '{}' {}",
                    param, value, constraint
                )
            }
            SampleError::IllegalWeight { weight, range } => {
                write!(f, "Illegal weight {}: must be in {}", weight, range)
            }
            SampleError::StreamOverflow => {
                write!(f, "Stream overflow: the sampler's counter has saturated")
            }
            SampleError::MismatchedLengths { items, weights } => {
                write!(
                    f,
                    "Mismatched lengths: saw {} items but {} weights",
                    items, weights
                )
            }
            SampleError::IncompatibleSamplers { reason } => {
                write!(f, "Incompatible samplers: {}", reason)
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// Result type alias for sampler operations
pub type Result<T> = std::result::Result<T, SampleError>;
