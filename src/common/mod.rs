//! Common utilities, errors, and randomness helpers

mod error;
pub mod random;
pub mod validation;

pub use error::{Result, SampleError};
