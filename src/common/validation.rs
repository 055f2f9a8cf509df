//! Parameter validation shared by the sampler constructors

use crate::common::{Result, SampleError};

/// Validate that a sample size is positive
pub fn validate_sample_size(sample_size: usize) -> Result<()> {
    if sample_size == 0 {
        return Err(SampleError::InvalidParameter {
            param: "sample_size".to_string(),
            value: sample_size.to_string(),
            constraint: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_size_rejected() {
        assert!(validate_sample_size(0).is_err());
        assert!(validate_sample_size(1).is_ok());
        assert!(validate_sample_size(1000).is_ok());
    }
}
