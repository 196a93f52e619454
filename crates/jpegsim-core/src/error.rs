//! Error types for the compression pipeline.

use thiserror::Error;

/// Errors that can occur while compressing an image.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompressError {
    /// Quality factor outside the accepted range
    #[error("Invalid quality {quality}: must be between 1 and 100")]
    Config { quality: u32 },

    /// Raster or plane does not have a usable shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Intermediate value left its representable range.
    ///
    /// Samples and coefficients are stored as `f32`, so this is not produced
    /// by the current pipeline.
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    /// Worker pool for block-parallel processing could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CompressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompressError::Config { quality: 101 };
        assert_eq!(err.to_string(), "Invalid quality 101: must be between 1 and 100");

        let err = CompressError::InvalidInput("zero width".to_string());
        assert_eq!(err.to_string(), "Invalid input: zero width");
    }
}
