//! Error types for series sweeps
//!
//! The numeric core never fails: invalid sweep inputs are replaced by fallbacks
//! (see [`crate::inputs::normalize_inputs`]). The errors here cover the ambient
//! operations around it, such as loading a configuration file or casting a value
//! between numeric types.

/// Errors that can occur around a sweep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// A sweep configuration could not be parsed.
    #[error("Invalid sweep configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration file could not be read, or an output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the sweep utilities
pub type Result<T> = std::result::Result<T, Error>;
