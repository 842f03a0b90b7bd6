//! Error types for qrforge.
//!
//! Each half of the pipeline fails in its own way:
//!
//! * [`ValidationError`] is produced by [`crate::input::normalize`] when the
//!   submitted form does not describe a usable payload. Its message is meant
//!   to be shown to the user as-is.
//! * [`EncodingError`] is produced by [`crate::encode`] and [`crate::QRBuilder`]
//!   when a payload cannot be turned into a symbol with the requested
//!   parameters.

use thiserror::Error;

use crate::common::metadata::ECLevel;

/// A form submission that failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable reason, suitable for display next to the form.
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure to build or rasterize a symbol.
#[derive(Debug, Error)]
pub enum EncodingError {
    // Symbol construction
    #[error("Empty data")]
    EmptyData,

    /// `len` and `capacity` count characters of the selected mode: digits,
    /// alphanumeric characters or bytes.
    #[error("Data too long: {len} characters exceeds the capacity of {capacity} characters at error correction level {ec_level:?}")]
    DataTooLong { len: usize, ec_level: ECLevel, capacity: usize },

    #[error("Invalid version {0}: must be between 1 and 40")]
    InvalidVersion(u8),

    #[error("Invalid masking pattern {0}: must be between 0 and 7")]
    InvalidMaskingPattern(u8),

    // Rasterization
    #[error("Invalid module size {0}: must be at least 1 pixel")]
    InvalidModuleSize(u32),

    #[error("Rendered image would be {side} pixels wide, more than the limit of {max}")]
    RasterTooLarge { side: u64, max: u32 },

    #[error("Failed to serialize image: {0}")]
    Raster(#[from] image::ImageError),
}

pub type EncodingResult<T> = Result<T, EncodingError>;
