//! # qrforge
//!
//! Turns web form submissions into QR code images.
//!
//! A submission declares what it contains (a URL, a phone number, an SMS, an
//! email, free text, or a small PDF/image upload). The [`input`] module
//! validates it and produces the exact payload to encode; [`encode`] then
//! builds a QR Model 2 symbol with Reed-Solomon error correction and renders
//! it to an in-memory PNG.
//!
//! ## Features
//!
//! - **Input validation**: per-kind rules with user-facing error messages
//! - **QR encoding**: numeric, alphanumeric and byte modes, versions 1-40,
//!   error correction levels L, M, Q and H, automatic mask selection
//! - **Rendering**: PNG output with configurable module size, quiet zone and
//!   colours, plus a `data:` URI for inline display
//!
//! ## Quick Start
//!
//! ```rust
//! use qrforge::input::{ContentKind, ContentRequest};
//! use qrforge::{encode, SymbolParameters};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ContentRequest::new(ContentKind::Sms)
//!     .field("sms_phone", "5551234")
//!     .field("sms_message", "On my way");
//! let payload = request.normalize()?;
//! assert_eq!(payload.as_str(), Some("smsto:5551234:On my way"));
//!
//! let img = encode(&payload, &SymbolParameters::default())?;
//! let html_src = img.to_data_uri();
//! assert!(html_src.starts_with("data:image/png;base64,"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Building the grid directly
//!
//! ```rust
//! use qrforge::{ECLevel, MaskPattern, QRBuilder, Rgb, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"HELLO WORLD")
//!     .min_version(Version::new(2)?)        // Smallest version to consider
//!     .ec_level(ECLevel::Q)                 // Defaults to ECLevel::L
//!     .mask(MaskPattern::new(3)?)           // Defaults to the lowest penalty mask
//!     .build()?;
//!
//! let img = qr.render(4, 4, Rgb::BLACK, Rgb::WHITE)?;
//! assert_eq!(img.width(), (25 + 8) * 4);
//! println!("{}", qr.to_str(1, 2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod config;
pub mod encoder;
pub mod error;
pub mod input;

pub use builder::{QRBuilder, QR};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use config::{Rgb, SymbolParameters, SymbolParametersBuilder};
pub use encoder::{encode, EncodedImage};
pub use error::{EncodingError, EncodingResult, ValidationError};
pub use input::{normalize, ContentKind, ContentRequest, NormalizedPayload, UploadedFile};
