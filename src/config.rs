//! Symbol parameters.
//!
//! [`SymbolParameters`] carries every knob of [`crate::encode`]. It can be
//! built in code through [`SymbolParameters::builder()`] or deserialized from
//! a partial document, in which case missing fields take their defaults:
//!
//! ```rust
//! use qrforge::{ECLevel, SymbolParameters};
//!
//! let params = SymbolParameters::builder()
//!     .ec_level(ECLevel::H)
//!     .module_size(4)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.border, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::builder::raster_side;
use crate::common::metadata::{ECLevel, Version};
use crate::error::EncodingResult;

/// 8-bit RGB colour of a module or of the quiet zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);
}

/// Parameters of a rendered symbol.
///
/// Built via [`SymbolParameters::builder()`] or [`SymbolParameters::default()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolParameters {
    /// Error correction level. Default: [`ECLevel::L`].
    pub ec_level: ECLevel,

    /// Side of one module in pixels. Must be at least 1. Default: 10.
    pub module_size: u32,

    /// Width of the quiet zone in modules. Default: 4.
    ///
    /// Readers expect at least 4; smaller values are accepted for embedding
    /// the symbol in a layout that already provides the margin.
    pub border: u32,

    /// Smallest version to use, 1 to 40. Default: 1.
    pub min_version: u8,

    /// Colour of dark modules. Default: black.
    pub foreground: Rgb,

    /// Colour of light modules and the quiet zone. Default: white.
    pub background: Rgb,
}

impl Default for SymbolParameters {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::L,
            module_size: 10,
            border: 4,
            min_version: 1,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }
}

impl SymbolParameters {
    pub fn builder() -> SymbolParametersBuilder {
        SymbolParametersBuilder { params: Self::default() }
    }

    /// Checks module size and minimum version, and that the smallest symbol
    /// these parameters could produce stays within the raster size limit.
    /// Larger versions are checked again when rendered.
    pub fn validate(&self) -> EncodingResult<()> {
        let min_version = Version::new(self.min_version)?;
        raster_side(min_version.width(), self.module_size, self.border)?;
        Ok(())
    }

    pub(crate) fn version(&self) -> EncodingResult<Version> {
        Version::new(self.min_version)
    }
}

/// Builder for [`SymbolParameters`].
#[derive(Debug)]
pub struct SymbolParametersBuilder {
    params: SymbolParameters,
}

impl SymbolParametersBuilder {
    pub fn ec_level(mut self, ec_level: ECLevel) -> Self {
        self.params.ec_level = ec_level;
        self
    }

    pub fn module_size(mut self, px: u32) -> Self {
        self.params.module_size = px;
        self
    }

    pub fn border(mut self, modules: u32) -> Self {
        self.params.border = modules;
        self
    }

    pub fn min_version(mut self, version: u8) -> Self {
        self.params.min_version = version;
        self
    }

    pub fn foreground(mut self, color: Rgb) -> Self {
        self.params.foreground = color;
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.params.background = color;
        self
    }

    pub fn build(self) -> EncodingResult<SymbolParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}
