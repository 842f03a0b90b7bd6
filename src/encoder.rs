//! Payload to PNG.
//!
//! [`encode`] runs the full pipeline (mode selection, version fitting, error
//! correction, placement, masking) through [`QRBuilder`] and rasterizes the
//! masked grid into an in-memory PNG.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use tracing::debug;

use crate::builder::{QRBuilder, QR};
use crate::common::mask::MaskPattern;
use crate::common::metadata::{ECLevel, Version};
use crate::config::SymbolParameters;
use crate::error::EncodingResult;

/// A rendered symbol, PNG encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    png: Vec<u8>,
    symbol: QR,
    mask: MaskPattern,
    width: u32,
}

impl EncodedImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Reader over the PNG bytes, positioned at the start.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.png.as_slice())
    }

    pub fn mime_type(&self) -> &'static str {
        PNG_MIME_TYPE
    }

    /// `data:image/png;base64,...` URI for inline display.
    pub fn to_data_uri(&self) -> String {
        format!("data:{PNG_MIME_TYPE};base64,{}", STANDARD.encode(&self.png))
    }

    /// The masked module grid the PNG was rendered from.
    pub fn symbol(&self) -> &QR {
        &self.symbol
    }

    pub fn version(&self) -> Version {
        self.symbol.version()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.symbol.ec_level()
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Side of the square image in pixels, quiet zone included.
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl AsRef<[u8]> for EncodedImage {
    fn as_ref(&self) -> &[u8] {
        &self.png
    }
}

/// Encodes `payload` as a QR symbol and renders it to PNG.
///
/// Fails with [`EncodingError::EmptyData`](crate::EncodingError::EmptyData) for an empty payload and with
/// [`EncodingError::DataTooLong`](crate::EncodingError::DataTooLong) when no version up to 40 holds it at the
/// requested error correction level.
///
/// ```rust
/// use qrforge::{encode, SymbolParameters};
///
/// let img = encode("https://example.com", &SymbolParameters::default()).unwrap();
/// assert_eq!(img.mime_type(), "image/png");
/// assert_eq!(img.width(), (21 + 2 * 4) * 10);
/// ```
pub fn encode(payload: impl AsRef<[u8]>, params: &SymbolParameters) -> EncodingResult<EncodedImage> {
    params.validate()?;
    let data = payload.as_ref();

    let (qr, mask) = QRBuilder::new(data)
        .min_version(params.version()?)
        .ec_level(params.ec_level)
        .build_masked()?;

    let img = qr.render(params.module_size, params.border, params.foreground, params.background)?;
    let width = img.width();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    debug!("Rendered {width}x{width} px symbol into {} PNG bytes", png.len());

    Ok(EncodedImage { png, symbol: qr, mask, width })
}

#[cfg(test)]
mod encoder_tests {
    use std::io::Read;

    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use super::encode;
    use crate::common::metadata::ECLevel;
    use crate::config::SymbolParameters;
    use crate::error::EncodingError;

    #[test]
    fn test_png_signature_and_size() {
        let img = encode("hello", &SymbolParameters::default()).unwrap();
        assert_eq!(&img.as_bytes()[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(img.width(), 290);
        assert_eq!(*img.version(), 1);
        assert_eq!(img.ec_level(), ECLevel::L);

        let decoded = image::load_from_memory(img.as_bytes()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (290, 290));
    }

    #[test]
    fn test_reader_starts_at_zero() {
        let img = encode(b"12345", &SymbolParameters::default()).unwrap();
        let mut buf = Vec::new();
        img.reader().read_to_end(&mut buf).unwrap();
        assert_eq!(buf, img.as_bytes());
        assert_eq!(img.clone().into_bytes(), buf);
    }

    #[test]
    fn test_symbol_matches_png() {
        let params = SymbolParameters { module_size: 1, border: 0, ..Default::default() };
        let img = encode("HELLO WORLD", &params).unwrap();
        let qr = img.symbol();
        assert_eq!(qr.mask(), Some(img.mask()));
        assert_eq!(qr.width() as u32, img.width());

        let luma = image::load_from_memory(img.as_bytes()).unwrap().to_luma8();
        let dark = luma.pixels().map(|p| p.0[0] == 0).collect::<Vec<_>>();
        assert_eq!(dark, qr.to_bools());
    }

    #[test]
    fn test_data_uri() {
        let img = encode("tel:5551234", &SymbolParameters::default()).unwrap();
        let uri = img.to_data_uri();
        let b64 = uri.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(b64).unwrap(), img.as_bytes());
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let params = SymbolParameters { module_size: 0, ..Default::default() };
        assert!(matches!(encode("x", &params), Err(EncodingError::InvalidModuleSize(0))));
        let params = SymbolParameters { min_version: 41, ..Default::default() };
        assert!(matches!(encode("x", &params), Err(EncodingError::InvalidVersion(41))));
    }

    #[test]
    fn test_large_symbol_over_raster_limit() {
        let params = SymbolParameters { module_size: 100, ..Default::default() };
        assert!(encode("tel:5551234", &params).is_ok());
        // Version 40 at 100 px per module
        let res = encode("a".repeat(2953), &params);
        assert!(matches!(res, Err(EncodingError::RasterTooLarge { side: 18_500, max: 8192 })));
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(encode("", &SymbolParameters::default()), Err(EncodingError::EmptyData)));
    }
}

// Global constants
//------------------------------------------------------------------------------

const PNG_MIME_TYPE: &str = "image/png";
