mod ec;
mod qr;

pub use qr::{Module, QR};
pub(crate) use qr::raster_side;

use tracing::debug;

use crate::common::{
    codec::encode,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};
use crate::error::EncodingResult;

/// Builds a masked [`QR`] grid from raw bytes.
///
/// ```
/// use qrforge::{ECLevel, QRBuilder, Version};
///
/// let qr = QRBuilder::new(b"HELLO WORLD").ec_level(ECLevel::M).build().unwrap();
/// assert_eq!(qr.version(), Version::MIN);
/// ```
pub struct QRBuilder<'a> {
    data: &'a [u8],
    min_version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, min_version: Version::MIN, ec_level: ECLevel::L, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Smallest version to consider. Larger versions are still chosen when
    /// the data does not fit.
    pub fn min_version(&mut self, version: Version) -> &mut Self {
        self.min_version = version;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Forces a mask pattern instead of picking the lowest penalty one.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => format!(
                "{{ Min version: {}, Ec level: {:?}, Mask: {} }}",
                *self.min_version, self.ec_level, *m
            ),
            None => format!(
                "{{ Min version: {}, Ec level: {:?}, Mask: Auto }}",
                *self.min_version, self.ec_level
            ),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> EncodingResult<QR> {
        self.build_masked().map(|(qr, _)| qr)
    }

    /// Like [`QRBuilder::build`], also returning the applied mask.
    pub fn build_masked(&self) -> EncodingResult<(QR, MaskPattern)> {
        debug!("Generating QR {}", self.metadata());

        // Data codewords of the smallest fitting version
        let (encoded_data, version) = encode(self.data, self.ec_level, self.min_version)?;

        // Error correction & interleaving
        let total_codewords = version.total_codewords();
        let (data_blocks, ecc_blocks) = ec::compute_ecc(encoded_data.data(), version, self.ec_level);
        let mut payload = BitStream::new(total_codewords << 3);
        payload.extend(&ec::interleave(&data_blocks));
        payload.extend(&ec::interleave(&ecc_blocks));

        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "QR generated: version {}, mask {}, {} data bytes in {} codewords, {}% dark",
            *version,
            *mask,
            self.data.len(),
            total_codewords,
            dark_modules * 100 / total_modules
        );

        Ok((qr, mask))
    }
}
