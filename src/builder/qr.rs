use std::ops::Deref;

use image::RgbImage;

use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::*;
use crate::common::BitStream;
use crate::config::Rgb;
use crate::error::{EncodingError, EncodingResult};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) | Module::Version(c) | Module::Format(c) | Module::Data(c) => c,
        }
    }
}

/// Module grid of a single symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// Row-major dark/light view of the grid, `true` for dark.
    pub fn to_bools(&self) -> Vec<bool> {
        self.grid.iter().map(|m| **m == Color::Dark).collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        debug_assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }
}


// Function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }

    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder centered on (r, c) along with its light separator
    // on the sides facing the symbol interior
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom): (i16, i16) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right): (i16, i16) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let ring = i16::max(i.abs(), j.abs());
                let clr = Color::from(ring != 2 && ring != 4);
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }

    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for k in 8..w - 8 {
            let clr = Color::from(k & 1 == 0);
            self.set(TIMING_LINE, k, Module::Func(clr));
            self.set(k, TIMING_LINE, Module::Func(clr));
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        // Positions overlapping the three finder patterns
        if (r == 6 && (c == 6 || c == w - 7)) || (r == w - 7 && c == 6) {
            return;
        }
        for i in -2..=2_i16 {
            for j in -2..=2_i16 {
                let ring = i16::max(i.abs(), j.abs());
                self.set(r + i, c + j, Module::Func(Color::from(ring != 1)));
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        let (off, on) = (Module::Format(Color::Light), Module::Format(Color::Dark));
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_QR_SIDE);
        // Always dark
        self.set(-8, 8, Module::Format(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        let (off, on) = (Module::Version(Color::Light), Module::Version(Color::Dark));
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_BL);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_TR);
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            self.set(r, c, if number & mask == 0 { off_clr } else { on_clr });
            mask >>= 1;
        }
    }

    #[cfg(test)]
    fn read_number(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |n, &(r, c)| n << 1 | (*self.get(r, c) == Color::Dark) as u32)
    }
}

#[cfg(test)]
mod qr_information_tests {
    use crate::builder::QR;
    use crate::common::metadata::*;

    #[test]
    fn test_version_info_skipped_below_7() {
        let mut qr = QR::new(Version::new(6).unwrap(), ECLevel::L);
        qr.draw_version_info();
        assert!(qr.grid().iter().all(|m| matches!(m, crate::builder::Module::Empty)));
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_version_info();
        let dbg = qr.to_debug_str();
        let rows = dbg.trim().lines().collect::<Vec<_>>();
        let top_right = rows[..6].iter().map(|r| &r[34..37]).collect::<Vec<_>>();
        assert_eq!(top_right, ["VVv", "VvV", "VvV", "Vvv", "vvv", "VVV"]);
        assert_eq!(&rows[34][..6], "VVVVvV");
        assert_eq!(&rows[35][..6], "VvvvvV");
        assert_eq!(&rows[36][..6], "vVVvvV");
        assert_eq!(qr.read_number(&VERSION_INFO_COORDS_TR), 0x07C94);
        assert_eq!(qr.read_number(&VERSION_INFO_COORDS_BL), 0x07C94);
    }

    #[test]
    fn test_reserve_format_area() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.reserve_format_area();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             .....................\n\
             ........m............\n\
             mmmmmm.mm....mmmmmmmm\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n"
        );
    }

    #[test]
    fn test_format_info_copies_match() {
        let mut qr = QR::new(Version::MIN, ECLevel::Q);
        qr.draw_format_info(format_info_qr(ECLevel::Q, 3));
        assert_eq!(qr.read_number(&FORMAT_INFO_COORDS_QR_MAIN), 0x3A06);
        assert_eq!(qr.read_number(&FORMAT_INFO_COORDS_QR_SIDE), 0x3A06);
        assert_eq!(*qr.get(-8, 8), Color::Dark);
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Reserves format and version areas, then places `payload` along the
    /// zig-zag path. Modules left over after the payload become light data
    /// modules.
    pub fn draw_encoding_region(&mut self, payload: BitStream) {
        self.reserve_format_area();
        self.draw_version_info();

        let mut coords = EncRegionIter::new(self.ver);
        for bit in payload {
            let module = Module::Data(Color::from(bit));
            for (r, c) in coords.by_ref() {
                if matches!(self.get(r, c), Module::Empty) {
                    self.set(r, c, module);
                    break;
                }
            }
        }
        self.fill_remainder_bits(coords);

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module left after placement");
    }

    fn fill_remainder_bits(&mut self, coords: impl Iterator<Item = (i16, i16)>) {
        for (r, c) in coords {
            if matches!(self.get(r, c), Module::Empty) {
                self.set(r, c, Module::Data(Color::Light));
            }
        }
    }

    /// XORs the data modules with `pattern` and writes the matching format info.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_functions();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if let Module::Data(clr) = self.get(r, c) {
                    if mask_fn(r, c) {
                        self.set(r, c, Module::Data(!clr));
                    }
                }
            }
        }
        self.draw_format_info(format_info_qr(self.ecl, *pattern));
    }
}


// Render
//------------------------------------------------------------------------------

impl QR {
    /// Rasterizes the grid, `module_sz` pixels per module and a quiet zone of
    /// `border` modules on every side.
    pub fn render(&self, module_sz: u32, border: u32, dark: Rgb, light: Rgb) -> EncodingResult<RgbImage> {
        let side = raster_side(self.w, module_sz, border)?;
        let qz_sz = border * module_sz;
        let qr_sz = self.w as u32 * module_sz;

        let canvas = RgbImage::from_fn(side, side, |x, y| {
            let in_symbol = (qz_sz..qz_sz + qr_sz).contains(&x) && (qz_sz..qz_sz + qr_sz).contains(&y);
            if !in_symbol {
                return image::Rgb(light.0);
            }
            let r = ((y - qz_sz) / module_sz) as i16;
            let c = ((x - qz_sz) / module_sz) as i16;
            image::Rgb(self.get(r, c).select(light.0, dark.0))
        });

        Ok(canvas)
    }

    /// Text preview for terminals with a dark background: light modules are
    /// drawn as full blocks.
    pub fn to_str(&self, module_sz: usize, border: usize) -> String {
        let qz_sz = border * module_sz;
        let qr_sz = self.w * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.push(self.get(r, c).select('█', ' '));
            }
            canvas.push('\n');
        }

        canvas
    }
}

/// Pixel side of a symbol `width` modules wide once rendered. At most
/// [`MAX_RASTER_SIDE`] so the RGB buffer stays under 192 MiB.
pub(crate) fn raster_side(width: usize, module_sz: u32, border: u32) -> EncodingResult<u32> {
    if module_sz == 0 {
        return Err(EncodingError::InvalidModuleSize(module_sz));
    }
    let side = (width as u64 + 2 * border as u64).saturating_mul(module_sz as u64);
    if side > MAX_RASTER_SIDE as u64 {
        return Err(EncodingError::RasterTooLarge { side, max: MAX_RASTER_SIDE });
    }
    Ok(side as u32)
}

#[cfg(test)]
mod render_tests {
    use super::raster_side;
    use crate::builder::{Module, QR};
    use crate::common::metadata::{Color, ECLevel, Version};
    use crate::config::Rgb;
    use crate::error::EncodingError;

    #[test]
    fn test_render_dimensions_and_colors() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.draw_all_function_patterns();
        let img = qr.render(3, 2, Rgb::BLACK, Rgb::WHITE).unwrap();
        assert_eq!(img.dimensions(), (75, 75));
        // Quiet zone
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255]);
        // Top-left finder corner, module (0, 0)
        assert_eq!(img.get_pixel(6, 6).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(8, 8).0, [0, 0, 0]);
        // Module (1, 1) is inside the light ring
        assert_eq!(img.get_pixel(9, 9).0, [255, 255, 255]);
    }

    #[test]
    fn test_render_custom_palette() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.set(0, 0, Module::Data(Color::Dark));
        let fg = Rgb([10, 20, 30]);
        let bg = Rgb([200, 210, 220]);
        let img = qr.render(1, 0, fg, bg).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, fg.0);
        assert_eq!(img.get_pixel(1, 0).0, bg.0);
    }

    #[test]
    fn test_raster_side_limits() {
        assert_eq!(raster_side(21, 10, 4).unwrap(), 290);
        assert!(matches!(raster_side(21, 0, 4), Err(EncodingError::InvalidModuleSize(0))));
        assert!(matches!(
            raster_side(177, u32::MAX, 0),
            Err(EncodingError::RasterTooLarge { .. })
        ));
        assert!(matches!(
            raster_side(185, 20_000, 4),
            Err(EncodingError::RasterTooLarge { side: 3_700_000, max: 8192 })
        ));
        assert_eq!(raster_side(8192, 1, 0).unwrap(), 8192);
        assert!(raster_side(8193, 1, 0).is_err());
    }

    #[test]
    fn test_render_rejects_oversized_raster() {
        let qr = QR::new(Version::MIN, ECLevel::L);
        let res = qr.render(1000, 4, Rgb::BLACK, Rgb::WHITE);
        assert!(matches!(res, Err(EncodingError::RasterTooLarge { side: 29_000, .. })));
    }

    #[test]
    fn test_to_str() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.draw_all_function_patterns();
        let s = qr.to_str(1, 1);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 23);
        assert!(lines[0].chars().all(|c| c == '█'));
        assert_eq!(lines[1].chars().nth(1), Some(' '));
        assert_eq!(lines[1].chars().count(), 23);
    }
}

// Global constants
//------------------------------------------------------------------------------

const TIMING_LINE: i16 = 6;

/// Largest rendered side in pixels, quiet zone included.
pub(crate) const MAX_RASTER_SIDE: u32 = 8192;
