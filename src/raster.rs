//! Oriented pixel access and conversion into fixed-width raster lines.
//!
//! A raster line carries one bit per dot across the tape, packed MSB first:
//! bit 7 of byte 0 is the dot nearest the tape edge, `1` means print. Lines
//! are produced one per dot along the feed axis.

use image::{Rgb, RgbImage};

use crate::media::TapeProfile;

/// How the decoded image is fed into the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The image height spans the tape; rows feed in order.
    TopEdgeFirst,
    /// The image width spans the tape; the image is rotated so its left
    /// edge feeds first (transpose plus horizontal flip).
    LeftEdgeFirst,
}

/// Read-only oriented view over a decoded image.
///
/// Borrows the surface and never copies it; `x` runs along the feed axis,
/// `y` across the tape.
pub struct PixelSource<'a> {
    image: &'a RgbImage,
    orientation: Orientation,
}

impl<'a> PixelSource<'a> {
    pub fn new(image: &'a RgbImage, orientation: Orientation) -> Self {
        PixelSource { image, orientation }
    }

    /// Extent along the feed axis.
    pub fn width(&self) -> u32 {
        match self.orientation {
            Orientation::TopEdgeFirst => self.image.width(),
            Orientation::LeftEdgeFirst => self.image.height(),
        }
    }

    /// Extent across the tape.
    pub fn height(&self) -> u32 {
        match self.orientation {
            Orientation::TopEdgeFirst => self.image.height(),
            Orientation::LeftEdgeFirst => self.image.width(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> &Rgb<u8> {
        match self.orientation {
            Orientation::TopEdgeFirst => self.image.get_pixel(x, y),
            Orientation::LeftEdgeFirst => {
                self.image.get_pixel(y, self.image.height() - 1 - x)
            }
        }
    }
}

/// One uncompressed line of dots, exactly `line_size` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterLine(Vec<u8>);

impl RasterLine {
    /// A line with no dots set.
    pub fn blank(line_size: usize) -> Self {
        RasterLine(vec![0x00; line_size])
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&b| b == 0x00)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RasterLine {
    fn from(bytes: Vec<u8>) -> Self {
        RasterLine(bytes)
    }
}

/// Whether a pixel prints as a mark.
///
/// ITU-R BT.601 luma weights with a fixed mid-scale threshold; these are
/// part of the output contract and must not be tuned.
fn dark(pixel: &Rgb<u8>) -> bool {
    let [r, g, b] = pixel.0;
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b) < 128.0
}

/// Convert the oriented image into one raster line per feed position.
///
/// Dots past the image extent and the pad bits of the final byte stay
/// clear. Pure transform, no printer state involved.
pub fn rasterize(
    source: &PixelSource,
    profile: &TapeProfile,
    print_length: u32,
) -> Vec<RasterLine> {
    let line_size = profile.line_size();
    let span = source.height().min(profile.raster_pixels);

    (0..print_length)
        .map(|x| {
            let mut bytes = vec![0x00; line_size];
            for y in 0..span {
                if dark(source.pixel(x, y)) {
                    bytes[(y / 8) as usize] |= 1 << (7 - y % 8);
                }
            }
            RasterLine(bytes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_dark_threshold_edges() {
        assert!(dark(&Rgb([127, 127, 127])));
        assert!(!dark(&Rgb([128, 128, 128])));
        // Pure red sits well below the threshold, pure yellow above it.
        assert!(dark(&Rgb([255, 0, 0])));
        assert!(!dark(&Rgb([255, 255, 0])));
    }

    #[test]
    fn test_rasterize_top_edge_first() {
        let mut image = RgbImage::from_pixel(3, 142, WHITE);
        image.put_pixel(0, 0, BLACK); // first line, first dot
        image.put_pixel(2, 9, BLACK); // third line, dot 9

        let resolution = TapeProfile::resolve(3, 142).unwrap();
        let source = PixelSource::new(&image, resolution.orientation);
        let lines = rasterize(&source, resolution.profile, resolution.print_length);

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == 18));
        assert_eq!(lines[0].as_bytes()[0], 0x80);
        assert!(lines[1].is_blank());
        assert_eq!(lines[2].as_bytes()[1], 0x40);
    }

    #[test]
    fn test_rasterize_left_edge_first() {
        // 142 px wide forces the rotated orientation; the bottom-left
        // image corner becomes dot 0 of the first line.
        let mut image = RgbImage::from_pixel(142, 3, WHITE);
        image.put_pixel(0, 2, BLACK);

        let resolution = TapeProfile::resolve(142, 3).unwrap();
        assert_eq!(resolution.orientation, Orientation::LeftEdgeFirst);
        let source = PixelSource::new(&image, resolution.orientation);
        assert_eq!(source.width(), 3);
        assert_eq!(source.height(), 142);

        let lines = rasterize(&source, resolution.profile, resolution.print_length);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].as_bytes()[0], 0x80);
        assert!(lines[1].is_blank());
        assert!(lines[2].is_blank());
    }

    #[test]
    fn test_rasterize_pad_bits_stay_clear() {
        // 342 dots fill 42 bytes and 6 bits; the final two bits pad to a
        // byte boundary and must never be set.
        let image = RgbImage::from_pixel(4, 342, BLACK);
        let resolution = TapeProfile::resolve(4, 342).unwrap();
        let source = PixelSource::new(&image, resolution.orientation);

        let lines = rasterize(&source, resolution.profile, resolution.print_length);
        for line in &lines {
            assert_eq!(line.len(), 43);
            assert!(line.as_bytes()[..42].iter().all(|&b| b == 0xFF));
            assert_eq!(line.as_bytes()[42], 0xFC);
        }
    }
}
