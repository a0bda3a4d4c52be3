//! Catalog of tape profiles understood by the supported printer families.
//!
//! Profile values come from the Brother raster command references for the
//! QL-600/710/720, QL-800, TD-2000 and TD-4000 families. A profile is keyed
//! by the pixel count across the tape and the head resolution; where two
//! rolls share a pixel count the first catalog entry wins.

use log::info;

use crate::error::Error;
use crate::raster::Orientation;
use crate::MAX_PRINT_LENGTH;

/// Physical description of one tape roll on one printer class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeProfile {
    /// Tape width in millimeters, as sent in the print information command.
    pub width_mm: u8,
    /// Pixel count across the tape width that raster lines must cover.
    pub raster_pixels: u32,
    /// Print head resolution class.
    pub dpi: u16,
    /// Worst-case byte count of one line after run-length packing.
    pub compressed_line_size: usize,
    /// Non-printable leading/trailing feed, in dots.
    pub min_margin: u16,
    /// Shortest printable label, in dots along the feed axis.
    pub min_print_length: u32,
}

const fn profile(
    width_mm: u8,
    raster_pixels: u32,
    dpi: u16,
    min_margin: u16,
    min_print_length: u32,
) -> TapeProfile {
    let line_size = ((raster_pixels + 7) / 8) as usize;
    TapeProfile {
        width_mm,
        raster_pixels,
        dpi,
        // One control byte per started 128-byte run in the worst case.
        compressed_line_size: line_size + (line_size + 127) / 128,
        min_margin,
        min_print_length,
    }
}

/// Every tape the converter can target, in resolution precedence order.
pub static CATALOG: [TapeProfile; 18] = [
    // QL-7xx, 300 dpi
    profile(12, 142, 300, 35, 150),
    profile(29, 342, 300, 35, 150),
    profile(38, 449, 300, 35, 150),
    profile(50, 590, 300, 35, 150),
    profile(54, 636, 300, 35, 150),
    profile(62, 732, 300, 35, 150),
    // TL-2xxx
    profile(57, 675, 300, 35, 142),
    profile(58, 685, 300, 35, 142),
    profile(57, 457, 203, 24, 96),
    profile(58, 464, 203, 24, 96),
    // TD-4xxx
    profile(58, 685, 300, 35, 142),
    profile(76, 897, 300, 35, 142),
    profile(90, 1063, 300, 35, 142),
    profile(102, 1200, 300, 35, 142),
    profile(58, 464, 203, 24, 96),
    profile(76, 607, 203, 24, 96),
    profile(90, 719, 203, 24, 96),
    profile(102, 812, 203, 24, 96),
];

/// Outcome of matching an image against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub profile: &'static TapeProfile,
    pub orientation: Orientation,
    /// Line count along the feed axis before margin/length normalization.
    pub print_length: u32,
}

impl TapeProfile {
    /// Byte count of one uncompressed raster line.
    pub fn line_size(&self) -> usize {
        ((self.raster_pixels + 7) / 8) as usize
    }

    /// Match image dimensions against the catalog.
    ///
    /// The image height is tried first (top edge feeds first); if no tape
    /// has that pixel count the width is tried with the image rotated so
    /// its left edge feeds first. The feed axis is whichever dimension is
    /// left over and may not exceed [`MAX_PRINT_LENGTH`].
    pub fn resolve(width: u32, height: u32) -> Result<Resolution, Error> {
        let (profile, orientation, print_length) = CATALOG
            .iter()
            .find(|t| t.raster_pixels == height)
            .map(|t| (t, Orientation::TopEdgeFirst, width))
            .or_else(|| {
                CATALOG
                    .iter()
                    .find(|t| t.raster_pixels == width)
                    .map(|t| (t, Orientation::LeftEdgeFirst, height))
            })
            .ok_or(Error::UnsupportedDimensions { width, height })?;

        if print_length > MAX_PRINT_LENGTH {
            return Err(Error::ImageTooLong {
                length: print_length,
            });
        }

        info!(
            "matched {} mm tape at {} dpi, {:?}, {} lines",
            profile.width_mm, profile.dpi, orientation, print_length
        );

        Ok(Resolution {
            profile,
            orientation,
            print_length,
        })
    }
}

/// One line per catalog entry, used in the no-match error message.
pub fn catalog_summary() -> String {
    let mut out = String::from("supported image dimensions:");
    for t in &CATALOG {
        out.push_str(&format!(
            "\n  {} mm wide tape, {} dpi printer: {} px across the tape",
            t.width_mm, t.dpi, t.raster_pixels
        ));
    }
    out
}
