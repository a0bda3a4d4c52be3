//! Raster file builder for Brother label printers.
//!
//! This crate turns a decoded image into the raw ESC/i raster command
//! stream that Brother QL/TL/TD series printers accept over their
//! mass-storage channel, with no driver involved. The image must span a
//! cataloged tape width in pixels on one of its axes; the other axis
//! becomes the feed direction.
//!
//! # Example
//!
//! ```rust,no_run
//! use ql_raster::{convert, Compression};
//!
//! let image = image::open("label.png").unwrap().to_rgb8();
//! let job = convert(&image, Compression::Tiff).unwrap();
//! std::fs::write("label.bin", &job).unwrap();
//! ```

mod command;
mod error;
mod media;
mod normalize;
mod raster;
mod tiff;

pub use crate::{
    command::{frame, Compression},
    error::Error,
    media::{catalog_summary, Resolution, TapeProfile, CATALOG},
    normalize::normalize,
    raster::{rasterize, Orientation, PixelSource, RasterLine},
    tiff::{pack, unpack, EncodedLine, ZERO_LINE},
};

use image::RgbImage;

/// Longest printable feed axis in dots (1000 mm at 203 dpi).
///
/// Some printers accept more, but the whole family accepts this.
pub const MAX_PRINT_LENGTH: u32 = 7992;

/// Convert a decoded image into a complete print job.
///
/// Resolves the tape profile from the image dimensions, rasterizes along
/// the feed axis, trims blank margins and pads to the minimum printable
/// length, then frames everything into the command buffer to be written
/// to the printer's mass-storage drive.
pub fn convert(image: &RgbImage, mode: Compression) -> Result<Vec<u8>, Error> {
    let resolution = TapeProfile::resolve(image.width(), image.height())?;
    let source = PixelSource::new(image, resolution.orientation);
    let lines = rasterize(&source, resolution.profile, resolution.print_length);
    let lines = normalize(lines, resolution.profile);
    Ok(frame(resolution.profile, &lines, mode))
}
