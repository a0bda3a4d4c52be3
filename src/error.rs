//! Error types for the image to raster-file conversion.

use thiserror::Error;

use crate::media;
use crate::MAX_PRINT_LENGTH;

/// Main error type for a conversion run.
///
/// Any of these is fatal; advisory conditions such as retained margin
/// pixels or minimum-length padding are reported through the log instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be decoded as an image.
    ///
    /// Propagated unchanged from the image decoder.
    #[error(transparent)]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Neither image axis matches the raster pixel count of any
    /// cataloged tape, so there is no profile to print with.
    #[error(
        "image of {width}x{height} px does not fit any supported tape\n{}",
        media::catalog_summary()
    )]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("image is {length} dots along the feed axis, at most {} are printable", MAX_PRINT_LENGTH)]
    ImageTooLong { length: u32 },
}
