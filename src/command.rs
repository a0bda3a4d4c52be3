//! Framing of raster lines into the printer's binary command stream.
//!
//! The job layout follows the Brother raster command references
//! (cv_ql600710720, cv_ql800, cv_td2000, cv_td4000): a fixed preamble of
//! ESC/i setup records, one `g` record per raster line, and a print/eject
//! trailer. Every offset here is a hardware contract; multi-byte numbers
//! are little-endian.

use bitflags::bitflags;
use log::debug;

use crate::media::TapeProfile;
use crate::raster::RasterLine;
use crate::tiff;

bitflags! {
    /// Validity flags of the ESC i z print information command.
    struct PrintInfo: u8 {
        /// Media type field is valid.
        const KIND = 0b0000_0010;
        /// Media width field is valid. Never set: the printer then skips
        /// the width compatibility check and prints on whatever is loaded.
        #[allow(dead_code)]
        const WIDTH = 0b0000_0100;
        /// Give priority to print quality.
        const QUALITY = 0b0100_0000;
        /// Printer recovery always on.
        const RECOVER = 0b1000_0000;
    }
}

/// Continuous length tape, in the ESC i z media type field.
const MEDIA_CONTINUOUS: u8 = 0x0A;

/// Per-line raster transfer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Raw lines, `line_size` bytes each.
    None,
    /// TIFF style run-length packing per line.
    Tiff,
}

impl Compression {
    fn code(self) -> u8 {
        match self {
            Compression::None => 0x00,
            Compression::Tiff => 0x02,
        }
    }
}

/// Serialize a complete print job.
///
/// `lines` must already be margin-trimmed and length-padded; every line
/// carries `profile.line_size()` bytes.
pub fn frame(profile: &TapeProfile, lines: &[RasterLine], mode: Compression) -> Vec<u8> {
    let line_size = profile.line_size();
    let mut buf: Vec<u8> = Vec::with_capacity(64 + lines.len() * (3 + line_size));

    buf.extend_from_slice(&[0x1B, 0x40]); // ESC @ : reset
    buf.extend_from_slice(&[0x1B, 0x69, 0x61, 0x01]); // ESC i a : raster command mode

    // ESC i z : print information
    buf.extend_from_slice(&[0x1B, 0x69, 0x7A]);
    buf.push((PrintInfo::RECOVER | PrintInfo::QUALITY | PrintInfo::KIND).bits());
    buf.push(MEDIA_CONTINUOUS);
    buf.push(profile.width_mm);
    buf.push(0x00); // media length, zero for continuous tape
    buf.extend_from_slice(&(lines.len() as u32).to_le_bytes());
    buf.extend_from_slice(&[0x00, 0x00]);

    buf.extend_from_slice(&[0x1B, 0x69, 0x4D, 0x40]); // ESC i M : various mode, auto cut
    buf.extend_from_slice(&[0x1B, 0x69, 0x41, 0x01]); // ESC i A : cut every label
    buf.extend_from_slice(&[0x1B, 0x69, 0x4B, 0x08]); // ESC i K : expanded mode, cut at end

    // ESC i d : feed margin in dots
    buf.extend_from_slice(&[0x1B, 0x69, 0x64]);
    buf.extend_from_slice(&profile.min_margin.to_le_bytes());

    buf.extend_from_slice(&[0x4D, mode.code()]); // M : compression mode

    match mode {
        Compression::None => {
            for line in lines {
                buf.extend_from_slice(&[0x67, 0x00, line_size as u8]);
                buf.extend_from_slice(line.as_bytes());
            }
        }
        Compression::Tiff => {
            for line in lines {
                let packed = tiff::pack(line);
                debug_assert!(packed.len() <= profile.compressed_line_size);
                buf.extend_from_slice(&[0x67, 0x00, packed.len() as u8]);
                buf.extend_from_slice(packed.as_bytes());
            }
        }
    }

    buf.push(0x1A); // Control-Z : print with feeding, eject
    buf.extend_from_slice(&[0x1B, 0x69, 0x61, 0xFF]); // ESC i a : back to default mode

    debug!("framed {} lines into {} bytes", lines.len(), buf.len());
    buf
}
