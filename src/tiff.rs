//! TIFF PackBits style run-length packing of raster lines.
//!
//! A packed line alternates control bytes and data: a negative control `c`
//! repeats the next byte `1 - c` times, a non-negative control `c` is
//! followed by `c + 1` literal bytes. Runs are capped at 128 either way. A
//! line that packs down to a single zero-valued repeat run is replaced by
//! the one-byte zero-line command.

use crate::raster::RasterLine;

/// Raster command for a line with no dots set ("Z" in the protocol).
pub const ZERO_LINE: u8 = 0x5A;

/// A run-length packed line, or the single-byte zero-line command.
///
/// Deliberately a distinct type from [`RasterLine`] so packed and raw
/// bytes cannot be mixed up on the way into the framer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLine(Vec<u8>);

impl EncodedLine {
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

/// Pack one raster line.
///
/// The scan is greedy left to right: a repeat run needs at least two
/// identical bytes, a literal run ends as soon as the two bytes ahead of
/// it repeat, both stop at 128 bytes. The zero-line collapse applies only
/// when the packed form is exactly one repeat run of `0x00`; an all-zero
/// line long enough to need two runs keeps its token form.
pub fn pack(line: &RasterLine) -> EncodedLine {
    let data = line.as_bytes();
    let mut packed: Vec<u8> = Vec::with_capacity(data.len() + 2);
    let mut i = 0;

    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && run < 128 && data[i + run] == data[i] {
            run += 1;
        }

        if run >= 2 {
            packed.push((1 - run as i16) as i8 as u8);
            packed.push(data[i]);
            i += run;
        } else {
            let mut literal = 1;
            while i + literal < data.len()
                && literal < 128
                && !(i + literal + 1 < data.len()
                    && data[i + literal] == data[i + literal + 1])
            {
                literal += 1;
            }

            packed.push((literal - 1) as u8);
            packed.extend_from_slice(&data[i..i + literal]);
            i += literal;
        }
    }

    if packed.len() == 2 && packed[1] == 0x00 {
        return EncodedLine(vec![ZERO_LINE]);
    }
    EncodedLine(packed)
}

/// Expand a packed line back to `line_size` raw bytes.
///
/// Inverse of [`pack`], used to verify the round-trip.
pub fn unpack(line: &EncodedLine, line_size: usize) -> RasterLine {
    let data = line.as_bytes();
    if data.len() == 1 && data[0] == ZERO_LINE {
        return RasterLine::blank(line_size);
    }

    let mut raw: Vec<u8> = Vec::with_capacity(line_size);
    let mut i = 0;
    while i < data.len() {
        let control = data[i] as i8;
        if control < 0 {
            let count = (1 - i32::from(control)) as usize;
            raw.extend(std::iter::repeat(data[i + 1]).take(count));
            i += 2;
        } else {
            let count = control as usize + 1;
            raw.extend_from_slice(&data[i + 1..i + 1 + count]);
            i += 1 + count;
        }
    }
    RasterLine::from(raw)
}
