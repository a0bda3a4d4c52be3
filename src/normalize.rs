//! Margin trimming and minimum-length padding of the line sequence.
//!
//! The printer adds `min_margin` dots of unprintable feed before and after
//! the job, so blank lines at the ends of the image can be given away to
//! that margin; non-blank lines are never dropped. Jobs shorter than the
//! mechanism can cut are padded back out with blank lines.

use log::{info, warn};

use crate::media::TapeProfile;
use crate::raster::RasterLine;

/// Trim blank edge lines into the margin budget, then pad to the minimum
/// printable length.
///
/// Advisory conditions (margin content kept, padding applied) go to the
/// log; this step cannot fail.
pub fn normalize(mut lines: Vec<RasterLine>, profile: &TapeProfile) -> Vec<RasterLine> {
    let trimmed = trim_margins(&mut lines, profile);
    pad_to_minimum(&mut lines, profile);

    if trimmed > 0 {
        info!(
            "gave {} blank line pairs to the {} dot feed margin",
            trimmed, profile.min_margin
        );
    }
    lines
}

fn trim_margins(lines: &mut Vec<RasterLine>, profile: &TapeProfile) -> u16 {
    let mut trimmed: u16 = 0;
    while trimmed < profile.min_margin
        && lines.len() - 2 * trimmed as usize >= 2
        && lines[trimmed as usize].is_blank()
        && lines[lines.len() - 1 - trimmed as usize].is_blank()
    {
        trimmed += 1;
    }

    if trimmed > 0 {
        let keep = lines.len() - trimmed as usize;
        lines.truncate(keep);
        lines.drain(..trimmed as usize);
    }

    if trimmed < profile.min_margin
        && lines
            .first()
            .zip(lines.last())
            .map_or(false, |(first, last)| !first.is_blank() || !last.is_blank())
    {
        warn!(
            "non-blank pixels reach into the {} dot feed margin and were kept",
            profile.min_margin
        );
    }

    trimmed
}

fn pad_to_minimum(lines: &mut Vec<RasterLine>, profile: &TapeProfile) {
    let minimum = profile.min_print_length as usize;
    if lines.len() >= minimum {
        return;
    }

    let deficit = minimum - lines.len();
    let front = deficit - deficit / 2;
    let line_size = profile.line_size();

    let mut padded: Vec<RasterLine> = Vec::with_capacity(minimum);
    padded.extend((0..front).map(|_| RasterLine::blank(line_size)));
    padded.append(lines);
    padded.extend((0..deficit - front).map(|_| RasterLine::blank(line_size)));
    *lines = padded;

    info!(
        "padded with {} blank lines to reach the {} dot minimum length",
        deficit, minimum
    );
}
