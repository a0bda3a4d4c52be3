//! End-to-end conversion scenarios over in-memory images.

use image::{Rgb, RgbImage};
use ql_raster::{convert, pack, unpack, Compression, RasterLine, ZERO_LINE};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Byte offset of the compression mode record in every job.
const MODE_AT: usize = 36;
/// Byte offset of the first raster line record.
const LINES_AT: usize = 38;
const TRAILER: [u8; 5] = [0x1A, 0x1B, 0x69, 0x61, 0xFF];

#[test]
fn black_label_uncompressed() {
    // 342 px across the tape picks the 29 mm / 300 dpi roll with the top
    // edge feeding first; 2000 dots of feed, nothing to trim or pad.
    let image = RgbImage::from_pixel(2000, 342, BLACK);
    let job = convert(&image, Compression::None).unwrap();

    assert_eq!(&job[13..17], &2000u32.to_le_bytes());
    assert_eq!(job[11], 29); // tape width in mm
    assert_eq!(&job[MODE_AT..LINES_AT], &[0x4D, 0x00]);
    assert_eq!(job.len(), LINES_AT + 2000 * (3 + 43) + TRAILER.len());

    // Every record: g header, then 342 set dots = 42 full bytes plus six
    // bits, pad bits clear.
    let mut expected_line = vec![0x67, 0x00, 43];
    expected_line.extend_from_slice(&[0xFF; 42]);
    expected_line.push(0xFC);
    for record in job[LINES_AT..job.len() - TRAILER.len()].chunks(3 + 43) {
        assert_eq!(record, expected_line.as_slice());
    }
    assert_eq!(&job[job.len() - TRAILER.len()..], &TRAILER);
}

#[test]
fn black_label_tiff() {
    let image = RgbImage::from_pixel(2000, 342, BLACK);
    let job = convert(&image, Compression::Tiff).unwrap();

    assert_eq!(&job[MODE_AT..LINES_AT], &[0x4D, 0x02]);
    // Each line: a 42-byte 0xFF run (control 1 - 42 = -41) and the
    // literal 0xFC tail.
    let expected_record = [0x67, 0x00, 0x04, 0xD7, 0xFF, 0x00, 0xFC];
    assert_eq!(job.len(), LINES_AT + 2000 * expected_record.len() + TRAILER.len());
    for record in job[LINES_AT..job.len() - TRAILER.len()].chunks(7) {
        assert_eq!(record, expected_record);
    }
}

#[test]
fn white_label_trims_and_pads_to_minimum() {
    // 142 px across picks the 12 mm roll (minimum length 150 dots). All
    // 80 lines are blank: 35 pairs go to the margin budget, the 10 left
    // are padded back out to exactly 150.
    let image = RgbImage::from_pixel(80, 142, WHITE);
    let job = convert(&image, Compression::None).unwrap();

    assert_eq!(&job[13..17], &150u32.to_le_bytes());
    assert_eq!(job[11], 12);
    assert_eq!(job.len(), LINES_AT + 150 * (3 + 18) + TRAILER.len());
    for record in job[LINES_AT..job.len() - TRAILER.len()].chunks(3 + 18) {
        assert_eq!(&record[..3], &[0x67, 0x00, 18]);
        assert!(record[3..].iter().all(|&b| b == 0x00));
    }
}

#[test]
fn white_label_tiff_uses_zero_line_records() {
    let image = RgbImage::from_pixel(80, 142, WHITE);
    let job = convert(&image, Compression::Tiff).unwrap();

    assert_eq!(&job[13..17], &150u32.to_le_bytes());
    assert_eq!(job.len(), LINES_AT + 150 * 4 + TRAILER.len());
    for record in job[LINES_AT..job.len() - TRAILER.len()].chunks(4) {
        assert_eq!(record, [0x67, 0x00, 0x01, ZERO_LINE]);
    }
}

#[test]
fn rotated_label_feeds_left_edge_first() {
    // Only the width matches a tape, so the image is rotated; the
    // bottom-left image pixel becomes the first dot of the first line.
    let mut image = RgbImage::from_pixel(342, 500, WHITE);
    image.put_pixel(0, 499, BLACK);
    let job = convert(&image, Compression::None).unwrap();

    // Ink on the first line pins the blank tail, so nothing is trimmed.
    assert_eq!(&job[13..17], &500u32.to_le_bytes());
    assert_eq!(job[11], 29);
    assert_eq!(job[LINES_AT + 3], 0x80);
    assert!(job[LINES_AT + 4..LINES_AT + 3 + 43].iter().all(|&b| b == 0x00));
}

#[test]
fn oversize_and_unknown_dimensions_are_rejected() {
    let too_long = RgbImage::from_pixel(7993, 342, WHITE);
    assert!(convert(&too_long, Compression::None).is_err());

    let unknown = RgbImage::from_pixel(640, 480, WHITE);
    let err = convert(&unknown, Compression::None).unwrap_err();
    assert!(err.to_string().contains("supported image dimensions"));
}

#[test]
fn packed_lines_round_trip_through_the_codec() {
    let mut image = RgbImage::from_pixel(600, 732, WHITE);
    for x in 0..600 {
        for y in 0..732 {
            if (x / 7 + y / 3) % 2 == 0 {
                image.put_pixel(x, y, BLACK);
            }
        }
    }

    // Rebuild the raw lines from the TIFF job and compare against the
    // uncompressed job's records.
    let raw = convert(&image, Compression::None).unwrap();
    let packed = convert(&image, Compression::Tiff).unwrap();

    let mut raw_lines: Vec<RasterLine> = Vec::new();
    for record in raw[LINES_AT..raw.len() - TRAILER.len()].chunks(3 + 92) {
        raw_lines.push(RasterLine::from(record[3..].to_vec()));
    }
    assert_eq!(raw_lines.len(), 600);

    let mut at = LINES_AT;
    for line in &raw_lines {
        assert_eq!(&packed[at..at + 2], &[0x67, 0x00]);
        let len = packed[at + 2] as usize;
        let repacked = pack(line);
        assert_eq!(repacked.as_bytes(), &packed[at + 3..at + 3 + len]);
        assert_eq!(unpack(&repacked, 92), *line);
        at += 3 + len;
    }
    assert_eq!(&packed[at..], &TRAILER);
}
