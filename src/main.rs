use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use ql_raster::{
    frame, normalize, rasterize, Compression, Error, PixelSource, TapeProfile,
};

/// Convert an image into a raw raster file for Brother QL/TL/TD label
/// printers.
///
/// The image must be as many pixels across the tape as the target roll
/// requires on its height or width axis; run with an arbitrary image to
/// get the list of supported dimensions.
#[derive(Parser, Debug)]
#[command(name = "convert", version)]
struct Args {
    /// Raster compression: -c0 none (default), -c1 TIFF run-length.
    #[arg(short = 'c', default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    compression: u8,

    /// Input image, any format the decoder supports.
    input: PathBuf,

    /// Output raster command file.
    output: PathBuf,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let image = image::open(&args.input)?.to_rgb8();
    let resolution = TapeProfile::resolve(image.width(), image.height())?;
    let profile = resolution.profile;

    let source = PixelSource::new(&image, resolution.orientation);
    let lines = rasterize(&source, profile, resolution.print_length);
    let lines = normalize(lines, profile);

    let mode = match args.compression {
        1 => Compression::Tiff,
        _ => Compression::None,
    };
    let job = frame(profile, &lines, mode);
    fs::write(&args.output, &job)?;

    let print_mm = (lines.len() as u32 + 2 * u32::from(profile.min_margin)) as f64
        / f64::from(profile.dpi)
        * 25.4;
    println!(
        "Wrote raster file for Brother label printer to {}",
        args.output.display()
    );
    println!(
        "> Continuous length tape {} mm, print length {:.1} mm ({} dpi).",
        profile.width_mm, print_mm, profile.dpi
    );
    println!(
        "> Image {} x {} px, tape print {} x {} px.",
        image.width(),
        image.height(),
        lines.len(),
        profile.raster_pixels
    );
    println!("(Hold the print/function button with power until the LEDs light up,");
    println!(" copy the file onto the mass storage drive, then press it again.)");

    Ok(())
}
