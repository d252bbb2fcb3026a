use argh::FromArgs;
use hexframe::{
    consts::{HEIGHT, WIDTH},
    ColorMatch, Decoder, Encoder, Frame,
};
use image::{ImageFormat, RgbImage};
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

/// Stores files as 16-color 1920x1080 images and reads them back.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Encode(Encode),
    Decode(Decode),
}

/// Encodes a file into an image.
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {
    /// write payloads larger than one frame as numbered images (`out_0000.png`, `out_0001.png`,
    /// ...) instead of failing
    #[argh(switch)]
    split: bool,

    /// the file to encode
    #[argh(positional)]
    input: PathBuf,
    /// the output image. Must be a lossless format (png, bmp, tiff, ppm).
    #[argh(positional)]
    output: PathBuf,
}

/// Decodes an image back into the original file.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// read numbered images (`in_0000.png`, `in_0001.png`, ...) as written by `encode --split`
    #[argh(switch)]
    split: bool,

    /// read off-palette pixels as the nearest palette color instead of failing
    #[argh(switch)]
    nearest: bool,

    /// the image to decode
    #[argh(positional)]
    input: PathBuf,
    /// the output file
    #[argh(positional)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Encode(options) => encode(options),
        Command::Decode(options) => decode(options),
    }
}

fn encode(options: Encode) -> Result<(), Box<dyn std::error::Error>> {
    let Encode {
        split,
        input,
        output,
    } = options;

    let format = lossless_format(&output)?;

    let frames = if split {
        let mut encoder = Encoder::new();
        io::copy(&mut BufReader::new(File::open(&input)?), &mut encoder)?;
        encoder.finish()
    } else {
        let payload = std::fs::read(&input)?;
        vec![hexframe::encode_single(&payload)?]
    };

    println!(
        "Encoding `{}` into {} frame(s)",
        input.display(),
        frames.len()
    );

    for (index, frame) in frames.iter().enumerate() {
        let path = if split {
            numbered(&output, index)
        } else {
            output.clone()
        };

        RgbImage::from_raw(WIDTH as u32, HEIGHT as u32, frame.as_raw_rgb())
            .ok_or("failed to create image")?
            .save_with_format(&path, format)?;

        println!("Written {WIDTH}x{HEIGHT} image to `{}`", path.display());
    }

    Ok(())
}

fn decode(options: Decode) -> Result<(), Box<dyn std::error::Error>> {
    let Decode {
        split,
        nearest,
        input,
        output,
    } = options;

    let paths = if split {
        let paths = (0..)
            .map(|index| numbered(&input, index))
            .take_while(|path| path.exists())
            .collect::<Vec<_>>();
        if paths.is_empty() {
            return Err(format!("no `{}` found", numbered(&input, 0).display()).into());
        }
        paths
    } else {
        vec![input]
    };

    let frames = paths
        .iter()
        .map(|path| load_frame(path))
        .collect::<Result<Vec<_>, _>>()?;

    let color_match = if nearest {
        ColorMatch::Nearest
    } else {
        ColorMatch::Exact
    };
    let payload = Decoder::new()
        .with_color_match(color_match)
        .decode_frames(&frames)?;

    std::fs::write(&output, &payload)?;
    println!(
        "Written {} bytes to `{}`",
        payload.len(),
        output.display()
    );

    Ok(())
}

fn load_frame(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    println!("Decoding `{}`", path.display());

    let image = image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?
        .into_rgb8();
    let (width, height) = image.dimensions();

    Ok(Frame::from_raw_rgb(
        width as usize,
        height as usize,
        image.as_raw(),
    )?)
}

/// The output format implied by the extension, if it stores RGB8 exactly.
fn lossless_format(path: &Path) -> Result<ImageFormat, Box<dyn std::error::Error>> {
    let format = ImageFormat::from_path(path)?;
    match format {
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Pnm => Ok(format),
        _ => Err(format!(
            "`{}`: {format:?} cannot store the palette colors exactly, use png, bmp, tiff or ppm",
            path.display()
        )
        .into()),
    }
}

/// `dir/name.png` -> `dir/name_0003.png`
fn numbered(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let mut name = format!("{stem}_{index:04}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_paths() {
        assert_eq!(
            numbered(Path::new("out/frames.png"), 3),
            PathBuf::from("out/frames_0003.png")
        );
        assert_eq!(numbered(Path::new("data"), 12), PathBuf::from("data_0012"));
    }

    #[test]
    fn rejects_lossy_formats() {
        assert!(lossless_format(Path::new("a.png")).is_ok());
        assert!(lossless_format(Path::new("a.ppm")).is_ok());
        assert!(lossless_format(Path::new("a.jpg")).is_err());
        assert!(lossless_format(Path::new("a.unknown")).is_err());
    }
}
