//! Preview output - decoding sequences back to images, PNG/GIF writing and
//! output path generation

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::{decode_pixel, ByteOrder};
use crate::sequence::IconSequence;

/// Transparent color used for spritesheet padding
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Decode every frame of a sequence into an opaque RGBA image.
pub fn sequence_to_images(seq: &IconSequence, order: ByteOrder) -> Vec<RgbaImage> {
    let (w, h) = (seq.width() as u32, seq.height() as u32);
    seq.iter_frames()
        .map(|frame| {
            let mut img = RgbaImage::new(w, h);
            for (pixel, &value) in img.pixels_mut().zip(frame) {
                *pixel = decode_pixel(value, order);
            }
            img
        })
        .collect()
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor as u32, h * factor as u32, FilterType::Nearest)
}

/// Lay frames out in a grid, left to right then top to bottom.
///
/// `cols` defaults to a single row. Cells take the size of the largest frame.
///
/// ```
/// use image::RgbaImage;
/// use iconseq::output::render_spritesheet;
///
/// let frame = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
/// let frames = vec![frame.clone(), frame.clone(), frame.clone()];
///
/// let sheet = render_spritesheet(&frames, None);
/// assert_eq!(sheet.dimensions(), (6, 2));
///
/// let sheet = render_spritesheet(&frames, Some(2));
/// assert_eq!(sheet.dimensions(), (4, 4));
/// ```
pub fn render_spritesheet(frames: &[RgbaImage], cols: Option<u32>) -> RgbaImage {
    if frames.is_empty() {
        return RgbaImage::from_pixel(1, 1, TRANSPARENT);
    }

    let cell_w = frames.iter().map(|f| f.width()).max().unwrap_or(1).max(1);
    let cell_h = frames.iter().map(|f| f.height()).max().unwrap_or(1).max(1);

    let count = frames.len() as u32;
    let columns = cols.filter(|&c| c > 0).unwrap_or(count).min(count);
    let rows = count.div_ceil(columns);

    let mut sheet = RgbaImage::from_pixel(columns * cell_w, rows * cell_h, TRANSPARENT);
    for (i, frame) in frames.iter().enumerate() {
        let i = i as u32;
        let (x0, y0) = ((i % columns) * cell_w, (i / columns) * cell_h);
        for (x, y, pixel) in frame.enumerate_pixels() {
            sheet.put_pixel(x0 + x, y0 + y, *pixel);
        }
    }
    sheet
}

/// Write frames as an animated GIF.
///
/// GIF delays are in centiseconds, so `duration_ms` is rounded down to a
/// multiple of 10ms with a minimum of 10ms. Nothing is written for an empty
/// frame list.
pub fn render_gif(
    frames: &[RgbaImage],
    duration_ms: u32,
    loop_anim: bool,
    path: &Path,
) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Ok(());
    }
    ensure_parent_dir(path)?;

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(if loop_anim { Repeat::Infinite } else { Repeat::Finite(0) })?;

    let delay_ms = (duration_ms / 10).max(1) * 10;
    for image in frames {
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        encoder.encode_frame(Frame::from_parts(image.clone(), 0, 0, delay))?;
    }

    Ok(())
}

/// Generate the output path for a converted input.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_dir}/{stem}.{ext}` |
/// | `-o out.h` | `out.h` |
/// | `-o dir/` or an existing directory | `dir/{stem}.{ext}` |
pub fn generate_output_path(input: &Path, ext: &str, output_arg: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("icon");
    let file_name = format!("{}.{}", stem, ext);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => input.parent().unwrap_or(Path::new("")).join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    #[test]
    fn test_generate_output_path_default() {
        let path = generate_output_path(Path::new("mario.gif"), "h", None);
        assert_eq!(path, PathBuf::from("mario.h"));
    }

    #[test]
    fn test_generate_output_path_nested_input() {
        let path = generate_output_path(Path::new("assets/icons/mario.gif"), "h", None);
        assert_eq!(path, PathBuf::from("assets/icons/mario.h"));
    }

    #[test]
    fn test_generate_output_path_explicit_file() {
        let path = generate_output_path(Path::new("mario.gif"), "h", Some(Path::new("Icons.h")));
        assert_eq!(path, PathBuf::from("Icons.h"));
    }

    #[test]
    fn test_generate_output_path_directory() {
        let path =
            generate_output_path(Path::new("icons/mario.gif"), "png", Some(Path::new("out/")));
        assert_eq!(path, PathBuf::from("out/mario.png"));
    }

    #[test]
    fn test_generate_output_path_existing_directory() {
        let dir = tempdir().unwrap();
        let path = generate_output_path(Path::new("mario.gif"), "h", Some(dir.path()));
        assert_eq!(path, dir.path().join("mario.h"));
    }

    #[test]
    fn test_sequence_to_images() {
        let seq = IconSequence::new(vec![0x00F8, 0x00F8, 0x1F00, 0x1F00], 2, 1, 2).unwrap();
        let images = sequence_to_images(&seq, ByteOrder::Swapped);

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].dimensions(), (2, 1));
        assert_eq!(*images[0].get_pixel(1, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*images[1].get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_spritesheet_grid_layout() {
        let frames = vec![
            solid(2, 2, Rgba([255, 0, 0, 255])),
            solid(2, 2, Rgba([0, 255, 0, 255])),
            solid(2, 2, Rgba([0, 0, 255, 255])),
        ];
        let sheet = render_spritesheet(&frames, Some(2));

        assert_eq!(sheet.dimensions(), (4, 4));
        assert_eq!(*sheet.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*sheet.get_pixel(2, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*sheet.get_pixel(0, 2), Rgba([0, 0, 255, 255]));
        // Unused cell stays transparent
        assert_eq!(*sheet.get_pixel(3, 3), TRANSPARENT);
    }

    #[test]
    fn test_spritesheet_cols_clamped() {
        let frames = vec![solid(1, 1, Rgba([9, 9, 9, 255])); 2];
        assert_eq!(render_spritesheet(&frames, Some(10)).dimensions(), (2, 1));
        assert_eq!(render_spritesheet(&frames, Some(0)).dimensions(), (2, 1));
    }

    #[test]
    fn test_spritesheet_empty() {
        assert_eq!(render_spritesheet(&[], None).dimensions(), (1, 1));
    }

    #[test]
    fn test_scale_image() {
        let img = solid(2, 3, Rgba([1, 2, 3, 255]));
        assert_eq!(scale_image(img.clone(), 1).dimensions(), (2, 3));
        assert_eq!(scale_image(img, 4).dimensions(), (8, 12));
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/preview.png");

        save_png(&solid(2, 2, Rgba([0, 0, 255, 255])), &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(*loaded.get_pixel(1, 1), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_render_gif_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        let frames = vec![solid(2, 2, Rgba([255, 0, 0, 255])), solid(2, 2, Rgba([0, 255, 0, 255]))];

        render_gif(&frames, 5, false, &path).unwrap();
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_render_gif_empty_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.gif");

        render_gif(&[], 100, true, &path).unwrap();
        assert!(!path.exists());
    }
}
