//! Image import - decodes GIF animations and still images into icon sequences.
//!
//! This module provides functionality to:
//! - Decode every frame of an animated GIF (composited onto the logical screen)
//! - Decode any other format `image` understands as a single frame
//! - Resize frames to a fixed target size with nearest-neighbor sampling
//! - Encode the result as RGB565 in an [`IconSequence`]

use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, ImageFormat, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::{encode_image, ByteOrder};
use crate::sequence::{IconSequence, SequenceError};

/// Error type for image import
#[derive(Debug, Error)]
pub enum ImportError {
    /// Input file is missing
    #[error("icon file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    /// Input decoded to zero frames
    #[error("no frames found in {}", .0.display())]
    NoFrames(PathBuf),
    /// Target width or height is zero
    #[error("invalid target size {width}x{height}, both dimensions must be at least 1")]
    InvalidSize { width: u16, height: u16 },
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Options controlling frame conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Target frame width in pixels
    pub width: u16,
    /// Target frame height in pixels
    pub height: u16,
    pub byte_order: ByteOrder,
    /// Keep at most this many frames
    pub max_frames: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { width: 8, height: 8, byte_order: ByteOrder::default(), max_frames: None }
    }
}

/// Decode all frames of an image file as RGBA.
///
/// GIF files yield one image per animation frame, each the size of the GIF's
/// logical screen. Other formats yield a single image.
pub fn decode_frames(path: &Path) -> Result<Vec<RgbaImage>, ImportError> {
    decode_frames_limited(path, None)
}

/// Like [`decode_frames`], but stops decoding after `limit` frames.
pub fn decode_frames_limited(
    path: &Path,
    limit: Option<usize>,
) -> Result<Vec<RgbaImage>, ImportError> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }

    let reader = image::io::Reader::open(path)?.with_guessed_format()?;
    let limit = limit.unwrap_or(usize::MAX);

    let frames = if reader.format() == Some(ImageFormat::Gif) {
        let file = BufReader::new(File::open(path)?);
        let decoder = GifDecoder::new(file)?;
        decoder
            .into_frames()
            .take(limit)
            .map(|frame| frame.map(|f| f.into_buffer()))
            .collect::<Result<Vec<_>, _>>()?
    } else if limit == 0 {
        Vec::new()
    } else {
        vec![reader.decode()?.to_rgba8()]
    };

    debug!(path = %path.display(), frames = frames.len(), "decoded image");
    Ok(frames)
}

/// Resize a frame to the target size using nearest-neighbor sampling.
///
/// Frames that already have the target size are returned unchanged.
pub fn resize_frame(frame: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if frame.dimensions() == (width, height) {
        return frame.clone();
    }
    image::imageops::resize(frame, width, height, FilterType::Nearest)
}

/// Resize and encode decoded frames into a sequence.
pub fn frames_to_sequence(
    frames: &[RgbaImage],
    options: &ImportOptions,
) -> Result<IconSequence, ImportError> {
    let ImportOptions { width, height, byte_order, max_frames } = *options;
    if width == 0 || height == 0 {
        return Err(ImportError::InvalidSize { width, height });
    }

    let keep = match max_frames {
        Some(max) if max < frames.len() => {
            warn!(available = frames.len(), kept = max, "truncating animation");
            max
        }
        _ => frames.len(),
    };

    let encoded = frames[..keep].iter().map(|frame| {
        let resized = resize_frame(frame, width as u32, height as u32);
        encode_image(&resized, byte_order)
    });

    Ok(IconSequence::from_frames(width, height, encoded)?)
}

/// Decode an image file and convert it to an icon sequence.
///
/// # Examples
///
/// ```ignore
/// let options = ImportOptions { width: 16, height: 16, ..Default::default() };
/// let seq = import_icon(Path::new("icons/mario.gif"), &options)?;
/// println!("{} frames", seq.count());
/// ```
pub fn import_icon(path: &Path, options: &ImportOptions) -> Result<IconSequence, ImportError> {
    let frames = decode_frames_limited(path, options.max_frames)?;
    if frames.is_empty() {
        return Err(ImportError::NoFrames(path.to_path_buf()));
    }
    let seq = frames_to_sequence(&frames, options)?;
    debug!(
        path = %path.display(),
        width = seq.width(),
        height = seq.height(),
        count = seq.count(),
        "converted icon"
    );
    Ok(seq)
}
