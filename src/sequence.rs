//! Icon frame sequences
//!
//! An [`IconSequence`] owns a contiguous buffer of 16-bit pixel values holding
//! `count` frames of `width x height` pixels each, stored frame after frame in
//! row-major order. The buffer length is checked against the dimensions when
//! the sequence is built, and the dimensions cannot change afterwards.

use serde::Serialize;
use thiserror::Error;

/// Error type for building an [`IconSequence`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Buffer length does not equal `width * height * count`
    #[error("frame buffer holds {actual} values, expected {expected} (width * height * count)")]
    SizeMismatch { expected: u64, actual: usize },
    /// A single frame passed to [`IconSequence::from_frames`] has the wrong size
    #[error("frame {index} holds {actual} values, expected {expected}")]
    FrameSizeMismatch { index: usize, expected: usize, actual: usize },
    /// More frames than a `u16` count can describe
    #[error("{0} frames exceeds the maximum of 65535")]
    TooManyFrames(usize),
}

/// A fixed-count sequence of equally sized 16-bit raster frames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconSequence {
    frames: Box<[u16]>,
    width: u16,
    height: u16,
    count: u16,
}

/// Dimension summary of a sequence, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceInfo {
    pub width: u16,
    pub height: u16,
    pub count: u16,
    /// Total number of pixel values in the buffer
    pub pixels: usize,
    /// Buffer size in bytes
    pub bytes: usize,
}

fn expected_len(width: u16, height: u16, count: u16) -> u64 {
    width as u64 * height as u64 * count as u64
}

impl IconSequence {
    /// Build a sequence from a flat frame buffer.
    ///
    /// Fails with [`SequenceError::SizeMismatch`] unless the buffer holds exactly
    /// `width * height * count` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use iconseq::sequence::IconSequence;
    ///
    /// let seq = IconSequence::new(vec![0u16; 2 * 2 * 3], 2, 2, 3).unwrap();
    /// assert_eq!(seq.frame_len(), 4);
    /// assert_eq!(seq.iter_frames().count(), 3);
    ///
    /// assert!(IconSequence::new(vec![0u16; 5], 2, 2, 1).is_err());
    /// ```
    pub fn new(
        frames: impl Into<Box<[u16]>>,
        width: u16,
        height: u16,
        count: u16,
    ) -> Result<Self, SequenceError> {
        let frames = frames.into();
        let expected = expected_len(width, height, count);
        if frames.len() as u64 != expected {
            return Err(SequenceError::SizeMismatch { expected, actual: frames.len() });
        }
        Ok(Self { frames, width, height, count })
    }

    /// Build a sequence from individual frame buffers.
    ///
    /// Every frame must hold `width * height` values.
    pub fn from_frames<I, F>(width: u16, height: u16, frames: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u16]>,
    {
        let frame_len = width as usize * height as usize;
        let mut buffer = Vec::new();
        let mut count = 0usize;

        for (index, frame) in frames.into_iter().enumerate() {
            let frame = frame.as_ref();
            if frame.len() != frame_len {
                return Err(SequenceError::FrameSizeMismatch {
                    index,
                    expected: frame_len,
                    actual: frame.len(),
                });
            }
            buffer.extend_from_slice(frame);
            count += 1;
        }

        let count = u16::try_from(count).map_err(|_| SequenceError::TooManyFrames(count))?;
        Self::new(buffer, width, height, count)
    }

    /// A sequence with the given frame size and no frames.
    pub fn empty(width: u16, height: u16) -> Self {
        Self { frames: Box::default(), width, height, count: 0 }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of frames
    pub fn count(&self) -> u16 {
        self.count
    }

    /// The whole frame buffer, frames stored back to back.
    pub fn frames(&self) -> &[u16] {
        &self.frames
    }

    /// Mutable access to pixel values. The buffer length stays fixed.
    pub fn frames_mut(&mut self) -> &mut [u16] {
        &mut self.frames
    }

    /// Pixels per frame (`width * height`)
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total pixel values in the buffer
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The pixels of one frame, or `None` if `index >= count`.
    pub fn frame(&self, index: usize) -> Option<&[u16]> {
        if index >= self.count as usize {
            return None;
        }
        let len = self.frame_len();
        self.frames.get(index * len..(index + 1) * len)
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut [u16]> {
        if index >= self.count as usize {
            return None;
        }
        let len = self.frame_len();
        self.frames.get_mut(index * len..(index + 1) * len)
    }

    /// Iterate frames in order.
    ///
    /// Yields exactly `count` slices, which are empty when the frame size is zero.
    pub fn iter_frames(&self) -> impl ExactSizeIterator<Item = &[u16]> + '_ {
        let len = self.frame_len();
        (0..self.count as usize).map(move |i| &self.frames[i * len..(i + 1) * len])
    }

    /// A single pixel value, or `None` when out of bounds.
    pub fn pixel(&self, frame: usize, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.width as usize + x as usize;
        self.frame(frame).map(|f| f[offset])
    }

    /// Split into the raw buffer and `(width, height, count)`.
    pub fn into_parts(self) -> (Box<[u16]>, u16, u16, u16) {
        (self.frames, self.width, self.height, self.count)
    }

    pub fn info(&self) -> SequenceInfo {
        SequenceInfo {
            width: self.width,
            height: self.height,
            count: self.count,
            pixels: self.frames.len(),
            bytes: self.frames.len() * std::mem::size_of::<u16>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<u16> {
        (0..len as u16).collect()
    }

    #[test]
    fn test_new_round_trips_fields() {
        let buffer = ramp(3 * 2 * 4);
        let seq = IconSequence::new(buffer.clone(), 3, 2, 4).unwrap();

        assert_eq!(seq.width(), 3);
        assert_eq!(seq.height(), 2);
        assert_eq!(seq.count(), 4);
        assert_eq!(seq.frames(), buffer.as_slice());

        let (frames, w, h, c) = seq.into_parts();
        assert_eq!(&*frames, buffer.as_slice());
        assert_eq!((w, h, c), (3, 2, 4));
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let err = IconSequence::new(ramp(7), 2, 2, 2).unwrap_err();
        assert_eq!(err, SequenceError::SizeMismatch { expected: 8, actual: 7 });
    }

    #[test]
    fn test_new_rejects_long_buffer() {
        let err = IconSequence::new(ramp(9), 2, 2, 2).unwrap_err();
        assert_eq!(err, SequenceError::SizeMismatch { expected: 8, actual: 9 });
    }

    #[test]
    fn test_nonzero_count_means_nonempty_buffer() {
        let seq = IconSequence::new(ramp(4), 2, 2, 1).unwrap();
        assert!(seq.count() > 0);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_zero_dimensions_are_legal() {
        for (w, h, c) in [(0, 8, 3), (8, 0, 3), (8, 8, 0), (0, 0, 0)] {
            let seq = IconSequence::new(Vec::<u16>::new(), w, h, c).unwrap();
            assert!(seq.is_empty());
            assert_eq!(seq.count(), c);
        }
    }

    #[test]
    fn test_zero_count_rejects_data() {
        assert!(IconSequence::new(ramp(4), 2, 2, 0).is_err());
    }

    #[test]
    fn test_empty() {
        let seq = IconSequence::empty(16, 16);
        assert_eq!(seq.count(), 0);
        assert_eq!(seq.frame_len(), 256);
        assert!(seq.is_empty());
        assert_eq!(seq.iter_frames().count(), 0);
        assert!(seq.frame(0).is_none());
    }

    #[test]
    fn test_frame_slices() {
        let seq = IconSequence::new(ramp(12), 2, 2, 3).unwrap();

        assert_eq!(seq.frame(0), Some(&[0, 1, 2, 3][..]));
        assert_eq!(seq.frame(2), Some(&[8, 9, 10, 11][..]));
        assert_eq!(seq.frame(3), None);

        let collected: Vec<&[u16]> = seq.iter_frames().collect();
        assert_eq!(collected.len(), 3);
        assert_eq!(collected[1], &[4, 5, 6, 7]);
    }

    #[test]
    fn test_iter_frames_zero_frame_size() {
        let seq = IconSequence::new(Vec::<u16>::new(), 0, 4, 5).unwrap();
        let frames: Vec<&[u16]> = seq.iter_frames().collect();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.is_empty()));
    }

    #[test]
    fn test_pixel_lookup() {
        // 3x2 frames, two of them
        let seq = IconSequence::new(ramp(12), 3, 2, 2).unwrap();

        assert_eq!(seq.pixel(0, 0, 0), Some(0));
        assert_eq!(seq.pixel(0, 2, 1), Some(5));
        assert_eq!(seq.pixel(1, 1, 1), Some(10));
        assert_eq!(seq.pixel(0, 3, 0), None);
        assert_eq!(seq.pixel(0, 0, 2), None);
        assert_eq!(seq.pixel(2, 0, 0), None);
    }

    #[test]
    fn test_frame_mut_keeps_dimensions() {
        let mut seq = IconSequence::new(vec![0u16; 8], 2, 2, 2).unwrap();
        seq.frame_mut(1).unwrap().fill(0xFFFF);

        assert_eq!(seq.frame(0), Some(&[0, 0, 0, 0][..]));
        assert_eq!(seq.frame(1), Some(&[0xFFFF; 4][..]));
        assert_eq!(seq.len(), 8);
        assert!(seq.frame_mut(2).is_none());
    }

    #[test]
    fn test_from_frames() {
        let frames = vec![vec![1u16; 4], vec![2u16; 4]];
        let seq = IconSequence::from_frames(2, 2, &frames).unwrap();

        assert_eq!(seq.count(), 2);
        assert_eq!(seq.frames(), &[1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn test_from_frames_rejects_mismatched_frame() {
        let frames = vec![vec![1u16; 4], vec![2u16; 3]];
        let err = IconSequence::from_frames(2, 2, &frames).unwrap_err();
        assert_eq!(err, SequenceError::FrameSizeMismatch { index: 1, expected: 4, actual: 3 });
    }

    #[test]
    fn test_from_frames_too_many() {
        let frames = std::iter::repeat(Vec::<u16>::new()).take(u16::MAX as usize + 1);
        let err = IconSequence::from_frames(0, 0, frames).unwrap_err();
        assert_eq!(err, SequenceError::TooManyFrames(65536));
    }

    #[test]
    fn test_info() {
        let seq = IconSequence::new(ramp(8 * 8 * 3), 8, 8, 3).unwrap();
        let info = seq.info();
        assert_eq!(info.pixels, 192);
        assert_eq!(info.bytes, 384);
        assert_eq!((info.width, info.height, info.count), (8, 8, 3));
    }
}
