//! iconseq - Library for converting animated images into RGB565 icon sequences
//!
//! This library provides functionality to:
//! - Hold fixed-size frame sequences of 16-bit pixels ([`sequence::IconSequence`])
//! - Decode animated GIFs and still images and encode them as RGB565
//! - Emit C headers declaring the frame data for firmware builds
//! - Decode sequences back to PNG/GIF previews

pub mod cli;
pub mod color;
pub mod config;
pub mod header;
pub mod import;
pub mod logging;
pub mod output;
pub mod sequence;

pub use sequence::{IconSequence, SequenceError};
