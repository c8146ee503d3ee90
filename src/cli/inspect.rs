//! Inspect command implementation

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::import::decode_frames;

/// What an input image contains before conversion
#[derive(Debug, Serialize)]
struct InspectReport {
    file: PathBuf,
    frames: usize,
    width: u32,
    height: u32,
    /// Pixel values a conversion at native size would emit
    pixels: u64,
}

/// Execute the inspect command
pub fn run_inspect(input: &Path, json: bool) -> ExitCode {
    let frames = match decode_frames(input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (width, height) = frames.first().map(|f| f.dimensions()).unwrap_or((0, 0));
    let report = InspectReport {
        file: input.to_path_buf(),
        frames: frames.len(),
        width,
        height,
        pixels: width as u64 * height as u64 * frames.len() as u64,
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("File:   {}", report.file.display());
        println!("Frames: {}", report.frames);
        println!("Size:   {}x{}", report.width, report.height);
        println!("Pixels: {}", report.pixels);
    }

    ExitCode::from(EXIT_SUCCESS)
}
