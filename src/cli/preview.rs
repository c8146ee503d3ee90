//! Preview command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{resolve_config, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::import::import_icon;
use crate::output::{
    generate_output_path, render_gif, render_spritesheet, save_png, scale_image,
    sequence_to_images,
};

/// Execute the preview command
pub fn run_preview(
    input: &Path,
    output: Option<&Path>,
    gif: bool,
    scale: u8,
    cols: Option<u32>,
    duration_ms: u32,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let byte_order = config.output.byte_order;

    let seq = match import_icon(input, &config.import_options()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let frames: Vec<_> = sequence_to_images(&seq, byte_order)
        .into_iter()
        .map(|f| scale_image(f, scale))
        .collect();

    let ext = if gif { "gif" } else { "png" };
    let output_path = match output {
        Some(o) => generate_output_path(input, ext, Some(o)),
        None => {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let preview = PathBuf::from(format!("{}_preview.{}", stem, ext));
            input.parent().unwrap_or(Path::new("")).join(preview)
        }
    };

    let result = if gif {
        render_gif(&frames, duration_ms, true, &output_path)
    } else {
        save_png(&render_spritesheet(&frames, cols), &output_path)
    };

    if let Err(e) = result {
        eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Preview: {} ({}x{}, {} frames, {})",
        output_path.display(),
        seq.width(),
        seq.height(),
        seq.count(),
        byte_order
    );
    ExitCode::from(EXIT_SUCCESS)
}
