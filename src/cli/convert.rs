//! Convert command implementation

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use super::{expand_inputs, resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::{CliOverrides, IconseqConfig};
use crate::header::write_header;
use crate::import::import_icon;
use crate::output::generate_output_path;
use crate::sequence::SequenceInfo;

/// Result of converting one input
struct Converted {
    output: PathBuf,
    info: SequenceInfo,
}

fn convert_one(
    input: &Path,
    output_arg: Option<&Path>,
    name: Option<&str>,
    config: &IconseqConfig,
) -> Result<Converted, String> {
    let seq = import_icon(input, &config.import_options())
        .map_err(|e| format!("{}: {}", input.display(), e))?;

    let name = name
        .map(String::from)
        .unwrap_or_else(|| input.file_stem().unwrap_or_default().to_string_lossy().to_string());
    let output = generate_output_path(input, "h", output_arg);

    write_header(&seq, &config.header_options(name), &output)
        .map_err(|e| format!("{}: {}", output.display(), e))?;

    info!(input = %input.display(), output = %output.display(), frames = seq.count(), "wrote header");
    Ok(Converted { output, info: seq.info() })
}

/// Execute the convert command
pub fn run_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    name: Option<&str>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let files = expand_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: no input files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    if files.len() > 1 {
        let output_is_file = output.is_some_and(|o| {
            !(o.as_os_str().to_string_lossy().ends_with('/') || o.is_dir())
        });
        if output_is_file {
            eprintln!("Error: --output must be a directory when converting multiple inputs");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        if name.is_some() {
            eprintln!("Error: --name can only be used with a single input");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let mut targets: HashMap<PathBuf, &PathBuf> = HashMap::new();
    for input in &files {
        let target = generate_output_path(input, "h", output);
        if let Some(first) = targets.insert(target.clone(), input) {
            eprintln!(
                "Error: {} and {} would both write {}",
                first.display(),
                input.display(),
                target.display()
            );
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let results: Vec<Result<Converted, String>> =
        files.par_iter().map(|input| convert_one(input, output, name, &config)).collect();

    let mut failed = 0;
    for result in results {
        match result {
            Ok(Converted { output, info }) => println!(
                "Converted: {} ({}x{}, {} frames, {} pixels)",
                output.display(),
                info.width,
                info.height,
                info.count,
                info.pixels
            ),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
