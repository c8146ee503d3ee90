//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod inspect;
mod preview;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::color::ByteOrder;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, IconseqConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path has a GIF extension.
pub fn is_gif_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

/// Find all GIF files in a directory (recursively), sorted.
pub fn find_gif_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = glob(&format!("{}/**/*", dir.display()))
        .map(|paths| paths.filter_map(Result::ok).filter(|p| p.is_file() && is_gif_file(p)).collect())
        .unwrap_or_default();
    files.sort();
    files
}

/// Expand CLI inputs: directories become the GIF files inside them.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_gif_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Icon sequence converter - animated GIFs to RGB565 C headers
#[derive(Parser)]
#[command(name = "iconseq")]
#[command(about = "Convert animated GIFs into RGB565 icon sequences for embedded displays")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Frame geometry and encoding flags shared by `convert` and `preview`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EncodeArgs {
    /// Target frame width in pixels (default: 8, or iconseq.toml)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Target frame height in pixels (default: 8, or iconseq.toml)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: Option<u16>,

    /// Byte order of the stored RGB565 values
    #[arg(long, value_enum)]
    pub byte_order: Option<ByteOrder>,

    /// Keep at most this many frames
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_frames: Option<u64>,

    /// Config file (default: iconseq.toml found from the current directory up)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl EncodeArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            width: self.width,
            height: self.height,
            byte_order: self.byte_order,
            max_frames: self.max_frames.map(|n| n as usize),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert GIFs (or still images) into C headers
    Convert {
        /// Input files or directories (directories are searched for *.gif)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory.
        /// If omitted: {input_dir}/{stem}.h
        /// If directory (ends with / or exists): dir/{stem}.h
        /// A file path is only allowed with a single input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Icon name used for the C symbols (default: input file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Omit the PROGMEM qualifier
        #[arg(long)]
        no_progmem: bool,

        /// Wrap the header in an include guard
        #[arg(long)]
        include_guard: bool,

        /// Array values per line (0 puts the whole array on one line)
        #[arg(long)]
        values_per_line: Option<usize>,

        #[command(flatten)]
        encode: EncodeArgs,
    },
    /// Show frame count and native dimensions of an image
    Inspect {
        /// Input GIF or image
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert, then decode the RGB565 frames back to a PNG or GIF for checking
    Preview {
        /// Input GIF or image
        input: PathBuf,

        /// Output file or directory (default: {input_dir}/{stem}_preview.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write an animated GIF instead of a PNG spritesheet
        #[arg(long)]
        gif: bool,

        /// Scale output by integer factor (1-64)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=64))]
        scale: u8,

        /// Spritesheet columns (default: all frames in one row)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        cols: Option<u32>,

        /// Frame duration for GIF output in milliseconds
        #[arg(long, default_value = "100")]
        duration: u32,

        #[command(flatten)]
        encode: EncodeArgs,
    },
}

/// Load the config file and apply CLI overrides, reporting failures.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<IconseqConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    if let Err(e) = merge_cli_overrides(&mut config, overrides) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Parse arguments, set up logging and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            name,
            no_progmem,
            include_guard,
            values_per_line,
            encode,
        } => {
            let mut overrides = encode.overrides();
            if no_progmem {
                overrides.progmem = Some(false);
            }
            if include_guard {
                overrides.include_guard = Some(true);
            }
            overrides.values_per_line = values_per_line;
            convert::run_convert(
                &inputs,
                output.as_deref(),
                name.as_deref(),
                encode.config.as_deref(),
                &overrides,
            )
        }
        Commands::Inspect { input, json } => inspect::run_inspect(&input, json),
        Commands::Preview { input, output, gif, scale, cols, duration, encode } => {
            preview::run_preview(
                &input,
                output.as_deref(),
                gif,
                scale,
                cols,
                duration,
                encode.config.as_deref(),
                &encode.overrides(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_is_gif_file() {
        assert!(is_gif_file(Path::new("mario.gif")));
        assert!(is_gif_file(Path::new("icons/COIN.GIF")));
        assert!(!is_gif_file(Path::new("mario.png")));
        assert!(!is_gif_file(Path::new("gif")));
        assert!(!is_gif_file(Path::new(".gif")));
    }

    #[test]
    fn test_find_gif_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path();

        fs::write(dir_path.join("a.gif"), "x").unwrap();
        fs::write(dir_path.join("b.png"), "x").unwrap();
        let sub_dir = dir_path.join("nested");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(sub_dir.join("c.GIF"), "x").unwrap();

        let files = find_gif_files(dir_path);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_gif_file(f)));
    }

    #[test]
    fn test_expand_inputs_mixes_files_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.gif"), "x").unwrap();
        fs::write(temp_dir.path().join("b.gif"), "x").unwrap();

        let single = PathBuf::from("still.png");
        let files = expand_inputs(&[single.clone(), temp_dir.path().to_path_buf()]);

        assert_eq!(files.len(), 3);
        assert_eq!(files[0], single);
    }

    #[test]
    fn test_parse_convert_args() {
        let cli = Cli::try_parse_from([
            "iconseq",
            "-v",
            "convert",
            "mario.gif",
            "--width",
            "16",
            "--byte-order",
            "native",
            "--no-progmem",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Convert { inputs, no_progmem, encode, .. } => {
                assert_eq!(inputs, vec![PathBuf::from("mario.gif")]);
                assert!(no_progmem);
                assert_eq!(encode.width, Some(16));
                assert_eq!(encode.height, None);
                assert_eq!(encode.byte_order, Some(ByteOrder::Native));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_rejects_zero_width() {
        assert!(Cli::try_parse_from(["iconseq", "convert", "a.gif", "--width", "0"]).is_err());
    }
}
