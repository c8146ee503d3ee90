//! iconseq - Command-line tool for converting animated GIFs into RGB565 icon headers

use std::process::ExitCode;

use iconseq::cli;

fn main() -> ExitCode {
    cli::run()
}
