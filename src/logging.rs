//! Tracing subscriber setup for the `iconseq` binary

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive, e.g. `iconseq=debug`
pub const LOG_ENV: &str = "ICONSEQ_LOG";

/// Map `-v`/`-q` flags to a level. Default is `warn`.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a stderr subscriber. `ICONSEQ_LOG` takes precedence over the flags.
///
/// A second call leaves the first subscriber in place.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level_for(verbose, quiet).into()));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::Layer::new().with_writer(std::io::stderr).with_target(false).without_time(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
