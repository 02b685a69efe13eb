//! gitviz: read a repository's history as a commit graph
//!
//! This binary runs `git log` (or reads a captured log), parses each line into
//! a commit and prints the result.

use clap::Parser;
use tracing::debug;

use gitviz::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "starting gitviz");
    config.validate()?;

    let stdout = std::io::stdout();
    gitviz::app::run(&config, &mut stdout.lock())
}
