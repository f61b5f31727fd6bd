//! gitfame - Per-author contribution statistics CLI
//!
//! Ranks the authors of a git repository by the lines they own at a
//! revision, the commits they made and the files they touched.

use clap::Parser;
use console::style;
use gitfame::cli::{self, Cli};
use gitfame::error::{FameError, EXIT_CONFIG};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gitfame={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = cli::run(cli) {
        eprintln!("{} {:#}", style("error:").red().bold(), e);
        let code = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<FameError>())
            .map(FameError::exit_code)
            .unwrap_or(EXIT_CONFIG);
        std::process::exit(code);
    }
}
