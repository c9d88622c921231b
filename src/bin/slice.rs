use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slicer::config::Cli;
use slicer::slice_image;

/// Slice an image into vertical JPEG tiles
///
/// # Usage
///
/// slice [image] [-o output_dir] [-n slices] [-q quality] [--max-pixels N]
///
/// Exits with a failure code on the first error; tiles written before the
/// failure are left on disk.
fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = cli.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match slice_image(&cli.image, &cli.output_dir, cli.slices, &cli.options()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "slice=debug,slicer=debug"
    } else {
        "slice=info,slicer=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
