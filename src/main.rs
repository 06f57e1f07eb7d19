//! This crate contains the source code for the fogmaze binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::io;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use fogmaze::{logging, App, Config};
use tracing::info;

fn main() -> Result<()> {
    install()?;
    logging::install()?;

    let config = Config::parse();
    let summary = App::new(config)?.run(io::stdin().lock(), io::stdout().lock())?;
    info!(
        solved = summary.solved,
        steps = summary.steps,
        "run finished"
    );

    Ok(())
}
