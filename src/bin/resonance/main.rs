//! resonance - a narrated greeting card in the terminal
//!
//! Run with: cargo run
//! Narration needs API_KEY set; logs go to the temp dir when RUST_LOG is set.

mod app;
mod ui;

use std::{fs::File, sync::Mutex};

use app::Resonance;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    Resonance::new().run()
}

/// The terminal belongs to the interface, so logs go to a file.
fn init_logging() -> EyreResult<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let path = std::env::temp_dir().join("resonance.log");
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
