//! Produce the production content bundle from a development tree.
//!
//! Reads the same configuration as the server; bundling always needs both
//! the content root (input) and the bundle path (output), regardless of mode.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use axiom_content::{Bundle, FsSource};
use axiom_server::Config;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::load()?;
    axiom_logging::init_logging(&config.logging.level)?;

    ensure!(
        !config.content.root.is_empty(),
        "bundling requires content.root (or AXIOM_CONTENT_ROOT)"
    );
    ensure!(
        !config.content.bundle.is_empty(),
        "bundling requires content.bundle (or AXIOM_BUNDLE)"
    );

    let source = FsSource::new(&config.content.root);
    let bundle = Bundle::from_source(&source)
        .with_context(|| format!("failed to load content from {}", config.content.root))?;
    bundle
        .write(Path::new(&config.content.bundle))
        .with_context(|| format!("failed to write bundle to {}", config.content.bundle))?;

    info!("bundle complete");
    Ok(())
}
