//! Service orchestration: backend selection, preload, stdio loop

use crate::config::{Config, Mode};
use crate::protocol;
use anyhow::Result;
use axiom_content::{BundleSource, CollectionKind, ContentSource, FsSource};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Axiom content server: loads content per the configured mode, then serves
/// MCP requests over stdio until the host closes the transport.
pub struct AxiomService {
    config: Config,
}

impl AxiomService {
    /// Create a new service from validated configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the server to completion.
    pub async fn run(self) -> Result<()> {
        axiom_logging::init_logging(&self.config.logging.level)?;
        info!(
            "Starting Axiom content server ({:?} mode)",
            self.config.server.mode
        );

        let source = build_source(&self.config)?;

        // A server with an incomplete content set is worse than one that
        // refuses to start: load every collection up front so structural
        // errors are fatal here, not mid-session.
        for kind in CollectionKind::ALL {
            let map = source.collection(kind)?;
            info!("{}: {} loaded", kind, map.len());
        }

        serve_stdio(source.as_ref()).await
    }
}

/// Construct the backend the configuration selects.
pub fn build_source(config: &Config) -> Result<Box<dyn ContentSource>> {
    match config.server.mode {
        Mode::Development => Ok(Box::new(FsSource::new(&config.content.root))),
        Mode::Production => Ok(Box::new(BundleSource::new(&config.content.bundle)?)),
    }
}

/// Read newline-delimited JSON-RPC from stdin, write responses to stdout.
/// Notifications produce no output. EOF is a graceful shutdown.
async fn serve_stdio(source: &dyn ContentSource) -> Result<()> {
    let mut stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        if stdin.read_line(&mut buffer).await? == 0 {
            break;
        }

        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("discarding unparsable request line: {}", e);
                continue;
            }
        };

        if let Some(response) = protocol::handle_request(source, &request) {
            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
