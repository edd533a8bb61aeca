use anyhow::Result;
use axiom_server::{AxiomService, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Create and run the content server
    let server = AxiomService::new(config);
    server.run().await
}
