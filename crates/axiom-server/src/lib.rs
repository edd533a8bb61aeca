//! Axiom MCP server
//!
//! Serves the Axiom plugin's skills, commands, and agents over MCP's stdio
//! JSON-RPC transport. Content comes from a live plugin checkout in
//! development mode or from a pre-serialized JSON bundle in production;
//! request handling never knows which.
//!
//! Protocol mapping: `resources/*` serve skills, `prompts/*` serve commands,
//! and `tools/*` serve agents.

pub mod config;
pub mod protocol;
pub mod service;

pub use config::{Config, Mode};
pub use service::AxiomService;
