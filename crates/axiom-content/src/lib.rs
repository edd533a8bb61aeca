//! Axiom content library
//!
//! Loads skill, command, and agent definitions — Markdown documents with YAML
//! frontmatter — and serves them from in-memory maps keyed by name.
//!
//! ## Architecture
//!
//! Two interchangeable backends implement [`ContentSource`]:
//!
//! - [`FsSource`]: development mode. Walks `skills/`, `commands/`, and
//!   `agents/` under a plugin checkout, parsing every Markdown file.
//! - [`BundleSource`]: production mode. Reads one pre-serialized JSON bundle
//!   produced by `axiom-bundle` at packaging time.
//!
//! Both load lazily on first access and memoize for the process lifetime;
//! content changes on disk require a restart to be observed.

#![deny(unsafe_code, unused_imports, unused_variables, missing_docs)]

pub mod bundle;
pub mod document;
pub mod error;
pub mod fs;
pub mod source;

pub use bundle::{Bundle, BundleSource};
pub use document::Document;
pub use error::ContentError;
pub use fs::FsSource;
pub use source::{CollectionKind, CollectionMap, ContentSource};
