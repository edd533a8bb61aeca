//! Document definition and frontmatter parsing
//!
//! Each skill, command, and agent is a Markdown file with YAML frontmatter.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ContentError, Result};

/// Names longer than this may be truncated by hosts
const MAX_NAME_LENGTH: usize = 64;
/// Descriptions longer than this may be truncated by hosts
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Frontmatter block at the start of the file, closing delimiter on its own
/// line. The body capture starts immediately after that line's newline so the
/// body round-trips byte for byte.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---(?:\r?\n(.*))?\z").expect("frontmatter regex is valid")
});

/// Lowercase letters, digits, and hyphens only
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("name regex is valid"));

/// A parsed content document.
///
/// Skills, commands, and agents all share this shape; they differ only in
/// which collection they are loaded into. Serializes with camelCase field
/// names to match the production bundle artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Collection key, from the `name` frontmatter field. Never empty.
    pub name: String,
    /// Short description used by the host to decide when to surface the document.
    #[serde(default)]
    pub description: String,
    /// Everything after the closing frontmatter delimiter, byte for byte.
    #[serde(default)]
    pub body: String,
    /// File name the document was parsed from, for diagnostics.
    #[serde(default)]
    pub source_file: String,
    /// Frontmatter keys beyond the recognized ones (agents commonly carry
    /// `model` and `tools`). Preserved verbatim, never interpreted.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Recognized frontmatter keys; everything else lands in `extra`.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Parse one raw document into a [`Document`].
///
/// `source_file` is carried through for diagnostics only; this function
/// performs no I/O. A document without a frontmatter block, or whose
/// frontmatter has no usable `name`, is an error — callers decide whether
/// that skips the file or aborts the load.
pub fn parse_document(contents: &str, source_file: &str) -> Result<Document> {
    let captures =
        FRONTMATTER_RE
            .captures(contents)
            .ok_or_else(|| ContentError::MissingFrontmatter {
                file: source_file.to_string(),
            })?;

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    let meta: FrontMatter =
        serde_yaml::from_str(yaml).map_err(|source| ContentError::InvalidFrontmatter {
            file: source_file.to_string(),
            source,
        })?;

    let name = match meta.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            return Err(ContentError::MissingName {
                file: source_file.to_string(),
            })
        }
    };

    validate_metadata(&name, meta.description.as_deref(), source_file);

    Ok(Document {
        name,
        description: meta.description.unwrap_or_default(),
        body: body.to_string(),
        source_file: source_file.to_string(),
        extra: meta.extra,
    })
}

/// Warn about metadata hosts are likely to mishandle. Nothing here rejects a
/// document; only a missing name does that.
fn validate_metadata(name: &str, description: Option<&str>, source_file: &str) {
    if !NAME_RE.is_match(name) {
        warn!(
            "{}: name '{}' is not lowercase letters, numbers, and hyphens; hosts may not match it",
            source_file, name
        );
    }

    if name.len() > MAX_NAME_LENGTH {
        warn!(
            "{}: name '{}' exceeds {} characters (was {}), may be truncated",
            source_file,
            name,
            MAX_NAME_LENGTH,
            name.len()
        );
    }

    match description {
        None => warn!("{}: no description; hosts surface content by it", source_file),
        Some(d) if d.len() > MAX_DESCRIPTION_LENGTH => warn!(
            "{}: description exceeds {} characters (was {}), may be truncated",
            source_file,
            MAX_DESCRIPTION_LENGTH,
            d.len()
        ),
        Some(_) => {}
    }
}
