//! Production backend: collections read from one pre-serialized JSON bundle

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{ContentError, Result};
use crate::source::{CollectionKind, CollectionMap, ContentSource};

/// The bundle artifact: all three collections in one JSON file.
///
/// Written by `axiom-bundle` at packaging time, consumed by [`BundleSource`]
/// in production. Array order is load order; a later entry replaces an
/// earlier one with the same name, matching the filesystem source's policy.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Bundle {
    /// Skill documents
    #[serde(default)]
    pub skills: Vec<Document>,
    /// Command documents
    #[serde(default)]
    pub commands: Vec<Document>,
    /// Agent documents
    #[serde(default)]
    pub agents: Vec<Document>,
}

impl Bundle {
    /// Capture every collection of `source`, sorted by name so repeated
    /// bundling of the same content yields identical artifacts.
    pub fn from_source(source: &dyn ContentSource) -> Result<Self> {
        let mut bundle = Self::default();
        for kind in CollectionKind::ALL {
            let map = source.collection(kind)?;
            let mut docs: Vec<Document> = map.values().cloned().collect();
            docs.sort_by(|a, b| a.name.cmp(&b.name));
            match kind {
                CollectionKind::Skills => bundle.skills = docs,
                CollectionKind::Commands => bundle.commands = docs,
                CollectionKind::Agents => bundle.agents = docs,
            }
        }
        Ok(bundle)
    }

    /// Serialize to pretty-printed JSON and write to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(
            "wrote bundle {:?}: {} skills, {} commands, {} agents",
            path,
            self.skills.len(),
            self.commands.len(),
            self.agents.len()
        );
        Ok(())
    }
}

/// Bundle-backed content source for production mode.
///
/// The bundle file must exist at construction time — a content server without
/// its bundle cannot start and has no degraded mode. The JSON is parsed once,
/// on first access, and all three collections are distributed into maps then.
#[derive(Debug)]
pub struct BundleSource {
    path: PathBuf,
    cache: Mutex<Option<[Arc<CollectionMap>; 3]>>,
}

impl BundleSource {
    /// Create a source backed by the bundle at `path`.
    ///
    /// Fails if the file does not exist; parse errors surface on first load.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(ContentError::MissingBundle { path });
        }
        Ok(Self {
            path,
            cache: Mutex::new(None),
        })
    }

    fn maps(&self) -> Result<[Arc<CollectionMap>; 3]> {
        let mut slot = self.cache.lock();
        if let Some(maps) = slot.as_ref() {
            return Ok(maps.clone());
        }

        let contents = fs::read_to_string(&self.path)?;
        let bundle: Bundle =
            serde_json::from_str(&contents).map_err(|source| ContentError::InvalidBundle {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "loaded content bundle {:?}: {} skills, {} commands, {} agents",
            self.path,
            bundle.skills.len(),
            bundle.commands.len(),
            bundle.agents.len()
        );

        let maps = [
            index(CollectionKind::Skills, bundle.skills),
            index(CollectionKind::Commands, bundle.commands),
            index(CollectionKind::Agents, bundle.agents),
        ];
        *slot = Some(maps.clone());
        Ok(maps)
    }
}

impl ContentSource for BundleSource {
    fn collection(&self, kind: CollectionKind) -> Result<Arc<CollectionMap>> {
        Ok(Arc::clone(&self.maps()?[kind as usize]))
    }
}

fn index(kind: CollectionKind, docs: Vec<Document>) -> Arc<CollectionMap> {
    let mut map = CollectionMap::with_capacity(docs.len());
    for doc in docs {
        if let Some(prev) = map.insert(doc.name.clone(), doc) {
            warn!("duplicate {} name '{}' in bundle; later entry wins", kind, prev.name);
        }
    }
    Arc::new(map)
}
