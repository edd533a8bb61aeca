//! Development backend: collections read from a live directory tree

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::document::parse_document;
use crate::error::{ContentError, Result};
use crate::source::{CollectionKind, CollectionMap, ContentSource};

/// Filesystem-backed content source for development mode.
///
/// Expects `skills/`, `commands/`, and `agents/` as siblings under the plugin
/// root, each holding `*.md` files. A collection is read on first access and
/// memoized; edits on disk require a restart to be observed.
pub struct FsSource {
    root: PathBuf,
    cache: [Mutex<Option<Arc<CollectionMap>>>; 3],
}

impl FsSource {
    /// Create a source rooted at a plugin checkout. No I/O happens until the
    /// first collection access.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Default::default(),
        }
    }

    fn slot(&self, kind: CollectionKind) -> &Mutex<Option<Arc<CollectionMap>>> {
        &self.cache[kind as usize]
    }

    /// Enumerate and parse one collection directory.
    ///
    /// A missing directory is a structural error: the plugin checkout is
    /// broken, not empty. Malformed documents are skipped with a warning.
    fn read_collection(&self, kind: CollectionKind) -> Result<CollectionMap> {
        let dir = self.root.join(kind.key());
        if !dir.is_dir() {
            return Err(ContentError::MissingDirectory { path: dir });
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        // Lexicographic filename order makes duplicate handling deterministic:
        // the last file processed wins.
        paths.sort();

        let mut map = CollectionMap::new();
        let mut skipped = 0usize;

        for path in &paths {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let contents = match fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("skipping unreadable {:?}: {}", path, e);
                    skipped += 1;
                    continue;
                }
            };

            match parse_document(&contents, &file_name) {
                Ok(doc) => {
                    debug!("discovered {} '{}' in {}", kind, doc.name, file_name);
                    if let Some(prev) = map.insert(doc.name.clone(), doc) {
                        warn!(
                            "duplicate {} name '{}': {} replaces {}",
                            kind, prev.name, file_name, prev.source_file
                        );
                    }
                }
                Err(e) => {
                    warn!("skipping malformed document: {}", e);
                    skipped += 1;
                }
            }
        }

        info!("loaded {} {} ({} skipped)", map.len(), kind, skipped);
        Ok(map)
    }
}

impl ContentSource for FsSource {
    fn collection(&self, kind: CollectionKind) -> Result<Arc<CollectionMap>> {
        let mut slot = self.slot(kind).lock();
        if let Some(map) = slot.as_ref() {
            return Ok(Arc::clone(map));
        }

        let map = Arc::new(self.read_collection(kind)?);
        *slot = Some(Arc::clone(&map));
        Ok(map)
    }
}
