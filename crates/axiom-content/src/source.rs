//! Backend-independent access to the three content collections

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;

/// A loaded collection, keyed by document name.
pub type CollectionMap = HashMap<String, Document>;

/// The three content collections Axiom serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Passive guidance surfaced by the host on context match
    Skills,
    /// Explicitly user-invoked guidance
    Commands,
    /// Autonomous scanning routines with restricted tool lists
    Agents,
}

impl CollectionKind {
    /// Every kind, in load order.
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Skills,
        CollectionKind::Commands,
        CollectionKind::Agents,
    ];

    /// Subdirectory name (development mode) and bundle key for this collection.
    pub fn key(self) -> &'static str {
        match self {
            CollectionKind::Skills => "skills",
            CollectionKind::Commands => "commands",
            CollectionKind::Agents => "agents",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Uniform access to skills, commands, and agents regardless of backend.
///
/// Implementations load a collection on first access and memoize it for the
/// process lifetime; every later call returns the same `Arc`. The dispatch
/// layer only ever sees this trait, so development and production backends
/// are interchangeable.
pub trait ContentSource: Send + Sync {
    /// Load (or return the memoized) collection of the given kind.
    fn collection(&self, kind: CollectionKind) -> Result<Arc<CollectionMap>>;

    /// Look up one document by name, loading its collection if needed.
    ///
    /// A name that was never loaded is `Ok(None)`, not an error.
    fn get(&self, kind: CollectionKind, name: &str) -> Result<Option<Document>> {
        Ok(self.collection(kind)?.get(name).cloned())
    }

    /// Load the skills collection.
    fn load_skills(&self) -> Result<Arc<CollectionMap>> {
        self.collection(CollectionKind::Skills)
    }

    /// Load the commands collection.
    fn load_commands(&self) -> Result<Arc<CollectionMap>> {
        self.collection(CollectionKind::Commands)
    }

    /// Load the agents collection.
    fn load_agents(&self) -> Result<Arc<CollectionMap>> {
        self.collection(CollectionKind::Agents)
    }

    /// Look up a skill by name.
    fn get_skill(&self, name: &str) -> Result<Option<Document>> {
        self.get(CollectionKind::Skills, name)
    }

    /// Look up a command by name.
    fn get_command(&self, name: &str) -> Result<Option<Document>> {
        self.get(CollectionKind::Commands, name)
    }

    /// Look up an agent by name.
    fn get_agent(&self, name: &str) -> Result<Option<Document>> {
        self.get(CollectionKind::Agents, name)
    }
}
