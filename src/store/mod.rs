//! Container backends.
//!
//! A container is a hierarchical, directory-like store of named, typed
//! records. The merge engine only ever talks to the [`ContainerRead`] and
//! [`ContainerWrite`] traits; byte-level encoding stays inside the backend.

pub mod file;
pub mod memory;

pub use file::FileContainer;
pub use memory::MemoryContainer;

use crate::error::StoreError;
use crate::record::{type_names, Record};
use crate::types::RecordPath;
use serde::{Deserialize, Serialize};

/// One entry of a directory listing: the record's name plus the kind the
/// backend declares for it. The declared kind is open-ended; mapping it to
/// a merge rule is the classifier's job, queried once per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub name: String,
    pub type_name: String,
}

/// Read side of a container backend.
pub trait ContainerRead {
    /// Entries of the directory at `dir`, in original insertion order.
    ///
    /// Errors if `dir` does not exist or names a non-directory record.
    fn list(&self, dir: &RecordPath) -> Result<Vec<RecordKey>, StoreError>;

    /// Declared kind name of the entry at `path`, or `None` if absent.
    fn kind(&self, path: &RecordPath) -> Result<Option<String>, StoreError>;

    /// The record at `path`. Absent paths and directories yield `None`;
    /// directories are structural, not values.
    fn get(&self, path: &RecordPath) -> Result<Option<Record>, StoreError>;
}

/// Write side of a container backend. Writes are append-only and
/// write-once per path.
pub trait ContainerWrite {
    /// Create an empty sub-directory at `path`. The parent directory must
    /// already exist.
    fn mkdir(&mut self, path: &RecordPath) -> Result<(), StoreError>;

    /// Write a record at `path`. The parent directory must already exist
    /// and the path must not have been written before.
    fn write(&mut self, path: &RecordPath, record: Record) -> Result<(), StoreError>;
}

/// In-memory directory tree shared by the backends. Entries keep insertion
/// order; record enumeration order is part of a container's identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct DirNode {
    entries: Vec<(String, EntryNode)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum EntryNode {
    Record(Record),
    Dir(DirNode),
}

impl EntryNode {
    fn type_name(&self) -> &str {
        match self {
            EntryNode::Record(record) => record.type_name(),
            EntryNode::Dir(_) => type_names::DIRECTORY,
        }
    }
}

impl DirNode {
    fn find(&self, name: &str) -> Option<&EntryNode> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    /// Resolve a directory path, erroring on absent or non-directory
    /// components.
    fn resolve_dir(&self, path: &RecordPath) -> Result<&DirNode, StoreError> {
        let mut dir = self;
        for (depth, component) in path.components().iter().enumerate() {
            let at = RecordPath::parse(&path.components()[..=depth].join("/"));
            match dir.find(component) {
                Some(EntryNode::Dir(sub)) => dir = sub,
                Some(EntryNode::Record(_)) => return Err(StoreError::NotADirectory(at)),
                None => return Err(StoreError::RecordNotFound(at)),
            }
        }
        Ok(dir)
    }

    fn resolve_dir_mut(&mut self, path: &RecordPath) -> Result<&mut DirNode, StoreError> {
        let mut dir = self;
        for (depth, component) in path.components().iter().enumerate() {
            let at = RecordPath::parse(&path.components()[..=depth].join("/"));
            let entry = dir
                .entries
                .iter_mut()
                .find(|(n, _)| n == component)
                .map(|(_, e)| e);
            match entry {
                Some(EntryNode::Dir(sub)) => dir = sub,
                Some(EntryNode::Record(_)) => return Err(StoreError::NotADirectory(at)),
                None => return Err(StoreError::RecordNotFound(at)),
            }
        }
        Ok(dir)
    }

    /// Entry at `path`, or `None` when any component is absent. Lookups
    /// never invent structure, so a missing intermediate directory reads as
    /// an absent record.
    fn lookup(&self, path: &RecordPath) -> Option<&EntryNode> {
        let mut dir = self;
        let components = path.components();
        for component in &components[..components.len().saturating_sub(1)] {
            match dir.find(component) {
                Some(EntryNode::Dir(sub)) => dir = sub,
                _ => return None,
            }
        }
        dir.find(components.last()?)
    }

    pub(crate) fn list(&self, dir: &RecordPath) -> Result<Vec<RecordKey>, StoreError> {
        let node = self.resolve_dir(dir)?;
        Ok(node
            .entries
            .iter()
            .map(|(name, entry)| RecordKey {
                name: name.clone(),
                type_name: entry.type_name().to_string(),
            })
            .collect())
    }

    pub(crate) fn kind(&self, path: &RecordPath) -> Result<Option<String>, StoreError> {
        if path.is_root() {
            return Ok(Some(type_names::DIRECTORY.to_string()));
        }
        Ok(self
            .lookup(path)
            .map(|entry| entry.type_name().to_string()))
    }

    pub(crate) fn get(&self, path: &RecordPath) -> Result<Option<Record>, StoreError> {
        if path.is_root() {
            return Ok(None);
        }
        Ok(match self.lookup(path) {
            Some(EntryNode::Record(record)) => Some(record.clone()),
            _ => None,
        })
    }

    fn insert(&mut self, path: &RecordPath, entry: EntryNode) -> Result<(), StoreError> {
        let name = match path.name() {
            Some(name) => name.to_string(),
            None => return Err(StoreError::DuplicateRecord(path.clone())),
        };
        let parent = path.parent().unwrap_or_else(RecordPath::root);
        let dir = self.resolve_dir_mut(&parent)?;
        if dir.find(&name).is_some() {
            return Err(StoreError::DuplicateRecord(path.clone()));
        }
        dir.entries.push((name, entry));
        Ok(())
    }

    pub(crate) fn mkdir(&mut self, path: &RecordPath) -> Result<(), StoreError> {
        self.insert(path, EntryNode::Dir(DirNode::default()))
    }

    pub(crate) fn write(&mut self, path: &RecordPath, record: Record) -> Result<(), StoreError> {
        self.insert(path, EntryNode::Record(record))
    }
}
