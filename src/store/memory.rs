//! In-memory container backend.
//!
//! Used by tests and fixture construction; also the staging tree behind
//! the file backend.

use crate::error::StoreError;
use crate::record::Record;
use crate::store::{ContainerRead, ContainerWrite, DirNode, RecordKey};
use crate::types::RecordPath;

/// A container held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryContainer {
    pub(crate) root: DirNode,
}

impl MemoryContainer {
    pub fn new() -> Self {
        MemoryContainer::default()
    }
}

impl ContainerRead for MemoryContainer {
    fn list(&self, dir: &RecordPath) -> Result<Vec<RecordKey>, StoreError> {
        self.root.list(dir)
    }

    fn kind(&self, path: &RecordPath) -> Result<Option<String>, StoreError> {
        self.root.kind(path)
    }

    fn get(&self, path: &RecordPath) -> Result<Option<Record>, StoreError> {
        self.root.get(path)
    }
}

impl ContainerWrite for MemoryContainer {
    fn mkdir(&mut self, path: &RecordPath) -> Result<(), StoreError> {
        self.root.mkdir(path)
    }

    fn write(&mut self, path: &RecordPath, record: Record) -> Result<(), StoreError> {
        self.root.write(path, record)
    }
}
