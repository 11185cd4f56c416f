//! File-backed container.
//!
//! On-disk layout: a fixed magic, a format version, a blake3 checksum of
//! the payload, then the bincode-encoded directory tree. The checksum is
//! verified on open so a truncated or bit-flipped container is rejected
//! before the merge starts.

use crate::error::StoreError;
use crate::record::Record;
use crate::store::{ContainerRead, ContainerWrite, DirNode, RecordKey};
use crate::types::RecordPath;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const MAGIC: &[u8; 4] = b"GMRG";
const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 32;

/// A container stored in a single file.
///
/// The whole tree is held in memory between `open`/`create` and `flush`;
/// merge inputs are assumed to fit in memory simultaneously.
#[derive(Debug)]
pub struct FileContainer {
    path: PathBuf,
    root: DirNode,
    writable: bool,
}

impl FileContainer {
    /// Open an existing container read-only, verifying its checksum.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path)?;

        if bytes.len() < HEADER_LEN || &bytes[..4] != MAGIC {
            return Err(StoreError::BadMagic(path));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: version,
                supported: FORMAT_VERSION,
            });
        }

        let stored = &bytes[6..HEADER_LEN];
        let payload = &bytes[HEADER_LEN..];
        let actual = blake3::hash(payload);
        if actual.as_bytes() != stored {
            return Err(StoreError::ChecksumMismatch {
                expected: hex::encode(stored),
                actual: hex::encode(actual.as_bytes()),
            });
        }

        let root: DirNode = bincode::deserialize(payload)
            .map_err(|e| StoreError::Decode(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Opened container");
        Ok(FileContainer {
            path,
            root,
            writable: false,
        })
    }

    /// Create a new writable container at `path`.
    ///
    /// The file is written immediately so an uncreatable output surfaces
    /// before any merging happens; `flush` rewrites it with the final tree.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let container = FileContainer {
            path: path.as_ref().to_path_buf(),
            root: DirNode::default(),
            writable: true,
        };
        container.flush()?;
        debug!(path = %container.path.display(), "Created container");
        Ok(container)
    }

    /// Persist the current tree. Writes to a temporary sibling first and
    /// renames over the target so readers never observe a half-written
    /// container.
    pub fn flush(&self) -> Result<(), StoreError> {
        let payload = bincode::serialize(&self.root)
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        let checksum = blake3::hash(&payload);

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(MAGIC)?;
            file.write_all(&FORMAT_VERSION.to_le_bytes())?;
            file.write_all(checksum.as_bytes())?;
            file.write_all(&payload)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContainerRead for FileContainer {
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

impl ContainerWrite for FileContainer {
    fn mkdir(&mut self, path: &RecordPath) -> Result<(), StoreError> {
        if !self.writable {
            return Err(StoreError::ReadOnly(self.path.clone()));
        }
        self.root.mkdir(path)
    }

    fn write(&mut self, path: &RecordPath, record: Record) -> Result<(), StoreError> {
        if !self.writable {
            return Err(StoreError::ReadOnly(self.path.clone()));
        }
        self.root.write(path, record)
    }
}
