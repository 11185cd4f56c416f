//! Input container discovery.
//!
//! Scans the immediate sub-directories of a working directory for a fixed
//! container filename, one run per sub-directory. Unreadable or corrupt
//! candidates are logged and skipped; discovery order is sorted by
//! directory name so the reference input is deterministic.

use crate::error::StoreError;
use crate::store::FileContainer;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Result of scanning a working directory.
pub struct DiscoveredInputs {
    /// Opened containers, labeled by their sub-directory name, sorted.
    pub inputs: Vec<(String, FileContainer)>,
    /// Candidates that existed but failed to open.
    pub skipped: usize,
}

/// Scan `root`'s immediate sub-directories for `input_filename` and open
/// every readable hit.
pub fn discover_inputs(
    root: &Path,
    input_filename: &str,
) -> Result<DiscoveredInputs, StoreError> {
    let mut dirs: Vec<_> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();

    let mut inputs = Vec::new();
    let mut skipped = 0;

    for dir in dirs {
        let candidate = dir.join(input_filename);
        if !candidate.is_file() {
            continue;
        }
        let label = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        match FileContainer::open(&candidate) {
            Ok(container) => {
                info!(path = %candidate.display(), "Found input container");
                inputs.push((label, container));
            }
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "Skipping unreadable container");
                skipped += 1;
            }
        }
    }

    info!(
        found = inputs.len(),
        skipped, "Input container discovery finished"
    );
    Ok(DiscoveredInputs { inputs, skipped })
}
