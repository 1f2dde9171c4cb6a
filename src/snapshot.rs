//! Snapshot store for incremental review.
//!
//! A snapshot records, per file path, the ordered hunk fingerprints present
//! at capture time. Comparing the live model against the active snapshot
//! yields the delta: the files and hunks a reviewer has not seen yet.
//! Fingerprints are content hashes, so re-parsing the same diff text (which
//! reassigns ids) still matches a prior snapshot.

use std::collections::{BTreeMap, HashSet};
use std::time::SystemTime;

use crate::diff::FileDiff;

/// Immutable point-in-time record of hunk fingerprints per file path
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Position of this snapshot in its store
    pub id: usize,
    pub label: String,
    pub captured_at: SystemTime,
    files: BTreeMap<String, Vec<u64>>,
}

impl Snapshot {
    /// Fingerprints recorded for `path`, in hunk order, if the file was
    /// present at capture time.
    pub fn fingerprints(&self, path: &str) -> Option<&[u64]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// File paths present at capture time.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Owner of the session's snapshots.
///
/// Not internally synchronized: mutation and reads follow a single-writer
/// discipline, confined to one owning task or guarded externally.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
    active: Option<usize>,
}

impl SnapshotStore {
    /// Create an empty store with no active snapshot.
    pub fn new() -> Self {
        SnapshotStore::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots taken so far, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Capture the fingerprints of every hunk in `files`, append the new
    /// snapshot, and make it the active one.
    pub fn take_snapshot(&mut self, label: impl Into<String>, files: &[FileDiff]) -> &Snapshot {
        let id = self.snapshots.len();
        let captured = files
            .iter()
            .map(|file| {
                let fingerprints = file.hunks.iter().map(|hunk| hunk.fingerprint()).collect();
                (file.path().to_string(), fingerprints)
            })
            .collect();

        self.snapshots.push(Snapshot {
            id,
            label: label.into(),
            captured_at: SystemTime::now(),
            files: captured,
        });
        self.active = Some(id);
        &self.snapshots[id]
    }

    /// The snapshot deltas are computed against: the explicitly selected one,
    /// or the most recently appended when none was selected.
    pub fn active_snapshot(&self) -> Option<&Snapshot> {
        self.active
            .or_else(|| self.snapshots.len().checked_sub(1))
            .and_then(|index| self.snapshots.get(index))
    }

    /// Select which snapshot deltas compare against. Returns `false` and
    /// leaves the selection unchanged when `id` does not exist.
    pub fn set_active(&mut self, id: usize) -> bool {
        if id < self.snapshots.len() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Filter `files` down to what changed since the active snapshot.
    ///
    /// With no snapshot taken yet, everything is new and is returned
    /// unchanged. A file absent from the snapshot is included whole; a file
    /// present in it keeps only the hunks whose fingerprint the snapshot
    /// does not record, and is omitted entirely when none remain. Relative
    /// order of files and hunks is preserved.
    pub fn delta(&self, files: &[FileDiff]) -> Vec<FileDiff> {
        let Some(snapshot) = self.active_snapshot() else {
            return files.to_vec();
        };

        files
            .iter()
            .filter_map(|file| {
                let Some(recorded) = snapshot.fingerprints(file.path()) else {
                    return Some(file.clone());
                };
                let seen: HashSet<u64> = recorded.iter().copied().collect();

                let hunks: Vec<_> = file
                    .hunks
                    .iter()
                    .filter(|hunk| !seen.contains(&hunk.fingerprint()))
                    .cloned()
                    .collect();
                if hunks.is_empty() {
                    None
                } else {
                    Some(FileDiff {
                        old_path: file.old_path.clone(),
                        new_path: file.new_path.clone(),
                        hunks,
                    })
                }
            })
            .collect()
    }
}
