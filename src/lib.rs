//! Unified-diff processing engine for incremental code review.
//!
//! Raw diff text parses into an ordered [`Diff`] model of files, hunks, and
//! lines, with intra-line change highlighting on replacement pairs. The
//! model feeds side-by-side [`rows`](crate::rows), per-line
//! [`gutter`](crate::gutter) markers, standalone single-hunk
//! [`patch`](crate::patch) reconstruction, and the
//! [`snapshot`](crate::snapshot) store that tracks what changed since the
//! last review pass. Everything except [`SnapshotStore`] is pure and
//! synchronous; diff text is supplied by the caller, never read from a VCS.

use error_set::error_set;

pub mod diff;
pub mod gutter;
pub mod highlight;
pub mod patch;
pub mod rows;
pub mod snapshot;

pub use diff::{Diff, FileDiff, Hunk, HunkHeader, Line, LineKind, format_stats};
pub use gutter::{GutterChange, gutter_changes};
pub use highlight::compute_char_diff;
pub use patch::reconstruct_patch;
pub use rows::{Row, pair_lines};
pub use snapshot::{Snapshot, SnapshotStore};

error_set! {
    /// Errors from looking up parts of the current diff model
    DiffLensError := {
        /// The requested path is not among the parsed file diffs
        #[display("No file '{path}' in the current diff")]
        UnknownFile { path: String },
        /// The file exists but has no hunk at the requested index
        #[display("File '{path}' has {count} hunks, no hunk #{index}")]
        UnknownHunk {
            path: String,
            index: usize,
            count: usize,
        },
    }
}

/// Review-session controller owning the live diff model and its snapshots.
///
/// # Examples
/// ```
/// use diff_lens::ReviewSession;
///
/// let text = "diff --git a/hello.txt b/hello.txt\n\
///             --- a/hello.txt\n\
///             +++ b/hello.txt\n\
///             @@ -1 +1 @@\n\
///             -old\n\
///             +new\n";
///
/// let mut session = ReviewSession::new();
/// session.load(text);
/// assert_eq!(session.pending().len(), 1);
///
/// session.mark_reviewed("first pass");
/// assert!(session.pending().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    diff: Diff,
    store: SnapshotStore,
}

impl ReviewSession {
    /// Create a session with no diff loaded and no snapshots.
    pub fn new() -> Self {
        ReviewSession {
            diff: Diff { files: Vec::new() },
            store: SnapshotStore::new(),
        }
    }

    /// Replace the live model by parsing `diff_text`.
    ///
    /// Snapshots survive reloads: they hold fingerprints, not references
    /// into the discarded model.
    pub fn load(&mut self, diff_text: &str) {
        self.diff = Diff::parse(diff_text);
    }

    /// The current diff model.
    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    /// All files of the current model, in input order.
    pub fn files(&self) -> &[FileDiff] {
        &self.diff.files
    }

    /// Files and hunks not yet covered by the active snapshot.
    pub fn pending(&self) -> Vec<FileDiff> {
        self.store.delta(&self.diff.files)
    }

    /// Snapshot the current model and make that snapshot active.
    /// Returns the new snapshot's id.
    pub fn mark_reviewed(&mut self, label: impl Into<String>) -> usize {
        self.store.take_snapshot(label, &self.diff.files).id
    }

    /// Read access to the snapshot history.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Rewind delta computation to an earlier snapshot.
    pub fn set_active_snapshot(&mut self, id: usize) -> bool {
        self.store.set_active(id)
    }

    /// Reconstruct the standalone patch for one hunk of one file.
    pub fn hunk_patch(&self, path: &str, index: usize) -> Result<String, DiffLensError> {
        let file = self
            .diff
            .file(path)
            .ok_or_else(|| DiffLensError::UnknownFile {
                path: path.to_string(),
            })?;
        let hunk = file
            .hunks
            .get(index)
            .ok_or_else(|| DiffLensError::UnknownHunk {
                path: path.to_string(),
                index,
                count: file.hunks.len(),
            })?;
        Ok(reconstruct_patch(file, hunk))
    }
}
