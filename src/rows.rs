//! Side-by-side row pairing.
//!
//! Deletions and additions accumulate in pending buffers until a context or
//! hunk-header line (or the end of a hunk) flushes them: buffered lines zip
//! positionally into paired rows, and whichever buffer runs longer spills
//! into single-sided rows.

use crate::diff::{Hunk, Line, LineKind};

/// One display row of a side-by-side layout.
///
/// At least one side is always present. HunkHeader and Context rows mirror
/// the same underlying line into both slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Unique id, strictly increasing in emission order across all hunks
    pub id: usize,
    pub left: Option<Line>,
    pub right: Option<Line>,
}

/// Pair a file diff's hunks into a flat ordered list of side-by-side rows.
pub fn pair_lines(hunks: &[Hunk]) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut next_id = 0usize;
    let mut pending_deletions: Vec<&Line> = Vec::new();
    let mut pending_additions: Vec<&Line> = Vec::new();

    for hunk in hunks {
        for line in &hunk.lines {
            match line.kind {
                LineKind::HunkHeader | LineKind::Context => {
                    flush_pending(
                        &mut rows,
                        &mut next_id,
                        &mut pending_deletions,
                        &mut pending_additions,
                    );
                    rows.push(Row {
                        id: take_id(&mut next_id),
                        left: Some(line.clone()),
                        right: Some(line.clone()),
                    });
                }
                LineKind::Deletion => pending_deletions.push(line),
                LineKind::Addition => pending_additions.push(line),
            }
        }
        // End of hunk closes any open change run
        flush_pending(
            &mut rows,
            &mut next_id,
            &mut pending_deletions,
            &mut pending_additions,
        );
    }

    rows
}

fn flush_pending(
    rows: &mut Vec<Row>,
    next_id: &mut usize,
    deletions: &mut Vec<&Line>,
    additions: &mut Vec<&Line>,
) {
    let paired = deletions.len().min(additions.len());

    for i in 0..paired {
        rows.push(Row {
            id: take_id(next_id),
            left: Some(deletions[i].clone()),
            right: Some(additions[i].clone()),
        });
    }
    for deletion in &deletions[paired..] {
        rows.push(Row {
            id: take_id(next_id),
            left: Some((*deletion).clone()),
            right: None,
        });
    }
    for addition in &additions[paired..] {
        rows.push(Row {
            id: take_id(next_id),
            left: None,
            right: Some((*addition).clone()),
        });
    }

    deletions.clear();
    additions.clear();
}

fn take_id(next: &mut usize) -> usize {
    let id = *next;
    *next += 1;
    id
}
