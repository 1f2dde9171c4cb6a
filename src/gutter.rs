//! Per-line gutter classification.
//!
//! Maps new-file line numbers to the change kind shown beside them. Within
//! each run of consecutive changed lines, additions that replace a deletion
//! are Modified, surplus additions are Added, and surplus deletions anchor a
//! Deleted marker on the nearest following context or addition line.

use std::collections::BTreeMap;

use crate::diff::{FileDiff, Line, LineKind};

/// Change kind displayed in the gutter next to a new-file line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GutterChange {
    Added,
    Modified,
    Deleted,
}

/// Classify every changed line of a file diff by new-file line number.
///
/// Context and hunk-header lines never receive a marker. A surplus-deletion
/// marker that would anchor past the end of the file (no following context
/// or addition line exists) is dropped. A line that is itself added or
/// modified keeps that marker even when a preceding deletion run would
/// anchor on it.
pub fn gutter_changes(file: &FileDiff) -> BTreeMap<u32, GutterChange> {
    let lines: Vec<&Line> = file.lines().collect();
    let mut changes = BTreeMap::new();
    // Indices just past runs whose deletions outnumber their additions
    let mut dangling_run_ends: Vec<usize> = Vec::new();

    let mut idx = 0;
    while idx < lines.len() {
        if !is_change(lines[idx].kind) {
            idx += 1;
            continue;
        }

        let run_start = idx;
        while idx < lines.len() && is_change(lines[idx].kind) {
            idx += 1;
        }
        let run = &lines[run_start..idx];

        let deletions = run
            .iter()
            .filter(|line| line.kind == LineKind::Deletion)
            .count();
        let additions: Vec<&&Line> = run
            .iter()
            .filter(|line| line.kind == LineKind::Addition)
            .collect();

        let modified = deletions.min(additions.len());
        for (position, addition) in additions.iter().enumerate() {
            if let Some(new_line) = addition.new_line {
                let change = if position < modified {
                    GutterChange::Modified
                } else {
                    GutterChange::Added
                };
                changes.insert(new_line, change);
            }
        }

        if deletions > additions.len() {
            dangling_run_ends.push(idx);
        }
    }

    for run_end in dangling_run_ends {
        let anchor = lines[run_end..]
            .iter()
            .find(|line| matches!(line.kind, LineKind::Context | LineKind::Addition))
            .and_then(|line| line.new_line);
        if let Some(new_line) = anchor {
            changes.entry(new_line).or_insert(GutterChange::Deleted);
        }
        // No anchor: deletions at end of file, the marker is dropped
    }

    changes
}

fn is_change(kind: LineKind) -> bool {
    matches!(kind, LineKind::Deletion | LineKind::Addition)
}
