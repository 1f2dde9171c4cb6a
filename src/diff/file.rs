use super::hunk::{Hunk, HunkHeader};
use super::line::{Line, LineKind};
use crate::highlight::compute_char_diff;

/// A complete diff for a single file.
///
/// `old_path` and `new_path` differ only for renames; `path()` is the stable
/// key consumers use to identify the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub old_path: String,
    pub new_path: String,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// Stable key for this file diff
    pub fn path(&self) -> &str {
        &self.new_path
    }

    /// Total Addition lines across all hunks
    pub fn addition_count(&self) -> usize {
        self.count_kind(LineKind::Addition)
    }

    /// Total Deletion lines across all hunks
    pub fn deletion_count(&self) -> usize {
        self.count_kind(LineKind::Deletion)
    }

    fn count_kind(&self, kind: LineKind) -> usize {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .filter(|line| line.kind == kind)
            .count()
    }

    /// All lines of the file diff in stream order, spanning hunk boundaries.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.hunks.iter().flat_map(|hunk| &hunk.lines)
    }

    /// Parse a single-file section of unified-diff text.
    ///
    /// Expects input starting at a `diff --git` line. Paths come from the
    /// `---`/`+++` lines with their `a/`/`b/` prefixes stripped; `rename from`
    /// and `rename to` lines take precedence when present. Returns `None` for
    /// a section without recognizable `---`/`+++` markers, which the caller
    /// skips without aborting the overall parse.
    #[must_use]
    pub fn parse_section(text: &str) -> Option<Self> {
        let mut old_path: Option<String> = None;
        let mut new_path: Option<String> = None;
        let mut rename_from: Option<String> = None;
        let mut rename_to: Option<String> = None;

        let mut hunks: Vec<Hunk> = Vec::new();
        let mut current: Option<HunkBuilder> = None;
        let mut next_line_id = 0usize;

        for raw in text.lines() {
            if raw.starts_with("@@") {
                if let Some(builder) = current.take() {
                    hunks.push(builder.finish(hunks.len()));
                }
                current = Some(HunkBuilder::open(raw, &mut next_line_id));
            } else if let Some(builder) = current.as_mut() {
                builder.push_body_line(raw, &mut next_line_id);
            } else if let Some(path) = raw.strip_prefix("--- ") {
                old_path = Some(strip_revision_prefix(path, "a/").to_string());
            } else if let Some(path) = raw.strip_prefix("+++ ") {
                new_path = Some(strip_revision_prefix(path, "b/").to_string());
            } else if let Some(path) = raw.strip_prefix("rename from ") {
                rename_from = Some(path.to_string());
            } else if let Some(path) = raw.strip_prefix("rename to ") {
                rename_to = Some(path.to_string());
            }
            // Remaining metadata (index, mode, similarity) carries nothing we model
        }
        if let Some(builder) = current.take() {
            hunks.push(builder.finish(hunks.len()));
        }

        let (Some(old_path), Some(new_path)) = (old_path, new_path) else {
            log::debug!("skipping file section without ---/+++ markers");
            return None;
        };

        Some(FileDiff {
            old_path: rename_from.unwrap_or(old_path),
            new_path: rename_to.unwrap_or(new_path),
            hunks,
        })
    }
}

fn strip_revision_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or(path)
}

/// Accumulates one hunk's lines while tracking the old/new line counters.
struct HunkBuilder {
    header: String,
    lines: Vec<Line>,
    old_line: u32,
    new_line: u32,
}

impl HunkBuilder {
    fn open(header_text: &str, next_line_id: &mut usize) -> Self {
        let info = HunkHeader::parse(header_text);
        let header_line = Line::new(
            take_id(next_line_id),
            LineKind::HunkHeader,
            header_text.to_string(),
            None,
            None,
        );
        HunkBuilder {
            header: header_text.to_string(),
            lines: vec![header_line],
            old_line: info.old_start,
            new_line: info.new_start,
        }
    }

    fn push_body_line(&mut self, raw: &str, next_line_id: &mut usize) {
        if let Some(content) = raw.strip_prefix('+') {
            let line = Line::new(
                take_id(next_line_id),
                LineKind::Addition,
                content.to_string(),
                None,
                Some(self.new_line),
            );
            self.new_line += 1;
            self.lines.push(line);
        } else if let Some(content) = raw.strip_prefix('-') {
            let line = Line::new(
                take_id(next_line_id),
                LineKind::Deletion,
                content.to_string(),
                Some(self.old_line),
                None,
            );
            self.old_line += 1;
            self.lines.push(line);
        } else if raw.starts_with(' ') || raw.is_empty() {
            // An empty raw line is a context line whose trailing whitespace
            // was trimmed by the producing tool
            let content = raw.strip_prefix(' ').unwrap_or("");
            let line = Line::new(
                take_id(next_line_id),
                LineKind::Context,
                content.to_string(),
                Some(self.old_line),
                Some(self.new_line),
            );
            self.old_line += 1;
            self.new_line += 1;
            self.lines.push(line);
        }
        // Anything else ("\ No newline at end of file", stray metadata) is
        // not part of the modeled line stream
    }

    fn finish(mut self, hunk_id: usize) -> Hunk {
        attach_replacement_highlights(&mut self.lines);
        Hunk {
            id: hunk_id,
            header: self.header,
            lines: self.lines,
        }
    }
}

fn take_id(next: &mut usize) -> usize {
    let id = *next;
    *next += 1;
    id
}

/// Attach inline highlights to strict 1:1 replacement pairs: a deletion run
/// of exactly one line immediately followed by an addition pairs with the
/// first addition that follows it. Longer deletion runs, and additions past
/// the first, keep `highlights` unset.
fn attach_replacement_highlights(lines: &mut [Line]) {
    let mut idx = 0;
    while idx + 1 < lines.len() {
        let single_deletion = lines[idx].kind == LineKind::Deletion
            && (idx == 0 || lines[idx - 1].kind != LineKind::Deletion)
            && lines[idx + 1].kind == LineKind::Addition;

        if single_deletion {
            let (old_ranges, new_ranges) =
                compute_char_diff(&lines[idx].text, &lines[idx + 1].text);
            lines[idx].highlights = Some(old_ranges);
            lines[idx + 1].highlights = Some(new_ranges);
            idx += 2;
        } else {
            idx += 1;
        }
    }
}
