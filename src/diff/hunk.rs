use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, u32 as line_number},
    combinator::opt,
    sequence::preceded,
};

use super::line::{Line, LineKind};

/// Parsed form of an `@@ -old[,count] +new[,count] @@ [context]` header.
///
/// An omitted count means a single line and defaults to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Free text after the closing `@@`, without surrounding whitespace
    pub context: String,
}

impl Default for HunkHeader {
    fn default() -> Self {
        HunkHeader {
            old_start: 1,
            old_count: 1,
            new_start: 1,
            new_count: 1,
            context: String::new(),
        }
    }
}

impl HunkHeader {
    /// Parse a hunk header line.
    ///
    /// Never fails: a header that does not match the grammar degrades to the
    /// default ranges so that parsing of the surrounding file can continue.
    pub fn parse(text: &str) -> Self {
        match header_ranges(text) {
            Ok((_, header)) => header,
            Err(_) => {
                log::debug!("unparseable hunk header {text:?}, using default ranges");
                HunkHeader::default()
            }
        }
    }
}

/// One `start[,count]` range, count defaulting to 1
fn range(input: &str) -> IResult<&str, (u32, u32)> {
    let (rest, (start, count)) =
        (line_number, opt(preceded(char(','), line_number))).parse(input)?;
    Ok((rest, (start, count.unwrap_or(1))))
}

fn header_ranges(input: &str) -> IResult<&str, HunkHeader> {
    let (rest, (_, (old_start, old_count), _, (new_start, new_count), _)) =
        (tag("@@ -"), range, tag(" +"), range, tag(" @@")).parse(input)?;

    Ok((
        "",
        HunkHeader {
            old_start,
            old_count,
            new_start,
            new_count,
            context: rest.trim().to_string(),
        },
    ))
}

/// One contiguous change block of a file diff.
///
/// `lines` always begins with the `HunkHeader` line mirroring `header`;
/// the remaining lines are the hunk body in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Index of this hunk within its file diff
    pub id: usize,
    /// The literal `@@ … @@` header text
    pub header: String,
    pub lines: Vec<Line>,
}

impl Hunk {
    /// Re-parse the stored header text into its numeric ranges.
    pub fn header_info(&self) -> HunkHeader {
        HunkHeader::parse(&self.header)
    }

    /// Body lines, excluding the leading `HunkHeader` mirror line.
    pub fn body(&self) -> impl Iterator<Item = &Line> {
        self.lines
            .iter()
            .filter(|line| line.kind != LineKind::HunkHeader)
    }

    /// Whether the header carries trailing free-text context after the
    /// closing `@@`. Consumers treat such hunks as landing inside a named
    /// scope (function, section) rather than between them.
    pub fn is_significant(&self) -> bool {
        !self.header_info().context.is_empty()
    }

    /// Content hash over the ordered `(kind, text)` pairs of all lines,
    /// including the header line.
    ///
    /// Independent of `id`, so re-parsing the same diff text yields equal
    /// fingerprints even though ids are reassigned. Fingerprints are only
    /// compared within one session; they are never persisted.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for line in &self.lines {
            kind_tag(line.kind).hash(&mut hasher);
            line.text.hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn kind_tag(kind: LineKind) -> u8 {
    match kind {
        LineKind::HunkHeader => 0,
        LineKind::Context => 1,
        LineKind::Addition => 2,
        LineKind::Deletion => 3,
    }
}
