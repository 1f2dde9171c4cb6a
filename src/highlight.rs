//! Intra-line change highlighting for replacement pairs.
//!
//! Both sides of a 1:1 deletion/addition pair are split into
//! whitespace-delimited tokens, aligned by longest common subsequence over
//! token text, and the tokens left unmatched on each side are merged into
//! contiguous highlight ranges.

use std::ops::Range;

/// A whitespace-delimited token and its byte range in the source line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'a> {
    text: &'a str,
    range: Range<usize>,
}

/// Compute the changed character ranges between two versions of a line.
///
/// Returns half-open byte ranges into `old` and `new` respectively, in
/// ascending order. Lines that share no token at all yield two empty lists:
/// highlighting the whole line would add nothing over the line-level
/// deletion/addition coloring.
pub fn compute_char_diff(old: &str, new: &str) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);

    let pairs = lcs_pairs(&old_tokens, &new_tokens);
    if pairs.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut old_matched = vec![false; old_tokens.len()];
    let mut new_matched = vec![false; new_tokens.len()];
    for &(i, j) in &pairs {
        old_matched[i] = true;
        new_matched[j] = true;
    }

    (
        unmatched_spans(&old_tokens, &old_matched),
        unmatched_spans(&new_tokens, &new_matched),
    )
}

/// Split a line on runs of whitespace, keeping each surviving token's byte
/// range. Whitespace-only input yields no tokens.
fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    text: &line[s..idx],
                    range: s..idx,
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &line[s..],
            range: s..line.len(),
        });
    }

    tokens
}

/// Longest common subsequence over token text, as `(old_index, new_index)`
/// pairs in ascending order.
///
/// Standard O(n·m) dynamic programming; the backtrack takes the diagonal
/// whenever the tokens match, so ties resolve to the earliest alignment.
fn lcs_pairs(old: &[Token<'_>], new: &[Token<'_>]) -> Vec<(usize, usize)> {
    let n = old.len();
    let m = new.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // lengths[i][j] = LCS length of old[i..] and new[j..]
    let mut lengths = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i][j] = if old[i].text == new[j].text {
                lengths[i + 1][j + 1] + 1
            } else {
                lengths[i + 1][j].max(lengths[i][j + 1])
            };
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i].text == new[j].text {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[i + 1][j] >= lengths[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    pairs
}

/// Merge consecutive unmatched tokens into spans and map each span to the
/// byte range from its first token's start to its last token's end.
///
/// A span may cover whitespace between its tokens, but never an intervening
/// matched token.
fn unmatched_spans(tokens: &[Token<'_>], matched: &[bool]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut run: Option<Range<usize>> = None;

    for (idx, token) in tokens.iter().enumerate() {
        if matched[idx] {
            if let Some(span) = run.take() {
                spans.push(span);
            }
        } else {
            run = match run {
                Some(span) => Some(span.start..token.range.end),
                None => Some(token.range.clone()),
            };
        }
    }
    if let Some(span) = run {
        spans.push(span);
    }

    spans
}
