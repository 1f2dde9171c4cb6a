use diff_lens::{
    Diff, GutterChange, LineKind, ReviewSession, format_stats, gutter_changes, pair_lines,
};
use similar_asserts::assert_eq;

/// A review-sized diff: one file with a replacement and an insertion across
/// two hunks, one file with a pure addition hunk.
const REVIEW_DIFF: &str = "\
diff --git a/src/config.rs b/src/config.rs
index 3f1a2b..9c4d5e 100644
--- a/src/config.rs
+++ b/src/config.rs
@@ -10,5 +10,6 @@ impl Config {
 fn load(path: &Path) -> Result<Config> {
     let raw = fs::read_to_string(path)?;
-    let parsed = toml::from_str(&raw)?;
+    let parsed = toml::from_str::<Config>(&raw)?;
+    parsed.validate()?;
     Ok(parsed)
 }
@@ -42,3 +43,3 @@ impl Default for Config {
 fn default() -> Self {
-        retries: 3,
+        retries: 5,
 }
diff --git a/src/main.rs b/src/main.rs
--- a/src/main.rs
+++ b/src/main.rs
@@ -3,0 +4,2 @@
+mod config;
+mod engine;
";

/// REVIEW_DIFF after another editing round: the retries hunk changed again
/// and a new file appeared.
const REVIEW_DIFF_ROUND_TWO: &str = "\
diff --git a/src/config.rs b/src/config.rs
index 3f1a2b..b00a71 100644
--- a/src/config.rs
+++ b/src/config.rs
@@ -10,5 +10,6 @@ impl Config {
 fn load(path: &Path) -> Result<Config> {
     let raw = fs::read_to_string(path)?;
-    let parsed = toml::from_str(&raw)?;
+    let parsed = toml::from_str::<Config>(&raw)?;
+    parsed.validate()?;
     Ok(parsed)
 }
@@ -42,3 +43,3 @@ impl Default for Config {
 fn default() -> Self {
-        retries: 3,
+        retries: 8,
 }
diff --git a/src/main.rs b/src/main.rs
--- a/src/main.rs
+++ b/src/main.rs
@@ -3,0 +4,2 @@
+mod config;
+mod engine;
diff --git a/src/engine.rs b/src/engine.rs
--- a/src/engine.rs
+++ b/src/engine.rs
@@ -0,0 +1,2 @@
+pub struct Engine;
+
";

// =============================================================================
// Case 1: Parse and summarize
// =============================================================================

#[test]
fn case_01_parse_and_summarize() {
    let diff = Diff::parse(REVIEW_DIFF);

    assert_eq!(diff.files.len(), 2);
    assert_eq!(diff.files[0].path(), "src/config.rs");
    assert_eq!(diff.files[0].hunks.len(), 2);
    assert_eq!(diff.files[0].addition_count(), 3);
    assert_eq!(diff.files[0].deletion_count(), 2);
    assert_eq!(diff.files[1].path(), "src/main.rs");

    insta::assert_snapshot!(format_stats(&diff), @r"
src/config.rs: +3 -2 (2 hunks)
src/main.rs: +2 -0 (1 hunk)
");
}

// =============================================================================
// Case 2: Side-by-side rows
// =============================================================================

#[test]
fn case_02_side_by_side_rows() {
    let diff = Diff::parse(REVIEW_DIFF);
    let rows = pair_lines(&diff.files[0].hunks);

    // hunk 1: header + 2 context + paired replacement + surplus addition
    // + 2 context; hunk 2: header + context + paired replacement + context
    assert_eq!(rows.len(), 11);

    let ids: Vec<_> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, (0..11).collect::<Vec<_>>());

    // the replacement pairs old and new text on one row
    let replacement = &rows[3];
    assert_eq!(
        replacement.left.as_ref().map(|l| l.text.as_str()),
        Some("    let parsed = toml::from_str(&raw)?;")
    );
    assert_eq!(
        replacement.right.as_ref().map(|l| l.text.as_str()),
        Some("    let parsed = toml::from_str::<Config>(&raw)?;")
    );

    // the surplus addition renders right-only
    let surplus = &rows[4];
    assert_eq!(surplus.left, None);
    assert_eq!(
        surplus.right.as_ref().map(|l| l.text.as_str()),
        Some("    parsed.validate()?;")
    );

    // header and context rows mirror the same line on both sides
    for row in rows
        .iter()
        .filter(|row| row.left.as_ref().is_some_and(|l| l.kind != LineKind::Deletion))
    {
        assert_eq!(row.left, row.right);
    }
}

// =============================================================================
// Case 3: Gutter markers
// =============================================================================

#[test]
fn case_03_gutter_markers() {
    let diff = Diff::parse(REVIEW_DIFF);

    let config_markers: Vec<_> = gutter_changes(&diff.files[0]).into_iter().collect();
    assert_eq!(
        config_markers,
        vec![
            (12, GutterChange::Modified),
            (13, GutterChange::Added),
            (44, GutterChange::Modified),
        ]
    );

    let main_markers: Vec<_> = gutter_changes(&diff.files[1]).into_iter().collect();
    assert_eq!(
        main_markers,
        vec![(4, GutterChange::Added), (5, GutterChange::Added)]
    );
}

// =============================================================================
// Case 4: Single-hunk patch extraction and round-trip
// =============================================================================

#[test]
fn case_04_single_hunk_patch_roundtrip() {
    let mut session = ReviewSession::new();
    session.load(REVIEW_DIFF);

    let patch = session
        .hunk_patch("src/config.rs", 1)
        .expect("hunk exists");
    insta::assert_snapshot!(patch, @r"
diff --git a/src/config.rs b/src/config.rs
--- a/src/config.rs
+++ b/src/config.rs
@@ -42,3 +43,3 @@ impl Default for Config {
 fn default() -> Self {
-        retries: 3,
+        retries: 5,
 }
");

    let reparsed = Diff::parse(&patch);
    assert_eq!(reparsed.files.len(), 1);
    assert_eq!(reparsed.files[0].hunks.len(), 1);

    let original = &session.files()[0].hunks[1];
    let copy = &reparsed.files[0].hunks[0];
    assert_eq!(copy.header, original.header);
    assert_eq!(copy.fingerprint(), original.fingerprint());
    for (a, b) in copy.lines.iter().zip(&original.lines) {
        assert!(a.same_content(b));
    }
}

// =============================================================================
// Case 5: Incremental review across snapshots
// =============================================================================

#[test]
fn case_05_incremental_review_delta() {
    let mut session = ReviewSession::new();
    session.load(REVIEW_DIFF);

    // first look: everything is pending
    assert_eq!(session.pending().len(), 2);
    session.mark_reviewed("first pass");
    assert!(session.pending().is_empty());

    // the next editing round re-parses from scratch
    session.load(REVIEW_DIFF_ROUND_TWO);
    let pending = Diff {
        files: session.pending(),
    };

    insta::assert_snapshot!(format_stats(&pending), @r"
src/config.rs: +1 -1 (1 hunk)
src/engine.rs: +2 -0 (1 hunk)
");

    // only the changed hunk of config.rs survives the filter
    assert_eq!(pending.files[0].hunks.len(), 1);
    assert!(
        pending.files[0].hunks[0]
            .lines
            .iter()
            .any(|line| line.text.contains("retries: 8"))
    );

    session.mark_reviewed("second pass");
    assert!(session.pending().is_empty());
    assert_eq!(session.store().len(), 2);
}

// =============================================================================
// Case 6: Hunk significance from header context
// =============================================================================

#[test]
fn case_06_hunk_significance() {
    let diff = Diff::parse(REVIEW_DIFF);

    // both config.rs hunks carry scope context after the closing @@
    assert!(diff.files[0].hunks[0].is_significant());
    assert!(diff.files[0].hunks[1].is_significant());
    // the bare header on main.rs does not
    assert!(!diff.files[1].hunks[0].is_significant());
}

// =============================================================================
// Case 7: Inline highlights end to end
// =============================================================================

#[test]
fn case_07_inline_highlights() {
    let diff = Diff::parse(REVIEW_DIFF);
    let lines = &diff.files[0].hunks[0].lines;

    let deletion = &lines[3];
    let addition = &lines[4];
    assert_eq!(deletion.kind, LineKind::Deletion);
    assert_eq!(addition.kind, LineKind::Addition);

    // "toml::from_str(&raw)?;" -> "toml::from_str::<Config>(&raw)?;" is the
    // only token that differs on each side
    let old_ranges = deletion.highlights.as_ref().expect("pair computed");
    let new_ranges = addition.highlights.as_ref().expect("pair computed");
    assert_eq!(old_ranges.len(), 1);
    assert_eq!(new_ranges.len(), 1);
    assert_eq!(
        &deletion.text[old_ranges[0].clone()],
        "toml::from_str(&raw)?;"
    );
    assert_eq!(
        &addition.text[new_ranges[0].clone()],
        "toml::from_str::<Config>(&raw)?;"
    );

    // the reconstruction-only addition line is not part of a pair
    assert_eq!(lines[5].highlights, None);

    // unrelated line pair in hunk 2 highlights just the changed value
    let hunk2 = &diff.files[0].hunks[1].lines;
    let old_value = hunk2[2].highlights.as_ref().expect("pair computed");
    assert_eq!(&hunk2[2].text[old_value[0].clone()], "3,");
}
