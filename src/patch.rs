use crate::diff::{FileDiff, Hunk};

/// Reconstruct a standalone unified diff containing exactly one hunk.
///
/// The output is independently re-parseable and suitable for an external
/// apply mechanism that stages or applies that hunk in isolation. Feeding it
/// back through the parser yields a single file diff with a single hunk
/// structurally identical to `hunk`.
pub fn reconstruct_patch(file: &FileDiff, hunk: &Hunk) -> String {
    let mut patch = String::new();

    patch.push_str(&format!(
        "diff --git a/{} b/{}\n",
        file.old_path, file.new_path
    ));
    patch.push_str(&format!("--- a/{}\n", file.old_path));
    patch.push_str(&format!("+++ b/{}\n", file.new_path));
    patch.push_str(&hunk.header);
    patch.push('\n');

    for line in hunk.body() {
        if let Some(marker) = line.kind.marker() {
            patch.push(marker);
            patch.push_str(&line.text);
            patch.push('\n');
        }
    }

    patch
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diff::Diff;
    use similar_asserts::assert_eq;

    const TWO_HUNK_DIFF: &str = "\
diff --git a/hello.txt b/hello.txt
--- a/hello.txt
+++ b/hello.txt
@@ -1,3 +1,4 @@
 line one
-line two
+line two modified
+line three new
 line four
@@ -20,2 +21,2 @@ fn main() {
 stable
-before
+after
";

    #[test]
    fn reconstruct_emits_exactly_one_hunk() {
        let diff = Diff::parse(TWO_HUNK_DIFF);
        let file = &diff.files[0];

        let patch = reconstruct_patch(file, &file.hunks[1]);
        assert_eq!(
            patch,
            "diff --git a/hello.txt b/hello.txt\n\
             --- a/hello.txt\n\
             +++ b/hello.txt\n\
             @@ -20,2 +21,2 @@ fn main() {\n\
             \x20stable\n\
             -before\n\
             +after\n"
        );
    }

    #[test]
    fn reconstructed_patch_reparses_to_the_same_hunk() {
        let diff = Diff::parse(TWO_HUNK_DIFF);
        let file = &diff.files[0];

        for hunk in &file.hunks {
            let reparsed = Diff::parse(&reconstruct_patch(file, hunk));
            assert_eq!(reparsed.files.len(), 1);
            assert_eq!(reparsed.files[0].hunks.len(), 1);

            let copy = &reparsed.files[0].hunks[0];
            assert_eq!(copy.header, hunk.header);
            assert_eq!(copy.lines.len(), hunk.lines.len());
            for (a, b) in copy.lines.iter().zip(&hunk.lines) {
                assert!(a.same_content(b), "{:?} != {:?}", a, b);
            }
        }
    }

    #[test]
    fn rename_paths_survive_reconstruction() {
        let diff = Diff::parse(
            "diff --git a/old.rs b/new.rs\nrename from old.rs\nrename to new.rs\n--- a/old.rs\n+++ b/new.rs\n@@ -1 +1 @@\n-a\n+b\n",
        );
        let file = &diff.files[0];

        let patch = reconstruct_patch(file, &file.hunks[0]);
        assert!(patch.starts_with("diff --git a/old.rs b/new.rs\n"));
        assert!(patch.contains("--- a/old.rs\n"));
        assert!(patch.contains("+++ b/new.rs\n"));
    }

    #[test]
    fn addition_only_hunk_reconstructs() {
        let diff = Diff::parse(
            "diff --git a/notes.md b/notes.md\n--- a/notes.md\n+++ b/notes.md\n@@ -136,0 +137 @@\n+- follow up on review\n",
        );
        let file = &diff.files[0];

        let patch = reconstruct_patch(file, &file.hunks[0]);
        assert_eq!(
            patch,
            "diff --git a/notes.md b/notes.md\n--- a/notes.md\n+++ b/notes.md\n@@ -136,0 +137 @@\n+- follow up on review\n"
        );
    }
}
