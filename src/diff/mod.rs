pub mod file;
pub mod full;
pub mod hunk;
pub mod line;

pub use file::FileDiff;
pub use full::Diff;
pub use hunk::{Hunk, HunkHeader};
pub use line::{Line, LineKind};

/// Format a parsed diff as a per-file change summary
pub fn format_stats(diff: &Diff) -> String {
    let mut result = String::new();

    for file in &diff.files {
        if file.old_path != file.new_path {
            result.push_str(&format!("{} -> {}", file.old_path, file.new_path));
        } else {
            result.push_str(file.path());
        }

        let hunks = file.hunks.len();
        let noun = if hunks == 1 { "hunk" } else { "hunks" };
        result.push_str(&format!(
            ": +{} -{} ({} {})\n",
            file.addition_count(),
            file.deletion_count(),
            hunks,
            noun
        ));
    }

    result
}
