use super::file::FileDiff;

/// A complete parsed diff containing changes for multiple files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub files: Vec<FileDiff>,
}

impl Diff {
    /// Parse raw unified-diff text into per-file diffs, in input order.
    ///
    /// Sections that cannot be modeled are skipped; empty input yields an
    /// empty file list. This never fails: the worst outcome of malformed
    /// input is a partial or empty model.
    pub fn parse(text: &str) -> Self {
        let mut files = Vec::new();
        let mut current_section = String::new();

        for line in text.lines() {
            if line.starts_with("diff --git ") {
                // Start of new file section - parse the previous one
                if !current_section.is_empty()
                    && let Some(file_diff) = FileDiff::parse_section(&current_section)
                {
                    files.push(file_diff);
                }
                current_section = line.to_string();
                current_section.push('\n');
            } else if !current_section.is_empty() {
                current_section.push_str(line);
                current_section.push('\n');
            }
        }

        // Don't forget the last section
        if !current_section.is_empty()
            && let Some(file_diff) = FileDiff::parse_section(&current_section)
        {
            files.push(file_diff);
        }

        Diff { files }
    }

    /// Look up a file diff by its stable key.
    pub fn file(&self, path: &str) -> Option<&FileDiff> {
        self.files.iter().find(|file| file.path() == path)
    }
}
