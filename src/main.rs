use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use diff_lens::{
    Diff, DiffLensError, GutterChange, Line, ReviewSession, Row, format_stats, gutter_changes,
    pair_lines,
};

#[derive(Parser)]
#[command(name = "diff-lens")]
#[command(about = "Inspect unified diffs: stats, side-by-side rows, gutter markers, single-hunk patches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-file addition/deletion summary
    Stats {
        /// Diff file to read (stdin when omitted)
        path: Option<PathBuf>,
    },
    /// Side-by-side rows for one file of the diff
    Rows {
        /// Path of the file inside the diff
        file: String,
        /// Diff file to read (stdin when omitted)
        path: Option<PathBuf>,
    },
    /// Gutter change markers for one file of the diff
    Gutter {
        /// Path of the file inside the diff
        file: String,
        /// Diff file to read (stdin when omitted)
        path: Option<PathBuf>,
    },
    /// Standalone patch for a single hunk, suitable for `git apply`
    Extract {
        /// Path of the file inside the diff
        file: String,
        /// Zero-based hunk index within that file
        hunk: usize,
        /// Diff file to read (stdin when omitted)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { path } => {
            let diff = Diff::parse(&read_input(path.as_deref())?);
            print!("{}", format_stats(&diff));
        }
        Commands::Rows { file, path } => {
            let diff = Diff::parse(&read_input(path.as_deref())?);
            let target = diff
                .file(&file)
                .ok_or_else(|| DiffLensError::UnknownFile { path: file.clone() })?;
            for row in pair_lines(&target.hunks) {
                println!("{}", render_row(&row));
            }
        }
        Commands::Gutter { file, path } => {
            let diff = Diff::parse(&read_input(path.as_deref())?);
            let target = diff
                .file(&file)
                .ok_or_else(|| DiffLensError::UnknownFile { path: file.clone() })?;
            for (line, change) in gutter_changes(target) {
                println!("{line:>6} {}", change_label(change));
            }
        }
        Commands::Extract { file, hunk, path } => {
            let mut session = ReviewSession::new();
            session.load(&read_input(path.as_deref())?);
            print!("{}", session.hunk_patch(&file, hunk)?);
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn render_row(row: &Row) -> String {
    let (left_no, left_text) = side_text(row.left.as_ref(), |line| line.old_line);
    let (right_no, right_text) = side_text(row.right.as_ref(), |line| line.new_line);
    format!("{left_no:>4} {left_text:<48}|{right_no:>4} {right_text}")
}

fn side_text(line: Option<&Line>, number: impl Fn(&Line) -> Option<u32>) -> (String, String) {
    match line {
        Some(line) => (
            number(line).map(|n| n.to_string()).unwrap_or_default(),
            line.text.clone(),
        ),
        None => (String::new(), String::new()),
    }
}

fn change_label(change: GutterChange) -> &'static str {
    match change {
        GutterChange::Added => "added",
        GutterChange::Modified => "modified",
        GutterChange::Deleted => "deleted",
    }
}
