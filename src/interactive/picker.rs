//! Fuzzy file picker implementation using skim.
//!
//! Lists files below a start directory, files matching the extension filter
//! first. The filter only orders the list; every file can be picked.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use skim::prelude::*;

use crate::core::FileFilter;

/// How deep below the start directory the picker looks for files.
const MAX_DEPTH: usize = 3;

/// Upper bound on listed files, to keep huge home directories responsive.
const MAX_CANDIDATES: usize = 5_000;

/// Output of the entry that asks for a typed path instead.
const TYPE_PATH_MARKER: &str = "";

/// Result of the picker interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePick {
    /// The user picked a file.
    Chosen(PathBuf),
    /// The user aborted the picker.
    Aborted,
    /// The picker could not run or the user asked to type a path.
    TypePath,
}

/// A file wrapped for skim.
struct FileItem {
    path: PathBuf,
    display: String,
}

impl FileItem {
    fn new(path: PathBuf, root: &Path, filter: &FileFilter) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let marker = if filter.matches(&path) { "*" } else { " " };
        let display = format!("{marker} {}", relative.display());
        Self { path, display }
    }
}

impl SkimItem for FileItem {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }

    fn preview(&self, _context: PreviewContext<'_>) -> ItemPreview {
        let mut preview = format!("Path: {}\n", self.path.display());

        if let Ok(meta) = std::fs::metadata(&self.path) {
            preview.push_str(&format!("Size: {} bytes\n", meta.len()));
            if let Ok(modified) = meta.modified() {
                let modified: chrono::DateTime<chrono::Local> = modified.into();
                preview.push_str(&format!(
                    "Modified: {}\n",
                    modified.format(crate::core::DISPLAY_FORMAT)
                ));
            }
        }

        ItemPreview::Text(preview)
    }

    fn output(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

/// Entry that falls back to typing a path.
struct TypePathItem;

impl SkimItem for TypePathItem {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed("> type a path instead")
    }

    fn output(&self) -> Cow<'_, str> {
        Cow::Borrowed(TYPE_PATH_MARKER)
    }
}

/// Collect candidate files below `root`, filter matches first.
///
/// Hidden directories are skipped. Within each group paths are sorted.
#[must_use]
pub fn collect_candidates(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, 0, &mut files);

    let (mut matching, mut other): (Vec<_>, Vec<_>) =
        files.into_iter().partition(|p| filter.matches(p));
    matching.sort();
    other.sort();
    matching.extend(other);
    matching
}

fn walk(dir: &Path, depth: usize, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        if files.len() >= MAX_CANDIDATES {
            return;
        }
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if path.is_dir() {
            if !hidden && depth < MAX_DEPTH {
                walk(&path, depth + 1, files);
            }
        } else if path.is_file() {
            files.push(path);
        }
    }
}

/// Run the interactive picker over files below `root`.
#[must_use]
pub fn pick_file(root: &Path, filter: &FileFilter) -> FilePick {
    let candidates = collect_candidates(root, filter);
    if candidates.is_empty() {
        return FilePick::TypePath;
    }

    let header = format!(
        "{} | * marks {} | Enter: open | Esc: cancel",
        root.display(),
        filter
    );

    let Ok(skim_options) = SkimOptionsBuilder::default()
        .height(Some("50%"))
        .multi(false)
        .prompt(Some("Chat database > "))
        .preview(Some(""))
        .preview_window(Some("right:40%:wrap"))
        .bind(vec!["ctrl-c:abort", "esc:abort", "enter:accept"])
        .header(Some(&header))
        .build()
    else {
        return FilePick::TypePath;
    };

    let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
    let type_path: Arc<dyn SkimItem> = Arc::new(TypePathItem);
    let _ = tx.send(type_path);
    for path in candidates {
        let item: Arc<dyn SkimItem> = Arc::new(FileItem::new(path, root, filter));
        let _ = tx.send(item);
    }
    drop(tx);

    let Some(output) = Skim::run_with(&skim_options, Some(rx)) else {
        return FilePick::TypePath;
    };

    if output.is_abort {
        return FilePick::Aborted;
    }

    output
        .selected_items
        .first()
        .map_or(FilePick::Aborted, |item| {
            let chosen = item.output().to_string();
            if chosen == TYPE_PATH_MARKER {
                FilePick::TypePath
            } else {
                FilePick::Chosen(PathBuf::from(chosen))
            }
        })
}
