//! Sort the files of a directory into per-type subfolders.
//!
//! Every regular file directly inside the target directory is classified by
//! its extension and moved into `<dir>/<category>/`. Subdirectories are left
//! alone and nothing is done recursively. A failure to move one file is
//! recorded and the remaining files are still processed.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use humansize::{DECIMAL, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

/// Folder that receives files matching no category.
pub const OTHER_CATEGORY: &str = "Other";

/// A named group of file extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Folder name the matching files are moved into.
    pub name: String,

    /// Lowercase extensions including the leading dot (e.g. `".jpg"`).
    pub extensions: Vec<String>,
}

impl Category {
    /// Create a category, normalizing extensions to lowercase with a leading dot.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            extensions: extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Whether `lowercase_name` ends with one of this category's extensions.
    fn matches(&self, lowercase_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| lowercase_name.ends_with(ext.as_str()))
    }
}

/// Lowercase an extension and make sure it starts with a dot.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// The built-in category table.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Images", [".jpg", ".jpeg", ".png", ".gif", ".webp"]),
        Category::new(
            "Documents",
            [".pdf", ".docx", ".doc", ".txt", ".xlsx", ".pptx"],
        ),
        Category::new("Music", [".mp3", ".wav", ".flac", ".m4a"]),
        Category::new("Videos", [".mp4", ".mkv", ".avi", ".mov"]),
        Category::new("Archives", [".zip", ".rar", ".7z"]),
    ]
}

/// Errors that stop the organizer before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    /// The target path does not exist or is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The target directory could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One file scheduled to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    /// Current location of the file.
    pub source: PathBuf,

    /// Where the file will end up.
    pub destination: PathBuf,

    /// Category the file was classified into.
    pub category: String,

    /// File size in bytes.
    pub size: u64,
}

/// Outcome of organizing a directory.
#[derive(Debug, Default)]
pub struct OrganizeResult {
    /// Whether this was a dry run (nothing was moved).
    pub dry_run: bool,

    /// Number of files moved (or that would be moved in a dry run).
    pub moved: usize,

    /// Total bytes moved.
    pub bytes_moved: u64,

    /// Number of files moved per category.
    pub per_category: BTreeMap<String, usize>,

    /// Error messages for files that could not be moved.
    pub errors: Vec<String>,
}

/// Classifies and moves files into category folders.
#[derive(Clone, Debug)]
pub struct Organizer {
    categories: Vec<Category>,
    dry_run: bool,
    quiet: bool,
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new(default_categories())
    }
}

impl Organizer {
    /// Create an organizer using the given category table.
    ///
    /// Categories are tried in order and the first match wins.
    #[must_use]
    pub const fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            dry_run: false,
            quiet: false,
        }
    }

    /// Only report what would be moved.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Hide the progress bar (used by `--json` mode).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The category table in use.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category folder for a file name, matched case-insensitively.
    #[must_use]
    pub fn classify(&self, file_name: &str) -> &str {
        let lowercase = file_name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.matches(&lowercase))
            .map_or(OTHER_CATEGORY, |c| c.name.as_str())
    }

    /// List the moves needed to organize `dir`, in file-name order.
    ///
    /// Entries that cannot be inspected are logged and left out of the plan.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::NotADirectory`] if `dir` is not a directory,
    /// or [`OrganizeError::ReadDir`] if it cannot be listed.
    pub fn plan(&self, dir: &Path) -> Result<Vec<PlannedMove>, OrganizeError> {
        if !dir.is_dir() {
            return Err(OrganizeError::NotADirectory(dir.to_path_buf()));
        }

        // An unreadable root is a hard error, not an empty plan.
        fs::read_dir(dir).map_err(|source| OrganizeError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut moves = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name() else {
                continue;
            };
            let category = self.classify(&file_name.to_string_lossy()).to_string();
            let size = fs::metadata(path).map_or(0, |m| m.len());

            moves.push(PlannedMove {
                source: path.to_path_buf(),
                destination: dir.join(&category).join(file_name),
                category,
                size,
            });
        }

        Ok(moves)
    }

    /// Organize `dir`, moving each file into its category folder.
    ///
    /// In dry-run mode the plan is counted but nothing is created or moved.
    ///
    /// # Errors
    ///
    /// Only fails when the directory itself cannot be used; see
    /// [`Organizer::plan`]. Per-file failures are collected in
    /// [`OrganizeResult::errors`].
    pub fn organize(&self, dir: &Path) -> Result<OrganizeResult, OrganizeError> {
        let moves = self.plan(dir)?;
        let mut result = OrganizeResult {
            dry_run: self.dry_run,
            ..OrganizeResult::default()
        };

        let progress = if self.quiet || self.dry_run {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(moves.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
            }
            pb
        };

        for planned in &moves {
            let outcome = if self.dry_run {
                Ok(())
            } else {
                move_file(planned)
            };

            match outcome {
                Ok(()) => {
                    tracing::debug!(
                        from = %planned.source.display(),
                        to = %planned.destination.display(),
                        "moved"
                    );
                    result.moved += 1;
                    result.bytes_moved += planned.size;
                    *result
                        .per_category
                        .entry(planned.category.clone())
                        .or_insert(0) += 1;
                    progress.set_message(format!("{} → {}", file_label(planned), planned.category));
                }
                Err(e) => {
                    tracing::warn!(file = %planned.source.display(), error = %e, "failed to move file");
                    result.errors.push(format!(
                        "Failed to move {}: {e}",
                        planned.source.display()
                    ));
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(result)
    }
}

/// File name of a planned move, for progress messages.
fn file_label(planned: &PlannedMove) -> String {
    planned
        .source
        .file_name()
        .map_or_else(|| "unknown".to_string(), |n| n.to_string_lossy().into_owned())
}

/// Create the destination folder and move one file into it.
///
/// An existing file at the destination is never overwritten. Moves across
/// filesystems fall back to copy-then-remove.
fn move_file(planned: &PlannedMove) -> io::Result<()> {
    if let Some(parent) = planned.destination.parent() {
        fs::create_dir_all(parent)?;
    }

    if planned.destination.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", planned.destination.display()),
        ));
    }

    match fs::rename(&planned.source, &planned.destination) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(&planned.source, &planned.destination)?;
            fs::remove_file(&planned.source)
        }
        other => other,
    }
}

impl OrganizeResult {
    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        if !self.errors.is_empty() {
            println!("\n{}", "⚠️  Some files could not be moved:".yellow());
            for error in &self.errors {
                eprintln!("  {}", error.red());
            }
        }

        let headline = if self.dry_run {
            "🧪 Dry run complete! Nothing was moved."
        } else {
            "📁 Files organized!"
        };
        println!("\n{}", headline.bold());

        for (category, count) in &self.per_category {
            println!("  {category}: {}", count.to_string().bright_white());
        }

        let verb = if self.dry_run { "Would move" } else { "Moved" };
        println!(
            "  ✅ {verb}: {} files ({})",
            self.moved.to_string().green(),
            format_size(self.bytes_moved, DECIMAL).bright_green()
        );

        if !self.errors.is_empty() {
            println!(
                "  ❌ Failed: {} files",
                self.errors.len().to_string().red()
            );
        }
    }
}
