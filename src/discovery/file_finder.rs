use crate::config::Config;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// The one source extension this tool cares about.
pub const SWIFT_EXT: &str = "swift";

/// A discovered Swift source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub path: PathBuf,

    /// Path relative to the analysis root, `/`-separated.
    pub rel_path: String,
}

impl SourceFile {
    pub fn new(path: PathBuf, rel_path: String) -> Self {
        Self { path, rel_path }
    }
}

/// Read a file as text. Unreadable files are analyzed as empty so one
/// bad file never aborts the batch.
pub fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

/// Finder for Swift sources under the analysis root.
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find every `.swift` file under the root, recursively, in stable
    /// path order.
    pub fn find_files(&self, root: &Path) -> Vec<SourceFile> {
        debug!("scanning for Swift files in: {}", root.display());

        let walker = WalkBuilder::new(root)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .build();

        let mut files: Vec<SourceFile> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if path.extension().and_then(|e| e.to_str()) != Some(SWIFT_EXT) {
                    return None;
                }
                if self.config.should_exclude(path) {
                    trace!("excluding: {}", path.display());
                    return None;
                }

                let rel_path = rel_string(root, path)?;
                trace!("found: {rel_path}");
                Some(SourceFile::new(path.to_path_buf(), rel_path))
            })
            .collect();

        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        debug!("found {} Swift files", files.len());
        files
    }
}

/// Root-relative, `/`-separated form of a path under `root`.
pub(crate) fn rel_string(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}
