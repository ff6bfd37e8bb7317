//! Build-log evidence extraction.
//!
//! A full clean build's log names every file the compiler was handed, so
//! it is ground truth for the compiled set without parsing the manifest
//! at all. This is evidence collection, not exact parsing: anything
//! path-shaped that ends in `.swift` and resolves to a file on disk
//! counts; everything else is dropped without complaint.

use super::{CompiledSet, EvidenceSource};
use crate::discovery::rel_string;
use miette::{IntoDiagnostic, Result, WrapErr};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::info;

/// Compiled-set provider backed by the textual output of a build
/// invocation. Running the build and capturing its log is the caller's
/// business; this type only reads the captured file.
pub struct BuildLogEvidence {
    log_path: PathBuf,
    root: PathBuf,
}

impl BuildLogEvidence {
    pub fn new(log_path: PathBuf, root: PathBuf) -> Self {
        Self { log_path, root }
    }

    /// Scrape compiled Swift paths out of raw build output.
    ///
    /// Two token shapes matter: absolute filesystem paths and bare
    /// relative-looking tokens, both ending in `.swift`. Candidates that
    /// do not resolve to an existing file under `root` are dropped;
    /// duplicates collapse by set membership.
    pub fn extract(log: &str, root: &Path) -> CompiledSet {
        let absolute = Regex::new(r"/[\w@.+/-]+\.swift").unwrap();
        let relative = Regex::new(r"[\w.+-]+(?:/[\w.+-]+)*\.swift").unwrap();

        let mut set = CompiledSet::default();

        for m in absolute.find_iter(log) {
            let candidate = Path::new(m.as_str());
            if !candidate.is_file() {
                continue;
            }
            if let Some(rel) = rel_string(root, candidate) {
                set.insert(rel);
            }
        }

        for m in relative.find_iter(log) {
            // A token preceded by '/' is the tail of an absolute path
            // the first pass already considered.
            if m.start() > 0 && log.as_bytes()[m.start() - 1] == b'/' {
                continue;
            }
            let candidate = root.join(m.as_str());
            if !candidate.is_file() {
                continue;
            }
            if let Some(rel) = rel_string(root, &candidate) {
                set.insert(rel);
            }
        }

        set
    }
}

impl EvidenceSource for BuildLogEvidence {
    fn describe(&self) -> &'static str {
        "build log"
    }

    fn collect(&self) -> Result<CompiledSet> {
        let log = std::fs::read_to_string(&self.log_path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read build log {}", self.log_path.display()))?;

        let set = Self::extract(&log, &self.root);
        info!("compiled set from build log: {} files", set.len());
        Ok(set)
    }
}
