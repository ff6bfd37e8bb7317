use super::{CompiledSet, EvidenceSource};
use crate::discovery::rel_string;
use crate::pbxproj::PbxParser;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Compiled-set provider backed by the project manifest: the named
/// target's Compile Sources phase, resolved file reference by file
/// reference down to on-disk paths.
pub struct CompileSourcesEvidence {
    project_path: PathBuf,
    root: PathBuf,
    target: String,
}

impl CompileSourcesEvidence {
    pub fn new(project_path: PathBuf, root: PathBuf, target: impl Into<String>) -> Self {
        Self {
            project_path,
            root,
            target: target.into(),
        }
    }
}

impl EvidenceSource for CompileSourcesEvidence {
    fn describe(&self) -> &'static str {
        "project.pbxproj Compile Sources"
    }

    fn collect(&self) -> Result<CompiledSet> {
        let text = std::fs::read_to_string(&self.project_path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", self.project_path.display()))?;

        let graph = PbxParser::new().parse(&text);
        debug!("manifest object graph: {} objects", graph.object_count());

        let target = graph.native_target(&self.target)?;
        let phase = graph.sources_phase(target)?;

        let mut set = CompiledSet::default();
        for build_file in &phase.files {
            let Some(file_ref) = graph.file_ref_of(build_file) else {
                continue;
            };
            let Some(rel) = graph.reference_path(file_ref) else {
                continue;
            };
            let rel = rel.trim();
            if !rel.ends_with(".swift") {
                continue;
            }

            match resolve_source_path(&self.root, rel) {
                Resolution::Resolved(path) => set.insert(path),
                // Ambiguous references keep the raw manifest path; a
                // guess here would manufacture false confidence.
                Resolution::Ambiguous => set.insert(rel),
                Resolution::Missing => {
                    debug!("dropping compile source with no file on disk: {rel}");
                }
            }
        }

        info!(
            "compiled set from manifest target '{}': {} files",
            self.target,
            set.len()
        );
        Ok(set)
    }
}

enum Resolution {
    Resolved(String),
    Ambiguous,
    Missing,
}

/// Locate a manifest path under the root: exact relative hit first, then
/// a recursive search by filename. Exactly one match resolves; several
/// are ambiguous; none means the reference points outside the scan root.
fn resolve_source_path(root: &Path, rel: &str) -> Resolution {
    let candidate = root.join(rel);
    if candidate.is_file() {
        return match rel_string(root, &candidate) {
            Some(path) => Resolution::Resolved(path),
            None => Resolution::Missing,
        };
    }

    let Some(file_name) = Path::new(rel).file_name() else {
        return Resolution::Missing;
    };

    let matches: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name() == file_name)
        .map(|entry| entry.path().to_path_buf())
        .collect();

    match matches.as_slice() {
        [] => Resolution::Missing,
        [only] => match rel_string(root, only) {
            Some(path) => Resolution::Resolved(path),
            None => Resolution::Missing,
        },
        _ => Resolution::Ambiguous,
    }
}
