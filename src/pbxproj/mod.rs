//! The `project.pbxproj` object graph.
//!
//! The manifest is a table of records keyed by opaque 24-hex identifiers
//! that cross-reference each other: a native target lists build phases,
//! the sources phase lists build files, and each build file points at a
//! file reference that carries the on-disk path. [`PbxParser`] lifts the
//! table into an [`ObjectGraph`] once; the graph is read-only afterwards
//! and answers the typed lookups the evidence pass needs.

// Some accessors are library surface beyond what the CLI exercises.
#![allow(dead_code)]

mod object;
mod parser;

pub use object::{ObjectId, PbxObject, ReferenceKind};
pub use parser::PbxParser;

use miette::Diagnostic;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use thiserror::Error;

pub const ISA_NATIVE_TARGET: &str = "PBXNativeTarget";
pub const ISA_SOURCES_PHASE: &str = "PBXSourcesBuildPhase";

/// Manifest inconsistencies that abort the run before any analysis.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("no native target named '{0}' in project.pbxproj")]
    #[diagnostic(help("target names are case-sensitive; check the scheme's build target"))]
    TargetNotFound(String),

    #[error("multiple native targets named '{0}' in project.pbxproj")]
    AmbiguousTarget(String),

    #[error("no sources build phase for target '{0}'")]
    SourcesPhaseNotFound(String),
}

/// All manifest objects with their cross-references resolved.
#[derive(Debug)]
pub struct ObjectGraph {
    /// Nodes are object identifiers, edges are typed references.
    inner: DiGraph<ObjectId, ReferenceKind>,

    /// Map from identifier to node index.
    node_map: HashMap<ObjectId, NodeIndex>,

    /// Map from identifier to object details.
    objects: HashMap<ObjectId, PbxObject>,

    /// Map from isa tag to objects of that type.
    isa_index: HashMap<String, Vec<ObjectId>>,
}

impl ObjectGraph {
    /// Wire a parsed object table into a graph. References to identifiers
    /// that are not in the table get no edge; the typed accessors treat
    /// them as absent.
    pub fn build(objects: Vec<PbxObject>) -> Self {
        let mut graph = Self {
            inner: DiGraph::new(),
            node_map: HashMap::new(),
            objects: HashMap::new(),
            isa_index: HashMap::new(),
        };

        for object in objects {
            graph.add_object(object);
        }
        graph.wire_references();
        graph
    }

    fn add_object(&mut self, object: PbxObject) {
        let id = object.id.clone();

        let node_idx = self.inner.add_node(id.clone());
        self.node_map.insert(id.clone(), node_idx);

        if let Some(isa) = &object.isa {
            self.isa_index.entry(isa.clone()).or_default().push(id.clone());
        }

        self.objects.insert(id, object);
    }

    fn wire_references(&mut self) {
        let mut edges: Vec<(ObjectId, ObjectId, ReferenceKind)> = Vec::new();

        for object in self.objects.values() {
            for phase_id in &object.build_phases {
                edges.push((object.id.clone(), phase_id.clone(), ReferenceKind::BuildPhase));
            }
            for file_id in &object.files {
                edges.push((object.id.clone(), file_id.clone(), ReferenceKind::BuildFile));
            }
            if let Some(file_ref) = &object.file_ref {
                edges.push((object.id.clone(), file_ref.clone(), ReferenceKind::FileRef));
            }
        }

        for (from, to, kind) in edges {
            if let (Some(&from_idx), Some(&to_idx)) =
                (self.node_map.get(&from), self.node_map.get(&to))
            {
                self.inner.add_edge(from_idx, to_idx, kind);
            }
        }
    }

    /// Get an object by identifier.
    pub fn get(&self, id: &ObjectId) -> Option<&PbxObject> {
        self.objects.get(id)
    }

    /// All objects, in table order not guaranteed.
    pub fn objects(&self) -> impl Iterator<Item = &PbxObject> {
        self.objects.values()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Find all objects with the given isa tag.
    pub fn find_by_isa(&self, isa: &str) -> Vec<&PbxObject> {
        self.isa_index
            .get(isa)
            .map(|ids| ids.iter().filter_map(|id| self.objects.get(id)).collect())
            .unwrap_or_default()
    }

    /// Locate the one native target with the given name.
    pub fn native_target(&self, name: &str) -> Result<&PbxObject, ManifestError> {
        let mut candidates = self
            .find_by_isa(ISA_NATIVE_TARGET)
            .into_iter()
            .filter(|object| object.name.as_deref() == Some(name));

        let first = candidates
            .next()
            .ok_or_else(|| ManifestError::TargetNotFound(name.to_string()))?;
        if candidates.next().is_some() {
            return Err(ManifestError::AmbiguousTarget(name.to_string()));
        }
        Ok(first)
    }

    /// Among a target's build phases, find the compile-sources phase.
    pub fn sources_phase(&self, target: &PbxObject) -> Result<&PbxObject, ManifestError> {
        target
            .build_phases
            .iter()
            .filter_map(|id| self.objects.get(id))
            .find(|phase| phase.is_a(ISA_SOURCES_PHASE))
            .ok_or_else(|| {
                let label = target
                    .name
                    .clone()
                    .unwrap_or_else(|| target.id.to_string());
                ManifestError::SourcesPhaseNotFound(label)
            })
    }

    /// Follow a build file's `fileRef` edge to the file reference object.
    pub fn file_ref_of(&self, build_file: &ObjectId) -> Option<&PbxObject> {
        let &node_idx = self.node_map.get(build_file)?;
        self.inner
            .edges(node_idx)
            .find(|edge| *edge.weight() == ReferenceKind::FileRef)
            .and_then(|edge| self.inner.node_weight(edge.target()))
            .and_then(|id| self.objects.get(id))
    }

    /// The on-disk path a file reference stands for: `path` preferred,
    /// `name` as fallback.
    pub fn reference_path<'a>(&self, file_ref: &'a PbxObject) -> Option<&'a str> {
        file_ref
            .path
            .as_deref()
            .or(file_ref.name.as_deref())
    }
}
