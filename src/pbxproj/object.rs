use std::fmt;

/// Identifier of an entry in the pbxproj object table: 24 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of cross-reference between two objects in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Target -> build phase, from a `buildPhases` list.
    BuildPhase,
    /// Build phase -> build file, from a `files` list.
    BuildFile,
    /// Build file -> file reference, from a `fileRef` field.
    FileRef,
}

/// One record of the manifest's object table.
///
/// Immutable after the parse pass; owned by the [`super::ObjectGraph`].
/// Fields that do not apply to an object's isa are simply empty.
#[derive(Debug, Clone)]
pub struct PbxObject {
    pub id: ObjectId,

    /// Type tag, e.g. `PBXNativeTarget` or `PBXFileReference`.
    pub isa: Option<String>,

    /// Display name, unquoted.
    pub name: Option<String>,

    /// On-disk path, unquoted. File references prefer this over `name`.
    pub path: Option<String>,

    /// Ordered build-phase identifiers, present on targets.
    pub build_phases: Vec<ObjectId>,

    /// Ordered build-file identifiers, present on build phases.
    pub files: Vec<ObjectId>,

    /// File-reference identifier, present on build files.
    pub file_ref: Option<ObjectId>,
}

impl PbxObject {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            isa: None,
            name: None,
            path: None,
            build_phases: Vec::new(),
            files: Vec::new(),
            file_ref: None,
        }
    }

    pub fn is_a(&self, isa: &str) -> bool {
        self.isa.as_deref() == Some(isa)
    }
}
