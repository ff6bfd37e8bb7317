use super::{ObjectGraph, ObjectId, PbxObject};
use regex::Regex;
use tracing::{debug, trace};

/// Lexical parser for the `project.pbxproj` object-graph notation.
///
/// Records look like:
///
/// ```text
/// 1A2B3C... /* Foo.swift */ = { isa = PBXFileReference; path = Foo.swift; };
/// ```
///
/// This is not a full plist parser. It splits the objects block into
/// per-identifier chunks and lifts the handful of fields the analysis
/// needs: isa, name, path, buildPhases, files, fileRef. Scalar values may
/// be quoted or bare; list bodies contain identifier/comment pairs in any
/// order relative to other objects.
pub struct PbxParser {
    objects_block: Regex,
    object_header: Regex,
    isa: Regex,
    name: Regex,
    path: Regex,
    build_phases: Regex,
    files: Regex,
    file_ref: Regex,
    object_id: Regex,
}

impl PbxParser {
    pub fn new() -> Self {
        Self {
            // The objects table ends right before the top-level rootObject
            // entry. If the delimiter is missing we scan the whole text.
            objects_block: Regex::new(r"(?s)\bobjects\s*=\s*\{(.*)\};\s*rootObject\s*=").unwrap(),
            object_header: Regex::new(r"([A-F0-9]{24}) /\* (?:.*?) \*/ = \{").unwrap(),
            isa: Regex::new(r"\bisa\s*=\s*(\w+)\s*;").unwrap(),
            name: Regex::new(r"\bname\s*=\s*(.*?)\s*;").unwrap(),
            path: Regex::new(r"\bpath\s*=\s*(.*?)\s*;").unwrap(),
            build_phases: Regex::new(r"(?s)\bbuildPhases\s*=\s*\((.*?)\);").unwrap(),
            files: Regex::new(r"(?s)\bfiles\s*=\s*\((.*?)\);").unwrap(),
            file_ref: Regex::new(r"\bfileRef\s*=\s*([A-F0-9]{24})\b").unwrap(),
            object_id: Regex::new(r"\b[A-F0-9]{24}\b").unwrap(),
        }
    }

    /// Parse manifest text into an immutable object graph.
    pub fn parse(&self, text: &str) -> ObjectGraph {
        let block = match self.objects_block.captures(text) {
            Some(captures) => captures.get(1).map(|m| m.as_str()).unwrap_or(text),
            None => {
                trace!("objects block delimiter not found, scanning whole manifest");
                text
            }
        };

        let headers: Vec<_> = self.object_header.find_iter(block).collect();
        let mut objects = Vec::with_capacity(headers.len());

        for (i, header) in headers.iter().enumerate() {
            let chunk_end = headers
                .get(i + 1)
                .map(|next| next.start())
                .unwrap_or(block.len());
            let chunk = &block[header.end()..chunk_end];

            let id = self
                .object_id
                .find(header.as_str())
                .map(|m| ObjectId::new(m.as_str()));
            let Some(id) = id else { continue };

            objects.push(self.parse_chunk(id, chunk));
        }

        debug!("parsed {} manifest objects", objects.len());
        ObjectGraph::build(objects)
    }

    fn parse_chunk(&self, id: ObjectId, chunk: &str) -> PbxObject {
        let mut object = PbxObject::new(id);

        object.isa = self
            .isa
            .captures(chunk)
            .map(|c| c[1].to_string());
        object.name = self
            .name
            .captures(chunk)
            .map(|c| unquote(&c[1]).to_string());
        object.path = self
            .path
            .captures(chunk)
            .map(|c| unquote(&c[1]).to_string());

        if let Some(captures) = self.build_phases.captures(chunk) {
            object.build_phases = self.embedded_ids(&captures[1]);
        }
        if let Some(captures) = self.files.captures(chunk) {
            object.files = self.embedded_ids(&captures[1]);
        }
        object.file_ref = self
            .file_ref
            .captures(chunk)
            .map(|c| ObjectId::new(&c[1]));

        object
    }

    /// Collect identifier tokens embedded in a parenthesized list body,
    /// in order, ignoring the interleaved comments.
    fn embedded_ids(&self, body: &str) -> Vec<ObjectId> {
        self.object_id
            .find_iter(body)
            .map(|m| ObjectId::new(m.as_str()))
            .collect()
    }
}

impl Default for PbxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar field values may be quote-wrapped (paths with spaces, etc.).
fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
