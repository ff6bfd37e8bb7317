//! Integration tests for manifest parsing and compiled-set evidence.

use proveunused::evidence::{BuildLogEvidence, CompileSourcesEvidence, EvidenceSource};
use proveunused::pbxproj::{ManifestError, ObjectId, PbxParser};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A trimmed but realistically shaped project.pbxproj for a target named
/// `App` whose Compile Sources phase lists Foo.swift and Bar/Baz.swift.
const FIXTURE: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin PBXBuildFile section */
		A10000000000000000000001 /* Foo.swift in Sources */ = {isa = PBXBuildFile; fileRef = F10000000000000000000001 /* Foo.swift */; };
		A10000000000000000000002 /* Baz.swift in Sources */ = {isa = PBXBuildFile; fileRef = F10000000000000000000002 /* Baz.swift */; };
		A10000000000000000000003 /* Assets.xcassets in Resources */ = {isa = PBXBuildFile; fileRef = F10000000000000000000003 /* Assets.xcassets */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		F10000000000000000000001 /* Foo.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = Foo.swift; sourceTree = "<group>"; };
		F10000000000000000000002 /* Baz.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; name = Baz.swift; path = "Bar/Baz.swift"; sourceTree = "<group>"; };
		F10000000000000000000003 /* Assets.xcassets */ = {isa = PBXFileReference; lastKnownFileType = folder.assetcatalog; path = Assets.xcassets; sourceTree = "<group>"; };
/* End PBXFileReference section */

/* Begin PBXFrameworksBuildPhase section */
		B10000000000000000000001 /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXFrameworksBuildPhase section */

/* Begin PBXNativeTarget section */
		C10000000000000000000001 /* App */ = {
			isa = PBXNativeTarget;
			buildPhases = (
				B10000000000000000000001 /* Frameworks */,
				B10000000000000000000002 /* Sources */,
				B10000000000000000000003 /* Resources */,
			);
			name = App;
			productName = App;
			productType = "com.apple.product-type.application";
		};
/* End PBXNativeTarget section */

/* Begin PBXSourcesBuildPhase section */
		B10000000000000000000002 /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				A10000000000000000000001 /* Foo.swift in Sources */,
				A10000000000000000000002 /* Baz.swift in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */

/* Begin PBXResourcesBuildPhase section */
		B10000000000000000000003 /* Resources */ = {
			isa = PBXResourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				A10000000000000000000003 /* Assets.xcassets in Resources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXResourcesBuildPhase section */
	};
	rootObject = D10000000000000000000001 /* Project object */;
}
"#;

/// Write the fixture manifest plus the source files it references.
fn fixture_project(root: &Path) -> std::path::PathBuf {
    fs::write(root.join("Foo.swift"), "struct Foo {}\n").expect("write Foo");
    fs::create_dir_all(root.join("Bar")).expect("mkdir Bar");
    fs::write(root.join("Bar/Baz.swift"), "struct Baz {}\n").expect("write Baz");

    let project = root.join("project.pbxproj");
    fs::write(&project, FIXTURE).expect("write manifest");
    project
}

#[test]
fn test_object_graph_shape() {
    let graph = PbxParser::new().parse(FIXTURE);

    // 3 build files, 3 file refs, 3 phases, 1 target.
    assert_eq!(graph.object_count(), 10);
    assert_eq!(graph.find_by_isa("PBXBuildFile").len(), 3);
    assert_eq!(graph.find_by_isa("PBXNativeTarget").len(), 1);

    let target = graph.native_target("App").expect("target");
    assert_eq!(target.build_phases.len(), 3);

    let phase = graph.sources_phase(target).expect("sources phase");
    assert_eq!(phase.files.len(), 2);
}

#[test]
fn test_build_file_resolves_through_file_reference() {
    let graph = PbxParser::new().parse(FIXTURE);

    let file_ref = graph
        .file_ref_of(&ObjectId::new("A10000000000000000000002"))
        .expect("file ref");
    // path preferred over name.
    assert_eq!(graph.reference_path(file_ref), Some("Bar/Baz.swift"));
}

#[test]
fn test_unknown_target_is_fatal() {
    let graph = PbxParser::new().parse(FIXTURE);
    assert!(matches!(
        graph.native_target("NoSuchTarget"),
        Err(ManifestError::TargetNotFound(_))
    ));
}

#[test]
fn test_manifest_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let project = fixture_project(dir.path());

    let evidence = CompileSourcesEvidence::new(project, dir.path().to_path_buf(), "App");
    let compiled = evidence.collect().expect("collect");

    let mut paths: Vec<&str> = compiled.iter().collect();
    paths.sort();
    assert_eq!(paths, vec!["Bar/Baz.swift", "Foo.swift"]);
}

#[test]
fn test_non_swift_build_files_are_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let project = fixture_project(dir.path());

    let evidence = CompileSourcesEvidence::new(project, dir.path().to_path_buf(), "App");
    let compiled = evidence.collect().expect("collect");
    assert!(!compiled.iter().any(|path| path.contains("xcassets")));
}

#[test]
fn test_missing_file_dropped_without_error() {
    let dir = TempDir::new().expect("temp dir");
    // Only Foo.swift exists on disk; Bar/Baz.swift is absent.
    fs::write(dir.path().join("Foo.swift"), "struct Foo {}\n").expect("write");
    let project = dir.path().join("project.pbxproj");
    fs::write(&project, FIXTURE).expect("write manifest");

    let evidence = CompileSourcesEvidence::new(project, dir.path().to_path_buf(), "App");
    let compiled = evidence.collect().expect("collect");

    let paths: Vec<&str> = compiled.iter().collect();
    assert_eq!(paths, vec!["Foo.swift"]);
}

#[test]
fn test_moved_file_found_by_name_search() {
    let dir = TempDir::new().expect("temp dir");
    // The manifest says Foo.swift at the root, but the file moved.
    fs::create_dir_all(dir.path().join("Moved/Deep")).expect("mkdir");
    fs::write(dir.path().join("Moved/Deep/Foo.swift"), "struct Foo {}\n").expect("write");
    fs::create_dir_all(dir.path().join("Bar")).expect("mkdir");
    fs::write(dir.path().join("Bar/Baz.swift"), "struct Baz {}\n").expect("write");
    let project = dir.path().join("project.pbxproj");
    fs::write(&project, FIXTURE).expect("write manifest");

    let evidence = CompileSourcesEvidence::new(project, dir.path().to_path_buf(), "App");
    let compiled = evidence.collect().expect("collect");
    assert!(compiled.contains("Moved/Deep/Foo.swift"));
}

#[test]
fn test_ambiguous_reference_keeps_raw_path() {
    let dir = TempDir::new().expect("temp dir");
    // Two distinct Foo.swift files; the manifest's bare "Foo.swift" does
    // not exist at the exact relative path.
    fs::create_dir_all(dir.path().join("A")).expect("mkdir");
    fs::create_dir_all(dir.path().join("B")).expect("mkdir");
    fs::write(dir.path().join("A/Foo.swift"), "struct Foo {}\n").expect("write");
    fs::write(dir.path().join("B/Foo.swift"), "struct Foo {}\n").expect("write");
    fs::create_dir_all(dir.path().join("Bar")).expect("mkdir");
    fs::write(dir.path().join("Bar/Baz.swift"), "struct Baz {}\n").expect("write");
    let project = dir.path().join("project.pbxproj");
    fs::write(&project, FIXTURE).expect("write manifest");

    let evidence = CompileSourcesEvidence::new(project, dir.path().to_path_buf(), "App");
    let compiled = evidence.collect().expect("collect");

    // The raw unresolved path is recorded rather than either candidate.
    assert!(compiled.contains("Foo.swift"));
    assert!(!compiled.contains("A/Foo.swift"));
    assert!(!compiled.contains("B/Foo.swift"));
}

#[test]
fn test_build_log_evidence_matches_manifest_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    fixture_project(dir.path());

    let log = format!(
        "CompileSwiftSources normal arm64 com.apple.xcode.tools.swift.compiler\n\
         {} Bar/Baz.swift\n\
         warning: Missing.swift referenced but gone\n",
        dir.path().join("Foo.swift").display()
    );
    let log_path = dir.path().join("build.log");
    fs::write(&log_path, log).expect("write log");

    let evidence = BuildLogEvidence::new(log_path, dir.path().to_path_buf());
    let compiled = evidence.collect().expect("collect");

    let mut paths: Vec<&str> = compiled.iter().collect();
    paths.sort();
    assert_eq!(paths, vec!["Bar/Baz.swift", "Foo.swift"]);
}
