//! Loader behavior tests against real on-disk fixtures

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axiom_content::{Bundle, BundleSource, CollectionKind, ContentError, ContentSource, FsSource};
use tempfile::TempDir;

/// Create a plugin tree with empty skills/, commands/, and agents/ dirs.
fn plugin_root() -> TempDir {
    let root = TempDir::new().unwrap();
    for kind in CollectionKind::ALL {
        fs::create_dir(root.path().join(kind.key())).unwrap();
    }
    root
}

fn write_doc(dir: &Path, file: &str, frontmatter: &str, body: &str) {
    fs::write(dir.join(file), format!("---\n{frontmatter}\n---\n{body}")).unwrap();
}

#[test]
fn loads_single_skill() {
    let root = plugin_root();
    write_doc(
        &root.path().join("skills"),
        "foo.md",
        "name: foo-skill\ndescription: \"Does foo\"",
        "# Foo\nDetails.",
    );

    let source = FsSource::new(root.path());
    let skills = source.load_skills().unwrap();

    assert_eq!(skills.len(), 1);
    let doc = &skills["foo-skill"];
    assert_eq!(doc.description, "Does foo");
    assert_eq!(doc.body, "# Foo\nDetails.");
    assert_eq!(doc.source_file, "foo.md");
}

#[test]
fn empty_directory_is_a_valid_empty_collection() {
    let root = plugin_root();
    let source = FsSource::new(root.path());

    let agents = source.load_agents().unwrap();
    assert!(agents.is_empty());
}

#[test]
fn missing_directory_is_a_load_error() {
    let root = plugin_root();
    fs::remove_dir(root.path().join("agents")).unwrap();

    let source = FsSource::new(root.path());
    let err = source.load_agents().unwrap_err();
    assert!(matches!(err, ContentError::MissingDirectory { .. }));

    // Other collections still load.
    assert!(source.load_skills().is_ok());
}

#[test]
fn malformed_document_is_skipped_not_fatal() {
    let root = plugin_root();
    let skills = root.path().join("skills");
    write_doc(&skills, "good.md", "name: good\ndescription: ok", "Body");
    fs::write(skills.join("bad.md"), "# No frontmatter here\n").unwrap();

    let source = FsSource::new(root.path());
    let map = source.load_skills().unwrap();

    assert_eq!(map.len(), 1);
    assert!(map.contains_key("good"));
}

#[test]
fn non_markdown_files_are_ignored() {
    let root = plugin_root();
    let skills = root.path().join("skills");
    write_doc(&skills, "real.md", "name: real\ndescription: ok", "Body");
    fs::write(skills.join("notes.txt"), "not a document").unwrap();
    fs::create_dir(skills.join("nested")).unwrap();

    let source = FsSource::new(root.path());
    assert_eq!(source.load_skills().unwrap().len(), 1);
}

#[test]
fn duplicate_names_resolve_to_last_file_in_filename_order() {
    let root = plugin_root();
    let commands = root.path().join("commands");
    write_doc(&commands, "a.md", "name: dup\ndescription: from a", "A");
    write_doc(&commands, "z.md", "name: dup\ndescription: from z", "Z");

    let source = FsSource::new(root.path());
    let map = source.load_commands().unwrap();

    assert_eq!(map.len(), 1);
    let doc = &map["dup"];
    assert_eq!(doc.source_file, "z.md");
    assert_eq!(doc.body, "Z");
}

#[test]
fn repeated_load_is_memoized() {
    let root = plugin_root();
    write_doc(
        &root.path().join("skills"),
        "foo.md",
        "name: foo\ndescription: d",
        "Body",
    );

    let source = FsSource::new(root.path());
    let first = source.load_skills().unwrap();
    let second = source.load_skills().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Removing the tree after the first load proves later calls never touch
    // disk again.
    drop(root);
    let third = source.load_skills().unwrap();
    assert!(Arc::ptr_eq(&first, &third));
}

#[test]
fn get_triggers_lazy_load() {
    let root = plugin_root();
    write_doc(
        &root.path().join("skills"),
        "foo.md",
        "name: foo\ndescription: d",
        "Body",
    );

    let source = FsSource::new(root.path());
    let doc = source.get_skill("foo").unwrap().unwrap();
    assert_eq!(doc.body, "Body");

    // Lazy path and explicit-load path see the same record.
    let loaded = source.load_skills().unwrap();
    assert_eq!(loaded["foo"], doc);
}

#[test]
fn lookup_miss_is_none_not_error() {
    let root = plugin_root();
    let commands = root.path().join("commands");
    write_doc(&commands, "one.md", "name: one\ndescription: d", "1");
    write_doc(&commands, "two.md", "name: two\ndescription: d", "2");
    write_doc(&commands, "three.md", "name: three\ndescription: d", "3");

    let source = FsSource::new(root.path());
    assert_eq!(source.get_command("nonexistent").unwrap(), None);
}

#[test]
fn bundle_source_matches_fs_source() {
    let root = plugin_root();
    write_doc(
        &root.path().join("skills"),
        "foo.md",
        "name: foo\ndescription: skill doc",
        "# Foo",
    );
    write_doc(
        &root.path().join("commands"),
        "audit.md",
        "name: audit\ndescription: command doc",
        "# Audit",
    );
    write_doc(
        &root.path().join("agents"),
        "scanner.md",
        "name: scanner\ndescription: agent doc\nmodel: claude-sonnet\ntools:\n  - Read\n  - Grep",
        "# Scanner",
    );

    let fs_source = FsSource::new(root.path());
    let bundle_path = root.path().join("bundle.json");
    Bundle::from_source(&fs_source).unwrap().write(&bundle_path).unwrap();

    let bundle_source = BundleSource::new(&bundle_path).unwrap();

    for kind in CollectionKind::ALL {
        let from_fs = fs_source.collection(kind).unwrap();
        let from_bundle = bundle_source.collection(kind).unwrap();
        assert_eq!(from_fs.len(), from_bundle.len(), "{kind} size differs");
        for (name, doc) in from_fs.iter() {
            assert_eq!(Some(doc), from_bundle.get(name), "{kind}/{name} differs");
        }
    }

    // Agent extras survive the round trip.
    let agent = bundle_source.get_agent("scanner").unwrap().unwrap();
    assert_eq!(
        agent.extra.get("model"),
        Some(&serde_json::json!("claude-sonnet"))
    );
}

#[test]
fn missing_bundle_fails_at_construction() {
    let root = TempDir::new().unwrap();
    let err = BundleSource::new(root.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ContentError::MissingBundle { .. }));
}

#[test]
fn unparsable_bundle_fails_on_first_load() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("bundle.json");
    fs::write(&path, "{ not json").unwrap();

    let source = BundleSource::new(&path).unwrap();
    let err = source.load_skills().unwrap_err();
    assert!(matches!(err, ContentError::InvalidBundle { .. }));
}

#[test]
fn bundle_missing_collections_default_to_empty() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("bundle.json");
    fs::write(&path, r#"{"skills": [{"name": "solo", "description": "d", "body": "b", "sourceFile": "solo.md"}]}"#).unwrap();

    let source = BundleSource::new(&path).unwrap();
    assert_eq!(source.load_skills().unwrap().len(), 1);
    assert!(source.load_commands().unwrap().is_empty());
    assert!(source.load_agents().unwrap().is_empty());
}
