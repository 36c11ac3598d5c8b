use source_digest_core::contract::{MockRunObserver, SilentObserver};
use source_digest_core::discovery::{discover, FileRules};
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn touch(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).unwrap();
    }
    write(path, content).unwrap();
}

fn found(root: &Path, rules: &FileRules) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = discover(root, rules, &SilentObserver)
        .map(|f| f.path)
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_discover_walks_recursively_and_matches_suffix_case_insensitively() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    touch(&root.join("A.java"), "class A {}");
    touch(&root.join("deep/nested/B.JAVA"), "class B {}");
    touch(&root.join("deep/readme.md"), "# no");

    let rules = FileRules::new([".java"], Vec::<String>::new(), Vec::<String>::new());
    let paths = found(root, &rules);

    assert_eq!(paths, vec![root.join("A.java"), root.join("deep/nested/B.JAVA")]);
}

#[test]
fn test_discover_reports_byte_sizes() {
    let tmp = tempdir().unwrap();
    touch(&tmp.path().join("x.ts"), "12345");

    let rules = FileRules::new([".ts"], Vec::<String>::new(), Vec::<String>::new());
    let files: Vec<_> = discover(tmp.path(), &rules, &SilentObserver).collect();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].byte_size, 5);
}

#[test]
fn test_extension_is_a_plain_suffix_not_a_file_extension() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    touch(&root.join("component.ts"), "a");
    touch(&root.join("weird.xts"), "b");
    touch(&root.join("types.d.ts"), "c");
    touch(&root.join("ts"), "d");

    let dotted = FileRules::new([".ts"], Vec::<String>::new(), Vec::<String>::new());
    assert_eq!(
        found(root, &dotted),
        vec![root.join("component.ts"), root.join("types.d.ts")]
    );

    // Without the dot the rule is still a bare suffix, so "xts" matches too.
    let bare = FileRules::new(["ts"], Vec::<String>::new(), Vec::<String>::new());
    assert_eq!(
        found(root, &bare),
        vec![
            root.join("component.ts"),
            root.join("ts"),
            root.join("types.d.ts"),
            root.join("weird.xts"),
        ]
    );
}

#[test]
fn test_exclusion_wins_over_extension() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    touch(&root.join("Service.java"), "a");
    touch(&root.join("ServiceTest.java"), "b");
    touch(&root.join("OtherTEST.JAVA"), "c");

    let rules = FileRules::new([".java"], ["Test.java"], Vec::<String>::new());
    let paths = found(root, &rules);

    assert_eq!(paths, vec![root.join("Service.java")]);
}

#[test]
fn test_ignore_rule_is_a_raw_string_prefix() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    touch(&root.join("gen/Generated.java"), "a");
    touch(&root.join("generated_too/More.java"), "b");
    touch(&root.join("keep/Kept.java"), "c");

    let ignore = root.join("gen").to_string_lossy().into_owned();
    let rules = FileRules::new([".java"], Vec::<String>::new(), [ignore]);
    let paths = found(root, &rules);

    // "gen" is not segment-aware, so "generated_too" is ignored as well.
    assert_eq!(paths, vec![root.join("keep/Kept.java")]);
}

#[test]
fn test_missing_root_yields_nothing_and_is_reported() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    let mut observer = MockRunObserver::new();
    let expected = missing.clone();
    observer
        .expect_root_missing()
        .withf(move |root| root == expected.as_path())
        .times(1)
        .return_const(());

    let rules = FileRules::new([".java"], Vec::<String>::new(), Vec::<String>::new());
    let files: Vec<_> = discover(&missing, &rules, &observer).collect();
    assert!(files.is_empty());
}

#[test]
fn test_directories_with_matching_names_are_not_yielded() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_dir_all(root.join("fake.java")).unwrap();
    touch(&root.join("fake.java/Real.java"), "x");

    let rules = FileRules::new([".java"], Vec::<String>::new(), Vec::<String>::new());
    let paths = found(root, &rules);

    assert_eq!(paths, vec![root.join("fake.java/Real.java")]);
}

#[test]
fn test_rules_predicates() {
    let rules = FileRules::new([".Dart"], [".g.dart"], ["/work/build"]);
    assert!(rules.accepts(Path::new("/work/lib/main.dart")));
    assert!(!rules.accepts(Path::new("/work/lib/main.g.dart")));
    assert!(!rules.accepts(Path::new("/work/build/main.dart")));
    assert!(!rules.accepts(Path::new("/work/builder/main.dart")));
    assert!(!rules.accepts(Path::new("/work/lib/main.rs")));
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_reported_as_walk_error() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    std::os::unix::fs::symlink(root.join("missing-target.java"), root.join("x.java")).unwrap();

    let mut observer = MockRunObserver::new();
    observer
        .expect_walk_error()
        .withf(|_, reason| reason.contains("x.java"))
        .times(1)
        .return_const(());

    let rules = FileRules::new([".java"], Vec::<String>::new(), Vec::<String>::new());
    let files: Vec<_> = discover(root, &rules, &observer).collect();
    assert!(files.is_empty());
}
