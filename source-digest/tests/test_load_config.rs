use serial_test::serial;
use source_digest::load_config::{build_config, load_config, FileConfig, Overrides};
use source_digest_core::config::{FileTypeProfile, TieBreak};
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::{tempdir, NamedTempFile};

/// A full config file loads and builds into a validated run configuration.
#[test]
fn test_load_config_success() {
    let config_yaml = r#"
output: /tmp/digest/out.txt
roots:
  - /work/app/src
  - /work/lib/src
ignore:
  - /work/app/src/generated
open_output: true
tie_break: path
profiles:
  - name: java
    extensions: [".java"]
    exclusions: ["Test.java"]
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let file = load_config(config_file.path()).expect("Config should load");
    assert_eq!(file.output, Some(PathBuf::from("/tmp/digest/out.txt")));
    assert_eq!(file.roots.len(), 2);
    assert_eq!(file.tie_break, Some(TieBreak::Path));

    let config = build_config(file, Overrides::default()).expect("Config should build");
    assert_eq!(config.output_path(), PathBuf::from("/tmp/digest/out.txt"));
    assert_eq!(
        config.roots(),
        &[PathBuf::from("/work/app/src"), PathBuf::from("/work/lib/src")]
    );
    assert_eq!(config.ignores(), &["/work/app/src/generated".to_string()]);
    assert!(config.open_output());
    assert_eq!(config.tie_break(), TieBreak::Path);
    assert_eq!(
        config.profiles(),
        &[FileTypeProfile::new("java", [".java"]).with_exclusions(["Test.java"])]
    );
}

#[test]
fn test_load_config_missing_file_fails() {
    let dir = tempdir().unwrap();
    let err = load_config(dir.path().join("absent.yaml")).unwrap_err();
    assert!(
        err.to_string().contains("Failed to read config file"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_load_config_invalid_yaml_fails() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "roots: [unterminated\n").unwrap();

    let err = load_config(config_file.path()).unwrap_err();
    assert!(err.to_string().contains("parse"), "unexpected error: {err}");
}

#[test]
fn test_load_config_rejects_unknown_keys() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "output: out.txt\nsources: []\n").unwrap();

    assert!(load_config(config_file.path()).is_err());
}

#[test]
fn test_missing_profiles_fall_back_to_defaults() {
    let file = FileConfig {
        output: Some(PathBuf::from("/tmp/out.txt")),
        roots: vec![PathBuf::from("/work/src")],
        ..Default::default()
    };
    let config = build_config(file, Overrides::default()).unwrap();

    let names: Vec<&str> = config.profiles().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["java", "typescript", "properties", "dart", "kotlin"]);
    assert_eq!(config.tie_break(), TieBreak::Discovery);
    assert!(!config.open_output());
}

#[test]
fn test_overrides_extend_lists_and_replace_scalars() {
    let file = FileConfig {
        output: Some(PathBuf::from("/tmp/from-file.txt")),
        roots: vec![PathBuf::from("/work/a")],
        ignore: vec![PathBuf::from("/work/a/build")],
        tie_break: Some(TieBreak::Discovery),
        ..Default::default()
    };
    let overrides = Overrides {
        roots: vec![PathBuf::from("/work/b")],
        ignore: vec![PathBuf::from("/work/b/out")],
        output: Some(PathBuf::from("/tmp/from-cli.txt")),
        open_output: true,
        tie_break: Some(TieBreak::Path),
    };

    let config = build_config(file, overrides).unwrap();
    assert_eq!(config.output_path(), PathBuf::from("/tmp/from-cli.txt"));
    assert_eq!(
        config.roots(),
        &[PathBuf::from("/work/a"), PathBuf::from("/work/b")]
    );
    assert_eq!(
        config.ignores(),
        &["/work/a/build".to_string(), "/work/b/out".to_string()]
    );
    assert!(config.open_output());
    assert_eq!(config.tie_break(), TieBreak::Path);
}

#[test]
fn test_build_config_without_roots_fails() {
    let file = FileConfig {
        output: Some(PathBuf::from("/tmp/out.txt")),
        ..Default::default()
    };
    let err = build_config(file, Overrides::default()).unwrap_err();
    assert!(
        format!("{err:#}").contains("no search roots"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn test_build_config_without_output_fails() {
    let file = FileConfig {
        roots: vec![PathBuf::from("/work/src")],
        ..Default::default()
    };
    let err = build_config(file, Overrides::default()).unwrap_err();
    assert!(
        format!("{err:#}").contains("output path is not set"),
        "unexpected error: {err:#}"
    );
}

/// Relative roots and ignores resolve against the working directory.
#[test]
#[serial]
fn test_relative_paths_are_resolved_against_cwd() {
    let dir = tempdir().unwrap();
    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let cwd = env::current_dir().unwrap();

    let file = FileConfig {
        output: Some(PathBuf::from("out.txt")),
        roots: vec![PathBuf::from("src")],
        ignore: vec![PathBuf::from("src/gen")],
        ..Default::default()
    };
    let result = build_config(file, Overrides::default());
    env::set_current_dir(original).unwrap();

    let config = result.unwrap();
    assert_eq!(config.roots(), &[cwd.join("src")]);
    assert_eq!(
        config.ignores(),
        &[cwd.join("src/gen").to_string_lossy().into_owned()]
    );
}
