use dockgen_core::{Manifest, PackageManager, ProjectProfile, StackVariant, classify, detect};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, json: &str) {
    std::fs::write(dir.join("package.json"), json).unwrap();
}

fn names<'a>(deps: &[&'a str]) -> BTreeSet<&'a str> {
    deps.iter().copied().collect()
}

// ── classify ──

#[test]
fn classify_next_wins_over_react() {
    assert_eq!(classify(&names(&["react", "next"])), StackVariant::NextJs);
}

#[test]
fn classify_plain_react() {
    assert_eq!(
        classify(&names(&["react", "react-dom"])),
        StackVariant::React
    );
}

#[test]
fn classify_remaining_variants_in_order() {
    assert_eq!(classify(&names(&["vue"])), StackVariant::Vue);
    assert_eq!(classify(&names(&["@angular/core"])), StackVariant::Angular);
    assert_eq!(classify(&names(&["angular"])), StackVariant::Angular);
    assert_eq!(classify(&names(&["express"])), StackVariant::ExpressJs);
    assert_eq!(classify(&names(&["vue", "express"])), StackVariant::Vue);
    assert_eq!(classify(&names(&["lodash"])), StackVariant::Unknown);
    assert_eq!(classify(&names(&[])), StackVariant::Unknown);
}

proptest! {
    #[test]
    fn classify_next_always_wins(extra in proptest::collection::vec("[a-z]{1,8}", 0..10)) {
        let mut deps: BTreeSet<&str> = extra.iter().map(String::as_str).collect();
        deps.insert("next");
        deps.insert("react");
        prop_assert_eq!(classify(&deps), StackVariant::NextJs);
    }

    #[test]
    fn classify_without_markers_is_unknown(extra in proptest::collection::vec("zz[a-z]{1,8}", 0..10)) {
        let deps: BTreeSet<&str> = extra.iter().map(String::as_str).collect();
        prop_assert_eq!(classify(&deps), StackVariant::Unknown);
    }
}

// ── detect ──

#[test]
fn detect_missing_manifest_is_unknown() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(detect(tmp.path()).unwrap(), StackVariant::Unknown);
}

#[test]
fn detect_merges_dev_dependencies() {
    let tmp = TempDir::new().unwrap();
    write_manifest(
        tmp.path(),
        r#"{"dependencies": {"react": "^18.2.0"}, "devDependencies": {"next": "14.1.0"}}"#,
    );
    assert_eq!(detect(tmp.path()).unwrap(), StackVariant::NextJs);
}

#[test]
fn detect_react_from_dev_dependencies_only() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), r#"{"devDependencies": {"react": "^18.2.0"}}"#);
    assert_eq!(detect(tmp.path()).unwrap(), StackVariant::React);
}

#[test]
fn detect_treats_null_dependency_maps_as_absent() {
    let tmp = TempDir::new().unwrap();
    write_manifest(
        tmp.path(),
        r#"{"dependencies": {"react": "18"}, "devDependencies": null}"#,
    );
    assert_eq!(detect(tmp.path()).unwrap(), StackVariant::React);

    write_manifest(
        tmp.path(),
        r#"{"dependencies": null, "devDependencies": {"vue": "3"}}"#,
    );
    assert_eq!(detect(tmp.path()).unwrap(), StackVariant::Vue);
}

#[test]
fn detect_empty_object_is_unknown() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), "{}");
    assert_eq!(detect(tmp.path()).unwrap(), StackVariant::Unknown);
}

#[test]
fn detect_malformed_manifest_is_error() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), r#"{"dependencies": {"react": "#);

    let err = detect(tmp.path()).unwrap_err();
    assert!(matches!(err, dockgen_core::Error::ManifestParse { .. }));
    assert!(err.to_string().contains("malformed manifest"));
}

#[test]
fn detect_non_object_manifest_is_error() {
    let tmp = TempDir::new().unwrap();
    write_manifest(tmp.path(), r#"["react"]"#);
    assert!(detect(tmp.path()).is_err());
}

// ── Manifest ──

#[test]
fn manifest_build_script() {
    let manifest =
        Manifest::parse(r#"{"scripts": {"build": "vite build", "dev": "vite"}}"#).unwrap();
    assert_eq!(manifest.build_script(), Some("vite build"));
}

#[test]
fn manifest_null_scripts_has_no_build_script() {
    let manifest = Manifest::parse(r#"{"scripts": null, "dependencies": null}"#).unwrap();
    assert_eq!(manifest.build_script(), None);
    assert!(manifest.dependency_names().is_empty());
}

#[test]
fn manifest_ignores_unknown_fields() {
    let manifest = Manifest::parse(
        r#"{"name": "app", "private": true, "engines": {"node": ">=18"}, "dependencies": {"vue": "3"}}"#,
    )
    .unwrap();
    assert!(manifest.has_dependency("vue"));
    assert!(manifest.build_script().is_none());
}

// ── ProjectProfile ──

#[test]
fn profile_combines_stack_and_package_manager() {
    let tmp = TempDir::new().unwrap();
    write_manifest(
        tmp.path(),
        r#"{"dependencies": {"react": "18"}, "scripts": {"build": "vite build"}}"#,
    );
    std::fs::write(tmp.path().join("yarn.lock"), "").unwrap();

    let profile = ProjectProfile::inspect(tmp.path()).unwrap();
    assert_eq!(profile.stack, StackVariant::React);
    assert_eq!(profile.package_manager, PackageManager::Yarn);
    assert_eq!(profile.build_output_dir(), "dist");
}

#[test]
fn profile_defaults_build_output_dir() {
    let tmp = TempDir::new().unwrap();
    write_manifest(
        tmp.path(),
        r#"{"dependencies": {"react": "18"}, "scripts": {"build": "react-scripts build"}}"#,
    );

    let profile = ProjectProfile::inspect(tmp.path()).unwrap();
    assert_eq!(profile.build_output_dir(), "build");
}

#[test]
fn profile_without_manifest() {
    let tmp = TempDir::new().unwrap();
    let profile = ProjectProfile::inspect(tmp.path()).unwrap();

    assert_eq!(profile.stack, StackVariant::Unknown);
    assert_eq!(profile.package_manager, PackageManager::Npm);
    assert!(profile.manifest.is_none());
    assert!(profile.build_script().is_none());
}
