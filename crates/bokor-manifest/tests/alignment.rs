use bokor_manifest::align::align;
use bokor_manifest::bom::Bom;
use bokor_manifest::dependency::DependencyScope;
use bokor_manifest::manifest::Manifest;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

fn full_manifest() -> Manifest {
    Manifest::from_path(&fixtures_dir().join("bokor.toml")).unwrap()
}

fn junit_bom() -> Bom {
    Bom::from_path(&fixtures_dir().join("junit-bom.xml")).unwrap()
}

#[test]
fn test_align_pins_versionless_entries() {
    let manifest = full_manifest();
    let aligned = align(&manifest, &[junit_bom()]).unwrap();
    assert_eq!(aligned.len(), 3);

    assert_eq!(aligned[0].coordinate.to_string(), "commons-io:commons-io:2.16.1");
    assert_eq!(aligned[0].scope, DependencyScope::Implementation);
    assert!(!aligned[0].aligned);

    assert_eq!(
        aligned[1].coordinate.to_string(),
        "org.junit.jupiter:junit-jupiter:5.11.0"
    );
    assert_eq!(aligned[1].scope, DependencyScope::TestImplementation);
    assert!(aligned[1].aligned);

    // The launcher version comes from a BOM property, not the BOM version.
    assert_eq!(
        aligned[2].coordinate.to_string(),
        "org.junit.platform:junit-platform-launcher:1.11.0"
    );
    assert_eq!(aligned[2].scope, DependencyScope::TestRuntimeOnly);
    assert!(aligned[2].aligned);
}

#[test]
fn test_declared_platform_requires_matching_bom() {
    let manifest = full_manifest();
    let err = align(&manifest, &[]).unwrap_err();
    assert!(
        err.to_string().contains("no matching BOM document"),
        "got: {err}"
    );
}

#[test]
fn test_bom_version_mismatch_is_not_a_match() {
    let manifest = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
platform = ["org.junit:junit-bom:5.10.0"]
test-implementation = ["org.junit.jupiter:junit-jupiter"]

[test]
runner = "junit-platform"
"#,
    )
    .unwrap();
    // The supplied BOM is 5.11.0; the manifest asks for 5.10.0.
    assert!(align(&manifest, &[junit_bom()]).is_err());
}

#[test]
fn test_uncovered_versionless_entry_fails() {
    let manifest = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
implementation = ["org.apache.commons:commons-lang3"]
platform = ["org.junit:junit-bom:5.11.0"]
"#,
    )
    .unwrap();
    let err = align(&manifest, &[junit_bom()]).unwrap_err();
    assert!(
        err.to_string()
            .contains("no platform provides a version for org.apache.commons:commons-lang3"),
        "got: {err}"
    );
}

#[test]
fn test_conflicting_managed_versions_fail() {
    let manifest = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
platform = ["org.junit:junit-bom:5.11.0", "com.bokor:qa-bom:1.0.0"]
test-implementation = ["org.junit.jupiter:junit-jupiter"]

[test]
runner = "junit-platform"
"#,
    )
    .unwrap();
    let boms = [
        junit_bom(),
        Bom::from_path(&fixtures_dir().join("qa-bom.xml")).unwrap(),
    ];
    let err = align(&manifest, &boms).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("inconsistent managed versions"), "got: {message}");
}

#[test]
fn test_agreeing_platforms_align() {
    // Two platforms both covering the artifact at the same version is fine.
    let manifest = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
platform = ["org.junit:junit-bom:5.11.0", "org.junit:junit-bom:5.11.0"]
test-implementation = ["org.junit.jupiter:junit-jupiter"]

[test]
runner = "junit-platform"
"#,
    )
    .unwrap();
    let aligned = align(&manifest, &[junit_bom()]).unwrap();
    assert_eq!(
        aligned[0].coordinate.version.as_deref(),
        Some("5.11.0")
    );
}

#[test]
fn test_versionless_platform_entry_fails() {
    let manifest = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
platform = ["org.junit:junit-bom"]
"#,
    )
    .unwrap();
    let err = align(&manifest, &[junit_bom()]).unwrap_err();
    assert!(err.to_string().contains("must pin a version"), "got: {err}");
}

#[test]
fn test_versionless_entry_without_platform_fails() {
    let manifest = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
implementation = ["org.apache.commons:commons-lang3"]
"#,
    )
    .unwrap();
    let err = align(&manifest, &[]).unwrap_err();
    assert!(
        err.to_string().contains("declares no platform"),
        "got: {err}"
    );
}

#[test]
fn test_fully_pinned_manifest_needs_no_boms() {
    let manifest = Manifest::from_path(&fixtures_dir().join("pinned-only.toml")).unwrap();
    let aligned = align(&manifest, &[]).unwrap();
    assert_eq!(aligned.len(), 2);
    assert!(aligned.iter().all(|d| !d.aligned));
    assert!(aligned.iter().all(|d| d.coordinate.is_pinned()));
}
