use bokor_manifest::dependency::DependencyScope;
use bokor_manifest::manifest::{Manifest, TestRunner};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

#[test]
fn test_parse_full_fixture() {
    let path = fixtures_dir().join("bokor.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    assert_eq!(manifest.project.group, "com.bokor");
    assert_eq!(manifest.project.name, "multithreaded");
    assert_eq!(manifest.project.version, "1.0-SNAPSHOT");
    assert_eq!(manifest.plugins.len(), 1);
    assert_eq!(manifest.plugins[0].id(), "java");
    assert_eq!(
        manifest.repositories.get("maven-central").map(String::as_str),
        Some("https://repo.maven.apache.org/maven2")
    );
    assert_eq!(manifest.dependencies.implementation.len(), 1);
    assert_eq!(manifest.dependencies.test_implementation.len(), 1);
    assert_eq!(manifest.dependencies.test_runtime_only.len(), 1);
    assert_eq!(manifest.platforms().len(), 1);
    assert_eq!(manifest.test.as_ref().unwrap().runner, TestRunner::JunitPlatform);
}

#[test]
fn test_entries_preserve_declaration_order() {
    let path = fixtures_dir().join("bokor.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    let entries = manifest.entries();
    assert_eq!(entries.len(), 3);

    let keys: Vec<(String, DependencyScope)> = entries
        .iter()
        .map(|(dep, scope)| (dep.coordinate().unwrap().key(), *scope))
        .collect();
    assert_eq!(
        keys,
        vec![
            (
                "commons-io:commons-io".to_string(),
                DependencyScope::Implementation
            ),
            (
                "org.junit.jupiter:junit-jupiter".to_string(),
                DependencyScope::TestImplementation
            ),
            (
                "org.junit.platform:junit-platform-launcher".to_string(),
                DependencyScope::TestRuntimeOnly
            ),
        ]
    );
}

#[test]
fn test_parse_detailed_dependency_form() {
    let path = fixtures_dir().join("pinned-only.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    assert_eq!(manifest.dependencies.implementation.len(), 2);
    let guava = manifest.dependencies.implementation[1].coordinate().unwrap();
    assert_eq!(guava.to_string(), "com.google.guava:guava:33.0.0-jre");
    assert!(manifest.platforms().is_empty());
    assert!(manifest.test.is_none());
}

#[test]
fn test_parse_invalid_missing_project_fixture() {
    let path = fixtures_dir().join("invalid-missing-project.toml");
    let result = Manifest::from_path(&path);
    assert!(result.is_err(), "manifest without [project] should fail to parse");
}

#[test]
fn test_parse_nonexistent_fixture() {
    let path = fixtures_dir().join("does-not-exist.toml");
    let result = Manifest::from_path(&path);
    assert!(result.is_err());
}

#[test]
fn test_unknown_test_runner_rejected() {
    let result = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[test]
runner = "spock"
"#,
    );
    assert!(result.is_err(), "unrecognized test runner should fail to parse");
}

#[test]
fn test_unknown_scope_rejected() {
    let result = Manifest::from_str(
        r#"
[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"

[dependencies]
compile = ["commons-io:commons-io:2.16.1"]
"#,
    );
    assert!(result.is_err(), "unknown dependency scope should fail to parse");
}

#[test]
fn test_detailed_plugin_form() {
    let manifest = Manifest::from_str(
        r#"
plugins = [{ id = "java", version = "1" }]

[project]
group = "com.bokor"
name = "demo"
version = "0.1.0"
"#,
    )
    .unwrap();
    assert_eq!(manifest.plugins[0].id(), "java");
}
