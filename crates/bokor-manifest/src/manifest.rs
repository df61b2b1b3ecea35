use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::dependency::{Dependency, DependencyScope};

/// The parsed representation of a `bokor.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectMetadata,

    #[serde(default)]
    pub plugins: Vec<PluginRef>,

    #[serde(default)]
    pub repositories: BTreeMap<String, String>,

    #[serde(default)]
    pub dependencies: DependencyDeclarations,

    #[serde(default)]
    pub test: Option<TestConfig>,
}

/// Project identity from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A plugin reference, either a simple ID string or a detailed specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginRef {
    Id(String),
    Detailed { id: String, version: Option<String> },
}

impl PluginRef {
    pub fn id(&self) -> &str {
        match self {
            PluginRef::Id(id) => id,
            PluginRef::Detailed { id, .. } => id,
        }
    }
}

/// Ordered per-scope dependency declarations from `[dependencies]`.
///
/// `platform` entries are version-alignment imports; they supply versions to
/// the version-less declarations in the other arrays and are not themselves
/// placed on any build phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDeclarations {
    #[serde(default)]
    pub implementation: Vec<Dependency>,

    #[serde(default)]
    pub platform: Vec<Dependency>,

    #[serde(default, rename = "test-implementation")]
    pub test_implementation: Vec<Dependency>,

    #[serde(default, rename = "test-runtime-only")]
    pub test_runtime_only: Vec<Dependency>,
}

/// Test configuration from `[test]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    pub runner: TestRunner,
}

/// The test-execution platform the build should invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestRunner {
    #[serde(rename = "junit-platform")]
    JunitPlatform,
    #[serde(rename = "junit4")]
    Junit4,
    #[serde(rename = "testng")]
    TestNg,
}

impl std::fmt::Display for TestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::JunitPlatform => "junit-platform",
            Self::Junit4 => "junit4",
            Self::TestNg => "testng",
        };
        write!(f, "{name}")
    }
}

impl Manifest {
    /// Load and parse a `bokor.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            bokor_util::errors::BokorError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        let manifest = Self::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            project = %manifest.project.name,
            "parsed manifest"
        );
        Ok(manifest)
    }

    /// Parse a `bokor.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            bokor_util::errors::BokorError::Manifest {
                message: format!("Failed to parse bokor.toml: {e}"),
            }
            .into()
        })
    }

    /// The ordered sequence of (declaration, scope) pairs.
    ///
    /// Declaration order is preserved within each scope and scopes follow the
    /// manifest layout: implementation, test-implementation, then
    /// test-runtime-only. Platform entries are excluded; see
    /// [`Manifest::platforms`].
    pub fn entries(&self) -> Vec<(&Dependency, DependencyScope)> {
        let deps = &self.dependencies;
        let mut entries = Vec::with_capacity(
            deps.implementation.len() + deps.test_implementation.len() + deps.test_runtime_only.len(),
        );
        for dep in &deps.implementation {
            entries.push((dep, DependencyScope::Implementation));
        }
        for dep in &deps.test_implementation {
            entries.push((dep, DependencyScope::TestImplementation));
        }
        for dep in &deps.test_runtime_only {
            entries.push((dep, DependencyScope::TestRuntimeOnly));
        }
        entries
    }

    /// The declared version-alignment platform entries.
    pub fn platforms(&self) -> &[Dependency] {
        &self.dependencies.platform
    }
}
