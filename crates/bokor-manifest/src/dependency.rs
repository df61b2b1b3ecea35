use serde::{Deserialize, Serialize};

use bokor_util::errors::BokorError;

use crate::coordinate::Coordinate;

/// A dependency declaration in bokor.toml.
///
/// Supports both shorthand (`"group:artifact[:version]"`) and detailed forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Short(String),
    Detailed(DetailedDependency),
}

/// A dependency with explicit group, artifact, and optional version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDependency {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Dependency {
    /// Resolve either declaration form to a [`Coordinate`].
    pub fn coordinate(&self) -> Result<Coordinate, BokorError> {
        match self {
            Dependency::Short(s) => Coordinate::parse(s),
            Dependency::Detailed(d) => {
                // Round-trip through the parser so detailed entries are held
                // to the same segment rules as shorthand ones.
                let rendered = match d.version {
                    Some(ref v) => format!("{}:{}:{}", d.group, d.artifact, v),
                    None => format!("{}:{}", d.group, d.artifact),
                };
                Coordinate::parse(&rendered)
            }
        }
    }
}

/// The build scope a dependency is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    Implementation,
    TestImplementation,
    TestRuntimeOnly,
}

impl DependencyScope {
    /// Whether a dependency in this scope is made available in `phase`.
    pub fn available_in(self, phase: BuildPhase) -> bool {
        match (self, phase) {
            (Self::Implementation, _) => true,
            (Self::TestImplementation, BuildPhase::TestCompile | BuildPhase::TestRuntime) => true,
            (Self::TestRuntimeOnly, BuildPhase::TestRuntime) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Implementation => "implementation",
            Self::TestImplementation => "test-implementation",
            Self::TestRuntimeOnly => "test-runtime-only",
        };
        write!(f, "{name}")
    }
}

/// A build phase in which dependencies are (or are not) visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    MainCompile,
    TestCompile,
    TestRuntime,
}

impl std::str::FromStr for BuildPhase {
    type Err = BokorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main-compile" => Ok(Self::MainCompile),
            "test-compile" => Ok(Self::TestCompile),
            "test-runtime" => Ok(Self::TestRuntime),
            other => Err(BokorError::Generic {
                message: format!(
                    "unknown build phase `{other}` (expected main-compile, test-compile or test-runtime)"
                ),
            }),
        }
    }
}
