//! Structural well-formedness checks for a parsed manifest.
//!
//! These checks are local: they never touch the network and never perform
//! dependency resolution. Alignment against BOM documents is a separate
//! operation in [`crate::align`].

use std::collections::{HashMap, HashSet};

use bokor_util::errors::BokorError;

use crate::manifest::Manifest;

/// A single well-formedness problem found in a manifest.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The manifest field the issue was found in, e.g. `dependencies.implementation`.
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collect all structural issues in a manifest.
pub fn check(manifest: &Manifest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_identity(manifest, &mut issues);
    check_plugins(manifest, &mut issues);
    check_repositories(manifest, &mut issues);
    check_dependencies(manifest, &mut issues);
    check_test_runner(manifest, &mut issues);

    issues
}

/// Validate a manifest, folding all issues into a single error.
pub fn validate(manifest: &Manifest) -> miette::Result<()> {
    let issues = check(manifest);
    if issues.is_empty() {
        return Ok(());
    }
    let mut message = format!("{} issue(s) in manifest", issues.len());
    for issue in &issues {
        message.push_str(&format!("\n  - {issue}"));
    }
    Err(BokorError::Validation { message }.into())
}

fn check_identity(manifest: &Manifest, issues: &mut Vec<ValidationIssue>) {
    let fields = [
        ("project.group", &manifest.project.group),
        ("project.name", &manifest.project.name),
        ("project.version", &manifest.project.version),
    ];
    for (field, value) in fields {
        if value.is_empty() {
            issues.push(ValidationIssue {
                field: field.to_string(),
                message: "must not be empty".to_string(),
            });
        } else if value.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue {
                field: field.to_string(),
                message: format!("`{value}` must not contain whitespace"),
            });
        }
    }
}

fn check_plugins(manifest: &Manifest, issues: &mut Vec<ValidationIssue>) {
    for (idx, plugin) in manifest.plugins.iter().enumerate() {
        if plugin.id().is_empty() {
            issues.push(ValidationIssue {
                field: format!("plugins[{idx}]"),
                message: "plugin id must not be empty".to_string(),
            });
        }
    }
}

fn check_repositories(manifest: &Manifest, issues: &mut Vec<ValidationIssue>) {
    if manifest.repositories.is_empty() {
        issues.push(ValidationIssue {
            field: "repositories".to_string(),
            message: "no repository source declared".to_string(),
        });
    }
    for (name, url) in &manifest.repositories {
        let well_formed = url.starts_with("https://")
            || url.starts_with("http://")
            || url.starts_with("file://");
        if !well_formed {
            issues.push(ValidationIssue {
                field: format!("repositories.{name}"),
                message: format!("`{url}` is not an http(s) or file URL"),
            });
        }
    }
}

fn check_dependencies(manifest: &Manifest, issues: &mut Vec<ValidationIssue>) {
    let has_platform = !manifest.platforms().is_empty();

    for (idx, dep) in manifest.platforms().iter().enumerate() {
        let field = format!("dependencies.platform[{idx}]");
        match dep.coordinate() {
            Ok(coordinate) if !coordinate.is_pinned() => issues.push(ValidationIssue {
                field,
                message: format!("platform entry {} must pin a version", coordinate.key()),
            }),
            Ok(_) => {}
            Err(e) => issues.push(ValidationIssue {
                field,
                message: e.to_string(),
            }),
        }
    }

    // Duplicates are tracked per scope; the same artifact may legitimately
    // appear in different scopes.
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut scope_index = HashMap::new();
    for (dep, scope) in manifest.entries() {
        let idx = scope_index.entry(scope).or_insert(0usize);
        let field = format!("dependencies.{scope}[{idx}]");
        *idx += 1;

        let coordinate = match dep.coordinate() {
            Ok(c) => c,
            Err(e) => {
                issues.push(ValidationIssue {
                    field,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !seen.insert((scope.to_string(), coordinate.key())) {
            issues.push(ValidationIssue {
                field: field.clone(),
                message: format!("duplicate declaration of {}", coordinate.key()),
            });
        }

        if !coordinate.is_pinned() && !has_platform {
            issues.push(ValidationIssue {
                field,
                message: format!(
                    "{} has no version and the manifest declares no platform",
                    coordinate.key()
                ),
            });
        }
    }
}

fn check_test_runner(manifest: &Manifest, issues: &mut Vec<ValidationIssue>) {
    let has_test_deps = !manifest.dependencies.test_implementation.is_empty()
        || !manifest.dependencies.test_runtime_only.is_empty();
    if has_test_deps && manifest.test.is_none() {
        issues.push(ValidationIssue {
            field: "test.runner".to_string(),
            message: "test dependencies declared but no test runner selected".to_string(),
        });
    }
}
