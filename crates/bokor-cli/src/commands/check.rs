//! Operation: check manifests for structural well-formedness.
//!
//! Parses each manifest and runs the structural checks; when BOM documents
//! are supplied, platform alignment is verified too. Several manifests are
//! checked concurrently on a worker pool.

use std::path::PathBuf;

use bokor_manifest::align::align;
use bokor_manifest::bom::Bom;
use bokor_manifest::manifest::Manifest;
use bokor_manifest::validate;
use bokor_runner::{AccumulatingConsumer, Runner};
use bokor_util::errors::BokorError;
use bokor_util::progress::{status, status_warn};

/// The result of checking one manifest file.
struct CheckOutcome {
    /// Structural issues from validation.
    issues: Vec<String>,
    /// A failure that prevented checking (unreadable file, bad TOML,
    /// alignment error).
    error: Option<String>,
}

impl CheckOutcome {
    fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.error.is_none()
    }
}

/// Check one or more manifest files.
pub fn exec(
    manifests: &[PathBuf],
    bom_paths: &[PathBuf],
    jobs: Option<usize>,
    verbose: bool,
) -> miette::Result<()> {
    let mut boms = Vec::new();
    for path in bom_paths {
        boms.push(Bom::from_path(path)?);
    }

    let workers = jobs
        .unwrap_or_else(default_jobs)
        .min(manifests.len().max(1));
    tracing::debug!(workers, manifests = manifests.len(), "checking manifests");
    status("Checking", &format!("{} manifest(s)", manifests.len()));

    let executor = |path: &PathBuf| check_one(path, &boms);
    let mut consumer = AccumulatingConsumer::new();
    let stats = Runner::new(workers).run(manifests.iter().cloned(), &executor, &mut consumer);

    let mut failed = 0usize;
    for record in consumer.records() {
        let path = record.input.display();
        let outcome = &record.output;
        if let Some(ref error) = outcome.error {
            failed += 1;
            status_warn("Failed", &format!("{path}: {error}"));
        } else if !outcome.issues.is_empty() {
            failed += 1;
            status_warn(
                "Invalid",
                &format!("{path} ({} issue(s))", outcome.issues.len()),
            );
            for issue in &outcome.issues {
                eprintln!("             - {issue}");
            }
        } else if verbose {
            status("Ok", &path.to_string());
        }
    }

    status(
        "Finished",
        &format!(
            "{} manifest(s) in {:.2}s",
            stats.completed,
            stats.elapsed.as_secs_f64()
        ),
    );

    if failed > 0 {
        return Err(BokorError::Validation {
            message: format!("{failed} of {} manifest(s) failed", manifests.len()),
        }
        .into());
    }
    Ok(())
}

fn check_one(path: &PathBuf, boms: &[Bom]) -> CheckOutcome {
    let manifest = match Manifest::from_path(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            return CheckOutcome {
                issues: Vec::new(),
                error: Some(e.to_string()),
            };
        }
    };

    let issues: Vec<String> = validate::check(&manifest)
        .iter()
        .map(ToString::to_string)
        .collect();

    // Alignment is only verified when BOM documents were supplied; without
    // them the structural checks are the whole contract.
    let mut outcome = CheckOutcome {
        issues,
        error: None,
    };
    if !boms.is_empty() && outcome.is_clean() {
        if let Err(e) = align(&manifest, boms) {
            outcome.error = Some(e.to_string());
        }
    }
    outcome
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
}
