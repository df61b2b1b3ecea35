//! Operation: print the ordered, aligned dependency declarations.

use std::path::{Path, PathBuf};

use bokor_manifest::align::align;
use bokor_manifest::bom::Bom;
use bokor_manifest::dependency::BuildPhase;
use bokor_manifest::manifest::Manifest;
use bokor_manifest::validate;
use bokor_util::progress::status_info;

/// Print the aligned (coordinate, scope) sequence of a manifest.
pub fn exec(
    manifest_path: &Path,
    bom_paths: &[PathBuf],
    phase: Option<&str>,
    verbose: bool,
) -> miette::Result<()> {
    let phase: Option<BuildPhase> = phase.map(str::parse).transpose()?;

    let manifest = Manifest::from_path(manifest_path)?;
    validate::validate(&manifest)?;

    let mut boms = Vec::new();
    for path in bom_paths {
        boms.push(Bom::from_path(path)?);
    }
    let aligned = align(&manifest, &boms)?;

    status_info(
        "Aligned",
        &format!(
            "{} v{} ({} declaration(s))",
            manifest.project.name,
            manifest.project.version,
            aligned.len()
        ),
    );

    for dep in &aligned {
        if let Some(phase) = phase {
            if !dep.scope.available_in(phase) {
                continue;
            }
        }
        if verbose && dep.aligned {
            println!("{}  {}  (from platform)", dep.coordinate, dep.scope);
        } else {
            println!("{}  {}", dep.coordinate, dep.scope);
        }
    }
    Ok(())
}
