//! Platform version alignment.
//!
//! Pins a concrete version onto every dependency declaration: explicit
//! versions pass through, version-less declarations take their version from
//! the managed sections of the declared platforms' BOM documents.

use bokor_util::errors::BokorError;

use crate::bom::Bom;
use crate::coordinate::Coordinate;
use crate::dependency::DependencyScope;
use crate::manifest::Manifest;

/// A dependency declaration with its version pinned.
#[derive(Debug, Clone)]
pub struct AlignedDependency {
    pub coordinate: Coordinate,
    pub scope: DependencyScope,
    /// Whether the version came from a platform rather than the declaration.
    pub aligned: bool,
}

/// Align all dependency declarations in a manifest against the supplied BOM
/// documents, in declaration order.
///
/// Every declared platform entry must carry a version and must be matched by
/// one of `boms`. A version-less declaration not covered by any platform, or
/// covered at two different versions, is an error.
pub fn align(manifest: &Manifest, boms: &[Bom]) -> miette::Result<Vec<AlignedDependency>> {
    let platforms = match_platforms(manifest, boms)?;

    let mut result = Vec::new();
    for (dep, scope) in manifest.entries() {
        let coordinate = dep.coordinate()?;
        if coordinate.is_pinned() {
            result.push(AlignedDependency {
                coordinate,
                scope,
                aligned: false,
            });
            continue;
        }

        if platforms.is_empty() {
            return Err(BokorError::Alignment {
                message: format!(
                    "{} has no version and the manifest declares no platform",
                    coordinate.key()
                ),
            }
            .into());
        }

        // Collect the managed version from every platform that covers this
        // artifact; they must all agree.
        let mut managed: Vec<(&str, String)> = Vec::new();
        for (label, bom) in &platforms {
            if let Some(version) = bom.managed_version(&coordinate.group, &coordinate.artifact) {
                managed.push((version, label.clone()));
            }
        }

        let mut versions: Vec<&str> = managed.iter().map(|(v, _)| *v).collect();
        versions.sort_unstable();
        versions.dedup();

        match versions.as_slice() {
            [] => {
                return Err(BokorError::Alignment {
                    message: format!(
                        "no platform provides a version for {}",
                        coordinate.key()
                    ),
                }
                .into());
            }
            [version] => {
                result.push(AlignedDependency {
                    coordinate: coordinate.with_version(version),
                    scope,
                    aligned: true,
                });
            }
            _ => {
                let sources: Vec<String> = managed
                    .iter()
                    .map(|(v, label)| format!("{v} (from {label})"))
                    .collect();
                return Err(BokorError::Alignment {
                    message: format!(
                        "inconsistent managed versions for {}: {}",
                        coordinate.key(),
                        sources.join(", ")
                    ),
                }
                .into());
            }
        }
    }

    tracing::debug!(
        entries = result.len(),
        aligned = result.iter().filter(|d| d.aligned).count(),
        "aligned dependency declarations"
    );
    Ok(result)
}

/// Pair each declared platform entry with the supplied BOM that matches it.
fn match_platforms<'a>(
    manifest: &Manifest,
    boms: &'a [Bom],
) -> miette::Result<Vec<(String, &'a Bom)>> {
    let mut platforms = Vec::new();
    for dep in manifest.platforms() {
        let coordinate = dep.coordinate()?;
        let Some(ref declared_version) = coordinate.version else {
            return Err(BokorError::Alignment {
                message: format!("platform entry {} must pin a version", coordinate.key()),
            }
            .into());
        };

        let matched = boms.iter().find(|bom| {
            bom.coordinate().is_some_and(|c| {
                c.group == coordinate.group
                    && c.artifact == coordinate.artifact
                    && c.version.as_deref().map_or(true, |v| v == declared_version.as_str())
            })
        });

        match matched {
            Some(bom) => platforms.push((coordinate.to_string(), bom)),
            None => {
                return Err(BokorError::Alignment {
                    message: format!(
                        "platform {coordinate} declared but no matching BOM document was supplied"
                    ),
                }
                .into());
            }
        }
    }
    Ok(platforms)
}
