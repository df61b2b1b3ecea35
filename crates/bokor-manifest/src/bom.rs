//! BOM document parsing: managed dependency versions and property interpolation.
//!
//! A BOM (bill of materials) is a POM XML file whose `<dependencyManagement>`
//! section supplies versions to dependencies that omit their own. Only the
//! subset of POM a BOM uses is parsed here: project identity, properties, and
//! the managed dependency list.

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::coordinate::Coordinate;

/// A parsed BOM document.
#[derive(Debug, Clone, Default)]
pub struct Bom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,

    pub properties: BTreeMap<String, String>,
    pub managed: Vec<ManagedDependency>,
}

/// A dependency entry in a BOM's `<dependencyManagement>` section.
#[derive(Debug, Clone)]
pub struct ManagedDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub type_: Option<String>,
}

impl ManagedDependency {
    /// Entries with `scope = "import"` and `type = "pom"` pull in another
    /// BOM rather than managing an artifact; they never answer version
    /// lookups.
    fn is_import(&self) -> bool {
        self.scope.as_deref() == Some("import") && self.type_.as_deref().unwrap_or("jar") == "pom"
    }
}

impl Bom {
    /// Parse a BOM from an XML string and interpolate its properties.
    pub fn from_str(xml: &str) -> miette::Result<Self> {
        let mut bom = parse_bom(xml)?;
        bom.resolve_properties();
        Ok(bom)
    }

    /// Load and parse a BOM document from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            bokor_util::errors::BokorError::Bom {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::from_str(&content)
    }

    /// The BOM's own coordinates, if its identity fields are present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate {
            group: self.group_id.clone()?,
            artifact: self.artifact_id.clone()?,
            version: self.version.clone(),
        })
    }

    /// Look up the managed version for a given group:artifact.
    pub fn managed_version(&self, group_id: &str, artifact_id: &str) -> Option<&str> {
        self.managed
            .iter()
            .filter(|d| !d.is_import())
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.version.as_deref())
    }

    /// Resolve `${property}` references in a string using the BOM's
    /// properties and built-in project variables.
    pub fn interpolate(&self, input: &str) -> String {
        let mut result = input.to_string();
        let mut iterations = 0;
        while result.contains("${") && iterations < 20 {
            iterations += 1;
            let mut new = result.clone();
            while let Some(start) = new.find("${") {
                let Some(end) = new[start..].find('}') else {
                    break;
                };
                let key = &new[start + 2..start + end];
                let value = self.resolve_property(key);
                if let Some(val) = value {
                    new = format!("{}{}{}", &new[..start], val, &new[start + end + 1..]);
                } else {
                    break;
                }
            }
            if new == result {
                break;
            }
            result = new;
        }
        result
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" => self.group_id.clone(),
            "project.artifactId" | "pom.artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" => self.version.clone(),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Interpolate all property references in the managed dependency list.
    fn resolve_properties(&mut self) {
        let snapshot = self.clone();
        for dep in &mut self.managed {
            dep.group_id = snapshot.interpolate(&dep.group_id);
            dep.artifact_id = snapshot.interpolate(&dep.artifact_id);
            if let Some(ref v) = dep.version {
                dep.version = Some(snapshot.interpolate(v));
            }
        }
    }
}

/// Parse a BOM XML string into a raw `Bom` struct (no interpolation).
fn parse_bom(xml: &str) -> miette::Result<Bom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut bom = Bom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut current_dep: Option<ManagedDependency> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();

                if path_context(&path) == "project>dependencyManagement>dependencies>dependency" {
                    current_dep = Some(ManagedDependency {
                        group_id: String::new(),
                        artifact_id: String::new(),
                        version: None,
                        scope: None,
                        type_: None,
                    });
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();

                // Properties: <project><properties><key>value</key></properties>
                if depth == 3 && path.get(1).map(|s| s.as_str()) == Some("properties") {
                    let prop_name = path.last().cloned().unwrap_or_default();
                    bom.properties.insert(prop_name, text_buf.clone());
                }

                if let Some(ref mut dep) = current_dep {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx.ends_with(">dependency>groupId") => {
                            dep.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx.ends_with(">dependency>artifactId") => {
                            dep.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx.ends_with(">dependency>version") => {
                            dep.version = Some(text_buf.clone());
                        }
                        Some("scope") if ctx.ends_with(">dependency>scope") => {
                            dep.scope = Some(text_buf.clone());
                        }
                        Some("type") if ctx.ends_with(">dependency>type") => {
                            dep.type_ = Some(text_buf.clone());
                        }
                        _ => {}
                    }

                    if ctx == "project>dependencyManagement>dependencies>dependency" {
                        if let Some(dep) = current_dep.take() {
                            bom.managed.push(dep);
                        }
                    }
                }

                // Top-level project fields
                if depth == 2 {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") => bom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => bom.artifact_id = Some(text_buf.clone()),
                        Some("version") => bom.version = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(bokor_util::errors::BokorError::Bom {
                    message: format!("Failed to parse BOM XML: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(bom)
}

/// Build a context string from the current XML path for matching.
fn path_context(path: &[String]) -> String {
    path.join(">")
}
