use bokor_util::errors::BokorError;

/// Maven-style coordinates: `group:artifact` or `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Coordinate {
    /// Parse a coordinate string.
    ///
    /// Accepts exactly two or three `:`-separated segments; every segment
    /// present must be non-empty. The two-segment form is a version-less
    /// coordinate, completed later by platform alignment.
    pub fn parse(s: &str) -> Result<Self, BokorError> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(BokorError::Coordinate {
                value: s.to_string(),
                message: format!("expected 2 or 3 segments, found {}", parts.len()),
            });
        }
        if let Some(idx) = parts.iter().position(|p| p.trim().is_empty()) {
            let segment = match idx {
                0 => "group",
                1 => "artifact",
                _ => "version",
            };
            return Err(BokorError::Coordinate {
                value: s.to_string(),
                message: format!("empty {segment} segment"),
            });
        }
        Ok(Self {
            group: parts[0].to_string(),
            artifact: parts[1].to_string(),
            version: parts.get(2).map(|v| v.to_string()),
        })
    }

    /// The `group:artifact` identity, used as the alignment lookup key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// Whether the coordinate carries an explicit version.
    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }

    /// A copy of this coordinate with the given version pinned.
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: Some(version.to_string()),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.version {
            Some(ref v) => write!(f, "{}:{}:{}", self.group, self.artifact, v),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}
