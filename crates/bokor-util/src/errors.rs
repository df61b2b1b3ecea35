use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Bokor operations.
#[derive(Debug, Error, Diagnostic)]
pub enum BokorError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. bokor.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your bokor.toml for syntax errors"))]
    Manifest { message: String },

    /// A dependency coordinate string did not parse.
    #[error("Invalid coordinate `{value}`: {message}")]
    #[diagnostic(help("Coordinates have the form group:artifact or group:artifact:version"))]
    Coordinate { value: String, message: String },

    /// A BOM document could not be read or parsed.
    #[error("BOM error: {message}")]
    Bom { message: String },

    /// Platform version alignment failed (missing or inconsistent versions).
    #[error("Alignment failed: {message}")]
    #[diagnostic(help("Version-less dependencies need a platform whose BOM manages them"))]
    Alignment { message: String },

    /// The manifest is well-formed TOML but violates a structural rule.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type BokorResult<T> = miette::Result<T>;
