//! Typed result kinds returned by the catalog core. Status-code mapping lives in `response`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The targeted external id does not exist.
    #[error("not found: {entity} '{id}'")]
    NotFound { entity: &'static str, id: String },
    /// A referenced natural key (country code, owning roastery) has no row.
    #[error("unresolved reference: {kind} '{key}'")]
    UnresolvedReference { kind: &'static str, key: String },
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn unresolved(kind: &'static str, key: impl ToString) -> Self {
        AppError::UnresolvedReference {
            kind,
            key: key.to_string(),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound { .. } => "not_found",
            AppError::UnresolvedReference { .. } => "unresolved_reference",
            AppError::MalformedInput(_) => "malformed_input",
            AppError::Db(_) => "database_error",
        }
    }
}
