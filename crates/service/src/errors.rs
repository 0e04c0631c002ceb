use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure kinds reported by a repository. Produced from `DbErr` by the SeaORM
/// repositories and directly by the in-memory store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: String },
    #[error("foreign key constraint violated")]
    ForeignKeyViolation,
    #[error("record not found")]
    NotFound,
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Backend(String),
}

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                return RepoError::UniqueViolation { field: unique_field(&detail) };
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => return RepoError::ForeignKeyViolation,
            _ => {}
        }
        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
            DbErr::Conn(e) => RepoError::Unavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Unavailable(e.to_string()),
            other => RepoError::Backend(other.to_string()),
        }
    }
}

/// Tables whose Postgres-generated constraint names start with `<table>_`.
/// Longest first so `service_record` is not cut at its inner underscore.
const TABLES: [&str; 3] = ["service_record", "customer", "bike"];

/// Column name from a unique-violation message such as
/// `duplicate key value violates unique constraint "customer_email_key"`.
pub fn unique_field(detail: &str) -> String {
    let constraint = detail.split('"').nth(1).unwrap_or_default();
    let trimmed = constraint.strip_suffix("_key").unwrap_or(constraint);
    let column = TABLES
        .iter()
        .find_map(|table| trimmed.strip_prefix(table).and_then(|rest| rest.strip_prefix('_')))
        .or_else(|| trimmed.split_once('_').map(|(_, rest)| rest));
    match column {
        Some(field) if !field.is_empty() => field.to_string(),
        _ => "field".to_string(),
    }
}

/// Tagged application error: a public message plus the HTTP status it maps to.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{message}")]
    Internal { message: String, detail: String },
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 400,
            ServiceError::Internal { .. } => 500,
        }
    }

    /// Internal detail for non-production responses and logs.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ServiceError::Internal { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation { field } => ServiceError::Conflict(format!("{field} already exists")),
            RepoError::ForeignKeyViolation => ServiceError::Conflict("Referenced record does not exist".into()),
            RepoError::NotFound => ServiceError::NotFound("Record not found".into()),
            RepoError::Unavailable(detail) => ServiceError::Internal { message: "Database connection failed".into(), detail },
            RepoError::Backend(detail) => ServiceError::Internal { message: "Database operation failed".into(), detail },
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(detail) => ServiceError::Internal { message: "Database operation failed".into(), detail },
        }
    }
}
