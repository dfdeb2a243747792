//! Tipos de error comunes del crate.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("postgres error: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Datos estáticos de un programa internamente inconsistentes
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    /// Falla del hilo dedicado a Postgres
    #[error("thread join error: {0}")]
    Thread(String),
}

/// Un problema concreto encontrado al validar un programa.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    CreditsMismatch { components_total: f64, total_credits: i32 },
    UndeclaredSpecialization { course: String, code: String },
    DuplicateSpecialization { code: String },
    MalformedSpecializationCode { code: String },
    NegativeCredits { item: String, credits: f64 },
    NonPositiveComponent { component: String, credits: f64 },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::CreditsMismatch { components_total, total_credits } => write!(
                f,
                "credit components sum to {} but total_credits is {}",
                components_total, total_credits
            ),
            ValidationIssue::UndeclaredSpecialization { course, code } => {
                write!(f, "course '{}' references undeclared specialization '{}'", course, code)
            }
            ValidationIssue::DuplicateSpecialization { code } => {
                write!(f, "specialization code '{}' declared more than once", code)
            }
            ValidationIssue::MalformedSpecializationCode { code } => {
                write!(f, "specialization code '{}' must be 1-3 letters", code)
            }
            ValidationIssue::NegativeCredits { item, credits } => {
                write!(f, "'{}' has negative credits ({})", item, credits)
            }
            ValidationIssue::NonPositiveComponent { component, credits } => {
                write!(f, "credit component '{}' must be positive ({})", component, credits)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("program '{program_id}' is inconsistent: {}", join_issues(.issues))]
pub struct ValidationError {
    pub program_id: String,
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("; ")
}
