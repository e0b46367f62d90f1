use sea_orm::DbErr;

/// Failures surfaced to the HTTP boundary.
///
/// `Validation` never reaches the service layer, `NotFound` is raised by the
/// service before any mutation, and `Storage` carries the untouched database
/// error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: DbErr,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>, source: DbErr) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::NotFound(message) => message.as_str(),
            Self::Storage { message, .. } => message.as_str(),
        }
    }
}
