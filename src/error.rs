use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database is locked")]
    LockPoisoned,
}

impl JournalError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        JournalError::NotFound(format!("{} {}", entity, id))
    }
}
