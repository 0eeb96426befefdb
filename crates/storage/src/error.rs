use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    NotFound(String),

    /// A referenced category or training center does not exist
    #[error("{0}")]
    ReferenceNotFound(String),

    #[error("{message}")]
    ConstraintViolation {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// Turn a unique violation into a `ConstraintViolation` carrying `message`.
    /// Any other error is returned unchanged.
    pub fn on_unique_violation(self, message: impl FnOnce() -> String) -> Self {
        if !self.is_unique_violation() {
            return self;
        }

        match self {
            StorageError::Database(source) => StorageError::ConstraintViolation {
                message: message(),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        let err = StorageError::NotFound("missing".to_string());
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn on_unique_violation_leaves_other_errors_untouched() {
        let err = StorageError::Database(sqlx::Error::RowNotFound)
            .on_unique_violation(|| "duplicate".to_string());

        assert!(matches!(err, StorageError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn messages_are_displayed_verbatim() {
        let err = StorageError::ReferenceNotFound("A categoria X não foi encontrada.".into());
        assert_eq!(err.to_string(), "A categoria X não foi encontrada.");
    }
}
