use thiserror::Error;

/// Errors produced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A `UNIQUE` constraint rejected the write.
    #[error("unique constraint violated on {table}.{column}")]
    UniqueViolation {
        table: String,
        column: String,
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }

    /// Column named by a uniqueness violation, if that is what this is.
    pub fn violated_column(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation { column, .. } => Some(column),
            StoreError::Database(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Database(sqlx::Error::RowNotFound))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let target = match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                parse_unique_target(db.message())
            }
            _ => None,
        };
        match target {
            Some((table, column)) => StoreError::UniqueViolation {
                table,
                column,
                source: err,
            },
            None => StoreError::Database(err),
        }
    }
}

/// SQLite reports `UNIQUE constraint failed: users.email`.
fn parse_unique_target(message: &str) -> Option<(String, String)> {
    let (_, target) = message.split_once("constraint failed:")?;
    // composite constraints list several columns; report the first
    let first = target.split(',').next()?.trim();
    let (table, column) = first.split_once('.')?;
    Some((table.to_string(), column.to_string()))
}
