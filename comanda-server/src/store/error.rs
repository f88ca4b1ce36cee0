use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Seed file error: {0}")]
    Seed(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for shared::error::AppError {
    fn from(err: StoreError) -> Self {
        shared::error::AppError::database(err.to_string())
    }
}
