use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("snapshot checksum mismatch: the local store is corrupt")]
    ChecksumMismatch,

    #[error("core error: {0}")]
    Core(#[from] duesbook_core::CoreError),
}
