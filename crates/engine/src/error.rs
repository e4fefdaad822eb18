use duesbook_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transaction {0} mirrors a payment record and cannot be edited directly")]
    DerivedRecordImmutable(String),

    #[error("month {month}/{year} precedes the join date of member {member_id}")]
    PaymentPrecedesJoin {
        member_id: String,
        month: u8,
        year: i32,
    },
}
