pub mod calendar;
pub mod config;
pub mod error;
pub mod ids;
pub mod member;
pub mod payment;
pub mod snapshot;
pub mod transaction;

pub use config::ClubConfig;
pub use error::CoreError;
pub use ids::*;
pub use member::{Member, NewMember};
pub use payment::{PaymentKey, PaymentRecord, PaymentStatus};
pub use snapshot::Snapshot;
pub use transaction::{NewTransaction, Transaction, TransactionKind};
