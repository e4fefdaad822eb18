use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::MemberId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::Paid,
        }
    }
}

/// Paid/unpaid state of one member for one (month, year) cell.
/// Natural key: (member_id, month, year) — at most one record per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub member_id: MemberId,
    pub year: i32,
    /// 0-11
    pub month: u8,
    /// Fixed at the monthly fee in force when the record was created.
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
    pub status: PaymentStatus,
}

impl PaymentRecord {
    pub fn key(&self) -> PaymentKey {
        PaymentKey::derive(self.member_id, self.month, self.year)
    }
}

/// Deterministic link between a payment record and the ledger entry the
/// engine generates for it. A transaction carrying one of these was derived
/// by the engine and is not directly editable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentKey(String);

impl PaymentKey {
    pub fn derive(member_id: MemberId, month: u8, year: i32) -> Self {
        Self(format!("{member_id}-{month}-{year}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key was derived for the given member.
    pub fn references(&self, member_id: MemberId) -> bool {
        self.0.starts_with(&format!("{member_id}-"))
    }
}

impl fmt::Display for PaymentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
