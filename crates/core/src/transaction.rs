use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{MemberId, TransactionId};
use crate::payment::PaymentKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    In,
    Out,
}

/// Ledger entry. `payment_key` is set only on entries the engine derives
/// from a payment record; those entries are not user-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub member_ref: Option<MemberId>,
    /// Target month (0-11) for dues income.
    pub fee_month: Option<u8>,
    pub payment_key: Option<PaymentKey>,
}

/// Create-transaction payload for manual ledger entries. There is no
/// payment-key field: derived links can only be minted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub member_ref: Option<MemberId>,
    pub fee_month: Option<u8>,
}

impl Transaction {
    /// Derived entries mirror payment status and may only be changed by
    /// toggling the payment itself.
    pub fn is_auto_linked(&self) -> bool {
        self.payment_key.is_some()
    }

    pub fn from_new(id: TransactionId, new: NewTransaction) -> Self {
        Self {
            id,
            date: new.date,
            kind: new.kind,
            category: new.category,
            amount: new.amount,
            description: new.description,
            member_ref: new.member_ref,
            fee_month: new.fee_month,
            payment_key: None,
        }
    }
}
