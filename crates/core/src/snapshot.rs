use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::member::Member;
use crate::payment::PaymentRecord;
use crate::transaction::Transaction;

/// The persisted state layout: the three collections, saved and loaded as
/// one unit. Persistence is always a full snapshot, never a delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub payments: Vec<PaymentRecord>,
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn to_msgpack(&self) -> Result<Vec<u8>, CoreError> {
        rmp_serde::to_vec(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, CoreError> {
        rmp_serde::from_slice(bytes).map_err(|e| CoreError::Serialization(e.to_string()))
    }
}
