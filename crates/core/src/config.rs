use serde::{Deserialize, Serialize};

/// Reserved transaction category marking recurring membership-dues income.
/// Transactions in this category always carry a member reference.
pub const FEE_CATEGORY: &str = "Monthly dues";

/// Club-level settings. Defaults mirror a small club collecting a flat
/// monthly fee toward a fixed per-session target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubConfig {
    pub monthly_fee: f64,
    pub fee_category: String,
    /// Cumulative dues a member is expected to reach over the session;
    /// outstanding balance is computed against this and floored at zero.
    pub session_target: f64,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            monthly_fee: 30.0,
            fee_category: FEE_CATEGORY.to_string(),
            session_target: 150.0,
        }
    }
}

impl ClubConfig {
    pub fn is_fee_category(&self, category: &str) -> bool {
        category == self.fee_category
    }
}
