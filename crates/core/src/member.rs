use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ids::MemberId;

/// Club member. `member_number` is a human-assigned, numeric-sortable label
/// used for display ordering; the system does not require it to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub id_number: String,
    pub member_number: String,
    pub phone: String,
    pub join_date: NaiveDate,
}

/// Create-member payload; the engine assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub id_number: String,
    pub member_number: String,
    pub phone: String,
    pub join_date: NaiveDate,
}

impl Member {
    pub fn from_new(id: MemberId, new: NewMember) -> Self {
        Self {
            id,
            name: new.name,
            id_number: new.id_number,
            member_number: new.member_number,
            phone: new.phone,
            join_date: new.join_date,
        }
    }

    /// Numeric ordering key for the member number. Non-numeric labels sort
    /// first rather than failing.
    pub fn sort_key(&self) -> i64 {
        self.member_number.parse().unwrap_or(0)
    }

    /// Whether (month 0-11, year) falls on or after the member's join month.
    /// Dues cannot be owed for months that precede membership.
    pub fn joined_by(&self, month: u8, year: i32) -> bool {
        let join_year = self.join_date.year();
        year > join_year || (year == join_year && u32::from(month) >= self.join_date.month0())
    }
}
