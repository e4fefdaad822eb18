//! Read-only projections over the entity store. Everything here is a pure
//! function of current ledger contents; nothing mutates or persists.

use chrono::{Datelike, NaiveDate};
use duesbook_core::{
    ClubConfig, Member, MemberId, PaymentStatus, Transaction, TransactionKind,
};
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::money::{to_decimal, to_f64};

/// Income/expense bucket for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthFlow {
    pub income: f64,
    pub expense: f64,
}

/// Cash flow for a year, bucketed by the calendar month of each entry's date.
pub fn monthly_cash_flow(ledger: &Ledger, year: i32) -> [MonthFlow; 12] {
    let mut income = [Decimal::ZERO; 12];
    let mut expense = [Decimal::ZERO; 12];
    for t in ledger.transactions() {
        if t.date.year() != year {
            continue;
        }
        let bucket = t.date.month0() as usize;
        match t.kind {
            TransactionKind::In => income[bucket] += to_decimal(t.amount),
            TransactionKind::Out => expense[bucket] += to_decimal(t.amount),
        }
    }
    std::array::from_fn(|i| MonthFlow {
        income: to_f64(income[i]),
        expense: to_f64(expense[i]),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowTotals {
    pub income: f64,
    pub expense: f64,
}

impl FlowTotals {
    pub fn net(&self) -> f64 {
        to_f64(to_decimal(self.income) - to_decimal(self.expense))
    }
}

/// Income/expense totals over any set of ledger entries.
pub fn totals<'a, I>(transactions: I) -> FlowTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TransactionKind::In => income += to_decimal(t.amount),
            TransactionKind::Out => expense += to_decimal(t.amount),
        }
    }
    FlowTotals {
        income: to_f64(income),
        expense: to_f64(expense),
    }
}

/// Running balance: total income minus total expense over the whole ledger.
pub fn balance(ledger: &Ledger) -> f64 {
    totals(ledger.transactions()).net()
}

/// A member's cumulative dues for a year against the session target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuesProgress {
    pub paid_amount: f64,
    /// Remaining balance toward the session target, floored at zero.
    pub outstanding: f64,
}

pub fn dues_progress(
    ledger: &Ledger,
    config: &ClubConfig,
    member_id: MemberId,
    year: i32,
) -> DuesProgress {
    let paid_months = ledger
        .payments()
        .iter()
        .filter(|p| {
            p.member_id == member_id && p.year == year && p.status == PaymentStatus::Paid
        })
        .count();
    let paid = to_decimal(config.monthly_fee) * Decimal::from(paid_months as u64);
    let outstanding = (to_decimal(config.session_target) - paid).max(Decimal::ZERO);
    DuesProgress {
        paid_amount: to_f64(paid),
        outstanding: to_f64(outstanding),
    }
}

/// Matrix cell status; a cell with no record reads as unpaid.
pub fn payment_status(ledger: &Ledger, member_id: MemberId, month: u8, year: i32) -> PaymentStatus {
    ledger
        .find_payment(member_id, month, year)
        .map(|p| p.status)
        .unwrap_or(PaymentStatus::Unpaid)
}

/// Matrix cells the UI greys out because they precede the join date.
pub fn months_before_join(member: &Member, year: i32) -> [bool; 12] {
    std::array::from_fn(|month| !member.joined_by(month as u8, year))
}

/// Members in display order: numeric member-number key, ascending.
pub fn members_by_number(ledger: &Ledger) -> Vec<&Member> {
    let mut members: Vec<&Member> = ledger.members().iter().collect();
    members.sort_by_key(|m| m.sort_key());
    members
}

/// Predicate combination for ledger views. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive match on description, or on the member number of
    /// the referenced member.
    pub search: Option<String>,
    pub member: Option<MemberId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

/// Filtered ledger projection, newest entries first.
pub fn filter_transactions<'a>(
    ledger: &'a Ledger,
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    let needle = filter.search.as_deref().map(str::to_lowercase);
    let mut rows: Vec<&Transaction> = ledger
        .transactions()
        .iter()
        .filter(|t| {
            if let Some(needle) = &needle {
                let number_hit = t
                    .member_ref
                    .and_then(|id| ledger.find_member(id))
                    .is_some_and(|m| m.member_number.contains(needle.as_str()));
                if !t.description.to_lowercase().contains(needle.as_str()) && !number_hit {
                    return false;
                }
            }
            if let Some(member) = filter.member
                && t.member_ref != Some(member)
            {
                return false;
            }
            if let Some(from) = filter.from
                && t.date < from
            {
                return false;
            }
            if let Some(to) = filter.to
                && t.date > to
            {
                return false;
            }
            if let Some(kind) = filter.kind
                && t.kind != kind
            {
                return false;
            }
            if let Some(category) = &filter.category
                && &t.category != category
            {
                return false;
            }
            true
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}
