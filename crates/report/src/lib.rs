//! Text-report collaborator. The engine never depends on this crate: report
//! generation is an injected capability that reads snapshots and returns
//! prose, and its output is never written back into the entity store.

pub mod error;
pub mod http;
pub mod prompt;

pub use error::ReportError;
pub use http::HttpReportGenerator;

use duesbook_core::Snapshot;

/// The report kinds the club shell can request.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportKind {
    /// Overall financial health summary.
    FinancialSummary,
    /// Year-to-date statement for the current year.
    AnnualStatement { year: i32 },
    /// Cash flow statement from the raw transaction lines.
    CashFlow,
    /// Friendly dues reminder for one member and month.
    PaymentReminder { member_name: String, month: u8 },
}

/// Injected report capability. Implementations may call out to an external
/// text-generation service; failures stay inside `ReportError` and the
/// caller decides how to degrade.
pub trait ReportGenerator {
    fn generate(&self, kind: &ReportKind, snapshot: &Snapshot) -> Result<String, ReportError>;
}

/// Fixed user-visible text when generation fails. Never an error the caller
/// has to handle; report failure must not block bookkeeping.
pub fn fallback_text(kind: &ReportKind) -> String {
    match kind {
        ReportKind::FinancialSummary => {
            "The financial summary could not be generated. Check the report service settings."
                .to_string()
        }
        ReportKind::AnnualStatement { year } => {
            format!("The {year} annual statement could not be generated.")
        }
        ReportKind::CashFlow => "The cash flow statement could not be generated.".to_string(),
        ReportKind::PaymentReminder { member_name, month } => format!(
            "Hi {member_name}, a friendly reminder that your {} dues are still outstanding. Thank you!",
            duesbook_core::calendar::month_name(*month)
        ),
    }
}

/// Canned generator for tests and offline use: always returns the same text.
pub struct StaticReportGenerator {
    text: String,
}

impl StaticReportGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ReportGenerator for StaticReportGenerator {
    fn generate(&self, _kind: &ReportKind, _snapshot: &Snapshot) -> Result<String, ReportError> {
        Ok(self.text.clone())
    }
}
