//! Prompt composition. Totals are computed locally from the snapshot; the
//! external service only ever sees derived numbers and transaction lines.

use chrono::Datelike;
use duesbook_core::{calendar, Snapshot, Transaction, TransactionKind};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::ReportKind;

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn totals<'a, I>(transactions: I) -> (Decimal, Decimal)
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
    (income, expense)
}

pub fn compose(kind: &ReportKind, snapshot: &Snapshot) -> String {
    match kind {
        ReportKind::FinancialSummary => {
            let (income, expense) = totals(&snapshot.transactions);
            format!(
                "You are the treasurer of a small sports club.\n\
                 Write a short, professional financial analysis from this data:\n\
                 - Members: {}\n\
                 - Total income: {income}\n\
                 - Total expenses: {expense}\n\
                 - Current cash balance: {}\n\
                 Cover: overall financial health, saving opportunities, and\n\
                 ideas for attracting outside donations.",
                snapshot.members.len(),
                income - expense,
            )
        }
        ReportKind::AnnualStatement { year } => {
            let (income, expense) = totals(
                snapshot
                    .transactions
                    .iter()
                    .filter(|t| t.date.year() == *year),
            );
            format!(
                "Produce a concise annual financial statement ({year}) for a\n\
                 small sports club.\n\
                 - Income for the year: {income}\n\
                 - Expenses for the year: {expense}\n\
                 - Year-end balance: {}\n\
                 Comment briefly (bullet points) on the yearly cash flow, the\n\
                 income/expense ratio, and advice for next year.",
                income - expense,
            )
        }
        ReportKind::CashFlow => {
            let mut lines: Vec<&Transaction> = snapshot.transactions.iter().collect();
            lines.sort_by_key(|t| t.date);
            let body: String = lines
                .iter()
                .map(|t| {
                    let kind = match t.kind {
                        TransactionKind::In => "IN",
                        TransactionKind::Out => "OUT",
                    };
                    format!(
                        "{}: [{kind}] {} - {:.2} ({})\n",
                        t.date, t.category, t.amount, t.description
                    )
                })
                .collect();
            format!(
                "Produce a professional cash flow statement for a small sports\n\
                 club from these raw transaction lines:\n{body}\
                 The statement must contain: a title, inflows summarized by\n\
                 category, outflows summarized by category, net cash flow, and\n\
                 a short liquidity comment."
            )
        }
        ReportKind::PaymentReminder { member_name, month } => format!(
            "Write a short, warm reminder message for a club member named\n\
             {member_name} whose {} dues are still unpaid. Keep the tone\n\
             friendly and collegial.",
            calendar::month_name(*month)
        ),
    }
}
