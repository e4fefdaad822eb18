//! CSV rendering of a filtered ledger view. Plain string building: one
//! header row, one row per entry, descriptions quoted.

use duesbook_core::{Transaction, TransactionKind};
use duesbook_engine::Ledger;

const HEADER: &str = "Date,Kind,Category,Member,Description,Amount";

pub fn transactions_csv(ledger: &Ledger, rows: &[&Transaction]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for t in rows {
        let kind = match t.kind {
            TransactionKind::In => "IN",
            TransactionKind::Out => "OUT",
        };
        let member = t
            .member_ref
            .and_then(|id| ledger.find_member(id))
            .map(|m| format!("#{}", m.member_number))
            .unwrap_or_else(|| "-".to_string());
        let description = t.description.replace('"', "\"\"");
        out.push_str(&format!(
            "{},{kind},{},{member},\"{description}\",{:.2}\n",
            t.date, t.category, t.amount
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Club;
    use chrono::NaiveDate;
    use duesbook_core::NewTransaction;

    #[test]
    fn rows_carry_member_numbers_and_quoted_descriptions(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut club = Club::ephemeral()?;
        let member_id = club.ledger().members()[0].id;

        club.add_transaction(NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            kind: TransactionKind::In,
            category: "Donation".into(),
            amount: 45.5,
            description: "Gift from \"Friends of the club\"".into(),
            member_ref: Some(member_id),
            fee_month: None,
        })?;

        let ledger = club.ledger();
        let rows: Vec<&Transaction> = ledger.transactions().iter().collect();
        let csv = transactions_csv(ledger, &rows);

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HEADER));
        let row = lines.next().unwrap();
        assert!(row.starts_with("2024-03-10,IN,Donation,#1,"));
        assert!(row.contains("\"Gift from \"\"Friends of the club\"\"\""));
        assert!(row.ends_with(",45.50"));
        Ok(())
    }

    #[test]
    fn empty_view_still_renders_the_header() {
        let ledger = Ledger::default();
        assert_eq!(transactions_csv(&ledger, &[]), format!("{HEADER}\n"));
    }
}
