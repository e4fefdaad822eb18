use duesbook_core::{
    Member, MemberId, PaymentKey, PaymentRecord, Snapshot, Transaction, TransactionId,
};

/// The Entity Store: canonical in-memory home of the three collections.
/// Pure storage plus lookup — every cross-collection rule (cascades, derived
/// ledger entries) lives in the engine, which is the only writer.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    members: Vec<Member>,
    payments: Vec<PaymentRecord>,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            members: snapshot.members,
            payments: snapshot.payments,
            transactions: snapshot.transactions,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            members: self.members.clone(),
            payments: self.payments.clone(),
            transactions: self.transactions.clone(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find_member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Lookup by the natural key (member, month, year). The scan-first rule
    /// is what keeps the key unique: writers locate and update an existing
    /// record instead of inserting a duplicate.
    pub fn find_payment(&self, member_id: MemberId, month: u8, year: i32) -> Option<&PaymentRecord> {
        self.payments
            .iter()
            .find(|p| p.member_id == member_id && p.month == month && p.year == year)
    }

    pub(crate) fn find_payment_mut(
        &mut self,
        member_id: MemberId,
        month: u8,
        year: i32,
    ) -> Option<&mut PaymentRecord> {
        self.payments
            .iter_mut()
            .find(|p| p.member_id == member_id && p.month == month && p.year == year)
    }

    pub fn find_transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Every ledger entry referencing the member, whether by direct member
    /// reference or through a payment link.
    pub fn transactions_referencing(&self, member_id: MemberId) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| Self::references_member(t, member_id))
            .collect()
    }

    pub fn transactions_by_payment_key(&self, key: &PaymentKey) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.payment_key.as_ref() == Some(key))
            .collect()
    }

    fn references_member(transaction: &Transaction, member_id: MemberId) -> bool {
        transaction.member_ref == Some(member_id)
            || transaction
                .payment_key
                .as_ref()
                .is_some_and(|key| key.references(member_id))
    }

    // ========================================================================
    // Mutation (engine-internal)
    // ========================================================================

    pub(crate) fn insert_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub(crate) fn replace_member(&mut self, member: Member) -> bool {
        match self.members.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_member(&mut self, id: MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.members.len() != before
    }

    pub(crate) fn remove_payments_for(&mut self, member_id: MemberId) {
        self.payments.retain(|p| p.member_id != member_id);
    }

    pub(crate) fn insert_payment(&mut self, record: PaymentRecord) {
        self.payments.push(record);
    }

    pub(crate) fn insert_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub(crate) fn replace_transaction(&mut self, transaction: Transaction) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(slot) => {
                *slot = transaction;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_transaction(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() != before
    }

    pub(crate) fn remove_transactions_by_key(&mut self, key: &PaymentKey) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.payment_key.as_ref() != Some(key));
        before - self.transactions.len()
    }

    pub(crate) fn remove_transactions_for(&mut self, member_id: MemberId) {
        self.transactions
            .retain(|t| !Self::references_member(t, member_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use duesbook_core::{PaymentStatus, TransactionKind};

    fn member(number: &str) -> Member {
        Member {
            id: MemberId::new(),
            name: format!("Member {number}"),
            id_number: "000000-00-0000".into(),
            member_number: number.into(),
            phone: "012-0000000".into(),
            join_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        }
    }

    fn dues_entry(member_id: MemberId, month: u8, year: i32) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: NaiveDate::from_ymd_opt(year, 1 + u32::from(month), 1).unwrap(),
            kind: TransactionKind::In,
            category: "Monthly dues".into(),
            amount: 30.0,
            description: "dues".into(),
            member_ref: Some(member_id),
            fee_month: Some(month),
            payment_key: Some(PaymentKey::derive(member_id, month, year)),
        }
    }

    #[test]
    fn payment_lookup_matches_the_full_natural_key() {
        let mut ledger = Ledger::default();
        let m = member("1");
        let id = m.id;
        ledger.insert_member(m);
        ledger.insert_payment(PaymentRecord {
            member_id: id,
            year: 2024,
            month: 3,
            amount: 30.0,
            paid_at: Utc::now(),
            status: PaymentStatus::Paid,
        });

        assert!(ledger.find_payment(id, 3, 2024).is_some());
        assert!(ledger.find_payment(id, 4, 2024).is_none());
        assert!(ledger.find_payment(id, 3, 2023).is_none());
        assert!(ledger.find_payment(MemberId::new(), 3, 2024).is_none());
    }

    #[test]
    fn referencing_covers_direct_refs_and_payment_links() {
        let mut ledger = Ledger::default();
        let m = member("1");
        let id = m.id;
        ledger.insert_member(m);

        // A linked dues entry and a manual entry with only a member ref.
        ledger.insert_transaction(dues_entry(id, 0, 2024));
        let mut manual = dues_entry(id, 1, 2024);
        manual.payment_key = None;
        manual.category = "Donation".into();
        ledger.insert_transaction(manual);

        assert_eq!(ledger.transactions_referencing(id).len(), 2);
        assert_eq!(ledger.transactions_referencing(MemberId::new()).len(), 0);
    }

    #[test]
    fn remove_by_key_sweeps_every_match() {
        let mut ledger = Ledger::default();
        let m = member("1");
        let id = m.id;
        ledger.insert_member(m);
        ledger.insert_transaction(dues_entry(id, 0, 2024));
        ledger.insert_transaction(dues_entry(id, 0, 2024));
        ledger.insert_transaction(dues_entry(id, 1, 2024));

        let key = PaymentKey::derive(id, 0, 2024);
        assert_eq!(ledger.remove_transactions_by_key(&key), 2);
        assert_eq!(ledger.transactions().len(), 1);
    }
}
