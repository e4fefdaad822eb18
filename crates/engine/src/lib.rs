pub mod error;
pub mod ledger;
pub mod money;
pub mod views;

pub use error::EngineError;
pub use ledger::Ledger;

use chrono::{NaiveDate, Utc};
use duesbook_core::{
    calendar, ClubConfig, Member, MemberId, NewMember, NewTransaction, PaymentKey, PaymentRecord,
    PaymentStatus, Snapshot, Transaction, TransactionId, TransactionKind,
};
use duesbook_storage::Store;

/// The reconciliation engine: sole owner of the entity store and the only
/// component that mutates it. Each mutation finishes every collection edit
/// in memory, then persists one full snapshot, so readers never observe a
/// half-applied cascade.
pub struct Engine {
    config: ClubConfig,
    ledger: Ledger,
    store: Box<dyn Store>,
}

impl Engine {
    /// Open against a persistence adapter. A fresh store is seeded with a
    /// small example roster and saved immediately.
    pub fn open(store: Box<dyn Store>, config: ClubConfig) -> Result<Self, EngineError> {
        let (ledger, fresh) = match store.load()? {
            Some(snapshot) => (Ledger::from_snapshot(snapshot), false),
            None => {
                tracing::info!("no saved club state found, seeding example roster");
                let snapshot = Snapshot {
                    members: seed_members(),
                    ..Snapshot::default()
                };
                (Ledger::from_snapshot(snapshot), true)
            }
        };

        let mut engine = Self {
            config,
            ledger,
            store,
        };
        if fresh {
            engine.persist();
        }
        Ok(engine)
    }

    pub fn config(&self) -> &ClubConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn snapshot(&self) -> Snapshot {
        self.ledger.snapshot()
    }

    // ========================================================================
    // Member lifecycle
    // ========================================================================

    pub fn add_member(&mut self, new: NewMember) -> Result<MemberId, EngineError> {
        if new.name.trim().is_empty() {
            return Err(EngineError::InvalidInput("member name is required".into()));
        }
        let id = MemberId::new();
        self.ledger.insert_member(Member::from_new(id, new));
        self.persist();
        Ok(id)
    }

    pub fn update_member(&mut self, member: Member) -> Result<(), EngineError> {
        let id = member.id;
        if !self.ledger.replace_member(member) {
            return Err(EngineError::MemberNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// Remove a member together with every record that references it: the
    /// member's payment records and all ledger entries carrying either a
    /// direct member reference or a payment link derived for the member.
    /// The three removals are one logical operation.
    pub fn delete_member(&mut self, id: MemberId) -> Result<(), EngineError> {
        if self.ledger.find_member(id).is_none() {
            return Err(EngineError::MemberNotFound(id.to_string()));
        }
        self.ledger.remove_member(id);
        self.ledger.remove_payments_for(id);
        self.ledger.remove_transactions_for(id);
        self.persist();
        Ok(())
    }

    // ========================================================================
    // Transaction lifecycle
    // ========================================================================

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<TransactionId, EngineError> {
        self.validate_transaction_input(new.amount, &new.category, new.member_ref, new.fee_month)?;
        let id = TransactionId::new();
        self.ledger.insert_transaction(Transaction::from_new(id, new));
        self.persist();
        Ok(id)
    }

    pub fn update_transaction(&mut self, transaction: Transaction) -> Result<(), EngineError> {
        let existing = self
            .ledger
            .find_transaction(transaction.id)
            .ok_or_else(|| EngineError::TransactionNotFound(transaction.id.to_string()))?;
        if existing.is_auto_linked() {
            return Err(EngineError::DerivedRecordImmutable(transaction.id.to_string()));
        }
        if transaction.is_auto_linked() {
            // A payment link can only be minted by toggle_payment.
            return Err(EngineError::InvalidInput(
                "payment links are engine-managed".into(),
            ));
        }
        self.validate_transaction_input(
            transaction.amount,
            &transaction.category,
            transaction.member_ref,
            transaction.fee_month,
        )?;
        self.ledger.replace_transaction(transaction);
        self.persist();
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<(), EngineError> {
        let existing = self
            .ledger
            .find_transaction(id)
            .ok_or_else(|| EngineError::TransactionNotFound(id.to_string()))?;
        if existing.is_auto_linked() {
            return Err(EngineError::DerivedRecordImmutable(id.to_string()));
        }
        self.ledger.remove_transaction(id);
        self.persist();
        Ok(())
    }

    fn validate_transaction_input(
        &self,
        amount: f64,
        category: &str,
        member_ref: Option<MemberId>,
        fee_month: Option<u8>,
    ) -> Result<(), EngineError> {
        money::validate_amount(amount, "amount")?;
        if let Some(month) = fee_month
            && !calendar::is_valid_month(month)
        {
            return Err(EngineError::InvalidInput(format!(
                "fee month must be 0-11, got {month}"
            )));
        }
        if self.config.is_fee_category(category) && member_ref.is_none() {
            return Err(EngineError::InvalidInput(
                "dues income requires a member reference".into(),
            ));
        }
        if let Some(member_ref) = member_ref
            && self.ledger.find_member(member_ref).is_none()
        {
            return Err(EngineError::MemberNotFound(member_ref.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Payment toggle
    // ========================================================================

    /// Flip the paid/unpaid state of one matrix cell, keeping the ledger in
    /// lockstep: marking paid creates exactly one dues entry linked to the
    /// cell's payment key, marking unpaid retracts every entry with that
    /// key. A cell with no record yet is an implicit first-time "mark paid".
    pub fn toggle_payment(
        &mut self,
        member_id: MemberId,
        month: u8,
        year: i32,
    ) -> Result<PaymentStatus, EngineError> {
        if !calendar::is_valid_month(month) {
            return Err(EngineError::InvalidInput(format!(
                "month must be 0-11, got {month}"
            )));
        }
        let member = self
            .ledger
            .find_member(member_id)
            .ok_or_else(|| EngineError::MemberNotFound(member_id.to_string()))?
            .clone();
        if !member.joined_by(month, year) {
            return Err(EngineError::PaymentPrecedesJoin {
                member_id: member_id.to_string(),
                month,
                year,
            });
        }

        let key = PaymentKey::derive(member_id, month, year);

        let flipped = match self.ledger.find_payment_mut(member_id, month, year) {
            Some(record) => {
                record.status = record.status.toggled();
                if record.status == PaymentStatus::Paid {
                    record.paid_at = Utc::now();
                }
                Some(record.status)
            }
            None => None,
        };

        let status = match flipped {
            Some(PaymentStatus::Unpaid) => {
                // Exactly one entry should carry this key, but the retract
                // sweeps all matches.
                self.ledger.remove_transactions_by_key(&key);
                PaymentStatus::Unpaid
            }
            Some(PaymentStatus::Paid) => {
                let entry = self.fee_transaction(&member, month, key);
                self.ledger.insert_transaction(entry);
                PaymentStatus::Paid
            }
            None => {
                self.ledger.insert_payment(PaymentRecord {
                    member_id,
                    year,
                    month,
                    amount: self.config.monthly_fee,
                    paid_at: Utc::now(),
                    status: PaymentStatus::Paid,
                });
                let entry = self.fee_transaction(&member, month, key);
                self.ledger.insert_transaction(entry);
                PaymentStatus::Paid
            }
        };

        self.persist();
        Ok(status)
    }

    fn fee_transaction(&self, member: &Member, month: u8, key: PaymentKey) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: Utc::now().date_naive(),
            kind: TransactionKind::In,
            category: self.config.fee_category.clone(),
            amount: self.config.monthly_fee,
            description: format!("{} dues - {}", calendar::month_name(month), member.name),
            member_ref: Some(member.id),
            fee_month: Some(month),
            payment_key: Some(key),
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the full snapshot. The in-memory state stays authoritative if
    /// the write fails; the user keeps working and the next save rewrites
    /// everything.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.ledger.snapshot()) {
            tracing::warn!("failed to persist club snapshot: {e}");
        }
    }
}

/// First-run roster for an empty store.
fn seed_members() -> Vec<Member> {
    let roster: [(&str, &str, &str, &str, (i32, u32, u32)); 3] = [
        ("Ahmad Zulkifli", "900101-14-5543", "1", "012-3456789", (2023, 1, 15)),
        ("Siti Mariam", "920520-10-5002", "2", "013-9876543", (2023, 5, 20)),
        ("Razif Omar", "880210-08-6677", "3", "017-1122334", (2024, 2, 10)),
    ];
    roster
        .into_iter()
        .map(|(name, id_number, number, phone, (y, m, d))| Member {
            id: MemberId::new(),
            name: name.into(),
            id_number: id_number.into(),
            member_number: number.into(),
            phone: phone.into(),
            join_date: NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date"),
        })
        .collect()
}
