use duesbook_core::{
    ClubConfig, Member, MemberId, NewMember, NewTransaction, PaymentStatus, Snapshot,
    Transaction, TransactionId,
};
use duesbook_engine::{Engine, EngineError, Ledger};
use duesbook_report::{fallback_text, ReportGenerator, ReportKind, StaticReportGenerator};
use duesbook_storage::{SqliteStore, Store};

/// Composition shell: the engine plus its collaborators, wired together.
/// The UI layer talks to this and nothing else; the mutation surface is
/// exactly the engine's entry points.
pub struct Club {
    engine: Engine,
    reports: Box<dyn ReportGenerator>,
}

impl Club {
    pub fn open(
        store: Box<dyn Store>,
        config: ClubConfig,
        reports: Box<dyn ReportGenerator>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            engine: Engine::open(store, config)?,
            reports,
        })
    }

    /// In-memory club with canned report text. Handy for tests and demos;
    /// nothing survives the process.
    pub fn ephemeral() -> Result<Self, EngineError> {
        let store = SqliteStore::open_in_memory()?;
        Self::open(
            Box::new(store),
            ClubConfig::default(),
            Box::new(StaticReportGenerator::new("no report service configured")),
        )
    }

    // ========================================================================
    // Mutation entry points (delegated to the engine)
    // ========================================================================

    pub fn add_member(&mut self, new: NewMember) -> Result<MemberId, EngineError> {
        self.engine.add_member(new)
    }

    pub fn update_member(&mut self, member: Member) -> Result<(), EngineError> {
        self.engine.update_member(member)
    }

    pub fn delete_member(&mut self, id: MemberId) -> Result<(), EngineError> {
        self.engine.delete_member(id)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<TransactionId, EngineError> {
        self.engine.add_transaction(new)
    }

    pub fn update_transaction(&mut self, transaction: Transaction) -> Result<(), EngineError> {
        self.engine.update_transaction(transaction)
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<(), EngineError> {
        self.engine.delete_transaction(id)
    }

    pub fn toggle_payment(
        &mut self,
        member_id: MemberId,
        month: u8,
        year: i32,
    ) -> Result<PaymentStatus, EngineError> {
        self.engine.toggle_payment(member_id, month, year)
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    pub fn config(&self) -> &ClubConfig {
        self.engine.config()
    }

    pub fn ledger(&self) -> &Ledger {
        self.engine.ledger()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Generate a text report from the current snapshot. Failure degrades
    /// to the fixed fallback text for the kind; it never surfaces as an
    /// error and never touches entity state.
    pub fn report(&self, kind: &ReportKind) -> String {
        match self.reports.generate(kind, &self.engine.snapshot()) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("report generation failed: {e}");
                fallback_text(kind)
            }
        }
    }
}
