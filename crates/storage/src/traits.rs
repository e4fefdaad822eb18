use duesbook_core::Snapshot;

use crate::error::StorageError;

/// Persistence adapter for the club state. Implementations hold exactly one
/// snapshot; every save replaces it wholesale.
///
/// `load` returning `Ok(None)` means a fresh store: the caller is expected
/// to seed initial state and save it.
pub trait Store {
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError>;
}
