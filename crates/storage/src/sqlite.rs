use rusqlite::{Connection, OptionalExtension};

use duesbook_core::Snapshot;

use crate::error::StorageError;
use crate::traits::Store;

/// Convert Vec<u8> to fixed-size array with proper error handling.
fn to_array<const N: usize>(v: Vec<u8>, label: &str) -> Result<[u8; N], StorageError> {
    v.try_into()
        .map_err(|_| StorageError::Serialization(format!("invalid {label} length")))
}

/// SQLite-backed snapshot store. The database holds a single blob row; the
/// blake3 checksum written alongside it is verified on every load so a
/// torn or hand-edited file surfaces as an error instead of bad state.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Store for SqliteStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let row: Option<(Vec<u8>, Vec<u8>)> = self
            .conn
            .query_row(
                "SELECT payload, checksum FROM snapshot WHERE slot = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((payload, checksum)) = row else {
            return Ok(None);
        };

        let expected = to_array::<32>(checksum, "checksum")?;
        if *blake3::hash(&payload).as_bytes() != expected {
            return Err(StorageError::ChecksumMismatch);
        }

        Ok(Some(Snapshot::from_msgpack(&payload)?))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let payload = snapshot.to_msgpack()?;
        let checksum = blake3::hash(&payload);
        self.conn.execute(
            "INSERT INTO snapshot (slot, payload, checksum, saved_at)
             VALUES (1, ?1, ?2, CAST(unixepoch('now','subsec') * 1000 AS INTEGER))
             ON CONFLICT(slot) DO UPDATE SET
                 payload = excluded.payload,
                 checksum = excluded.checksum,
                 saved_at = excluded.saved_at",
            rusqlite::params![payload, checksum.as_bytes().as_slice()],
        )?;
        Ok(())
    }
}
