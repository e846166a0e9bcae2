//! # driftbottle-store
//!
//! [`SqliteBottleStore`], the rusqlite-backed implementation of
//! [`BottleStore`].
//!
//! One connection behind a mutex, WAL journal mode for the on-disk case, and
//! the schema created on open. The atomic claim rides on SQLite's
//! single-statement conditional update: `UPDATE … WHERE id = ? AND
//! status = 0` either performs the whole `Adrift → Picked` transition or
//! touches nothing, so two concurrent claims can never both succeed.

mod migrations;

use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use driftbottle_core::{Bottle, BottleStatus, BottleStore, StoreError, StoreResult};

const BOTTLE_COLUMNS: &str =
    "id, content, status, sender, sender_group, picker, picker_group, created_at, picked_at";

/// SQLite-backed bottle store.
///
/// Cheap to share behind an `Arc`; all access serializes on the inner
/// connection lock, which is fine for the short statements this store runs.
pub struct SqliteBottleStore {
    conn: Mutex<Connection>,
}

impl SqliteBottleStore {
    /// Opens (or creates) the store at `path`.
    ///
    /// Enables WAL mode and creates the schema if missing.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(sql_err)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(sql_err)?;
        migrations::run(&conn).map_err(sql_err)?;

        info!(path = %path.display(), "bottle store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a fresh in-memory store. Used by tests.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(sql_err)?;
        migrations::run(&conn).map_err(sql_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn).map_err(sql_err)
    }

    /// Inserts a new Adrift bottle and returns its id.
    pub fn create_bottle(
        &self,
        content: &str,
        sender_id: i64,
        sender_group_id: i64,
    ) -> StoreResult<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bottles (content, status, sender, sender_group, created_at)
                 VALUES (?1, 0, ?2, ?3, ?4)",
                params![content, sender_id, sender_group_id, now()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Returns a uniformly random Adrift bottle, or `None` when the pool is
    /// empty. Pure read.
    pub fn random_adrift(&self) -> StoreResult<Option<Bottle>> {
        let adrift: Vec<Bottle> = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOTTLE_COLUMNS} FROM bottles WHERE status = 0"
            ))?;
            let rows = stmt
                .query_map([], row_to_bottle)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;

        Ok(adrift.choose(&mut rand::rng()).cloned())
    }

    /// Atomically claims bottle `id` for the picker.
    ///
    /// The conditional update is a single statement, so the read-modify-write
    /// is never observable as separate steps; exactly one of any number of
    /// concurrent claims for the same id returns `true`.
    pub fn claim(&self, id: i64, picker_id: i64, picker_group_id: i64) -> StoreResult<bool> {
        let changed = self.with_conn(|conn| {
            conn.execute(
                "UPDATE bottles SET status = 1, picker = ?1, picker_group = ?2, picked_at = ?3
                 WHERE id = ?4 AND status = 0",
                params![picker_id, picker_group_id, now(), id],
            )
        })?;

        debug!(bottle_id = id, claimed = changed > 0, "claim attempted");
        Ok(changed > 0)
    }

    /// Fetches a bottle by id.
    pub fn get(&self, id: i64) -> StoreResult<Option<Bottle>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {BOTTLE_COLUMNS} FROM bottles WHERE id = ?1"),
                [id],
                row_to_bottle,
            )
            .optional()
        })
    }

    /// Number of Adrift bottles currently in the pool.
    pub fn adrift_count(&self) -> StoreResult<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM bottles WHERE status = 0", [], |row| {
                row.get(0)
            })
        })
    }
}

#[async_trait]
impl BottleStore for SqliteBottleStore {
    async fn create(
        &self,
        content: &str,
        sender_id: i64,
        sender_group_id: i64,
    ) -> StoreResult<i64> {
        self.create_bottle(content, sender_id, sender_group_id)
    }

    async fn fetch_random_adrift(&self) -> StoreResult<Option<Bottle>> {
        self.random_adrift()
    }

    async fn claim_if_adrift(
        &self,
        id: i64,
        picker_id: i64,
        picker_group_id: i64,
    ) -> StoreResult<bool> {
        self.claim(id, picker_id, picker_group_id)
    }
}

fn sql_err(e: rusqlite::Error) -> StoreError {
    StoreError::backend(e.to_string())
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn row_to_bottle(row: &rusqlite::Row<'_>) -> rusqlite::Result<Bottle> {
    let code: i64 = row.get(2)?;
    let status = BottleStatus::from_code(code)
        .ok_or_else(|| rusqlite::Error::IntegralValueOutOfRange(2, code))?;

    Ok(Bottle {
        id: row.get(0)?,
        content: row.get(1)?,
        status,
        sender_id: row.get(3)?,
        sender_group_id: row.get(4)?,
        picker_id: row.get(5)?,
        picker_group_id: row.get(6)?,
        created_at: row.get(7)?,
        picked_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn store() -> SqliteBottleStore {
        SqliteBottleStore::in_memory().unwrap()
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = store();
        let a = store.create_bottle("first", 100, 200).unwrap();
        let b = store.create_bottle("second", 100, 200).unwrap();
        let c = store.create_bottle("third", 101, 201).unwrap();
        assert!(a < b && b < c);

        let bottle = store.get(a).unwrap().unwrap();
        assert_eq!(bottle.content, "first");
        assert_eq!(bottle.status, BottleStatus::Adrift);
        assert_eq!(bottle.sender_id, 100);
        assert_eq!(bottle.sender_group_id, 200);
        assert_eq!(bottle.picker_id, None);
        assert_eq!(bottle.picker_group_id, None);
        assert_eq!(bottle.picked_at, None);
        assert!(bottle.created_at > 0);
    }

    #[test]
    fn test_random_adrift_empty_pool() {
        let store = store();
        assert_eq!(store.random_adrift().unwrap(), None);
    }

    #[test]
    fn test_random_adrift_skips_picked() {
        let store = store();
        let claimed = store.create_bottle("claimed", 1, 2).unwrap();
        let adrift = store.create_bottle("adrift", 3, 4).unwrap();
        assert!(store.claim(claimed, 300, 400).unwrap());

        // Only the unclaimed bottle is ever selected.
        for _ in 0..20 {
            let bottle = store.random_adrift().unwrap().unwrap();
            assert_eq!(bottle.id, adrift);
        }
    }

    #[test]
    fn test_random_adrift_reaches_every_bottle() {
        let store = store();
        for i in 0..5 {
            store.create_bottle(&format!("bottle {i}"), 1, 2).unwrap();
        }

        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(store.random_adrift().unwrap().unwrap().id);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_claim_transitions_once() {
        let store = store();
        let id = store.create_bottle("Hello sea", 100, 200).unwrap();

        assert!(store.claim(id, 300, 400).unwrap());
        assert!(!store.claim(id, 500, 600).unwrap());

        // Picker fields come from the single successful claim.
        let bottle = store.get(id).unwrap().unwrap();
        assert_eq!(bottle.status, BottleStatus::Picked);
        assert_eq!(bottle.picker_id, Some(300));
        assert_eq!(bottle.picker_group_id, Some(400));
        assert!(bottle.picked_at.is_some());
    }

    #[test]
    fn test_claim_missing_row_is_false() {
        let store = store();
        assert!(!store.claim(42, 300, 400).unwrap());
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        let store = Arc::new(store());
        let id = store.create_bottle("contested", 100, 200).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.claim(id, 1000 + i, 2000 + i).unwrap())
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|&&won| won).count(), 1);

        let winner = results.iter().position(|&won| won).unwrap() as i64;
        let bottle = store.get(id).unwrap().unwrap();
        assert_eq!(bottle.status, BottleStatus::Picked);
        assert_eq!(bottle.picker_id, Some(1000 + winner));
        assert_eq!(bottle.picker_group_id, Some(2000 + winner));
    }

    #[test]
    fn test_picked_bottles_remain_as_history() {
        let store = store();
        let id = store.create_bottle("keepsake", 1, 2).unwrap();
        store.claim(id, 3, 4).unwrap();

        assert_eq!(store.adrift_count().unwrap(), 0);
        assert!(store.get(id).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_trait_round_trip() {
        let store: Arc<dyn BottleStore> = Arc::new(store());
        let id = store.create("via trait", 100, 200).await.unwrap();

        let bottle = store.fetch_random_adrift().await.unwrap().unwrap();
        assert_eq!(bottle.id, id);
        assert_eq!(bottle.content, "via trait");

        assert!(store.claim_if_adrift(id, 300, 400).await.unwrap());
        assert_eq!(store.fetch_random_adrift().await.unwrap(), None);
    }
}
