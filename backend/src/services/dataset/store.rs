//! Single-row SQLite cache for the canonical dataset.
//!
//! The invariant from the cache design holds here: at most one row per
//! dataset URL, replaced wholesale on refresh, never merged. The capture
//! timestamp is stored as an explicit epoch-millisecond column so the
//! freshness predicate in `common` can be applied with any clock.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};

/// A cached dataset copy read back from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDataset {
    pub body: String,
    pub fetched_at_ms: u64,
}

pub struct DatasetStore {
    conn: Connection,
}

impl DatasetStore {
    /// Opens (and if needed creates) the cache database at `path`.
    pub fn open(path: &str) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| e.to_string())?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS dataset_cache (
                url TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                fetched_at_ms INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| e.to_string())?;
        Ok(Self { conn })
    }

    /// Reads the cached copy for `url`, if any.
    pub fn read(&self, url: &str) -> Result<Option<StoredDataset>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT body, fetched_at_ms FROM dataset_cache WHERE url = ?1")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map(params![url], |row| {
                Ok(StoredDataset {
                    body: row.get(0)?,
                    // A corrupt (negative) timestamp reads as epoch zero,
                    // which the freshness check treats as stale.
                    fetched_at_ms: u64::try_from(row.get::<_, i64>(1)?).unwrap_or(0),
                })
            })
            .map_err(|e| e.to_string())?;

        let result = match rows.into_iter().next() {
            Some(Ok(dataset)) => Ok(Some(dataset)),
            Some(Err(e)) => Err(e.to_string()),
            None => Ok(None),
        };
        result
    }

    /// Replaces the cached copy for `url` wholesale.
    pub fn write(&self, url: &str, body: &str, fetched_at_ms: u64) -> Result<(), String> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO dataset_cache (url, body, fetched_at_ms)
                 VALUES (?1, ?2, ?3)",
                params![url, body, fetched_at_ms as i64],
            )
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.test/data.json";

    fn open_temp() -> (tempfile::TempDir, DatasetStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.sqlite");
        let store = DatasetStore::open(path.to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_row_reads_as_none() {
        let (_dir, store) = open_temp();
        assert_eq!(store.read(URL).unwrap(), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_dir, store) = open_temp();
        store.write(URL, "[{\"name\":\"Milk\"}]", 1_700_000_000_000).unwrap();

        let cached = store.read(URL).unwrap().unwrap();
        assert_eq!(cached.body, "[{\"name\":\"Milk\"}]");
        assert_eq!(cached.fetched_at_ms, 1_700_000_000_000);
    }

    #[test]
    fn corrupt_negative_timestamp_reads_as_stale() {
        let (_dir, store) = open_temp();
        store
            .conn
            .execute(
                "INSERT INTO dataset_cache (url, body, fetched_at_ms) VALUES (?1, ?2, ?3)",
                params![URL, "corrupt", -42_i64],
            )
            .unwrap();

        let cached = store.read(URL).unwrap().unwrap();
        assert_eq!(cached.fetched_at_ms, 0);
        assert!(common::freshness::is_stale(
            Some(cached.fetched_at_ms),
            1_700_000_000_000
        ));
    }

    #[test]
    fn second_write_replaces_the_row() {
        let (_dir, store) = open_temp();
        store.write(URL, "old", 1).unwrap();
        store.write(URL, "new", 2).unwrap();

        let cached = store.read(URL).unwrap().unwrap();
        assert_eq!(cached.body, "new");
        assert_eq!(cached.fetched_at_ms, 2);

        // Still exactly one row for the URL.
        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM dataset_cache", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
