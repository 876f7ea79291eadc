//! Storage layer for odolog.
//!
//! This module provides `SQLite`-based persistent storage for odometer
//! readings: a single table written by the insert routine and scanned by
//! the display routine.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::reading::Reading;

/// Storage engine for odometer readings.
///
/// Wraps a single `SQLite` connection. The connection is opened when the
/// storage is created and released when it is dropped; row iterators are
/// statement-scoped and released on every exit path, including errors
/// raised mid-iteration.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a reading and return its assigned identifier.
    ///
    /// No range validation and no duplicate checks are performed; field
    /// values are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, reading: &Reading) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO readings (vehicle_id, date, odometer)
            VALUES (?1, ?2, ?3)
            ",
            params![reading.vehicle_id, reading.date, reading.odometer],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted reading with id {}", id);
        Ok(id)
    }

    /// Get a reading by its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Reading>> {
        let result = self
            .conn
            .query_row(
                r"
                SELECT id, vehicle_id, date, odometer
                FROM readings WHERE id = ?1
                ",
                [id],
                Self::row_to_reading,
            )
            .optional()?;
        Ok(result)
    }

    /// Retrieve all readings in storage order.
    ///
    /// This is the unfiltered scan behind the display routine. No sort is
    /// requested; rows come back in whatever order the store yields them.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_all(&self) -> Result<Vec<Reading>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, vehicle_id, date, odometer FROM readings
            ",
        )?;

        let readings = stmt
            .query_map([], Self::row_to_reading)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(readings)
    }

    /// Count total readings in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_readings = self.count()?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_readings,
            db_size_bytes,
        })
    }

    /// Convert a database row to a Reading struct.
    fn row_to_reading(row: &rusqlite::Row) -> rusqlite::Result<Reading> {
        let id: i64 = row.get(0)?;
        let vehicle_id: i64 = row.get(1)?;
        let date: String = row.get(2)?;
        let odometer: i64 = row.get(3)?;

        Ok(Reading {
            id: Some(id),
            vehicle_id,
            date,
            odometer,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    /// Total number of readings stored.
    pub total_readings: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    #[test]
    fn test_open_in_memory() {
        let storage = Storage::open_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_insert_and_get() {
        let storage = create_test_storage();
        let reading = Reading::new(2, "2024-03-10", 52_340);

        let id = storage.insert(&reading).unwrap();
        let retrieved = storage.get(id).unwrap().unwrap();

        assert_eq!(retrieved.id, Some(id));
        assert_eq!(retrieved.vehicle_id, 2);
        assert_eq!(retrieved.date, "2024-03-10");
        assert_eq!(retrieved.odometer, 52_340);
    }

    #[test]
    fn test_insert_returns_distinct_ids() {
        let storage = create_test_storage();
        let reading = Reading::sample();

        let id1 = storage.insert(&reading).unwrap();
        let id2 = storage.insert(&reading).unwrap();
        let id3 = storage.insert(&reading).unwrap();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_insert_allows_duplicates() {
        // No duplicate checks: identical field values produce two rows.
        let storage = create_test_storage();
        let reading = Reading::new(1, "1/1/2017", 100);

        storage.insert(&reading).unwrap();
        storage.insert(&reading).unwrap();

        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_insert_no_range_validation() {
        // Negative and zero values are stored verbatim.
        let storage = create_test_storage();
        let reading = Reading::new(-5, "", -1);

        let id = storage.insert(&reading).unwrap();
        let retrieved = storage.get(id).unwrap().unwrap();

        assert_eq!(retrieved.vehicle_id, -5);
        assert_eq!(retrieved.date, "");
        assert_eq!(retrieved.odometer, -1);
    }

    #[test]
    fn test_get_nonexistent() {
        let storage = create_test_storage();
        let result = storage.get(99999).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_list_all_empty() {
        let storage = create_test_storage();
        let readings = storage.list_all().unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_list_all_round_trip() {
        let storage = create_test_storage();

        let first = Reading::new(1, "1/1/2017", 100);
        let second = Reading::new(2, "2024-06-30", 7_500);
        let id1 = storage.insert(&first).unwrap();
        let id2 = storage.insert(&second).unwrap();

        let readings = storage.list_all().unwrap();
        assert_eq!(readings.len(), 2);

        // Every inserted row appears exactly once with its values unchanged.
        let got1 = readings.iter().find(|r| r.id == Some(id1)).unwrap();
        assert_eq!(got1.vehicle_id, 1);
        assert_eq!(got1.date, "1/1/2017");
        assert_eq!(got1.odometer, 100);

        let got2 = readings.iter().find(|r| r.id == Some(id2)).unwrap();
        assert_eq!(got2.vehicle_id, 2);
        assert_eq!(got2.date, "2024-06-30");
        assert_eq!(got2.odometer, 7_500);
    }

    #[test]
    fn test_count() {
        let storage = create_test_storage();
        assert_eq!(storage.count().unwrap(), 0);

        storage.insert(&Reading::new(1, "2024-01-01", 10)).unwrap();
        storage.insert(&Reading::new(1, "2024-01-02", 20)).unwrap();

        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_unicode_date() {
        let storage = create_test_storage();
        let reading = Reading::new(1, "2024年1月1日", 100);

        let id = storage.insert(&reading).unwrap();
        let retrieved = storage.get(id).unwrap().unwrap();

        assert_eq!(retrieved.date, "2024年1月1日");
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();

        assert_eq!(stats.total_readings, 0);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let storage = create_test_storage();

        storage.insert(&Reading::sample()).unwrap();
        storage.insert(&Reading::sample()).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_readings, 2);
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("odolog_test_{}.db", std::process::id()));

        let storage = Storage::open(&db_path).unwrap();
        storage.insert(&Reading::sample()).unwrap();
        assert_eq!(storage.count().unwrap(), 1);
        assert_eq!(storage.path(), db_path);

        drop(storage);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let nested_path = temp_dir.join(format!(
            "odolog_test_{}/nested/db.sqlite",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent.parent().unwrap());
        }
    }

    #[test]
    fn test_stats_db_size() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("odolog_size_test_{}.db", std::process::id()));

        let storage = Storage::open(&db_path).unwrap();
        storage.insert(&Reading::sample()).unwrap();

        let stats = storage.stats().unwrap();
        assert!(stats.db_size_bytes > 0);

        drop(storage);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_storage_stats_copy() {
        let stats = StorageStats {
            total_readings: 5,
            db_size_bytes: 512,
        };
        let copied = stats;
        assert_eq!(stats, copied);
    }
}
