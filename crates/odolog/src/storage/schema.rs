//! `SQLite` schema definitions for odolog.
//!
//! This module is the schema contract: the table and column identifiers
//! for the readings table, plus the SQL statements that create the schema.

/// Name of the readings table.
pub const TABLE_READINGS: &str = "readings";

/// Name of the identifier column.
pub const COLUMN_ID: &str = "id";

/// Name of the vehicle reference column.
pub const COLUMN_VEHICLE_ID: &str = "vehicle_id";

/// Name of the date column.
pub const COLUMN_DATE: &str = "date";

/// Name of the odometer value column.
pub const COLUMN_ODOMETER: &str = "odometer";

/// SQL statement to create the readings table.
///
/// Identifier uniqueness is enforced here, not by the application.
pub const CREATE_READINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS readings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    odometer INTEGER NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_READINGS_TABLE, CREATE_METADATA_TABLE];
