//! Catalog action dispatch.
//!
//! The user-facing surface is a small set of actions over the readings
//! catalog. They are modeled as an explicit enum handled by a plain
//! function, so both the CLI and a test harness can invoke them directly.

use tracing::debug;

use crate::error::Result;
use crate::reading::Reading;
use crate::report;
use crate::storage::Storage;

/// Notice returned by the delete-all stub.
const DELETE_ALL_NOTICE: &str = "[Delete all entries not yet implemented]";

/// A user-visible action on the readings catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Render the full readings report.
    Show,
    /// Insert the fixed sample reading, then render the report.
    InsertSample,
    /// Delete all readings. Currently a no-op stub.
    DeleteAll,
}

/// Handle a single action against the given storage.
///
/// Returns the text to present to the user.
///
/// # Errors
///
/// Returns an error if a storage operation fails.
pub fn handle(storage: &Storage, action: Action) -> Result<String> {
    match action {
        Action::Show => show(storage),
        Action::InsertSample => {
            let id = storage.insert(&Reading::sample())?;
            debug!("Inserted sample reading with id {}", id);
            show(storage)
        }
        // Stored rows are left untouched until deletion is implemented.
        Action::DeleteAll => Ok(DELETE_ALL_NOTICE.to_string()),
    }
}

fn show(storage: &Storage) -> Result<String> {
    let readings = storage.list_all()?;
    Ok(report::render(&readings))
}
