//! Text report rendering for stored readings.
//!
//! Produces the catalog view: a count header, a column line naming the
//! schema contract columns, and one line per reading.

use crate::reading::Reading;
use crate::storage::schema;

/// Render the readings report.
///
/// The header states the number of entries and is followed by a column
/// line; each reading then contributes one line with its field values
/// separated by ` - `. An empty slice yields the zero-count header and
/// no data lines.
#[must_use]
pub fn render(readings: &[Reading]) -> String {
    let mut out = format!(
        "The {} table contains {} entries.\n\n",
        schema::TABLE_READINGS,
        readings.len()
    );
    out.push_str(&format!(
        "{} - {} - {} - {}\n",
        schema::COLUMN_ID,
        schema::COLUMN_VEHICLE_ID,
        schema::COLUMN_DATE,
        schema::COLUMN_ODOMETER
    ));

    for reading in readings {
        out.push_str(&format!(
            "\n{} - {} - {} - {}",
            reading.id.unwrap_or_default(),
            reading.vehicle_id,
            reading.date,
            reading.odometer
        ));
    }

    out
}
