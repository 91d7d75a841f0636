use std::io::Write;
use std::path::Path;

use crate::errors::StoreError;
use crate::ResultStore;

/// Writes a table as CSV: one header line of column labels, then one line per row.
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(
    store: &dyn ResultStore,
    name: &str,
    writer: W,
) -> Result<usize, StoreError> {
    let schema = store
        .schema(name)
        .ok_or_else(|| StoreError::UnknownStore(name.to_string()))?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(schema.labels())?;

    let rows = store.rows(name);
    for row in &rows {
        wtr.write_record(schema.project(row))?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

pub fn write_csv_file(
    store: &dyn ResultStore,
    name: &str,
    path: &Path,
) -> Result<usize, StoreError> {
    let file = std::fs::File::create(path)?;
    write_csv(store, name, std::io::BufWriter::new(file))
}
