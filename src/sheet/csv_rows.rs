use std::path::Path;

use super::{Cell, RecommendationRow, SheetError};

/// Read a CSV export of the recommendation sheet. Rows may be ragged.
pub fn read_csv_rows(path: &Path) -> Result<Vec<RecommendationRow>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    parse_records(&mut reader)
}

fn parse_records<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<RecommendationRow>, SheetError> {
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RecommendationRow::from_cells(record.iter().map(Cell::from_text)));
    }
    Ok(rows)
}
