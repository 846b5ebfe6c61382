use std::path::Path;

use calamine::{Data, Reader};

use super::{Cell, RecommendationRow, SheetError};

/// Sheet listing plus the first rows of the chosen sheet, as plain text.
#[derive(Debug, Clone)]
pub struct SheetPreview {
    pub sheet_names: Vec<String>,
    pub sheet: String,
    pub height: usize,
    pub width: usize,
    pub rows: Vec<Vec<String>>,
}

fn cell_str(d: &Data) -> String {
    match d {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format!("{}", f),
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        _ => format!("{:?}", d),
    }
}

/// Pick `wanted` if the workbook has it, otherwise the first sheet.
fn choose_sheet(names: &[String], wanted: &str) -> Option<String> {
    if let Some(name) = names.iter().find(|name| name.as_str() == wanted) {
        return Some(name.clone());
    }
    let fallback = names.first()?;
    tracing::warn!(wanted, using = %fallback, "sheet not found, falling back to first sheet");
    Some(fallback.clone())
}

pub fn read_workbook_rows(path: &Path, sheet: &str) -> Result<Vec<RecommendationRow>, SheetError> {
    let mut wb = calamine::open_workbook_auto(path)?;
    let names = wb.sheet_names();
    let sheet_name = choose_sheet(&names, sheet)
        .ok_or_else(|| SheetError::NoSheets(path.display().to_string()))?;
    let range = wb.worksheet_range(&sheet_name)?;
    tracing::info!(sheet = %sheet_name, size = ?range.get_size(), "reading worksheet");

    // First row holds the column labels.
    Ok(range
        .rows()
        .skip(1)
        .map(|row| RecommendationRow::from_cells(row.iter().map(|d| Cell::from_text(cell_str(d)))))
        .collect())
}

pub fn inspect_workbook(path: &Path, sheet: &str, limit: usize) -> Result<SheetPreview, SheetError> {
    let mut wb = calamine::open_workbook_auto(path)?;
    let sheet_names = wb.sheet_names();
    let chosen = choose_sheet(&sheet_names, sheet)
        .ok_or_else(|| SheetError::NoSheets(path.display().to_string()))?;
    let range = wb.worksheet_range(&chosen)?;
    let (height, width) = range.get_size();
    let rows = range
        .rows()
        .take(limit)
        .map(|row| row.iter().map(cell_str).collect())
        .collect();
    Ok(SheetPreview {
        sheet_names,
        sheet: chosen,
        height,
        width,
        rows,
    })
}
