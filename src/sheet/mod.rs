//! Recommendation sheet input: a flat stream of `[map, recommended, situational, banned]` rows.
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`) are read through calamine, `.csv` through the
//! csv crate. In both cases the first physical row is taken as column labels and dropped.

mod csv_rows;
mod workbook;

use std::fmt;
use std::path::Path;

pub use csv_rows::read_csv_rows;
pub use workbook::{inspect_workbook, read_workbook_rows, SheetPreview};

pub const DEFAULT_SHEET_NAME: &str = "Sheet2";

/// Width of a recommendation row; columns past this are ignored.
pub const ROW_WIDTH: usize = 4;

/// One spreadsheet cell. Empty cells and the `nan` placeholder written by
/// dataframe exports are [Cell::Missing]; any other text, whitespace included,
/// is a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    Text(String),
    #[default]
    Missing,
}

impl Cell {
    pub fn from_text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() || raw == "nan" {
            Self::Missing
        } else {
            Self::Text(raw)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Self::from_text(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationRow {
    pub map: Cell,
    pub recommended: Cell,
    pub situational: Cell,
    pub banned: Cell,
}

impl RecommendationRow {
    pub fn new(
        map: impl Into<Cell>,
        recommended: impl Into<Cell>,
        situational: impl Into<Cell>,
        banned: impl Into<Cell>,
    ) -> Self {
        Self {
            map: map.into(),
            recommended: recommended.into(),
            situational: situational.into(),
            banned: banned.into(),
        }
    }

    /// Build a row from however many cells the source produced: short rows are
    /// padded with [Cell::Missing], extra cells dropped.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut cells = cells.into_iter().take(ROW_WIDTH);
        Self {
            map: cells.next().unwrap_or_default(),
            recommended: cells.next().unwrap_or_default(),
            situational: cells.next().unwrap_or_default(),
            banned: cells.next().unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
pub enum SheetError {
    NotFound(String),
    UnsupportedFormat(String),
    Workbook(calamine::Error),
    NoSheets(String),
    Csv(csv::Error),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "sheet file not found: {path}"),
            Self::UnsupportedFormat(path) => write!(
                f,
                "unsupported sheet format '{path}' (expected .xlsx, .xlsm, .xls, .ods or .csv)"
            ),
            Self::Workbook(err) => write!(f, "failed to read workbook: {err}"),
            Self::NoSheets(path) => write!(f, "workbook has no sheets: {path}"),
            Self::Csv(err) => write!(f, "failed to read CSV: {err}"),
        }
    }
}

impl std::error::Error for SheetError {}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err)
    }
}

impl From<csv::Error> for SheetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Read recommendation rows from `path`, choosing the reader by extension.
/// `sheet` only applies to workbooks.
pub fn read_rows(path: impl AsRef<Path>, sheet: &str) -> Result<Vec<RecommendationRow>, SheetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SheetError::NotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook_rows(path, sheet)?,
        "csv" => read_csv_rows(path)?,
        _ => return Err(SheetError::UnsupportedFormat(path.display().to_string())),
    };
    tracing::info!(path = %path.display(), rows = rows.len(), "read recommendation rows");
    Ok(rows)
}
