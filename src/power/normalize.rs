use crate::sheet::{Cell, RecommendationRow};

/// Map-name cell of the label row repeated inside the sheet body.
pub const HEADER_TOKEN: &str = "地图名称";

pub fn is_header_row(row: &RecommendationRow) -> bool {
    row.map.as_text() == Some(HEADER_TOKEN)
}

/// Map name a row belongs to: its own cell when filled, otherwise the name carried
/// from the previous row (merged cells only fill the first row of their span).
pub fn effective_map<'a>(previous: &'a str, raw: &'a Cell) -> &'a str {
    raw.as_text().unwrap_or(previous)
}
