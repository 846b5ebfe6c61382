//! Rendering of aggregated map power.
//!
//! `text` is the console layout `<map> : \n {...}` with the score object pretty-printed
//! at a 4-space indent. `maps` produces the `data/maps.json` shape read by the
//! recommendation web app, which selects maps by `id`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::data::template::TrackedHero;
use crate::power::{MapPower, ScoreTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Maps,
    Table,
    Csv,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Maps => "maps",
            Self::Table => "table",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "maps" => Ok(Self::Maps),
            "table" | "tsv" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            _ => Err(ReportError::UnknownFormat(raw.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ReportError {
    UnknownFormat(String),
    Json(serde_json::Error),
    Csv(csv::Error),
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(raw) => write!(
                f,
                "unknown report format '{raw}' (expected text, json, maps, table or csv)"
            ),
            Self::Json(err) => write!(f, "failed to serialize report: {err}"),
            Self::Csv(err) => write!(f, "failed to write CSV report: {err}"),
            Self::Utf8(err) => write!(f, "report is not valid UTF-8: {err}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Provenance stamped into the `maps` document.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub source: Option<String>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Serialize)]
struct MapsDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_updated: Option<&'a str>,
    maps: Vec<MapEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapEntry<'a> {
    id: String,
    name: &'a str,
    suitable_heroes: &'a ScoreTable,
}

pub fn render(
    maps: &[MapPower],
    heroes: &[TrackedHero],
    format: ReportFormat,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => render_text(maps),
        ReportFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(maps)?)),
        ReportFormat::Maps => render_maps(maps, options),
        ReportFormat::Table => Ok(render_table(maps, heroes)),
        ReportFormat::Csv => render_csv(maps, heroes),
    }
}

fn pretty_json_4<T: Serialize>(value: &T) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(ReportError::Utf8)
}

fn render_text(maps: &[MapPower]) -> Result<String, ReportError> {
    let mut out = String::new();
    for map in maps {
        out.push_str(&map.name);
        out.push_str(" : \n ");
        out.push_str(&pretty_json_4(&map.scores)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_maps(maps: &[MapPower], options: &ReportOptions) -> Result<String, ReportError> {
    let doc = MapsDocument {
        source: options.source.as_deref(),
        last_updated: options.last_updated.as_deref(),
        maps: maps
            .iter()
            .zip(map_ids(maps))
            .map(|(map, id)| MapEntry {
                id,
                name: &map.name,
                suitable_heroes: &map.scores,
            })
            .collect(),
    };
    Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
}

/// Lowercase alphanumerics of the map name, other runs collapsed to `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "map".to_string()
    } else {
        slug.to_string()
    }
}

/// One id per map, in map order. Repeated slugs get `-2`, `-3`, ... appended.
fn map_ids(maps: &[MapPower]) -> Vec<String> {
    let mut taken = HashSet::new();
    maps.iter()
        .map(|map| {
            let base = slugify(&map.name);
            let mut id = base.clone();
            let mut n = 1;
            while !taken.insert(id.clone()) {
                n += 1;
                id = format!("{base}-{n}");
            }
            id
        })
        .collect()
}

fn render_table(maps: &[MapPower], heroes: &[TrackedHero]) -> String {
    let mut out = String::from("map");
    for hero in heroes {
        out.push('\t');
        out.push_str(&hero.id);
    }
    out.push('\n');
    for map in maps {
        out.push_str(&map.name);
        for hero in heroes {
            out.push('\t');
            out.push_str(&map.scores.get(&hero.id).unwrap_or_default().to_string());
        }
        out.push('\n');
    }
    out
}

fn render_csv(maps: &[MapPower], heroes: &[TrackedHero]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["map", "hero_id", "hero_name", "score"])?;
    for map in maps {
        for hero in heroes {
            let score = map.scores.get(&hero.id).unwrap_or_default().to_string();
            writer.write_record([map.name.as_str(), hero.id.as_str(), hero.name.as_str(), score.as_str()])?;
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Csv(err.into_error().into()))?;
    String::from_utf8(bytes).map_err(ReportError::Utf8)
}
