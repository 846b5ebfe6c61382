//! Tracked hero template: which catalog heroes get a score column, and in what order.
//!
//! File format (JSON, or YAML by `.yaml`/`.yml` extension), either:
//!   `["dva", "doomfist", ...]`
//! or the zero-seeded score object the spreadsheet script used:
//!   `{"dva": 0, "doomfist": 0, ...}`  (key order is kept, values are ignored)

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::hero::{CatalogError, HeroCatalog};

/// Current roster, tanks then damage then support.
pub const DEFAULT_ROSTER: &[&str] = &[
    "dva",
    "doomfist",
    "hazard",
    "junker-queen",
    "mauga",
    "orisa",
    "ramattra",
    "reinhardt",
    "roadhog",
    "sigma",
    "winston",
    "wrecking-ball",
    "zarya",
    "ashe",
    "bastion",
    "cassidy",
    "echo",
    "freja",
    "genji",
    "hanzo",
    "junkrat",
    "mei",
    "pharah",
    "reaper",
    "sojourn",
    "soldier76",
    "sombra",
    "symmetra",
    "torbjorn",
    "tracer",
    "venture",
    "widowmaker",
    "ana",
    "baptiste",
    "brigitte",
    "illari",
    "juno",
    "kiriko",
    "lifeweaver",
    "lucio",
    "mercy",
    "moira",
    "zenyatta",
];

/// A template hero with its display name resolved through the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedHero {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroTemplate {
    ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    Ids(Vec<String>),
    Scores(serde_json::Map<String, serde_json::Value>),
}

impl HeroTemplate {
    pub fn default_roster() -> Self {
        Self::from_ids(DEFAULT_ROSTER.iter().copied())
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for id in ids {
            let id = id.into();
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        Self { ids: seen }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve every template id to its display name. Fails on the first id the
    /// catalog does not know.
    pub fn resolve(&self, catalog: &HeroCatalog) -> Result<Vec<TrackedHero>, CatalogError> {
        self.ids
            .iter()
            .map(|id| {
                let name = catalog.name_of(id)?;
                Ok(TrackedHero {
                    id: id.clone(),
                    name: name.to_string(),
                })
            })
            .collect()
    }
}

impl Default for HeroTemplate {
    fn default() -> Self {
        Self::default_roster()
    }
}

pub fn load_hero_template(path: impl AsRef<Path>) -> Result<HeroTemplate, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(CatalogError::Read)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed: TemplateFile = if is_yaml {
        serde_yaml::from_str(&raw).map_err(|err| CatalogError::Template(err.to_string()))?
    } else {
        serde_json::from_str(&raw).map_err(|err| CatalogError::Template(err.to_string()))?
    };

    let template = match parsed {
        TemplateFile::Ids(ids) => HeroTemplate::from_ids(ids),
        TemplateFile::Scores(scores) => HeroTemplate::from_ids(scores.into_iter().map(|(id, _)| id)),
    };
    if template.is_empty() {
        return Err(CatalogError::Template(format!(
            "'{}' lists no heroes",
            path.display()
        )));
    }
    Ok(template)
}
