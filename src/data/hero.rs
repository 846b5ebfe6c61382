//! Hero catalog: id ↔ display-name lookup loaded from `data/heroes.json`.
//!
//! Both lookup directions are strict. A miss is a [CatalogError] naming the key,
//! never a default value: the catalog is treated as authoritative input.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HEROES_PATH: &str = "data/heroes.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug)]
pub enum CatalogError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Template(String),
    DuplicateId(String),
    DuplicateName(String),
    UnknownHeroId(String),
    UnknownHeroName(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read hero catalog: {err}"),
            Self::Parse(err) => write!(f, "failed to parse hero catalog JSON: {err}"),
            Self::Template(msg) => write!(f, "invalid hero template: {msg}"),
            Self::DuplicateId(id) => write!(f, "duplicate hero id in catalog: '{id}'"),
            Self::DuplicateName(name) => write!(f, "duplicate hero name in catalog: '{name}'"),
            Self::UnknownHeroId(id) => write!(f, "no hero with id '{id}'"),
            Self::UnknownHeroName(name) => write!(f, "no hero named '{name}'"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HeroesFile {
    heroes: Vec<HeroRecord>,
}

/// Ordered, immutable hero set with unique ids and unique names.
#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    records: Vec<HeroRecord>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl HeroCatalog {
    pub fn from_records(records: Vec<HeroRecord>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
            if by_name.insert(record.name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateName(record.name.clone()));
            }
        }
        Ok(Self {
            records,
            by_id,
            by_name,
        })
    }

    pub fn id_of(&self, name: &str) -> Result<&str, CatalogError> {
        self.by_name
            .get(name)
            .map(|&index| self.records[index].id.as_str())
            .ok_or_else(|| CatalogError::UnknownHeroName(name.to_string()))
    }

    pub fn name_of(&self, id: &str) -> Result<&str, CatalogError> {
        self.get(id)
            .map(|record| record.name.as_str())
            .ok_or_else(|| CatalogError::UnknownHeroId(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&HeroRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeroRecord> {
        self.records.iter()
    }
}

pub fn load_hero_catalog(path: impl AsRef<Path>) -> Result<HeroCatalog, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(CatalogError::Read)?;
    let parsed: HeroesFile = serde_json::from_str(&raw).map_err(CatalogError::Parse)?;
    tracing::debug!(
        path = %path.display(),
        heroes = parsed.heroes.len(),
        "loaded hero catalog"
    );
    HeroCatalog::from_records(parsed.heroes)
}
