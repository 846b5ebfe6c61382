use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::data::template::TrackedHero;
use crate::sheet::RecommendationRow;

/// Score change for a hero mentioned in each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub recommended: i32,
    pub situational: i32,
    pub banned: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            recommended: 10,
            situational: 1,
            banned: -10,
        }
    }
}

/// Hero id -> score, one entry per tracked hero in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    entries: Vec<(String, i32)>,
}

impl ScoreTable {
    pub fn zeroed(heroes: &[TrackedHero]) -> Self {
        Self {
            entries: heroes.iter().map(|hero| (hero.id.clone(), 0)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(hero_id, _)| hero_id == id)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(id, score)| (id.as_str(), *score))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_at(&mut self, index: usize, delta: i32) {
        self.entries[index].1 += delta;
    }
}

impl Serialize for ScoreTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, score) in &self.entries {
            map.serialize_entry(id, score)?;
        }
        map.end()
    }
}

/// Scores rows by plain substring search of each tracked hero's display name.
///
/// Matching is case-sensitive with no word boundaries: a name contained in
/// another hero's name (or in any other word) counts as a mention.
#[derive(Debug, Clone)]
pub struct HeroScoreAccumulator<'a> {
    heroes: &'a [TrackedHero],
    weights: ScoreWeights,
}

impl<'a> HeroScoreAccumulator<'a> {
    pub fn new(heroes: &'a [TrackedHero], weights: ScoreWeights) -> Self {
        Self { heroes, weights }
    }

    pub fn zeroed(&self) -> ScoreTable {
        ScoreTable::zeroed(self.heroes)
    }

    /// Apply one row to `table`. `table` must come from [Self::zeroed].
    pub fn accumulate(&self, row: &RecommendationRow, table: &mut ScoreTable) {
        let columns = [
            (row.recommended.as_text(), self.weights.recommended),
            (row.situational.as_text(), self.weights.situational),
            (row.banned.as_text(), self.weights.banned),
        ];
        for (index, hero) in self.heroes.iter().enumerate() {
            for (text, weight) in columns {
                if text.map_or(false, |text| text.contains(hero.name.as_str())) {
                    table.add_at(index, weight);
                }
            }
        }
    }
}
