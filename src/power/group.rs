use serde::Serialize;

use super::score::{HeroScoreAccumulator, ScoreTable};
use crate::sheet::RecommendationRow;

/// Finished per-map result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapPower {
    #[serde(rename = "map")]
    pub name: String,
    pub rows: usize,
    pub scores: ScoreTable,
}

/// The open group: rows seen since the last true map change.
#[derive(Debug, Clone)]
pub(crate) struct MapGroup {
    name: String,
    rows: usize,
    scores: ScoreTable,
}

impl MapGroup {
    pub(crate) fn open(name: &str, scores: ScoreTable) -> Self {
        Self {
            name: name.to_string(),
            rows: 0,
            scores,
        }
    }

    pub(crate) fn rename(&mut self, name: &str) {
        if self.name != name {
            self.name = name.to_string();
        }
    }

    pub(crate) fn record(&mut self, row: &RecommendationRow, scorer: &HeroScoreAccumulator<'_>) {
        self.rows += 1;
        scorer.accumulate(row, &mut self.scores);
    }

    pub(crate) fn close(self) -> MapPower {
        MapPower {
            name: self.name,
            rows: self.rows,
            scores: self.scores,
        }
    }
}

/// Collects closed groups in the order they close.
#[derive(Debug, Default)]
pub(crate) struct GroupEmitter {
    emitted: Vec<MapPower>,
}

impl GroupEmitter {
    pub(crate) fn emit(&mut self, group: MapGroup) {
        let power = group.close();
        tracing::debug!(map = %power.name, rows = power.rows, "map group closed");
        self.emitted.push(power);
    }

    pub(crate) fn len(&self) -> usize {
        self.emitted.len()
    }

    pub(crate) fn into_inner(self) -> Vec<MapPower> {
        self.emitted
    }
}
