//! Per-map hero power: one forward pass over recommendation rows.
//!
//! Rows are normalized (header skipped, blank map cells carry the previous name),
//! segmented into map groups, and each group's rows are scored into a table seeded
//! with every tracked hero at zero. A group is emitted when a map with no common
//! prefix starts, and the last group is flushed at end of input.

mod group;
pub mod normalize;
pub mod score;
pub mod segment;

use group::{GroupEmitter, MapGroup};
pub use group::MapPower;
pub use normalize::{effective_map, is_header_row, HEADER_TOKEN};
pub use score::{HeroScoreAccumulator, ScoreTable, ScoreWeights};
pub use segment::{common_prefix, MapSegmenter, Transition};

use crate::data::hero::{CatalogError, HeroCatalog};
use crate::data::template::{HeroTemplate, TrackedHero};
use crate::sheet::RecommendationRow;

/// Incremental aggregation state. Feed rows with [PowerAggregator::push] in sheet
/// order, then call [PowerAggregator::finish].
#[derive(Debug)]
pub struct PowerAggregator<'a> {
    scorer: HeroScoreAccumulator<'a>,
    segmenter: MapSegmenter,
    carried: String,
    open: Option<MapGroup>,
    emitter: GroupEmitter,
    header_rows: usize,
}

impl<'a> PowerAggregator<'a> {
    pub fn new(heroes: &'a [TrackedHero], weights: ScoreWeights) -> Self {
        Self {
            scorer: HeroScoreAccumulator::new(heroes, weights),
            segmenter: MapSegmenter::new(),
            carried: String::new(),
            open: None,
            emitter: GroupEmitter::default(),
            header_rows: 0,
        }
    }

    pub fn push(&mut self, row: &RecommendationRow) {
        if is_header_row(row) {
            self.header_rows += 1;
            return;
        }

        let cur_map = effective_map(&self.carried, &row.map).to_string();
        match self.segmenter.observe(&cur_map) {
            Transition::Split { closed } => {
                if let Some(group) = self.open.take() {
                    self.emitter.emit(group);
                }
                tracing::debug!(closed = %closed, opened = %cur_map, "map changed");
            }
            Transition::Merge { name } => {
                tracing::debug!(merged = %cur_map, into = %name, "map names share a prefix");
            }
            Transition::First | Transition::Same => {}
        }
        self.carried = self.segmenter.last_map().to_string();

        let scorer = &self.scorer;
        let group = self
            .open
            .get_or_insert_with(|| MapGroup::open(&self.carried, scorer.zeroed()));
        group.rename(&self.carried);
        group.record(row, scorer);
    }

    /// Number of header rows skipped so far.
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// Flush the open group and return all groups in the order they closed.
    pub fn finish(mut self) -> Vec<MapPower> {
        if let Some(group) = self.open.take() {
            self.emitter.emit(group);
        }
        tracing::info!(
            maps = self.emitter.len(),
            header_rows = self.header_rows,
            "aggregated map power"
        );
        self.emitter.into_inner()
    }
}

/// Aggregate rows for already-resolved heroes.
pub fn aggregate_rows<'r>(
    rows: impl IntoIterator<Item = &'r RecommendationRow>,
    heroes: &[TrackedHero],
    weights: ScoreWeights,
) -> Vec<MapPower> {
    let mut aggregator = PowerAggregator::new(heroes, weights);
    for row in rows {
        aggregator.push(row);
    }
    aggregator.finish()
}

/// Resolve `template` against `catalog`, then aggregate. Any template id missing
/// from the catalog fails the whole run before a row is scored.
pub fn aggregate_map_power(
    rows: &[RecommendationRow],
    catalog: &HeroCatalog,
    template: &HeroTemplate,
    weights: ScoreWeights,
) -> Result<Vec<MapPower>, CatalogError> {
    let heroes = template.resolve(catalog)?;
    Ok(aggregate_rows(rows, &heroes, weights))
}
