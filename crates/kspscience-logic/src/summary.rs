//! Opportunity counts grouped by body, experiment and situation.

use indexmap::IndexMap;
use serde::Serialize;

use crate::opportunity::Opportunity;
use crate::situation::Situation;

/// Breakdown of a generated opportunity list.
///
/// Bodies and experiments appear in first-seen order, which is catalog order
/// for generator output. Situations always list all six, zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary<'a> {
    pub total: usize,
    pub by_body: IndexMap<&'a str, usize>,
    pub by_experiment: IndexMap<&'a str, usize>,
    pub by_situation: IndexMap<Situation, usize>,
    /// Opportunities that fire once regardless of biome.
    pub global: usize,
}

pub fn summarize<'a>(opportunities: &[Opportunity<'a>]) -> Summary<'a> {
    let mut summary = Summary {
        total: opportunities.len(),
        by_body: IndexMap::new(),
        by_experiment: IndexMap::new(),
        by_situation: Situation::ALL.iter().map(|&s| (s, 0)).collect(),
        global: 0,
    };

    for op in opportunities {
        *summary.by_body.entry(op.body).or_insert(0) += 1;
        *summary.by_experiment.entry(op.experiment).or_insert(0) += 1;
        *summary.by_situation.entry(op.situation).or_insert(0) += 1;
        if op.is_global() {
            summary.global += 1;
        }
    }

    summary
}
