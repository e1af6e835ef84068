pub mod exhaustive;
pub mod greedy;
pub mod hybrid;
pub mod two_opt;

use crate::catalog::ExerciseId;
use crate::scorer::{DayState, Scorer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: ExerciseId,
    pub static_score: f64,
}

/// Eligible exercises of one day in ascending id order. This order is the
/// canonical tie-break order for every strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    pub fn new(mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by_key(|c| c.id);
        candidates.dedup_by_key(|c| c.id);
        Self { candidates }
    }

    /// Scores every id the catalog knows; unknown ids are skipped.
    pub fn from_ids<I>(scorer: &Scorer, ids: I) -> Self
    where
        I: IntoIterator<Item = ExerciseId>,
    {
        let candidates = ids
            .into_iter()
            .filter_map(|id| scorer.catalog.exercise(id))
            .map(|ex| Candidate {
                id: ex.id,
                static_score: scorer.static_score(ex),
            })
            .collect();
        Self::new(candidates)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn ids(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.candidates.iter().map(|c| c.id)
    }

    pub fn get(&self, id: ExerciseId) -> Option<&Candidate> {
        self.candidates
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|idx| &self.candidates[idx])
    }

    /// The first `n` candidates in canonical order.
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            candidates: self.candidates.iter().take(n).copied().collect(),
        }
    }
}

/// One filled slot. `position` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPick {
    pub id: ExerciseId,
    pub position: usize,
    pub static_score: f64,
    pub dynamic_score: f64,
}

impl ScoredPick {
    pub fn score(&self) -> f64 {
        self.static_score + self.dynamic_score
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub picks: Vec<ScoredPick>,
    /// Strategy that actually produced the picks.
    pub method: Strategy,
}

impl Selection {
    pub fn total_score(&self) -> f64 {
        self.picks.iter().map(ScoredPick::score).sum()
    }

    pub fn ids(&self) -> Vec<ExerciseId> {
        self.picks.iter().map(|p| p.id).collect()
    }
}

/// Everything a strategy needs to fill one day.
#[derive(Clone, Copy)]
pub struct DayContext<'a> {
    pub scorer: &'a Scorer,
    pub pool: &'a CandidatePool,
    pub weekly: &'a BTreeSet<ExerciseId>,
}

impl<'a> DayContext<'a> {
    pub fn new(scorer: &'a Scorer, pool: &'a CandidatePool, weekly: &'a BTreeSet<ExerciseId>) -> Self {
        Self {
            scorer,
            pool,
            weekly,
        }
    }

    fn static_score(&self, id: ExerciseId) -> f64 {
        self.pool.get(id).map_or(0.0, |c| c.static_score)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Greedy,
    Exhaustive,
    /// Greedy followed by 2-opt position swaps.
    TwoOpt,
    /// Exhaustive for small pools, otherwise greedy + 2-opt.
    #[default]
    Hybrid,
}

impl Strategy {
    pub fn select(self, ctx: &DayContext) -> Selection {
        match self {
            Strategy::Greedy => greedy::select(ctx),
            Strategy::Exhaustive => exhaustive::select(ctx),
            Strategy::TwoOpt => two_opt::improve(ctx, greedy::select(ctx)),
            Strategy::Hybrid => hybrid::select(ctx),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Greedy => "Greedy",
            Strategy::Exhaustive => "Exhaustive",
            Strategy::TwoOpt => "Greedy + 2-opt",
            Strategy::Hybrid => "Hybrid",
        }
    }
}

/// Scores an ordering from scratch, position by position.
pub fn rebuild(ctx: &DayContext, order: &[ExerciseId]) -> Vec<ScoredPick> {
    let mut day = DayState::with_capacity(order.len());
    order
        .iter()
        .enumerate()
        .map(|(position, &id)| {
            let dynamic_score = ctx.scorer.dynamic_score(id, position, &day, ctx.weekly);
            ctx.scorer.record(&mut day, id);
            ScoredPick {
                id,
                position,
                static_score: ctx.static_score(id),
                dynamic_score,
            }
        })
        .collect()
}

/// Score of each slot of an ordering.
pub fn position_scores(ctx: &DayContext, order: &[ExerciseId]) -> Vec<f64> {
    rebuild(ctx, order).iter().map(ScoredPick::score).collect()
}

/// Total of `rebuild(ctx, order)` without materialising the picks.
pub fn evaluate(ctx: &DayContext, order: &[ExerciseId]) -> f64 {
    let mut day = DayState::with_capacity(order.len());
    let mut total = 0.0;
    for (position, &id) in order.iter().enumerate() {
        let dynamic = ctx.scorer.dynamic_score(id, position, &day, ctx.weekly);
        total += ctx.static_score(id) + dynamic;
        ctx.scorer.record(&mut day, id);
    }
    total
}

/// Compares two totals, treating values within a relative 1e-9 of each
/// other as equal. Summing the same scores in a different order differs in
/// the last bits, and that noise must not decide between orderings.
pub fn compare_totals(a: f64, b: f64) -> Ordering {
    let tolerance = TOTAL_EPSILON * a.abs().max(b.abs()).max(1.0);
    if (a - b).abs() <= tolerance {
        Ordering::Equal
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

const TOTAL_EPSILON: f64 = 1e-9;
