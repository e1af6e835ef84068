use crate::catalog::{ExerciseId, ALL_MUSCLES};
use crate::config::ExclusionSet;
use crate::scorer::{DayState, DynamicBreakdown, Scorer};
use crate::selector::{CandidatePool, DayContext, ScoredPick, Selection, Strategy};
use crate::templates::{day_type, DaySpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Rounds to 2 decimals. Only applied when building plan output.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedExercise {
    pub id: ExerciseId,
    pub name: String,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    /// 1-based.
    pub position: usize,
    pub static_score: f64,
    pub dynamic_score: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based.
    pub day: usize,
    pub label: String,
    pub day_type: String,
    pub muscle_groups: Vec<String>,
    pub method: Option<Strategy>,
    pub pool_size: usize,
    pub exercises: Vec<SelectedExercise>,
    pub total_score: f64,
}

impl DayPlan {
    pub fn rest(day: usize) -> Self {
        Self {
            day,
            label: format!("Day {}", day),
            day_type: day_type(&[]),
            muscle_groups: Vec::new(),
            method: None,
            pool_size: 0,
            exercises: Vec::new(),
            total_score: 0.0,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.muscle_groups.is_empty()
    }

    pub fn ids(&self) -> Vec<ExerciseId> {
        self.exercises.iter().map(|e| e.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub training_days: u8,
    pub strategy: Strategy,
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    pub fn total_score(&self) -> f64 {
        round2(self.days.iter().map(|d| d.total_score).sum())
    }

    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    pub fn rest_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_rest()).count()
    }
}

/// Runs one strategy over a week of day specs, threading the weekly ids
/// from each day into the next.
pub struct Planner<'a> {
    scorer: &'a Scorer,
    strategy: Strategy,
}

impl<'a> Planner<'a> {
    pub fn new(scorer: &'a Scorer, strategy: Strategy) -> Self {
        Self { scorer, strategy }
    }

    /// Union of the labels' members, or the whole corpus when the union is
    /// empty or the day is `["all"]`. Excluded ids are removed afterwards.
    pub fn candidate_pool(&self, labels: &[String], excluded: &ExclusionSet) -> CandidatePool {
        let catalog = &self.scorer.catalog;
        let mut ids: BTreeSet<ExerciseId> = labels
            .iter()
            .filter_map(|label| catalog.members(label))
            .flatten()
            .copied()
            .collect();

        let all_requested = matches!(labels, [only] if only == ALL_MUSCLES);
        if ids.is_empty() || all_requested {
            ids = catalog.ids().collect();
        }
        ids.retain(|id| !excluded.contains(id));

        CandidatePool::from_ids(self.scorer, ids)
    }

    pub fn generate(
        &self,
        training_days: u8,
        template: &[DaySpec],
        excluded: &ExclusionSet,
    ) -> WeeklyPlan {
        let mut weekly = BTreeSet::new();
        let mut days = Vec::with_capacity(template.len());

        for (idx, labels) in template.iter().enumerate() {
            let day = idx + 1;
            if labels.is_empty() {
                debug!("Day {}: rest", day);
                days.push(DayPlan::rest(day));
                continue;
            }

            let pool = self.candidate_pool(labels, excluded);
            let selection = self.strategy.select(&DayContext::new(self.scorer, &pool, &weekly));
            debug!(
                "Day {}: pool {} via {} -> {:.2}",
                day,
                pool.len(),
                selection.method,
                selection.total_score()
            );

            weekly.extend(selection.picks.iter().map(|p| p.id));
            days.push(self.day_plan(day, labels, pool.len(), &selection));
        }

        WeeklyPlan {
            training_days,
            strategy: self.strategy,
            days,
        }
    }

    /// Replays a plan's orderings and returns each pick's dynamic breakdown,
    /// day by day.
    pub fn explain(&self, plan: &WeeklyPlan) -> Vec<Vec<DynamicBreakdown>> {
        let mut weekly = BTreeSet::new();
        plan.days
            .iter()
            .map(|day_plan| {
                let mut day = DayState::with_capacity(day_plan.exercises.len());
                let parts: Vec<DynamicBreakdown> = day_plan
                    .exercises
                    .iter()
                    .enumerate()
                    .map(|(position, ex)| {
                        let b = self.scorer.dynamic_breakdown(ex.id, position, &day, &weekly);
                        self.scorer.record(&mut day, ex.id);
                        b
                    })
                    .collect();
                weekly.extend(day_plan.ids());
                parts
            })
            .collect()
    }

    fn day_plan(&self, day: usize, labels: &[String], pool_size: usize, selection: &Selection) -> DayPlan {
        DayPlan {
            day,
            label: format!("Day {}", day),
            day_type: day_type(labels),
            muscle_groups: labels.to_vec(),
            method: Some(selection.method),
            pool_size,
            exercises: selection
                .picks
                .iter()
                .map(|p| self.selected_exercise(p))
                .collect(),
            total_score: round2(selection.total_score()),
        }
    }

    fn selected_exercise(&self, pick: &ScoredPick) -> SelectedExercise {
        let (name, primary_muscles, secondary_muscles) = match self.scorer.catalog.exercise(pick.id) {
            Some(ex) => (
                ex.name.clone(),
                ex.primary_muscles.clone(),
                ex.secondary_muscles.clone(),
            ),
            None => (format!("#{}", pick.id), Vec::new(), Vec::new()),
        };

        SelectedExercise {
            id: pick.id,
            name,
            primary_muscles,
            secondary_muscles,
            position: pick.position + 1,
            static_score: round2(pick.static_score),
            dynamic_score: round2(pick.dynamic_score),
            score: round2(pick.score()),
        }
    }
}
