pub mod builder;
pub mod state;
pub mod types;

pub use self::builder::ScorerBuildParams;
pub use self::state::DayState;
pub use self::types::DynamicBreakdown;

use crate::catalog::{Catalog, Dimension, Exercise, ExerciseId, ExerciseProfile, Side, EMPTY_PROFILE};
use crate::config::{PreferenceCoefficients, ScoringConfig};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Dimensions that carry a position table (side A table, side B table).
pub const POSITION_DIMENSIONS: [Dimension; 3] =
    [Dimension::TargetSize, Dimension::Mechanic, Dimension::Equipment];

/// Dimensions checked for one side crowding out the other within a day.
pub const BALANCE_DIMENSIONS: [Dimension; 3] =
    [Dimension::Laterality, Dimension::Mechanic, Dimension::Equipment];

pub struct Scorer {
    pub catalog: Arc<Catalog>,
    pub config: ScoringConfig,
    pub preferences: PreferenceCoefficients,
}

impl Scorer {
    pub fn exercises_per_day(&self) -> usize {
        self.config.search.exercises_per_day
    }

    pub fn profile(&self, id: ExerciseId) -> &ExerciseProfile {
        self.catalog.profile(id).unwrap_or(&EMPTY_PROFILE)
    }

    /// Preference multiplier of a fine-grained muscle via its category.
    pub fn preference(&self, muscle: &str) -> f64 {
        self.catalog
            .muscle_category(muscle)
            .map_or(1.0, |category| self.preferences.get(category))
    }

    /// Position-independent score: shared muscle credit plus the common bonus.
    pub fn static_score(&self, exercise: &Exercise) -> f64 {
        let w = &self.config.weights;
        let mut score = self.shared_credit(&exercise.primary_muscles, w.primary_base_score);
        score += self.shared_credit(&exercise.secondary_muscles, w.secondary_base_score);
        if self.profile(exercise.id).common {
            score += w.common_bonus;
        }
        score
    }

    fn shared_credit(&self, muscles: &[String], base: f64) -> f64 {
        if muscles.is_empty() {
            return 0.0;
        }
        let per_muscle = base / muscles.len() as f64;
        muscles
            .iter()
            .map(|m| per_muscle * self.preference(m))
            .sum()
    }

    pub fn dynamic_score(
        &self,
        id: ExerciseId,
        position: usize,
        day: &DayState,
        weekly: &BTreeSet<ExerciseId>,
    ) -> f64 {
        self.dynamic_breakdown(id, position, day, weekly).total()
    }

    pub fn dynamic_breakdown(
        &self,
        id: ExerciseId,
        position: usize,
        day: &DayState,
        weekly: &BTreeSet<ExerciseId>,
    ) -> DynamicBreakdown {
        let w = &self.config.weights;
        let profile = self.profile(id);
        let mut out = DynamicBreakdown::default();

        // 1. Position tables
        for dim in POSITION_DIMENSIONS {
            let table = match (dim, profile.side(dim)) {
                (_, None) => continue,
                (Dimension::TargetSize, Some(Side::A)) => &w.major_muscle,
                (Dimension::TargetSize, Some(Side::B)) => &w.minor_muscle,
                (Dimension::Mechanic, Some(Side::A)) => &w.compound,
                (Dimension::Mechanic, Some(Side::B)) => &w.isolation,
                (Dimension::Equipment, Some(Side::A)) => &w.equipment,
                (Dimension::Equipment, Some(Side::B)) => &w.free_weight,
                (Dimension::Laterality, _) => continue,
            };
            out.position += table.get(position).copied().unwrap_or(0.0);
        }

        // 2. Diversity balance
        let so_far = day.len();
        for dim in BALANCE_DIMENSIONS {
            let count_a = day.side_a_count(dim);
            let crowded = match profile.side(dim) {
                Some(Side::A) => count_a >= w.balance_threshold,
                Some(Side::B) => so_far - count_a >= w.balance_threshold,
                None => false,
            };
            if crowded {
                out.balance += w.balance_penalty;
            }
        }

        // 3. Repetition
        if profile.family.is_some_and(|f| day.has_family(f)) {
            out.family = w.penalty_same_family;
        }
        if weekly.contains(&id) {
            out.weekly = w.penalty_weekly_repeat;
        }
        let overlap = profile
            .groups
            .iter()
            .filter(|&&g| day.has_group(g))
            .count();
        out.overlap = w.penalty_same_muscle_group * overlap as f64;

        out
    }

    /// Appends `id` to the day's running state.
    pub fn record(&self, day: &mut DayState, id: ExerciseId) {
        day.push(id, self.profile(id));
    }
}
