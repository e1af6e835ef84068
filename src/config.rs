use crate::catalog::ExerciseId;
use crate::error::{LfResult, LiftForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

/// Documented range for user preference coefficients. Values outside it are
/// used as given.
pub const PREFERENCE_RANGE: RangeInclusive<f64> = 0.1..=10.0;

pub type ExclusionSet = BTreeSet<ExerciseId>;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScoringConfig {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 5)]
    pub exercises_per_day: usize,
    /// Pools at or below this size are searched exhaustively.
    #[arg(long, default_value_t = 10)]
    pub exhaustive_threshold: usize,
    #[arg(long, default_value_t = 100)]
    pub max_2opt_iterations: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            exercises_per_day: 5,
            exhaustive_threshold: 10,
            max_2opt_iterations: 100,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    // === STATIC ===
    #[arg(long, default_value_t = 10.0)]
    pub primary_base_score: f64,
    #[arg(long, default_value_t = 4.0)]
    pub secondary_base_score: f64,
    #[arg(long, default_value_t = 3.0)]
    pub common_bonus: f64,

    // === POSITION TABLES (index = 0-based position) ===
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [6.0, 5.0, 3.0, 1.0, 0.0])]
    pub major_muscle: Vec<f64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [0.0, 1.0, 3.0, 5.0, 6.0])]
    pub minor_muscle: Vec<f64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [5.0, 4.0, 2.0, 1.0, 0.0])]
    pub compound: Vec<f64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [0.0, 1.0, 2.0, 4.0, 5.0])]
    pub isolation: Vec<f64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [3.0, 3.0, 2.0, 1.0, 1.0])]
    pub free_weight: Vec<f64>,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [1.0, 1.0, 2.0, 3.0, 3.0])]
    pub equipment: Vec<f64>,

    // === DIVERSITY ===
    #[arg(long, default_value_t = 3)]
    pub balance_threshold: usize,
    #[arg(long, allow_negative_numbers = true, default_value_t = -4.0)]
    pub balance_penalty: f64,

    // === REPETITION ===
    #[arg(long, allow_negative_numbers = true, default_value_t = -8.0)]
    pub penalty_same_family: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = -6.0)]
    pub penalty_weekly_repeat: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = -2.0)]
    pub penalty_same_muscle_group: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            primary_base_score: 10.0,
            secondary_base_score: 4.0,
            common_bonus: 3.0,
            major_muscle: vec![6.0, 5.0, 3.0, 1.0, 0.0],
            minor_muscle: vec![0.0, 1.0, 3.0, 5.0, 6.0],
            compound: vec![5.0, 4.0, 2.0, 1.0, 0.0],
            isolation: vec![0.0, 1.0, 2.0, 4.0, 5.0],
            free_weight: vec![3.0, 3.0, 2.0, 1.0, 1.0],
            equipment: vec![1.0, 1.0, 2.0, 3.0, 3.0],
            balance_threshold: 3,
            balance_penalty: -4.0,
            penalty_same_family: -8.0,
            penalty_weekly_repeat: -6.0,
            penalty_same_muscle_group: -2.0,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> LfResult<()> {
        let k = self.search.exercises_per_day;
        if k == 0 {
            return Err(LiftForgeError::Config(
                "exercises_per_day must be at least 1".to_string(),
            ));
        }

        for (name, table) in self.weights.position_tables() {
            if table.len() < k {
                return Err(LiftForgeError::Config(format!(
                    "position table '{}' has {} entries but exercises_per_day is {}",
                    name,
                    table.len(),
                    k
                )));
            }
            if table.iter().any(|v| !v.is_finite()) {
                return Err(LiftForgeError::Config(format!(
                    "position table '{}' contains a non-finite value",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli: &ScoringConfig, matches: &ArgMatches) {
        self.search.merge_from_cli(&cli.search, matches);
        self.weights.merge_from_cli(&cli.weights, matches);
    }
}

impl SearchParams {
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }

        update_if_present!(exercises_per_day);
        update_if_present!(exhaustive_threshold);
        update_if_present!(max_2opt_iterations);
    }
}

impl ScoringWeights {
    pub fn position_tables(&self) -> [(&'static str, &[f64]); 6] {
        [
            ("major_muscle", self.major_muscle.as_slice()),
            ("minor_muscle", self.minor_muscle.as_slice()),
            ("compound", self.compound.as_slice()),
            ("isolation", self.isolation.as_slice()),
            ("free_weight", self.free_weight.as_slice()),
            ("equipment", self.equipment.as_slice()),
        ]
    }

    pub fn merge_from_cli(&mut self, cli: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(primary_base_score);
        update_if_present!(secondary_base_score);
        update_if_present!(common_bonus);

        update_if_present!(major_muscle);
        update_if_present!(minor_muscle);
        update_if_present!(compound);
        update_if_present!(isolation);
        update_if_present!(free_weight);
        update_if_present!(equipment);

        update_if_present!(balance_threshold);
        update_if_present!(balance_penalty);

        update_if_present!(penalty_same_family);
        update_if_present!(penalty_weekly_repeat);
        update_if_present!(penalty_same_muscle_group);
    }
}

/// Per-category multipliers applied to muscle credit in the static score.
/// Categories without an entry weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceCoefficients(BTreeMap<String, f64>);

impl PreferenceCoefficients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> f64 {
        self.0.get(category).copied().unwrap_or(1.0)
    }

    pub fn set(&mut self, category: impl Into<String>, coefficient: f64) {
        self.0.insert(category.into(), coefficient);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds coefficients from 1..=5 effort tiers.
    pub fn from_tiers<'a, I>(tiers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u8)>,
    {
        Self(
            tiers
                .into_iter()
                .map(|(category, tier)| (category.to_string(), tier_coefficient(tier)))
                .collect(),
        )
    }

    pub fn out_of_range(&self) -> Vec<(&str, f64)> {
        self.iter()
            .filter(|(_, v)| !PREFERENCE_RANGE.contains(v))
            .collect()
    }
}

impl FromIterator<(String, f64)> for PreferenceCoefficients {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn tier_coefficient(tier: u8) -> f64 {
    match tier {
        1 => 0.3,
        2 => 0.6,
        3 => 0.9,
        4 => 1.2,
        5 => 1.5,
        _ => 0.9,
    }
}

/// User-tunable inputs of one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    pub training_days: u8,
    pub preferences: PreferenceCoefficients,
    pub excluded: ExclusionSet,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            training_days: 5,
            preferences: PreferenceCoefficients::default(),
            excluded: ExclusionSet::new(),
        }
    }
}
