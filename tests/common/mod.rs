#![allow(dead_code)]

use liftforge::catalog::{
    Catalog, CatalogParts, ClassificationDimensions, Exercise, ExerciseId,
};
use liftforge::config::{PreferenceCoefficients, ScoringConfig};
use liftforge::scorer::{Scorer, ScorerBuildParams};
use liftforge::templates::{DaySpec, TrainingTemplates};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for small synthetic catalogs.
pub struct CatalogFixture {
    exercises: Vec<Exercise>,
    groups: BTreeMap<String, Vec<ExerciseId>>,
    preference_map: BTreeMap<String, Vec<String>>,
    dims: ClassificationDimensions,
    templates: TrainingTemplates,
    preferences: PreferenceCoefficients,
}

impl CatalogFixture {
    pub fn new() -> Self {
        Self {
            exercises: Vec::new(),
            groups: BTreeMap::new(),
            preference_map: BTreeMap::new(),
            dims: ClassificationDimensions::default(),
            templates: TrainingTemplates::standard(),
            preferences: PreferenceCoefficients::new(),
        }
    }

    pub fn exercise(mut self, id: ExerciseId, primary: &[&str], secondary: &[&str]) -> Self {
        self.exercises.push(Exercise {
            id,
            name: format!("Exercise {}", id),
            primary_muscles: strings(primary),
            secondary_muscles: strings(secondary),
        });
        self
    }

    /// An exercise whose static score is `10 * weight` under the default
    /// config: one private muscle whose category carries `weight`.
    pub fn weighted(mut self, id: ExerciseId, weight: f64) -> Self {
        let muscle = format!("m{}", id);
        let category = format!("c{}", id);
        self.preference_map
            .insert(category.clone(), vec![muscle.clone()]);
        self.preferences.set(category, weight);
        self.exercise(id, &[muscle.as_str()], &[])
    }

    pub fn group(mut self, label: &str, ids: &[ExerciseId]) -> Self {
        self.groups.insert(label.to_string(), ids.to_vec());
        self
    }

    pub fn preference_category(mut self, category: &str, muscles: &[&str]) -> Self {
        self.preference_map
            .insert(category.to_string(), strings(muscles));
        self
    }

    pub fn major(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.target_size.a.extend(ids);
        self
    }

    pub fn minor(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.target_size.b.extend(ids);
        self
    }

    pub fn compound(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.mechanic.a.extend(ids);
        self
    }

    pub fn isolation(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.mechanic.b.extend(ids);
        self
    }

    pub fn bilateral(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.laterality.a.extend(ids);
        self
    }

    pub fn single_sided(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.laterality.b.extend(ids);
        self
    }

    pub fn machine(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.equipment.a.extend(ids);
        self
    }

    pub fn free_weight(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.equipment.b.extend(ids);
        self
    }

    pub fn common(mut self, ids: &[ExerciseId]) -> Self {
        self.dims.common.extend(ids);
        self
    }

    pub fn family(mut self, name: &str, ids: &[ExerciseId]) -> Self {
        self.dims
            .families
            .insert(name.to_string(), ids.iter().copied().collect());
        self
    }

    pub fn template(mut self, days: u8, template: Vec<DaySpec>) -> Self {
        self.templates.insert(days, template);
        self
    }

    pub fn preferences(&self) -> PreferenceCoefficients {
        self.preferences.clone()
    }

    pub fn build(self) -> Arc<Catalog> {
        Arc::new(
            CatalogParts::builder()
                .exercises(self.exercises)
                .muscle_groups(self.groups)
                .preference_map(self.preference_map)
                .classifications(self.dims)
                .templates(self.templates)
                .build()
                .build_catalog()
                .expect("fixture catalog must be valid"),
        )
    }

    /// Catalog plus the preferences set through `weighted`.
    pub fn build_with_prefs(self) -> (Arc<Catalog>, PreferenceCoefficients) {
        let prefs = self.preferences();
        (self.build(), prefs)
    }
}

pub fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

pub fn day(labels: &[&str]) -> DaySpec {
    strings(labels)
}

/// Default weights with every position table zeroed and balance disabled,
/// so totals reduce to static scores plus repetition penalties.
pub fn flat_config(k: usize) -> ScoringConfig {
    let mut config = ScoringConfig::default();
    config.search.exercises_per_day = k;
    let zeros = vec![0.0; k.max(5)];
    let w = &mut config.weights;
    w.major_muscle = zeros.clone();
    w.minor_muscle = zeros.clone();
    w.compound = zeros.clone();
    w.isolation = zeros.clone();
    w.free_weight = zeros.clone();
    w.equipment = zeros;
    w.balance_penalty = 0.0;
    config
}

pub fn scorer(catalog: Arc<Catalog>, config: ScoringConfig, prefs: PreferenceCoefficients) -> Scorer {
    ScorerBuildParams::builder()
        .catalog(catalog)
        .config(config)
        .preferences(prefs)
        .build()
        .build_scorer()
        .expect("test config must be valid")
}

/// A 30-exercise catalog with every dimension, family and group populated
/// by id arithmetic. Exercises overlap groups and families on purpose.
pub fn synthetic_catalog() -> Arc<Catalog> {
    synthetic_fixture(30).build()
}

pub fn synthetic_fixture(n: u32) -> CatalogFixture {
    let muscles = ["pectorals", "lats", "deltoids", "quadriceps", "biceps", "triceps"];
    let labels = ["chest", "back", "shoulder", "legs", "arm"];

    let mut f = CatalogFixture::new();
    for id in 1..=n {
        let primary = muscles[id as usize % muscles.len()];
        let secondary = muscles[(id as usize * 7 + 1) % muscles.len()];
        f = f.exercise(id, &[primary], &[secondary]);
    }

    for (i, label) in labels.iter().enumerate() {
        let ids: Vec<ExerciseId> = (1..=n)
            .filter(|id| (*id as usize) % labels.len() == i || id % 7 == i as u32)
            .collect();
        f = f.group(label, &ids);
    }

    let evens: Vec<ExerciseId> = (1..=n).filter(|id| id % 2 == 0).collect();
    let odds: Vec<ExerciseId> = (1..=n).filter(|id| id % 2 == 1).collect();
    let thirds: Vec<ExerciseId> = (1..=n).filter(|id| id % 3 == 0).collect();
    let rest: Vec<ExerciseId> = (1..=n).filter(|id| id % 3 != 0).collect();

    f = f
        .major(&evens)
        .minor(&odds)
        .compound(&thirds)
        .isolation(&rest)
        .bilateral(&rest)
        .single_sided(&thirds)
        .machine(&odds)
        .free_weight(&evens)
        .common(&thirds);

    for fam in 0..4u32 {
        let ids: Vec<ExerciseId> = (1..=n).filter(|id| id % 4 == fam).collect();
        f = f.family(&format!("family_{}", fam), &ids);
    }

    f.preference_category("chest", &["pectorals"])
        .preference_category("back", &["lats"])
        .preference_category("shoulder", &["deltoids"])
        .preference_category("legs", &["quadriceps"])
        .preference_category("arm", &["biceps", "triceps"])
}

pub fn dataset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
