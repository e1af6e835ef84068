use super::{
    Catalog, CatalogParts, ClassificationDimensions, Exercise, ExerciseId, MuscleCategoryMap,
    PreferenceMap, SidePartition,
};
use crate::config::{ScoringConfig, ScoringWeights, SearchParams};
use crate::error::{LfResult, LiftForgeError};
use crate::templates::{DaySpec, TrainingTemplates};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub const EXERCISES_FILE: &str = "strength.json";
pub const CONFIG_FILE: &str = "config.json";
pub const CLASSIFICATION_DIR: &str = "classification";

type Buckets = BTreeMap<String, Vec<ExerciseId>>;

/// Loads the whole dataset directory into a catalog and its scoring config.
pub fn load_dataset<P: AsRef<Path>>(root: P) -> LfResult<(Catalog, ScoringConfig)> {
    let root = root.as_ref();
    info!("Loading dataset from {}", root.display());

    let exercises: Vec<Exercise> = read_file(&root.join(EXERCISES_FILE), load_exercises)?;
    let config = read_file(&root.join(CONFIG_FILE), load_config)?;

    let cls = root.join(CLASSIFICATION_DIR);
    let muscle_groups: MuscleCategoryMap = read_json(&cls.join("categoryMapping.json"))?;
    let preference_map: PreferenceMap = read_json(&cls.join("preferenceMapping.json"))?;
    let raw_templates: BTreeMap<String, Vec<DaySpec>> =
        read_json(&cls.join("trainingTemplates.json"))?;
    let templates = TrainingTemplates::from_raw(raw_templates)?;

    let classifications = ClassificationDimensions {
        target_size: read_partition(&cls.join("type1_isMajor.json"), "Major", "Minor")?,
        mechanic: read_partition(&cls.join("type2_isCompound.json"), "compound", "isolation")?,
        laterality: read_partition(&cls.join("type3_isSingle.json"), "bilateral", "single_sided")?,
        equipment: read_partition(&cls.join("type4_isMachine.json"), "equipment", "free")?,
        common: {
            let path = cls.join("type5_isCommon.json");
            let mut buckets: Buckets = read_json(&path)?;
            take_bucket(&mut buckets, "Common", &path)?.into_iter().collect()
        },
        families: read_json::<Buckets>(&cls.join("type6_movementFamily.json"))?
            .into_iter()
            .map(|(name, ids)| (name, ids.into_iter().collect::<BTreeSet<_>>()))
            .collect(),
    };

    info!("Loaded {} exercises", exercises.len());

    let catalog = CatalogParts::builder()
        .exercises(exercises)
        .muscle_groups(muscle_groups)
        .preference_map(preference_map)
        .classifications(classifications)
        .templates(templates)
        .build()
        .build_catalog()?;

    Ok((catalog, config))
}

pub fn load_exercises<R: Read>(reader: R) -> LfResult<Vec<Exercise>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parses the nested on-disk config layout into a `ScoringConfig`.
pub fn load_config<R: Read>(reader: R) -> LfResult<ScoringConfig> {
    let raw: ConfigFile = serde_json::from_reader(reader)?;
    Ok(raw.into())
}

fn read_file<T>(path: &Path, parse: impl FnOnce(BufReader<File>) -> LfResult<T>) -> LfResult<T> {
    debug!("Reading {}", path.display());
    let file = File::open(path).map_err(|e| data_error(path, e))?;
    parse(BufReader::new(file)).map_err(|e| data_error(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> LfResult<T> {
    read_file(path, |r| Ok(serde_json::from_reader(r)?))
}

fn read_partition(path: &Path, side_a: &str, side_b: &str) -> LfResult<SidePartition> {
    let mut buckets: Buckets = read_json(path)?;
    let a = take_bucket(&mut buckets, side_a, path)?;
    let b = take_bucket(&mut buckets, side_b, path)?;
    Ok(SidePartition::new(a, b))
}

fn take_bucket(buckets: &mut Buckets, key: &str, path: &Path) -> LfResult<Vec<ExerciseId>> {
    buckets.remove(key).ok_or_else(|| {
        LiftForgeError::Validation(format!(
            "{} is missing the '{}' bucket",
            path.display(),
            key
        ))
    })
}

fn data_error(path: &Path, reason: impl std::fmt::Display) -> LiftForgeError {
    LiftForgeError::DataFile {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

// --- on-disk config layout ---

#[derive(Deserialize)]
struct ConfigFile {
    scoring_weights: RawWeights,
    position_scores: RawPositionScores,
    diversity_rules: RawDiversity,
    algorithm_params: RawAlgorithm,
}

#[derive(Deserialize)]
struct BaseScore {
    base_score: f64,
}

#[derive(Deserialize)]
struct FlatScore {
    score: f64,
}

#[derive(Deserialize)]
struct ScoreTable {
    scores: Vec<f64>,
}

#[derive(Deserialize)]
struct RawWeights {
    primary_muscle: BaseScore,
    secondary_muscle: BaseScore,
    common_exercise_bonus: FlatScore,
}

#[derive(Deserialize)]
struct RawPositionScores {
    major_muscle: ScoreTable,
    minor_muscle: ScoreTable,
    compound: ScoreTable,
    isolation: ScoreTable,
    free_weight: ScoreTable,
    equipment: ScoreTable,
}

#[derive(Deserialize)]
struct RawDiversity {
    balance_threshold: usize,
    balance_penalty: f64,
    penalties: RawPenalties,
}

#[derive(Deserialize)]
struct RawPenalties {
    same_family: f64,
    weekly_repeat: f64,
    same_muscle_group: f64,
}

#[derive(Deserialize)]
struct RawAlgorithm {
    exercises_per_day: usize,
    exhaustive_threshold: Option<usize>,
    max_2opt_iterations: Option<usize>,
}

impl From<ConfigFile> for ScoringConfig {
    fn from(raw: ConfigFile) -> Self {
        let defaults = SearchParams::default();
        let pos = raw.position_scores;
        let div = raw.diversity_rules;

        ScoringConfig {
            search: SearchParams {
                exercises_per_day: raw.algorithm_params.exercises_per_day,
                exhaustive_threshold: raw
                    .algorithm_params
                    .exhaustive_threshold
                    .unwrap_or(defaults.exhaustive_threshold),
                max_2opt_iterations: raw
                    .algorithm_params
                    .max_2opt_iterations
                    .unwrap_or(defaults.max_2opt_iterations),
            },
            weights: ScoringWeights {
                primary_base_score: raw.scoring_weights.primary_muscle.base_score,
                secondary_base_score: raw.scoring_weights.secondary_muscle.base_score,
                common_bonus: raw.scoring_weights.common_exercise_bonus.score,
                major_muscle: pos.major_muscle.scores,
                minor_muscle: pos.minor_muscle.scores,
                compound: pos.compound.scores,
                isolation: pos.isolation.scores,
                free_weight: pos.free_weight.scores,
                equipment: pos.equipment.scores,
                balance_threshold: div.balance_threshold,
                balance_penalty: div.balance_penalty,
                penalty_same_family: div.penalties.same_family,
                penalty_weekly_repeat: div.penalties.weekly_repeat,
                penalty_same_muscle_group: div.penalties.same_muscle_group,
            },
        }
    }
}
