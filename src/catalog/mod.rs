pub mod loader;

use crate::error::{LfResult, LiftForgeError};
use crate::templates::TrainingTemplates;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use strum_macros::{Display, EnumCount, EnumIter};
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

pub type ExerciseId = u32;

/// Muscle-group label -> exercise ids that train it.
pub type MuscleCategoryMap = BTreeMap<String, Vec<ExerciseId>>;

/// Preference category -> fine-grained muscle names, as stored on disk.
pub type PreferenceMap = BTreeMap<String, Vec<String>>;

/// Label that selects the whole corpus for a day.
pub const ALL_MUSCLES: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "pk")]
    pub id: ExerciseId,
    pub name: String,
    #[serde(rename = "primaryMuscles", default)]
    pub primary_muscles: Vec<String>,
    #[serde(rename = "secondaryMuscles", default)]
    pub secondary_muscles: Vec<String>,
}

/// Binary classification axes.
///
/// | Dimension    | Side A     | Side B       |
/// |--------------|------------|--------------|
/// | `TargetSize` | major      | minor        |
/// | `Mechanic`   | compound   | isolation    |
/// | `Laterality` | bilateral  | single-sided |
/// | `Equipment`  | machine    | free weight  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    TargetSize,
    Mechanic,
    Laterality,
    Equipment,
}

impl Dimension {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn side_name(self, side: Side) -> &'static str {
        match (self, side) {
            (Dimension::TargetSize, Side::A) => "major",
            (Dimension::TargetSize, Side::B) => "minor",
            (Dimension::Mechanic, Side::A) => "compound",
            (Dimension::Mechanic, Side::B) => "isolation",
            (Dimension::Laterality, Side::A) => "bilateral",
            (Dimension::Laterality, Side::B) => "single-sided",
            (Dimension::Equipment, Side::A) => "machine",
            (Dimension::Equipment, Side::B) => "free weight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidePartition {
    pub a: BTreeSet<ExerciseId>,
    pub b: BTreeSet<ExerciseId>,
}

impl SidePartition {
    pub fn new<A, B>(a: A, b: B) -> Self
    where
        A: IntoIterator<Item = ExerciseId>,
        B: IntoIterator<Item = ExerciseId>,
    {
        Self {
            a: a.into_iter().collect(),
            b: b.into_iter().collect(),
        }
    }

    /// Side A wins when an id is listed on both sides.
    pub fn side_of(&self, id: ExerciseId) -> Option<Side> {
        if self.a.contains(&id) {
            Some(Side::A)
        } else if self.b.contains(&id) {
            Some(Side::B)
        } else {
            None
        }
    }

    fn ids(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.a.iter().chain(self.b.iter()).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationDimensions {
    pub target_size: SidePartition,
    pub mechanic: SidePartition,
    pub laterality: SidePartition,
    pub equipment: SidePartition,
    pub common: BTreeSet<ExerciseId>,
    pub families: BTreeMap<String, BTreeSet<ExerciseId>>,
}

impl ClassificationDimensions {
    pub fn partition(&self, dim: Dimension) -> &SidePartition {
        match dim {
            Dimension::TargetSize => &self.target_size,
            Dimension::Mechanic => &self.mechanic,
            Dimension::Laterality => &self.laterality,
            Dimension::Equipment => &self.equipment,
        }
    }

    fn referenced_ids(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.target_size
            .ids()
            .chain(self.mechanic.ids())
            .chain(self.laterality.ids())
            .chain(self.equipment.ids())
            .chain(self.common.iter().copied())
            .chain(self.families.values().flat_map(|ids| ids.iter().copied()))
    }
}

/// Everything the scorer needs to know about one exercise, resolved once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseProfile {
    sides: [Option<Side>; 4],
    pub common: bool,
    pub family: Option<usize>,
    /// Indices into `Catalog::muscle_groups()`, ascending.
    pub groups: Vec<usize>,
}

/// Profile of an id the catalog does not know: no sides, no family, no groups.
pub static EMPTY_PROFILE: ExerciseProfile = ExerciseProfile {
    sides: [None; 4],
    common: false,
    family: None,
    groups: Vec::new(),
};

impl ExerciseProfile {
    pub fn side(&self, dim: Dimension) -> Option<Side> {
        self.sides[dim.index()]
    }
}

#[derive(TypedBuilder)]
pub struct CatalogParts {
    pub exercises: Vec<Exercise>,
    #[builder(default)]
    pub muscle_groups: MuscleCategoryMap,
    #[builder(default)]
    pub preference_map: PreferenceMap,
    #[builder(default)]
    pub classifications: ClassificationDimensions,
    #[builder(default = TrainingTemplates::standard())]
    pub templates: TrainingTemplates,
}

impl CatalogParts {
    pub fn build_catalog(self) -> LfResult<Catalog> {
        let mut exercises = BTreeMap::new();
        for ex in self.exercises {
            let id = ex.id;
            if exercises.insert(id, ex).is_some() {
                return Err(LiftForgeError::Validation(format!(
                    "duplicate exercise id {} in corpus",
                    id
                )));
            }
        }

        let mut unresolved = BTreeSet::new();

        // Muscle groups (ascending label order is the group index order)
        let mut groups = Vec::with_capacity(self.muscle_groups.len());
        let mut group_members = Vec::with_capacity(self.muscle_groups.len());
        for (label, ids) in self.muscle_groups {
            let mut members = BTreeSet::new();
            for id in ids {
                if exercises.contains_key(&id) {
                    members.insert(id);
                } else {
                    unresolved.insert(id);
                }
            }
            groups.push(label);
            group_members.push(members);
        }

        // Invert category -> muscles. First category in label order wins.
        let mut muscle_categories = HashMap::new();
        for (category, muscles) in &self.preference_map {
            for muscle in muscles {
                muscle_categories
                    .entry(muscle.clone())
                    .or_insert_with(|| category.clone());
            }
        }

        let dims = self.classifications;
        unresolved.extend(dims.referenced_ids().filter(|id| !exercises.contains_key(id)));

        let families: Vec<String> = dims.families.keys().cloned().collect();

        let mut conflicts = 0usize;
        let mut profiles = HashMap::with_capacity(exercises.len());
        for &id in exercises.keys() {
            let mut profile = ExerciseProfile::default();
            for dim in [
                Dimension::TargetSize,
                Dimension::Mechanic,
                Dimension::Laterality,
                Dimension::Equipment,
            ] {
                let part = dims.partition(dim);
                if part.a.contains(&id) && part.b.contains(&id) {
                    conflicts += 1;
                }
                profile.sides[dim.index()] = part.side_of(id);
            }
            profile.common = dims.common.contains(&id);
            profile.family = dims
                .families
                .values()
                .position(|members| members.contains(&id));
            profile.groups = group_members
                .iter()
                .enumerate()
                .filter(|(_, members)| members.contains(&id))
                .map(|(idx, _)| idx)
                .collect();
            profiles.insert(id, profile);
        }

        if !unresolved.is_empty() {
            warn!(
                "Ignoring {} exercise ids referenced by reference tables but missing from the corpus",
                unresolved.len()
            );
            debug!("Unresolved ids: {:?}", unresolved);
        }
        if conflicts > 0 {
            warn!(
                "{} classification entries list an exercise on both sides; side A is used",
                conflicts
            );
        }

        Ok(Catalog {
            exercises,
            groups,
            group_members,
            muscle_categories,
            families,
            profiles,
            templates: self.templates,
        })
    }
}

/// Read-only reference data shared by every planning run.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: BTreeMap<ExerciseId, Exercise>,
    groups: Vec<String>,
    group_members: Vec<BTreeSet<ExerciseId>>,
    muscle_categories: HashMap<String, String>,
    families: Vec<String>,
    profiles: HashMap<ExerciseId, ExerciseProfile>,
    templates: TrainingTemplates,
}

impl Catalog {
    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.get(&id)
    }

    /// All exercises in ascending id order.
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.exercises.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn muscle_groups(&self) -> &[String] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn members(&self, label: &str) -> Option<&BTreeSet<ExerciseId>> {
        self.groups
            .binary_search_by(|g| g.as_str().cmp(label))
            .ok()
            .map(|idx| &self.group_members[idx])
    }

    pub fn profile(&self, id: ExerciseId) -> Option<&ExerciseProfile> {
        self.profiles.get(&id)
    }

    pub fn muscle_category(&self, muscle: &str) -> Option<&str> {
        self.muscle_categories.get(muscle).map(String::as_str)
    }

    pub fn family_name(&self, index: usize) -> Option<&str> {
        self.families.get(index).map(String::as_str)
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub fn templates(&self) -> &TrainingTemplates {
        &self.templates
    }
}
