use crate::catalog::{Dimension, ExerciseId, ExerciseProfile, Side};
use std::collections::BTreeSet;

/// Transient selection state of one day, rebuilt for every ordering evaluated.
#[derive(Debug, Clone, Default)]
pub struct DayState {
    picks: Vec<ExerciseId>,
    families: BTreeSet<usize>,
    side_a: [usize; 4],
    groups: BTreeSet<usize>,
}

impl DayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(k: usize) -> Self {
        Self {
            picks: Vec::with_capacity(k),
            ..Self::default()
        }
    }

    pub fn push(&mut self, id: ExerciseId, profile: &ExerciseProfile) {
        self.picks.push(id);
        if let Some(f) = profile.family {
            self.families.insert(f);
        }
        for dim in [
            Dimension::TargetSize,
            Dimension::Mechanic,
            Dimension::Laterality,
            Dimension::Equipment,
        ] {
            if profile.side(dim) == Some(Side::A) {
                self.side_a[dim.index()] += 1;
            }
        }
        self.groups.extend(profile.groups.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn contains(&self, id: ExerciseId) -> bool {
        self.picks.contains(&id)
    }

    pub fn picks(&self) -> &[ExerciseId] {
        &self.picks
    }

    pub fn has_family(&self, family: usize) -> bool {
        self.families.contains(&family)
    }

    pub fn side_a_count(&self, dim: Dimension) -> usize {
        self.side_a[dim.index()]
    }

    pub fn has_group(&self, group: usize) -> bool {
        self.groups.contains(&group)
    }
}
