use crate::error::{LfResult, LiftForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Muscle-group labels trained on one day. Empty means rest.
pub type DaySpec = Vec<String>;

pub const REST_DAY: &str = "Rest Day";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingTemplates(BTreeMap<u8, Vec<DaySpec>>);

impl TrainingTemplates {
    pub fn get(&self, days: u8) -> LfResult<&[DaySpec]> {
        self.0
            .get(&days)
            .map(Vec::as_slice)
            .ok_or(LiftForgeError::UnknownTemplate(days))
    }

    pub fn insert(&mut self, days: u8, template: Vec<DaySpec>) {
        self.0.insert(days, template);
    }

    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.keys().copied()
    }

    /// Converts the on-disk layout, whose keys are the strings "1".."7".
    pub fn from_raw(raw: BTreeMap<String, Vec<DaySpec>>) -> LfResult<Self> {
        let mut out = BTreeMap::new();
        for (key, template) in raw {
            let days: u8 = key
                .trim()
                .parse()
                .ok()
                .filter(|d| (1..=7).contains(d))
                .ok_or_else(|| {
                    LiftForgeError::Validation(format!(
                        "training template key '{}' is not a day count between 1 and 7",
                        key
                    ))
                })?;
            out.insert(days, template);
        }
        Ok(Self(out))
    }

    /// Built-in week plans for every day count.
    pub fn standard() -> Self {
        Self(Split::iter().map(|s| (s.days(), s.template())).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum Split {
    #[strum(to_string = "Full Body")]
    FullBody,
    #[strum(to_string = "Upper/Lower Split")]
    UpperLower,
    #[strum(to_string = "Push/Pull/Legs")]
    PushPullLegs,
    #[strum(to_string = "Push/Pull x2")]
    PushPullTwice,
    #[strum(to_string = "Bro Split")]
    BroSplit,
    #[strum(to_string = "Push/Pull/Legs x2")]
    PushPullLegsTwice,
    #[strum(to_string = "Push/Pull/Legs x2 + Rest")]
    PushPullLegsTwiceRest,
}

impl Split {
    pub fn from_days(days: u8) -> Option<Self> {
        Self::iter().find(|s| s.days() == days)
    }

    pub fn days(self) -> u8 {
        self as u8 + 1
    }

    pub fn template(self) -> Vec<DaySpec> {
        let push = || day(&["chest", "shoulder", "tricep"]);
        let pull = || day(&["back", "bicep"]);
        let legs = || day(&["legs", "core"]);

        match self {
            Split::FullBody => vec![day(&["chest", "back", "legs", "shoulder", "core"])],
            Split::UpperLower => vec![day(&["chest", "back", "shoulder", "arm"]), legs()],
            Split::PushPullLegs => vec![push(), pull(), legs()],
            Split::PushPullTwice => {
                let lower_pull = || day(&["back", "bicep", "legs"]);
                vec![push(), lower_pull(), push(), lower_pull()]
            }
            Split::BroSplit => vec![
                day(&["chest"]),
                day(&["back"]),
                day(&["shoulder"]),
                day(&["legs"]),
                day(&["arm"]),
            ],
            Split::PushPullLegsTwice => vec![push(), pull(), legs(), push(), pull(), legs()],
            Split::PushPullLegsTwiceRest => {
                vec![push(), pull(), legs(), push(), pull(), legs(), Vec::new()]
            }
        }
    }
}

/// Seven-day Push/Legs/Pull rotation with a closing rest day.
pub fn push_legs_pull_week() -> Vec<DaySpec> {
    let push = || day(&["chest", "shoulder", "tricep"]);
    let legs = || day(&["legs"]);
    let pull = || day(&["back", "bicep"]);
    vec![push(), legs(), pull(), push(), legs(), pull(), Vec::new()]
}

pub const PUSH_LEGS_PULL_WEEK: &str = "Push/Legs/Pull x2 + Rest";

/// Display name of a week plan: the Push/Legs/Pull rotation by content,
/// anything else by its day count.
pub fn split_name(template: &[DaySpec]) -> String {
    if template == push_legs_pull_week().as_slice() {
        return PUSH_LEGS_PULL_WEEK.to_string();
    }
    u8::try_from(template.len())
        .ok()
        .and_then(Split::from_days)
        .map_or_else(|| "Custom".to_string(), |s| s.to_string())
}

/// Human display type for a day, e.g. "Chest, Shoulders & Triceps".
pub fn day_type(labels: &[String]) -> String {
    let names: Vec<String> = labels.iter().map(|l| display_name(l)).collect();
    match names.as_slice() {
        [] => REST_DAY.to_string(),
        [one] => one.clone(),
        [first, second] => format!("{} & {}", first, second),
        [head @ .., last] => format!("{} & {}", head.join(", "), last),
    }
}

fn display_name(label: &str) -> String {
    match label {
        "chest" => "Chest".into(),
        "back" => "Back".into(),
        "shoulder" => "Shoulders".into(),
        "tricep" => "Triceps".into(),
        "bicep" => "Biceps".into(),
        "legs" => "Legs".into(),
        "arm" => "Arms".into(),
        "core" => "Core".into(),
        other => title_case(other),
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn day(labels: &[&str]) -> DaySpec {
    labels.iter().map(|s| s.to_string()).collect()
}
