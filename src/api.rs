use crate::catalog::{Catalog, Exercise, ExerciseId};
use crate::config::{ExclusionSet, PlanSettings, PreferenceCoefficients, ScoringConfig};
use crate::error::LfResult;
use crate::planner::{Planner, WeeklyPlan};
use crate::scorer::{Scorer, ScorerBuildParams};
use crate::selector::Strategy;
use crate::templates::{push_legs_pull_week, DaySpec, TrainingTemplates};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point for callers: holds the shared reference data plus the
/// settings of the next plan.
pub struct Engine {
    catalog: Arc<Catalog>,
    config: ScoringConfig,
    settings: PlanSettings,
    strategy: Strategy,
    templates: TrainingTemplates,
    /// 7-day template chosen by the last request, if any.
    rotation: Option<Vec<DaySpec>>,
}

impl Engine {
    pub fn new(catalog: Arc<Catalog>, config: ScoringConfig) -> LfResult<Self> {
        config.validate()?;
        let templates = catalog.templates().clone();
        Ok(Self {
            catalog,
            config,
            settings: PlanSettings::default(),
            strategy: Strategy::default(),
            templates,
            rotation: None,
        })
    }

    /// Fails with `UnknownTemplate` before touching the current settings.
    pub fn configure(
        &mut self,
        training_days: u8,
        preferences: PreferenceCoefficients,
        excluded: ExclusionSet,
    ) -> LfResult<()> {
        self.templates.get(training_days)?;

        for (category, coefficient) in preferences.out_of_range() {
            warn!(
                "Preference for '{}' is {} (outside 0.1-10.0), using it as given",
                category, coefficient
            );
        }

        self.settings = PlanSettings {
            training_days,
            preferences,
            excluded,
        };
        Ok(())
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn override_template(&mut self, training_days: u8, template: Vec<DaySpec>) {
        self.templates.insert(training_days, template);
    }

    /// The template the next plan follows. A 7-day request swaps in the
    /// Push/Legs/Pull rotation without touching the stored templates.
    pub fn template(&self) -> LfResult<&[DaySpec]> {
        match &self.rotation {
            Some(rotation) if self.settings.training_days == 7 => Ok(rotation),
            _ => self.templates.get(self.settings.training_days),
        }
    }

    /// A scorer carrying the current preferences.
    pub fn scorer(&self) -> LfResult<Scorer> {
        ScorerBuildParams::builder()
            .catalog(Arc::clone(&self.catalog))
            .config(self.config.clone())
            .preferences(self.settings.preferences.clone())
            .build()
            .build_scorer()
    }

    pub fn generate_weekly_plan(&self) -> LfResult<WeeklyPlan> {
        let template = self.template()?;
        let scorer = self.scorer()?;

        info!(
            "Generating {}-day plan with {} strategy ({} excluded)",
            self.settings.training_days,
            self.strategy,
            self.settings.excluded.len()
        );

        let plan = Planner::new(&scorer, self.strategy).generate(
            self.settings.training_days,
            template,
            &self.settings.excluded,
        );
        Ok(plan)
    }

    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.catalog.exercise(id)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.catalog.exercises()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            total_exercises: self.catalog.len(),
            muscle_groups: self.catalog.muscle_groups().to_vec(),
        }
    }

    /// Replaces the settings with those of a front-end request. Omitted
    /// fields take their defaults, never the previous request's values.
    /// Tiers are converted first, then explicit coefficients override them.
    pub fn apply_request(&mut self, request: &PlanRequest) -> LfResult<()> {
        let defaults = PlanSettings::default();
        let training_days = request.training_days.unwrap_or(defaults.training_days);

        let mut preferences = match &request.muscle_tiers {
            Some(tiers) => {
                PreferenceCoefficients::from_tiers(tiers.iter().map(|(k, v)| (k.as_str(), *v)))
            }
            None => defaults.preferences,
        };
        if let Some(explicit) = &request.muscle_preferences {
            for (category, coefficient) in explicit {
                preferences.set(category.clone(), *coefficient);
            }
        }

        let excluded = match &request.excluded_exercises {
            Some(ids) => ids.iter().copied().collect(),
            None => defaults.excluded,
        };

        self.configure(training_days, preferences, excluded)?;
        self.rotation = (training_days == 7).then(push_legs_pull_week);
        Ok(())
    }

    /// Applies the request and generates a plan, folding any failure into
    /// the response.
    pub fn respond(&mut self, request: &PlanRequest) -> PlanResponse {
        match self
            .apply_request(request)
            .and_then(|_| self.generate_weekly_plan())
        {
            Ok(plan) => PlanResponse {
                success: true,
                plan: Some(plan),
                config: Some(ResponseConfig {
                    training_days: self.settings.training_days,
                    muscle_preferences: self.settings.preferences.clone(),
                }),
                error: None,
            },
            Err(e) => PlanResponse {
                success: false,
                plan: None,
                config: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub training_days: Option<u8>,
    #[serde(default)]
    pub muscle_tiers: Option<BTreeMap<String, u8>>,
    #[serde(default)]
    pub muscle_preferences: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub excluded_exercises: Option<Vec<ExerciseId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseConfig {
    pub training_days: u8,
    pub muscle_preferences: PreferenceCoefficients,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<WeeklyPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ResponseConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_exercises: usize,
    pub muscle_groups: Vec<String>,
}
