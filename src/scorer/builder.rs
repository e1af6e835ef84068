use crate::catalog::Catalog;
use crate::config::{PreferenceCoefficients, ScoringConfig};
use crate::error::LfResult;
use crate::scorer::Scorer;
use std::sync::Arc;
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct ScorerBuildParams {
    pub catalog: Arc<Catalog>,
    #[builder(default)]
    pub config: ScoringConfig,
    #[builder(default)]
    pub preferences: PreferenceCoefficients,
}

impl ScorerBuildParams {
    pub fn build_scorer(self) -> LfResult<Scorer> {
        self.config.validate()?;

        debug!(
            "Scorer ready: {} exercises, {} muscle groups, {} families, k={}",
            self.catalog.len(),
            self.catalog.group_count(),
            self.catalog.family_count(),
            self.config.search.exercises_per_day
        );

        Ok(Scorer {
            catalog: self.catalog,
            config: self.config,
            preferences: self.preferences,
        })
    }
}
