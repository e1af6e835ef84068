use super::parse_key_val;
use crate::reports;
use clap::Args;
use liftforge::api::{Engine, PlanRequest};
use liftforge::catalog::ExerciseId;
use liftforge::config::{PreferenceCoefficients, ScoringConfig};
use liftforge::error::{LfResult, LiftForgeError};
use liftforge::planner::Planner;
use liftforge::selector::Strategy;
use std::fs::File;
use std::io::BufReader;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ScoringConfig,

    /// Training days per week (1-7)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub days: Option<u8>,

    /// Preference coefficient per muscle group, e.g. chest=1.5
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val::<f64>)]
    pub prefer: Vec<(String, f64)>,

    /// Effort tier (1-5) per muscle group, e.g. back=4
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val::<u8>)]
    pub tier: Vec<(String, u8)>,

    /// Exercise ids to leave out of every day
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<ExerciseId>,

    #[arg(long, value_enum, default_value_t = Strategy::Hybrid)]
    pub strategy: Strategy,

    /// JSON request file (training_days, muscle_tiers, muscle_preferences,
    /// excluded_exercises); flags are applied on top
    #[arg(long)]
    pub request: Option<String>,

    /// Print the plan as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Per-exercise report instead of the summary table
    #[arg(long, default_value_t = false)]
    pub detailed: bool,
}

pub fn run(args: PlanArgs, mut engine: Engine, debug: bool) -> LfResult<()> {
    engine.set_strategy(args.strategy);

    if let Some(path) = &args.request {
        let file = File::open(path).map_err(|e| LiftForgeError::DataFile {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let request: PlanRequest = serde_json::from_reader(BufReader::new(file))?;
        engine.apply_request(&request)?;
    }

    let days = args.days.unwrap_or(engine.settings().training_days);

    let mut preferences = if args.tier.is_empty() {
        engine.settings().preferences.clone()
    } else {
        PreferenceCoefficients::from_tiers(args.tier.iter().map(|(k, v)| (k.as_str(), *v)))
    };
    for (category, coefficient) in &args.prefer {
        preferences.set(category.clone(), *coefficient);
    }

    let mut excluded = engine.settings().excluded.clone();
    excluded.extend(args.exclude.iter().copied());

    engine.configure(days, preferences, excluded)?;
    let plan = engine.generate_weekly_plan()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    reports::print_plan_settings(&engine);
    if args.detailed {
        let breakdowns = if debug {
            let scorer = engine.scorer()?;
            Some(Planner::new(&scorer, engine.strategy()).explain(&plan))
        } else {
            None
        };
        reports::print_detailed_plan(&plan, breakdowns.as_deref());
    } else {
        reports::print_weekly_summary(&plan);
    }

    Ok(())
}
