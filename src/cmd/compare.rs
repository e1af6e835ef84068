use crate::reports;
use clap::Args;
use liftforge::api::Engine;
use liftforge::config::{ExclusionSet, PreferenceCoefficients, ScoringConfig};
use liftforge::error::LfResult;
use liftforge::planner::{round2, Planner, WeeklyPlan};
use liftforge::selector::exhaustive::ordering_count;
use liftforge::selector::{DayContext, Strategy};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub config: ScoringConfig,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub days: Option<u8>,

    /// Also race greedy against exhaustive on the first N candidates of the
    /// full-body day, e.g. 5,8,10
    #[arg(long, value_delimiter = ',')]
    pub sample_sizes: Vec<usize>,
}

pub struct StrategyRun {
    pub strategy: Strategy,
    pub plan: WeeklyPlan,
    pub elapsed: Duration,
}

pub struct SampleRun {
    pub size: usize,
    pub orderings: u128,
    pub greedy_score: f64,
    pub greedy_time: Duration,
    pub exhaustive_score: f64,
    pub exhaustive_time: Duration,
}

pub fn run(args: CompareArgs, mut engine: Engine) -> LfResult<()> {
    let days = args.days.unwrap_or(engine.settings().training_days);
    engine.configure(days, PreferenceCoefficients::new(), ExclusionSet::new())?;

    let mut runs = Vec::new();
    for strategy in [Strategy::Greedy, Strategy::TwoOpt, Strategy::Hybrid] {
        engine.set_strategy(strategy);
        let start = Instant::now();
        let plan = engine.generate_weekly_plan()?;
        let elapsed = start.elapsed();
        info!("{}: {:.2} in {:?}", strategy.label(), plan.total_score(), elapsed);
        runs.push(StrategyRun {
            strategy,
            plan,
            elapsed,
        });
    }

    reports::print_strategy_comparison(&runs);

    if !args.sample_sizes.is_empty() {
        let samples = run_samples(&engine, &args.sample_sizes)?;
        reports::print_sample_comparison(&samples);
    }
    Ok(())
}

fn run_samples(engine: &Engine, sizes: &[usize]) -> LfResult<Vec<SampleRun>> {
    let scorer = engine.scorer()?;
    let k = scorer.exercises_per_day();
    let full_body = engine
        .catalog()
        .templates()
        .get(1)?
        .iter()
        .find(|d| !d.is_empty())
        .cloned()
        .unwrap_or_default();

    let pool = Planner::new(&scorer, Strategy::Greedy).candidate_pool(&full_body, &ExclusionSet::new());
    let weekly = BTreeSet::new();

    let mut out = Vec::with_capacity(sizes.len());
    for &size in sizes {
        if size > pool.len() {
            warn!("Sample size {} exceeds the {} available candidates", size, pool.len());
        }
        let sample = pool.truncated(size);
        let orderings = ordering_count(sample.len(), k);
        if orderings > 10_000_000 {
            warn!("Evaluating {} orderings, this may take a while", orderings);
        }
        let ctx = DayContext::new(&scorer, &sample, &weekly);

        let start = Instant::now();
        let greedy = Strategy::Greedy.select(&ctx);
        let greedy_time = start.elapsed();

        let start = Instant::now();
        let exhaustive = Strategy::Exhaustive.select(&ctx);
        let exhaustive_time = start.elapsed();

        out.push(SampleRun {
            size: sample.len(),
            orderings,
            greedy_score: round2(greedy.total_score()),
            greedy_time,
            exhaustive_score: round2(exhaustive.total_score()),
            exhaustive_time,
        });
    }
    Ok(out)
}
