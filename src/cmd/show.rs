use crate::reports;
use clap::Args;
use liftforge::api::Engine;
use liftforge::catalog::ExerciseId;
use liftforge::error::{LfResult, LiftForgeError};

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Exercise id; omit for the catalog summary
    #[arg(long)]
    pub id: Option<ExerciseId>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ShowArgs, engine: &Engine) -> LfResult<()> {
    let Some(id) = args.id else {
        let summary = engine.summary();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            reports::print_catalog_summary(engine);
        }
        return Ok(());
    };

    let exercise = engine
        .exercise(id)
        .ok_or(LiftForgeError::ExerciseNotFound(id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(exercise)?);
    } else {
        let scorer = engine.scorer()?;
        reports::print_exercise_detail(exercise, &scorer);
    }
    Ok(())
}
