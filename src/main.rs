use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use liftforge::api::Engine;
use liftforge::catalog::loader::load_dataset;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly exercise selection engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset directory (strength.json, config.json, classification/)
    #[arg(global = true, short, long, default_value = "data")]
    data: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a weekly plan
    Plan(cmd::plan::PlanArgs),
    /// Compare strategies on the same week
    Compare(cmd::compare::CompareArgs),
    /// Show one exercise or the catalog summary
    Show(cmd::show::ShowArgs),
}

fn main() {
    // 1. Parse raw matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    // 2. Load reference data
    let (catalog, mut config) = load_dataset(&cli.data).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    // 3. Overlay flags typed on the command line onto the dataset config.
    // The overrides live in the subcommand's matches, not the root.
    let overrides = match (&cli.command, matches.subcommand()) {
        (Commands::Plan(args), Some((_, sub))) => Some((&args.config, sub)),
        (Commands::Compare(args), Some((_, sub))) => Some((&args.config, sub)),
        _ => None,
    };
    if let Some((cli_config, sub_matches)) = overrides {
        config.merge_from_cli(cli_config, sub_matches);
    }

    let engine = Engine::new(Arc::new(catalog), config).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    info!("Catalog ready: {} exercises", engine.catalog().len());

    // 4. Execute
    let result = match cli.command {
        Commands::Plan(args) => cmd::plan::run(args, engine, cli.debug),
        Commands::Compare(args) => cmd::compare::run(args, engine),
        Commands::Show(args) => cmd::show::run(args, &engine),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
