mod commands;
mod output;

use clap::{Parser, Subcommand};
use staffing_core::AllocationStrategy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "staffing",
    version,
    about = "Curriculum-based teacher establishment and shortage recommender"
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess staffing for one or all institutions in a dataset (CSV, TSV, XLSX or grouped JSON)
    Evaluate {
        /// Path to the dataset file
        dataset: PathBuf,

        /// Only assess this institution
        #[arg(short, long, value_name = "NAME")]
        school: Option<String>,

        /// Custom JSON policy file
        #[arg(long, value_name = "FILE", conflicts_with = "preset")]
        policy: Option<PathBuf>,

        /// Predefined policy
        #[arg(long, value_name = "NAME", default_value = "cbc")]
        preset: String,

        /// Allocation strategy: continuous or bracketed
        #[arg(long, default_value = "continuous")]
        strategy: AllocationStrategy,

        /// Count only major specializations as actual staff
        #[arg(long)]
        exclude_minor: bool,

        /// Report surpluses as zero instead of negative shortages
        #[arg(long)]
        clamp: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List the institutions in a dataset
    Schools {
        /// Path to the dataset file
        dataset: PathBuf,
    },
    /// Inspect staffing policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// List predefined policies
    List,
    /// Explain a predefined policy in plain language
    Explain {
        /// Preset name (e.g., "cbc")
        preset: String,
    },
    /// Validate a custom policy file
    Validate {
        /// Path to JSON policy file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Evaluate {
            dataset,
            school,
            policy,
            preset,
            strategy,
            exclude_minor,
            clamp,
            output,
        } => commands::evaluate::run(commands::evaluate::EvaluateArgs {
            dataset,
            school,
            policy,
            preset,
            strategy,
            include_minor: !exclude_minor,
            clamp_negative: clamp,
            output_format: output,
            verbose: cli.verbose,
        }),
        Commands::Schools { dataset } => commands::schools::run(&dataset),
        Commands::Policy { action } => match action {
            PolicyAction::List => commands::policy::list(),
            PolicyAction::Explain { preset } => commands::policy::explain(&preset),
            PolicyAction::Validate { file } => commands::policy::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
