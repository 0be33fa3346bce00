//! nb-core: naive Bayes from first principles.
//!
//! Commands:
//! - `demo`: the toy Bernoulli problem, every pipeline stage printed
//! - `movies`: multinomial model predicting movie recommendations from ratings
//! - `config show`: the effective configuration and its provenance

use clap::{Args, Parser, Subcommand};
use nb_core::commands::{run_demo, run_movies, show_config};
use nb_core::config::{load_config, validate_config, ConfigError, ExperimentConfig};
use nb_core::error::{Error, Result};
use nb_core::exit_codes::ExitCode;
use nb_core::logging::{generate_run_id, init_logging, LogConfig, LogLevel};
use nb_core::output::{render, OutputFormat};
use std::path::PathBuf;
use tracing::{debug, info_span};

/// Naive Bayes classifiers built from counting
#[derive(Parser)]
#[command(name = "nb-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to an experiment config file (nb.toml)
    #[arg(long, global = true, env = "NB_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the Bernoulli pipeline on the built-in toy problem
    Demo(DemoArgs),

    /// Train and evaluate the recommendation model on a ratings file
    Movies(MoviesArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Additive smoothing constant (overrides bernoulli.smoothing)
    #[arg(long, allow_negative_numbers = true)]
    smoothing: Option<f64>,
}

#[derive(Args, Debug)]
struct MoviesArgs {
    /// Ratings file in `user::movie::rating::timestamp` format
    #[arg(long)]
    ratings: Option<PathBuf>,

    /// Movie to predict (defaults to the most rated movie)
    #[arg(long)]
    target: Option<u32>,

    /// Ratings strictly above this count as a recommendation
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Multinomial smoothing constant
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Fraction of users held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Number of users (inferred from the file when omitted)
    #[arg(long)]
    n_users: Option<usize>,

    /// Number of movies (inferred from the file when omitted)
    #[arg(long)]
    n_movies: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    init_logging(&LogConfig::from_env(log_level));

    let run_id = generate_run_id();
    let span = info_span!("command", run_id = %run_id);
    let _guard = span.enter();

    let exit_code = match execute(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => report_error(&cli.global, &err),
    };
    debug!(code = %exit_code, "exiting");

    std::process::exit(exit_code.as_i32());
}

fn execute(cli: &Cli) -> Result<()> {
    let global = &cli.global;
    match &cli.command {
        Commands::Demo(args) => {
            let config = experiment_config(global, |config| {
                if let Some(smoothing) = args.smoothing {
                    config.bernoulli.smoothing = smoothing;
                }
            })?;
            emit(&run_demo(config.bernoulli.smoothing)?, global.format)
        }
        Commands::Movies(args) => {
            let config = experiment_config(global, |config| apply_movie_args(config, args))?;
            emit(&run_movies(&config)?, global.format)
        }
        Commands::Config(ConfigCommands::Show) => {
            let resolved = load_config(global.config.as_deref())?;
            emit(&show_config(resolved)?, global.format)
        }
        Commands::Version => {
            print_version(global)?;
            Ok(())
        }
    }
}

/// Load the config file, apply CLI overrides, then re-check value ranges.
fn experiment_config(
    global: &GlobalOpts,
    overrides: impl FnOnce(&mut ExperimentConfig),
) -> Result<ExperimentConfig> {
    let mut config = load_config(global.config.as_deref())?.config;
    overrides(&mut config);
    validate_config(&config).map_err(ConfigError::from)?;
    Ok(config)
}

fn apply_movie_args(config: &mut ExperimentConfig, args: &MoviesArgs) {
    if let Some(path) = &args.ratings {
        config.ratings.path = path.clone();
    }
    if let Some(target) = args.target {
        config.ratings.target_movie = Some(target);
    }
    if let Some(threshold) = args.threshold {
        config.ratings.recommend_threshold = threshold;
    }
    if let Some(alpha) = args.alpha {
        config.multinomial.alpha = alpha;
    }
    if let Some(fraction) = args.test_fraction {
        config.split.test_fraction = fraction;
    }
    if let Some(seed) = args.seed {
        config.split.seed = seed;
    }
    if args.n_users.is_some() {
        config.ratings.n_users = args.n_users;
    }
    if args.n_movies.is_some() {
        config.ratings.n_movies = args.n_movies;
    }
}

fn emit<T: serde::Serialize + std::fmt::Display>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = render(value, format)?;
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}

fn print_version(global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}

fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let exit_code = err.exit_code();
    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&err.report()) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("error: {err}"),
        },
        OutputFormat::Text => eprintln!("error: {err}"),
    }
    exit_code
}
