//! wirelab CLI: generate diagram logs, search for a classifier, label diagrams.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::debug;
use wirelab::classification::ProgressLogger;
use wirelab::config::SessionConfig;
use wirelab::format::{parse_diagram, DiagramLog};
use wirelab::session::Session;
use wirelab::synthetic::HazardRule;

#[derive(Parser)]
#[command(name = "wirelab")]
#[command(about = "Synthetic wire-diagram data and a logistic-regression safety classifier")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append randomly generated, labeled diagrams to a log
    Generate {
        /// Number of diagrams to generate
        #[arg(short, long, default_value = "1000")]
        count: usize,

        /// Log file (created if missing, appended otherwise)
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Search hyperparameters on a log and report the best model
    Train {
        /// Diagram log to train on
        #[arg(short, long)]
        log: PathBuf,

        /// JSON session config (defaults apply to missing fields)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Log training progress every N iterations (0 = trial starts only)
        #[arg(long, default_value = "0")]
        progress_every: usize,

        /// Diagram to classify with the trained model; may be repeated
        #[arg(short, long)]
        predict: Vec<String>,
    },

    /// Print the ground-truth label of a placement sequence
    Label {
        /// Diagram, e.g. "Row 3 Red,Column 7 Yellow"
        diagram: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            count,
            output,
            seed,
        } => cmd_generate(count, &output, seed),
        Commands::Train {
            log,
            config,
            seed,
            progress_every,
            predict,
        } => cmd_train(&log, config.as_deref(), seed, progress_every, &predict),
        Commands::Label { diagram } => cmd_label(&diagram),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_generate(
    count: usize,
    output: &Path,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(SessionConfig {
        seed,
        ..SessionConfig::default()
    })?;
    let mut rng = session.rng();
    let written = session.generate_log(&DiagramLog::new(output), count, &mut rng)?;
    println!("Appended {written} diagrams to {}", output.display());
    Ok(())
}

fn cmd_train(
    log: &Path,
    config: Option<&Path>,
    seed: Option<u64>,
    progress_every: usize,
    predict: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => SessionConfig::load_from_file(path)?,
        None => SessionConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    debug!(?config, "session config");

    let mut session = Session::new(config)?;
    let mut rng = session.rng();

    let (dataset, report) = session.load(&DiagramLog::new(log))?;
    println!("Training Wire-Diagram Classifier");
    println!("================================");
    println!("Samples:      {}", dataset.len());
    println!("Dangerous:    {}", dataset.n_positive());
    println!("Skipped:      {}", report.skipped);
    println!("Trials:       {}", session.config().grid.len());
    println!();

    let start = Instant::now();
    let mut monitor = ProgressLogger::new(progress_every);
    let outcome = session.train(&dataset, &mut rng, &mut monitor)?;
    let elapsed = start.elapsed();

    for trial in &outcome.trials {
        println!("  [{:>3}] {}  accuracy={:.4}", trial.trial, trial.params, trial.accuracy);
    }
    println!();
    println!("Best:         {}", outcome.best);
    println!("Accuracy:     {:.4}", outcome.refit_accuracy);
    println!("Precision:    {:.4}", outcome.confusion.precision());
    println!("Recall:       {:.4}", outcome.confusion.recall());
    println!(
        "Confusion:    tp={} fp={} tn={} fn={}",
        outcome.confusion.true_positive,
        outcome.confusion.false_positive,
        outcome.confusion.true_negative,
        outcome.confusion.false_negative
    );
    println!("Time:         {:.2}s", elapsed.as_secs_f64());

    if !predict.is_empty() {
        println!();
        for input in predict {
            let label = session.predict(input)?;
            let p = session.predict_proba(input)?;
            println!("  {input} => {label} (p={p:.4})");
        }
    }
    Ok(())
}

fn cmd_label(diagram: &str) -> Result<(), Box<dyn std::error::Error>> {
    let diagram = parse_diagram(diagram)?;
    println!("{}", diagram.label(&HazardRule::default()));
    Ok(())
}
