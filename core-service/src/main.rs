//! Forest Fire Risk - Offline Trainer
//!
//! Reads the fire dataset, fits the forest, prints the evaluation report
//! and writes the model artifact consumed by the scoring server.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fire_risk_core::constants::{
    get_data_path, get_model_path, APP_NAME, APP_VERSION, DEFAULT_N_ESTIMATORS,
    DEFAULT_RANDOM_STATE, DEFAULT_TEST_SIZE,
};
use fire_risk_core::logic::model::ForestConfig;
use fire_risk_core::logic::training::{train, Dataset, EvaluationReport, TrainingConfig};

/// Train the fire risk forest and write the model artifact
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "fire-risk-train", version)]
struct TrainArgs {
    /// Training dataset (CSV with the 12 feature columns and `area`)
    #[arg(short, long, default_value_t = get_data_path())]
    data: String,

    /// Where to write the model artifact
    #[arg(short, long, default_value_t = get_model_path())]
    output: String,

    /// Number of trees
    #[arg(long, default_value_t = DEFAULT_N_ESTIMATORS)]
    trees: usize,

    /// Seed for both the split and the forest
    #[arg(long, default_value_t = DEFAULT_RANDOM_STATE)]
    seed: u64,

    /// Held-out share in (0, 1)
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    test_size: f64,

    /// Also write the evaluation report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

impl TrainArgs {
    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            forest: ForestConfig {
                n_estimators: self.trees,
                seed: self.seed,
                ..Default::default()
            },
            test_size: self.test_size,
            split_seed: self.seed,
        }
    }
}

fn write_report(path: &PathBuf, report: &EvaluationReport) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

fn run(args: &TrainArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = Dataset::load(&args.data)?;
    let (artifact, report) = train(&dataset, &args.training_config())?;

    println!("{}", report);

    artifact.save(&args.output)?;
    log::info!("Model artifact written to {} (checksum {})", args.output, artifact.checksum);

    if let Some(path) = &args.report {
        write_report(path, &report)?;
        log::info!("Evaluation report written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = TrainArgs::parse();
    log::info!("Starting {} trainer v{}...", APP_NAME, APP_VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Training failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
