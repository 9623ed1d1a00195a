use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use jute_pest_dataset_split::config::SplitConfig;
use jute_pest_dataset_split::core::DatasetSplit;
use jute_pest_dataset_split::logging::setup_logging;
use jute_pest_dataset_split::{exit_status, run_split, RunOutcome};

fn main() -> ExitCode {
    if let Err(e) = setup_logging(Path::new("logs")) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting dataset redistribution...");

    let config = SplitConfig::default();
    let mut rng = StdRng::seed_from_u64(config.seed);

    // An empty dataset is reported by run_split and is not a failure
    let result = run_split(&config, &mut rng);
    let status = exit_status(&result);
    let summary = match result {
        Ok(RunOutcome::Completed(summary)) => summary,
        _ => return ExitCode::from(status),
    };

    println!();
    print!("{}", summary.render_table());
    if summary.name_collisions > 0 {
        println!(
            "{} files overwrote a same-named file in their class folder",
            summary.name_collisions
        );
    }

    println!();
    println!("New dataset saved to:");
    println!("  Train: {}", config.destination_dir(DatasetSplit::Train).display());
    println!("  Valid: {}", config.destination_dir(DatasetSplit::Val).display());
    println!("  Test: {}", config.destination_dir(DatasetSplit::Test).display());
    ExitCode::SUCCESS
}
