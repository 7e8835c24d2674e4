use hoversim::{bench_step, run_headless, Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "cubes.yaml")]
    file_name: String,

    /// Run this many frames without a window and log a summary
    #[arg(long)]
    headless: Option<usize>,

    /// Time the step function over a range of body counts
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)?;
    info!(path = %config_path.display(), preset = %scenario_cfg.preset, "scenario loaded");
    Ok(scenario_cfg)
}

fn init_logging() -> Result<()> {
    let subscriber = tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        init_logging()?;
        bench_step()?;
        return Ok(());
    }

    if let Some(frames) = args.headless {
        init_logging()?;
        let scenario = Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?;
        let (mut frame_loop, mut adapter) = scenario.instantiate()?;
        let summary = run_headless(&mut frame_loop, &mut adapter, frames);
        anyhow::ensure!(summary.all_finite, "simulation produced non-finite state");
        if !summary.contained {
            warn!(max_overshoot = summary.max_overshoot, "bodies left the bounds plus margin");
        }
        return Ok(());
    }

    run_viewer(&args.file_name)
}

#[cfg(feature = "viewer")]
fn run_viewer(file_name: &str) -> Result<()> {
    let scenario = Scenario::build_scenario(load_scenario_from_yaml(file_name)?)?;
    hoversim::run_2d(scenario)?;
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_viewer(_file_name: &str) -> Result<()> {
    anyhow::bail!("built without the `viewer` feature; use --headless or --bench")
}
