use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use leader_power::clients::{GeminiClient, ReportModel};
use leader_power::config::{self, Config, RuntimeConfig};
use leader_power::{telemetry, tui};
use tracing::info;

/// Leadership power profile: a 21-question self-assessment in the terminal
#[derive(Parser, Debug)]
#[command(name = "leader-power", version, about)]
struct Args {
    /// Path to a TOML config file (default: leader_power.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never request the AI report
    #[arg(long)]
    no_report: bool,

    /// Directory for exported result files
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log file path (default: the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // logging comes first so config warnings reach the log file
    config::load_env_files();
    let env = RuntimeConfig::load_from_env();
    let log_path = args
        .log_file
        .clone()
        .or(env.log_file)
        .unwrap_or_else(telemetry::default_log_path);
    telemetry::init(&log_path, &env.log_level)?;

    let mut config = Config::load(args.config.as_deref()).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    if args.no_report {
        config.report.enabled = false;
    }
    if let Some(dir) = args.export_dir {
        config.export.dir = dir;
    }

    info!(
        "starting leader-power: model={}, report_enabled={}, export_dir={}",
        config.report.model,
        config.report.enabled,
        config.export.dir.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let model: Arc<dyn ReportModel> = Arc::new(GeminiClient::from_config(&config));
    tui::run(&config, model, runtime.handle().clone())?;

    info!("leader-power exited");
    Ok(())
}
