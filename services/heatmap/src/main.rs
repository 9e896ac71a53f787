//! Temperature heat map.
//!
//! Fetches the global monthly variance dataset once and then:
//! - Writes the chart as SVG, HTML or PNG (file or stdout)
//! - Serves the chart over HTTP with `--serve`
//! - Prints a dataset summary or a cell's tooltip text

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use heatmap_common::{Dataset, HeatmapError};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap::config::{AppConfig, Args, LogFormat, Mode};
use heatmap::loader::{load_dataset, source_from_location};
use heatmap::server::{run_server, ServerState};
use heatmap::{hover_text, render_artifact};
use renderer::HeatMap;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Load failures get their own exit status so scripts can retry them
            let load_failure = e
                .downcast_ref::<HeatmapError>()
                .map(HeatmapError::is_load_failure)
                .unwrap_or(false);
            let message = format!("{:#}", e);
            error!(error = %message, load_failure, "Heat map failed");
            if load_failure {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays free for the chart
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish())?,
    }
    Ok(())
}

async fn run(args: &Args) -> Result<()> {
    let config = AppConfig::from_args(args)?;

    info!(source = %config.source, "Starting temperature heat map");

    let source = source_from_location(&config.source, config.timeout)?;
    let dataset = load_dataset(source.as_ref()).await?;

    let summary = dataset.summary();
    info!(
        records = summary.records,
        base_temperature = summary.base_temperature,
        min_year = ?summary.min_year,
        max_year = ?summary.max_year,
        "Loaded dataset"
    );

    if config.mode == Mode::Summary {
        let json = serde_json::to_string_pretty(&summary)?;
        write_stdout(format!("{}\n", json).as_bytes()).await?;
        return Ok(());
    }

    let chart = build_chart(&dataset, &config)?;

    match config.mode {
        Mode::Summary => Ok(()),
        Mode::Hover { year, month } => {
            let text = hover_text(&chart, year, month)?;
            write_stdout(format!("{}\n", text).as_bytes()).await
        }
        Mode::Write { output, format } => {
            let bytes = render_artifact(&chart, format, config.scale)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &bytes)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), bytes = bytes.len(), ?format, "Wrote chart");
                    Ok(())
                }
                None => write_stdout(&bytes).await,
            }
        }
        Mode::Serve { port, png } => {
            let state = ServerState::render(&chart, summary, png.then_some(config.scale));
            run_server(Arc::new(state), port).await
        }
    }
}

fn build_chart(dataset: &Dataset, config: &AppConfig) -> Result<HeatMap> {
    let chart = HeatMap::build(dataset, &config.chart)?;
    info!(cells = chart.cells.len(), "Built chart");
    Ok(chart)
}

async fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(bytes).await?;
    stdout.flush().await?;
    Ok(())
}
