//! Command line arguments and resolved run configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use heatmap_common::{HeatmapError, HeatmapResult, MONTHS_PER_YEAR};
use renderer::ChartConfig;
use tracing::{debug, info};

use crate::loader::DEFAULT_DATA_URL;

/// Artifact written by a one-shot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document
    Svg,
    /// HTML page with the tooltip wiring
    Html,
    /// Rasterized PNG image
    Png,
}

impl OutputFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(Self::Svg),
            "html" | "htm" => Some(Self::Html),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Html => "text/html; charset=utf-8",
            Self::Png => "image/png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "heatmap")]
#[command(about = "Calendar heat map of global monthly land-surface temperature")]
pub struct Args {
    /// Dataset URL or file path
    #[arg(long, env = "HEATMAP_DATA_URL", default_value = DEFAULT_DATA_URL)]
    pub source: String,

    /// Output file (stdout when omitted)
    #[arg(short, long, env = "HEATMAP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format (inferred from --output when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// YAML chart configuration
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Serve the chart over HTTP instead of writing it
    #[arg(long)]
    pub serve: bool,

    /// Port for --serve
    #[arg(long, env = "HEATMAP_PORT", default_value = "8080")]
    pub port: u16,

    /// Rasterize the PNG at startup when serving
    #[arg(long)]
    pub png: bool,

    /// Scale factor for PNG output
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// Request timeout for the dataset fetch in seconds (none by default)
    #[arg(long, env = "HEATMAP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "json")]
    pub log_format: LogFormat,

    /// Print a JSON summary of the dataset and exit
    #[arg(long)]
    pub summary: bool,

    /// Print the tooltip text for a cell given as YEAR:MONTH (1-12) and exit
    #[arg(long, value_name = "YEAR:MONTH")]
    pub hover: Option<String>,
}

/// What a run should do once the dataset is loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Write {
        output: Option<PathBuf>,
        format: OutputFormat,
    },
    Serve {
        port: u16,
        png: bool,
    },
    Summary,
    Hover {
        year: i32,
        month: usize,
    },
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: String,
    pub timeout: Option<Duration>,
    pub chart: ChartConfig,
    pub scale: f32,
    pub mode: Mode,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> HeatmapResult<Self> {
        let chart = match &args.config {
            Some(path) => {
                info!(path = %path.display(), "Loading chart configuration");
                ChartConfig::from_file(path)?
            }
            None => ChartConfig::default(),
        };

        if !(args.scale > 0.0) || !args.scale.is_finite() {
            return Err(HeatmapError::ConfigError(format!(
                "scale must be positive, got {}",
                args.scale
            )));
        }

        let mode = if args.summary {
            Mode::Summary
        } else if let Some(spec) = &args.hover {
            let (year, month) = parse_hover(spec)?;
            Mode::Hover { year, month }
        } else if args.serve {
            Mode::Serve {
                port: args.port,
                png: args.png,
            }
        } else {
            let format = args
                .format
                .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
                .unwrap_or(OutputFormat::Svg);
            Mode::Write {
                output: args.output.clone(),
                format,
            }
        };

        let config = Self {
            source: args.source.clone(),
            timeout: args.timeout_secs.map(Duration::from_secs),
            chart,
            scale: args.scale,
            mode,
        };
        debug!(mode = ?config.mode, source = %config.source, "Resolved configuration");
        Ok(config)
    }
}

/// Parse `YEAR:MONTH` with a 1-indexed month into a year and month index.
pub fn parse_hover(spec: &str) -> HeatmapResult<(i32, usize)> {
    let invalid = || HeatmapError::ConfigError(format!("expected YEAR:MONTH, got '{}'", spec));

    let (year, month) = spec.split_once(':').ok_or_else(invalid)?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    let month: usize = month.trim().parse().map_err(|_| invalid())?;
    if !(1..=MONTHS_PER_YEAR).contains(&month) {
        return Err(HeatmapError::ConfigError(format!(
            "month must be 1-12, got {}",
            month
        )));
    }
    Ok((year, month - 1))
}
