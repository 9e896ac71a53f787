//! HTTP server for the rendered chart.
//!
//! Provides endpoints for:
//! - `GET /` - HTML page with hover tooltips
//! - `GET /chart.svg` - SVG document
//! - `GET /chart.png` - PNG image (only when rasterized at startup)
//! - `GET /dataset` - Dataset summary
//! - `GET /health` - Health check
//!
//! Everything is rendered once before the listener starts; handlers only
//! hand out the cached artifacts.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use heatmap_common::{DatasetSummary, HeatmapError};
use renderer::{rasterize, render_page, render_svg, HeatMap};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::OutputFormat;

/// PNG state decided at startup.
#[derive(Debug)]
pub enum PngArtifact {
    /// Not requested
    Disabled,
    Ready(Vec<u8>),
    /// Rasterization was requested but failed
    Failed(HeatmapError),
}

/// Cached artifacts shared by all handlers.
#[derive(Debug)]
pub struct ServerState {
    pub page: String,
    pub svg: String,
    pub png: PngArtifact,
    pub summary: DatasetSummary,
}

impl ServerState {
    /// Render every artifact for `chart`. A PNG is rasterized only when
    /// `png_scale` is given; a rasterization failure is kept and reported by
    /// `/chart.png` rather than preventing startup.
    pub fn render(chart: &HeatMap, summary: DatasetSummary, png_scale: Option<f32>) -> Self {
        let svg = render_svg(chart);
        let page = render_page(chart);

        let png = match png_scale {
            None => PngArtifact::Disabled,
            Some(scale) => match rasterize(&svg, scale) {
                Ok(bytes) => {
                    info!(bytes = bytes.len(), "Rasterized chart for serving");
                    PngArtifact::Ready(bytes)
                }
                Err(e) => {
                    warn!(error = %e, "PNG rasterization failed, /chart.png will report it");
                    PngArtifact::Failed(e)
                }
            },
        };

        Self {
            page,
            svg,
            png,
            summary,
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page_handler))
        .route("/chart.svg", get(svg_handler))
        .route("/chart.png", get(png_handler))
        .route("/dataset", get(dataset_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - HTML page
async fn page_handler(Extension(state): Extension<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, OutputFormat::Html.content_type())],
        state.page.clone(),
    )
        .into_response()
}

/// GET /chart.svg - SVG document
async fn svg_handler(Extension(state): Extension<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, OutputFormat::Svg.content_type())],
        state.svg.clone(),
    )
        .into_response()
}

/// GET /chart.png - PNG image
async fn png_handler(Extension(state): Extension<Arc<ServerState>>) -> Response {
    match &state.png {
        PngArtifact::Ready(bytes) => (
            [(header::CONTENT_TYPE, OutputFormat::Png.content_type())],
            bytes.clone(),
        )
            .into_response(),
        PngArtifact::Disabled => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "PNG output not enabled; start with --png".to_string(),
            }),
        )
            .into_response(),
        PngArtifact::Failed(e) => {
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /dataset - Dataset summary
async fn dataset_handler(Extension(state): Extension<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.summary.clone())
}

/// GET /health - Health check
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "heatmap".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Start the HTTP server.
pub async fn run_server(state: Arc<ServerState>, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    info!(port = port, "Starting chart server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
