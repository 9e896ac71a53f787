//! Tests for the chart HTTP server and the one-shot output helpers.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use heatmap::config::OutputFormat;
use heatmap::server::{create_router, PngArtifact, ServerState};
use heatmap::{hover_text, render_artifact};
use heatmap_common::{Dataset, HeatmapError, MonthlyVariance};
use renderer::{ChartConfig, HeatMap};
use test_utils::two_record_dataset;
use tower::ServiceExt;

fn scenario_chart() -> HeatMap {
    HeatMap::build(&two_record_dataset(), &ChartConfig::default()).unwrap()
}

fn scenario_state(png_scale: Option<f32>) -> Arc<ServerState> {
    let dataset = two_record_dataset();
    Arc::new(ServerState::render(
        &scenario_chart(),
        dataset.summary(),
        png_scale,
    ))
}

async fn get(state: Arc<ServerState>, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = create_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

// ============================================================================
// Router
// ============================================================================

#[tokio::test]
async fn test_page_route() {
    let (status, content_type, body) = get(scenario_state(None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<div id=\"tooltip\""));
    assert!(html.contains("data-temp=\"9.5\""));
}

#[tokio::test]
async fn test_svg_route() {
    let (status, content_type, body) = get(scenario_state(None), "/chart.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    let svg = String::from_utf8(body).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("class=\"cell\"").count(), 2);
}

#[tokio::test]
async fn test_png_route_disabled_by_default() {
    let (status, _, body) = get(scenario_state(None), "/chart.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("--png"));
}

#[tokio::test]
async fn test_png_route_when_enabled() {
    let (status, content_type, body) = get(scenario_state(Some(0.5)), "/chart.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(&body[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(&body[16..20], &600u32.to_be_bytes());
}

#[tokio::test]
async fn test_png_route_reports_failure() {
    let state = Arc::new(ServerState {
        page: String::new(),
        svg: String::new(),
        png: PngArtifact::Failed(HeatmapError::RasterError("no pixmap".to_string())),
        summary: two_record_dataset().summary(),
    });
    let (status, _, body) = get(state, "/chart.png").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("no pixmap"));
}

#[tokio::test]
async fn test_dataset_route() {
    let (status, _, body) = get(scenario_state(None), "/dataset").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["records"], 2);
    assert_eq!(json["base_temperature"], 8.0);
    assert_eq!(json["min_year"], 1900);
    assert_eq!(json["max_year"], 2000);
    assert_eq!(json["min_temperature"], 6.0);
    assert_eq!(json["max_temperature"], 9.5);
}

#[tokio::test]
async fn test_health_route() {
    let (status, _, body) = get(scenario_state(None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "heatmap");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _, _) = get(scenario_state(None), "/tiles/0/0/0.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// One-shot output
// ============================================================================

#[test]
fn test_render_artifact_formats() {
    let chart = scenario_chart();

    let svg = render_artifact(&chart, OutputFormat::Svg, 1.0).unwrap();
    assert!(svg.starts_with(b"<svg"));

    let html = render_artifact(&chart, OutputFormat::Html, 1.0).unwrap();
    assert!(html.starts_with(b"<!DOCTYPE html>"));

    let png = render_artifact(&chart, OutputFormat::Png, 0.5).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn test_hover_text_for_first_record() {
    let chart = scenario_chart();
    let text = hover_text(&chart, 1900, 0).unwrap();
    assert!(text.contains("Year: 1900"));
    assert!(text.contains("January"));
    assert!(text.contains("6.00℃"));
}

#[test]
fn test_hover_text_rounds_like_page_script() {
    let dataset = Dataset::new(8.0, vec![MonthlyVariance::new(1900, 1, 0.125)]);
    let chart = HeatMap::build(&dataset, &ChartConfig::default()).unwrap();
    let text = hover_text(&chart, 1900, 0).unwrap();
    assert!(text.contains("8.13℃"), "{}", text);
}

#[test]
fn test_hover_text_for_missing_record() {
    let chart = scenario_chart();
    let err = hover_text(&chart, 1950, 3).unwrap_err();
    assert!(matches!(err, HeatmapError::ConfigError(_)));
    assert!(err.to_string().contains("April 1950"));
}
