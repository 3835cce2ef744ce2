use std::fmt::Write as _;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot().await;
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "territories": snapshot.index.len(),
        "worlds": snapshot.index.world_count(),
        "claims": state.claims.len(),
        "seq": snapshot.index.seq(),
        "snapshot_timestamp": snapshot.index.timestamp().map(|ts| ts.to_rfc3339()),
        "loaded_at": snapshot.loaded_at.map(|ts| ts.to_rfc3339()),
        "observability": {
            "territory_queries_total": observability.territory_queries_total,
            "tile_queries_total": observability.tile_queries_total,
            "group_queries_total": observability.group_queries_total,
            "overlay_queries_total": observability.overlay_queries_total,
            "registry_reloads_total": observability.registry_reloads_total,
            "registry_reload_failures_total": observability.registry_reload_failures_total,
        }
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let territory_count = state.snapshot().await.index.len();
    let claim_count = state.claims.len();
    let observability = state.observability.snapshot();

    let body = render_prometheus_metrics(territory_count, claim_count, observability);

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn write_metric(body: &mut String, name: &str, kind: &str, help: &str, value: u64) {
    let _ = writeln!(body, "# HELP {name} {help}");
    let _ = writeln!(body, "# TYPE {name} {kind}");
    let _ = writeln!(body, "{name} {value}");
}

fn render_prometheus_metrics(
    territory_count: usize,
    claim_count: usize,
    observability: ObservabilitySnapshot,
) -> String {
    let mut body = String::new();
    write_metric(
        &mut body,
        "kingdom_overlay_territories",
        "gauge",
        "Territories in the current registry snapshot.",
        territory_count as u64,
    );
    write_metric(
        &mut body,
        "kingdom_overlay_claims",
        "gauge",
        "Claimed tiles in the claims table.",
        claim_count as u64,
    );

    let counters = [
        (
            "kingdom_overlay_territory_queries_total",
            "Total territory lookups.",
            observability.territory_queries_total,
        ),
        (
            "kingdom_overlay_tile_queries_total",
            "Total tile highlight queries.",
            observability.tile_queries_total,
        ),
        (
            "kingdom_overlay_group_queries_total",
            "Total group highlight queries.",
            observability.group_queries_total,
        ),
        (
            "kingdom_overlay_overlay_queries_total",
            "Total render attribute queries.",
            observability.overlay_queries_total,
        ),
        (
            "kingdom_overlay_tint_requests_total",
            "Total tint requests.",
            observability.tint_requests_total,
        ),
        (
            "kingdom_overlay_text_filter_requests_total",
            "Total UI text filter requests.",
            observability.text_filter_requests_total,
        ),
        (
            "kingdom_overlay_text_suppressed_total",
            "UI messages suppressed by the text filter.",
            observability.text_suppressed_total,
        ),
        (
            "kingdom_overlay_registry_reloads_total",
            "Registry snapshots swapped in.",
            observability.registry_reloads_total,
        ),
        (
            "kingdom_overlay_registry_reload_failures_total",
            "Registry reloads that failed and kept the previous snapshot.",
            observability.registry_reload_failures_total,
        ),
    ];
    for (name, help, value) in counters {
        write_metric(&mut body, name, "counter", help, value);
    }

    body
}
