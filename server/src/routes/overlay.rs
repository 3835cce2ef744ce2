use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use kingdom_overlay_shared::{RenderAttributes, Territory, tint_buffer};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

const MAX_WORLD_ID_LEN: usize = 128;

/// Buffer used for `/api/overlay` when the caller has no colors of its own:
/// one opaque black entry.
const DEFAULT_TILE_BUFFER: [u32; 1] = [0xFF00_0000];

#[derive(Debug, Deserialize)]
pub struct CoordQuery {
    pub world: String,
    pub x: i32,
    pub z: i32,
    /// Host's own highlight verdict for this tile or group.
    #[serde(default)]
    pub base: bool,
}

#[derive(Debug, Serialize)]
pub struct TerritoryResponse {
    pub territory: Option<Territory>,
}

#[derive(Debug, Serialize)]
pub struct TileResponse {
    pub highlighted: bool,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub highlighted: bool,
    pub hash: u32,
}

#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    pub highlighted: bool,
    pub attributes: Option<RenderAttributes>,
    pub colors: Option<[u32; 5]>,
    pub subtle: Option<String>,
    pub blunt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TintRequest {
    #[serde(default)]
    pub colors: Option<Vec<u32>>,
    pub owner_color: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct TintResponse {
    pub colors: Option<Vec<u32>>,
}

pub async fn get_territory(
    State(state): State<AppState>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<TerritoryResponse>, StatusCode> {
    let world = normalize_world(&query.world)?;
    state.observability.record_territory_query();

    let snapshot = state.snapshot().await;
    let territory = snapshot.index.territory_at(world, query.x, query.z).cloned();
    Ok(Json(TerritoryResponse { territory }))
}

pub async fn get_tile(
    State(state): State<AppState>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<TileResponse>, StatusCode> {
    let world = normalize_world(&query.world)?;
    state.observability.record_tile_query();

    let snapshot = state.snapshot().await;
    let highlighted = state
        .overlay(&snapshot)
        .highlighter()
        .is_tile_highlighted(world, query.x, query.z, query.base);
    Ok(Json(TileResponse { highlighted }))
}

pub async fn get_group(
    State(state): State<AppState>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<GroupResponse>, StatusCode> {
    let world = normalize_world(&query.world)?;
    state.observability.record_group_query();

    let snapshot = state.snapshot().await;
    let highlighted = state
        .overlay(&snapshot)
        .highlighter()
        .does_group_have_highlights(world, query.x, query.z, query.base);
    let hash = snapshot.index.group_hash(world, query.x, query.z);
    Ok(Json(GroupResponse { highlighted, hash }))
}

pub async fn get_overlay(
    State(state): State<AppState>,
    Query(query): Query<CoordQuery>,
) -> Result<Json<OverlayResponse>, StatusCode> {
    let world = normalize_world(&query.world)?;
    state.observability.record_overlay_query();

    let snapshot = state.snapshot().await;
    let overlay = state.overlay(&snapshot);
    let (x, z) = (query.x, query.z);
    Ok(Json(OverlayResponse {
        highlighted: overlay
            .highlighter()
            .is_tile_highlighted(world, x, z, query.base),
        attributes: overlay.render_attributes(world, x, z, Some(DEFAULT_TILE_BUFFER.to_vec())),
        colors: overlay.colors(world, x, z),
        subtle: overlay.subtle_tooltip(world, x, z),
        blunt: overlay.blunt_tooltip(world, x, z),
    }))
}

pub async fn post_tint(
    State(state): State<AppState>,
    Json(request): Json<TintRequest>,
) -> Json<TintResponse> {
    state.observability.record_tint_request();
    Json(TintResponse {
        colors: tint_buffer(request.colors, &request.owner_color),
    })
}

fn normalize_world(world: &str) -> Result<&str, StatusCode> {
    let trimmed = world.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_WORLD_ID_LEN {
        return Err(StatusCode::BAD_REQUEST);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(trimmed)
}
