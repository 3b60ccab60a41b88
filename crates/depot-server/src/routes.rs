//! REST CRUD surface over the asset store.
//!
//! Plumbing around the store: none of these handlers trigger a realtime
//! broadcast — pushes are owned by the periodic mutation driver.

use axum::extract::{Path, State};
use axum::response::Json;
use depot_core::{Asset, AssetId, AssetKind};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::server::AppState;

/// Request body for `POST /api/assets`.
#[derive(Debug, Deserialize)]
pub struct CreateAsset {
    /// Optional client-supplied id; generated when absent.
    pub id: Option<String>,
    /// Display name, 3–50 characters.
    pub name: String,
    /// Asset kind, `"glb"` or `"gltf"`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request body for `PUT /api/assets/{id}`. Absent fields are left as-is;
/// any client-supplied `last_modified` is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateAsset {
    /// New display name.
    pub name: Option<String>,
    /// New asset kind.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// `GET /` — service info.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Depot asset catalog",
        "endpoints": {
            "GET /api/assets": "Get all assets",
            "POST /api/assets": "Create an asset",
            "GET /api/assets/{id}": "Get a specific asset",
            "PUT /api/assets/{id}": "Update an asset",
            "DELETE /api/assets/{id}": "Delete an asset",
            "GET /api/assets/stream": "Server-Sent Events stream",
            "WS /ws": "WebSocket connection for real-time updates",
        },
    }))
}

/// `GET /api/assets` — the full catalog.
pub async fn list_assets(State(state): State<AppState>) -> Json<Vec<Asset>> {
    Json(state.store.list())
}

/// `GET /api/assets/{id}`.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Asset>, ApiError> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| depot_core::DepotError::not_found(id).into())
}

/// `POST /api/assets` — create an asset.
///
/// Duplicate ids and validation failures surface as 400. The timestamp is
/// always set server-side.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(body): Json<CreateAsset>,
) -> Result<Json<Asset>, ApiError> {
    let kind: AssetKind = body.kind.parse()?;
    let id = body.id.map_or_else(AssetId::new, AssetId::from_string);
    let asset = Asset::new(id, body.name, kind)?;
    state.store.insert(asset.clone())?;
    debug!(id = %asset.id, "asset created");
    Ok(Json(asset))
}

/// `PUT /api/assets/{id}` — partial update, server-side timestamp refresh.
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAsset>,
) -> Result<Json<Asset>, ApiError> {
    let kind = body.kind.map(|k| k.parse::<AssetKind>()).transpose()?;
    let updated = state.store.update(&id, body.name, kind)?;
    debug!(id = %id, "asset updated");
    Ok(Json(updated))
}

/// `DELETE /api/assets/{id}`.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.remove(&id)?;
    debug!(id = %id, "asset deleted");
    Ok(Json(json!({
        "message": format!("Asset {id} deleted successfully"),
    })))
}
