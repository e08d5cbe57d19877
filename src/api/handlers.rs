// API request handlers
// Author: Gabriel Demetrios Lafis

use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::block::{BlockNode, BlockTree, ColumnModel, MappingGenerator, TYPE_PLACEHOLDER};
use crate::export::ConfigExtractor;
use crate::http::{RequestSpec, SendError};
use crate::storage::PresetDraft;
use super::{ApiError, AppState, models::*};

/// Extract configuration documents from block forms
pub async fn preview_blocks(
    payload: web::Json<BlocksRequest>,
) -> Result<impl Responder, ApiError> {
    let tree = BlockTree::from_blocks(payload.into_inner().blocks);
    let configs = ConfigExtractor::extract_tree(&tree);

    Ok(HttpResponse::Ok().json(PreviewResponse { configs }))
}

/// Detect candidate columns of a block
pub async fn detect_columns(
    state: web::Data<AppState>,
    payload: web::Json<BlockNode>,
) -> Result<impl Responder, ApiError> {
    let block = payload.into_inner();
    let detection = ColumnModel::detect(&block, &state.collector);

    Ok(HttpResponse::Ok().json(DetectResponse {
        notice: detection.notice().map(|n| n.to_string()),
        fields: detection.fields,
        source: detection.source,
    }))
}

/// Generate mapping rows from a column selection
pub async fn generate_mapping(
    payload: web::Json<MappingRequest>,
) -> Result<impl Responder, ApiError> {
    let rows = MappingGenerator::generate(&payload.selected);

    Ok(HttpResponse::Ok().json(MappingResponse {
        rows,
        type_placeholder: TYPE_PLACEHOLDER.to_string(),
    }))
}

/// Select a saved preset on a block and return the updated block
pub async fn apply_saved_auth(
    state: web::Data<AppState>,
    payload: web::Json<ApplyAuthRequest>,
) -> Result<impl Responder, ApiError> {
    let req = payload.into_inner();
    let presets = state.presets.read().map_err(|_| {
        ApiError::InternalError("Failed to acquire read lock".to_string())
    })?;

    let preset = presets.get(req.preset_id).ok_or_else(|| {
        ApiError::NotFound(format!("Auth config {} not found", req.preset_id))
    })?;

    let mut block = req.block;
    block.apply_saved_auth(preset);

    Ok(HttpResponse::Ok().json(block))
}

/// List saved auth presets
pub async fn list_presets(
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    let presets = state.presets.read().map_err(|_| {
        ApiError::InternalError("Failed to acquire read lock".to_string())
    })?;

    let options = presets.dropdown_options()
        .into_iter()
        .map(|(id, label)| PresetOption { id, label })
        .collect();

    Ok(HttpResponse::Ok().json(PresetListResponse {
        presets: presets.list().to_vec(),
        options,
    }))
}

/// Save the auth section as a new preset
pub async fn create_preset(
    state: web::Data<AppState>,
    payload: web::Json<PresetDraft>,
) -> Result<impl Responder, ApiError> {
    let mut draft = payload.into_inner();
    let mut presets = state.presets.write().map_err(|_| {
        ApiError::InternalError("Failed to acquire write lock".to_string())
    })?;

    let preset = presets.save(&mut draft)?;

    Ok(HttpResponse::Created().json(preset))
}

/// Delete a preset; without `confirm=true` nothing happens
pub async fn delete_preset(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let mut presets = state.presets.write().map_err(|_| {
        ApiError::InternalError("Failed to acquire write lock".to_string())
    })?;

    if presets.get(id).is_none() {
        return Err(ApiError::NotFound(format!("Auth config {} not found", id)));
    }

    if !presets.delete(id, |_| query.confirm)? {
        return Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": false })));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Fire a demo request and report what came back
pub async fn send_request(
    state: web::Data<AppState>,
    payload: web::Json<RequestSpec>,
) -> Result<impl Responder, ApiError> {
    let spec = payload.into_inner();

    match state.executor.send(&spec).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(SendResponse {
            ok: true,
            meta: summary.meta_line(),
            body: summary.body,
        })),
        Err(err @ SendError::Transport(_)) => {
            info!("Demo request to {} could not be delivered", spec.url);
            Ok(HttpResponse::Ok().json(SendResponse {
                ok: false,
                meta: "ERROR".to_string(),
                body: err.to_string(),
            }))
        }
        Err(err) => Err(err.into()),
    }
}
