// API request and response models
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::block::{BlockNode, DetectionSource, MappingRow};
use crate::data::FieldPath;
use crate::export::BlockConfig;
use crate::storage::AuthPreset;

/// Block forms to extract
#[derive(Debug, Clone, Deserialize)]
pub struct BlocksRequest {
    pub blocks: Vec<BlockNode>,
}

/// Extracted configuration documents
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub configs: Vec<BlockConfig>,
}

/// Detected columns for a block
#[derive(Debug, Clone, Serialize)]
pub struct DetectResponse {
    pub fields: Vec<FieldPath>,
    pub source: DetectionSource,
    pub notice: Option<String>,
}

/// Column selection to generate mapping rows from
#[derive(Debug, Clone, Deserialize)]
pub struct MappingRequest {
    pub selected: Vec<String>,
}

/// Generated mapping rows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResponse {
    pub rows: Vec<MappingRow>,
    pub type_placeholder: String,
}

/// Request to select a saved preset on a block
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyAuthRequest {
    pub block: BlockNode,
    pub preset_id: i64,
}

/// Preset selection list entry
#[derive(Debug, Clone, Serialize)]
pub struct PresetOption {
    pub id: i64,
    pub label: String,
}

/// Saved presets and their selection labels
#[derive(Debug, Clone, Serialize)]
pub struct PresetListResponse {
    pub presets: Vec<AuthPreset>,
    pub options: Vec<PresetOption>,
}

/// Query of a preset deletion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Outcome of a demo request, including transport failures
#[derive(Debug, Clone, Serialize)]
pub struct SendResponse {
    pub ok: bool,
    pub meta: String,
    pub body: String,
}
