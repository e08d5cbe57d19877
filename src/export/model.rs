// Produced configuration document
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::block::ApiType;
use crate::data::TableRow;

/// Declarative configuration of one API-extraction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockConfig {
    pub condition: Option<String>,
    pub request: RequestConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub extraction: ExtractionConfig,
    pub columns: ColumnsConfig,
    pub mapping: MappingConfig,
    pub rules: RulesConfig,
    pub settings: SettingsConfig,
    pub children: Vec<BlockConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    pub method: String,
    pub url: String,
    pub saved_auth_config_id: Option<i64>,
    pub query_params: Vec<TableRow>,
    pub headers: Vec<TableRow>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    pub method: String,
    pub token_placement: String,
    pub token_prefix: String,
}

/// Pagination settings; the consumer interprets the fields by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset_param: String,
    pub limit_param: String,
    pub initial_offset: String,
    pub records_per_page: String,
    pub cursor_path: String,
    pub has_next_path: String,
    pub next_link_path: String,
    pub next_token_path: String,
    pub auto_paginate: bool,
    pub stop_on_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    pub root_path: String,
    pub data_path: String,
    pub id_field: String,
    pub flatten_nested: bool,
    pub handle_arrays: bool,
    pub sample_response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub rows: Vec<MappingRowConfig>,
}

/// Exported mapping row: the editable cells without form hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRowConfig {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub transform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    pub success_expression: String,
    pub error_message_path: String,
    pub record_count_path: String,
    pub min_records: String,
    pub max_records: String,
    pub required_fields: String,
    pub validate_schema: bool,
    pub pre_request_script: String,
    pub post_response_script: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    pub per_second: String,
    pub per_minute: String,
    pub cool_off_seconds: String,
    pub retry_on_codes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub incremental_key: String,
    pub sort_order: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsConfig {
    pub api_type: ApiType,
    pub auth_type: String,
    pub date_format: String,
    pub timezone: String,
    pub retry_limit: String,
    pub sleep_time_ms: String,
    pub rate: RateConfig,
    pub load: LoadConfig,
    pub response_format: String,
    pub ssl_disable: bool,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soap: Option<SoapConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql: Option<GraphqlConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapConfig {
    pub wsdl: String,
    pub action: String,
    pub envelope_template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlConfig {
    pub query: String,
    pub root_path: String,
    pub has_next_path: String,
    pub cursor_path: String,
}
