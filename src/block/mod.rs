// Block module: the recursive configuration block and its form state
// Author: Gabriel Demetrios Lafis

mod columns;
mod mapping;
mod tree;

pub use columns::*;
pub use mapping::*;
pub use tree::*;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::{blank_row, InputRow, PathCollector};
use crate::storage::AuthPreset;

/// Identifier of a block within a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// Protocol family of the API a block calls
///
/// Form values are read leniently: case is ignored and anything unknown,
/// including an empty selection, is REST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ApiType {
    #[default]
    Rest,
    Soap,
    Graphql,
}

impl ApiType {
    /// Get the wire name of the API type
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Rest => "rest",
            ApiType::Soap => "soap",
            ApiType::Graphql => "graphql",
        }
    }

    /// Parse an API type, falling back to REST for unknown or empty input
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "soap" => ApiType::Soap,
            "graphql" => ApiType::Graphql,
            _ => ApiType::Rest,
        }
    }
}

impl From<String> for ApiType {
    fn from(s: String) -> Self {
        ApiType::parse(&s)
    }
}

/// One of the editable key/value tables of the request section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTable {
    Params,
    Headers,
}

impl RequestTable {
    /// Parse a table name: `params` or `headers`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "params" | "query" => Some(RequestTable::Params),
            "headers" => Some(RequestTable::Headers),
            _ => None,
        }
    }
}

impl fmt::Display for RequestTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestTable::Params => write!(f, "query params"),
            RequestTable::Headers => write!(f, "headers"),
        }
    }
}

/// Request section of a block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestForm {
    pub method: String,
    pub url: String,
    pub saved_auth_config_id: Option<i64>,
    pub query_params: Vec<InputRow>,
    pub headers: Vec<InputRow>,
    pub body: String,
}

/// Inline auth section of a block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthForm {
    pub method: String,
    pub token_placement: String,
    pub token_prefix: String,
}

/// Pagination section. All strategies' fields coexist; `type` selects one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationForm {
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

/// Extraction section of a block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionForm {
    pub root_path: String,
    pub data_path: String,
    pub id_field: String,
    pub flatten_nested: bool,
    pub handle_arrays: bool,
    pub sample_response: String,
}

/// Validation rules and scripts, kept as opaque text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesForm {
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

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateForm {
    pub per_second: String,
    pub per_minute: String,
    pub cool_off_seconds: String,
    pub retry_on_codes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub incremental_key: String,
    pub sort_order: String,
}

/// Settings section of a block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsForm {
    pub api_type: ApiType,
    pub auth_type: String,
    pub date_format: String,
    pub timezone: String,
    pub retry_limit: String,
    pub sleep_time_ms: String,
    pub rate: RateForm,
    pub load: LoadForm,
    pub response_format: String,
    pub ssl_disable: bool,
    pub active: bool,
}

/// SOAP-specific section, applicable when the API type is SOAP
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoapForm {
    pub wsdl: String,
    pub action: String,
    pub envelope_template: String,
}

/// GraphQL-specific section, applicable when the API type is GraphQL
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphqlForm {
    pub query: String,
    pub root_path: String,
    pub has_next_path: String,
    pub cursor_path: String,
}

/// One configurable API-extraction step and its nested sub-steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockNode {
    id: BlockId,
    removable: bool,
    pub condition: String,
    pub request: RequestForm,
    pub auth: AuthForm,
    pub pagination: PaginationForm,
    pub extraction: ExtractionForm,
    pub columns: ColumnModel,
    pub mapping: Vec<MappingRow>,
    pub rules: RulesForm,
    pub settings: SettingsForm,
    pub soap: SoapForm,
    pub graphql: GraphqlForm,
    pub preview_response: Option<JsonValue>,
    children: Vec<BlockNode>,
}

impl BlockNode {
    /// Create a new empty block
    pub fn new(id: BlockId, removable: bool) -> Self {
        BlockNode {
            id,
            removable,
            ..Default::default()
        }
    }

    /// Get the block id
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Whether the block offers a remove action
    pub fn is_removable(&self) -> bool {
        self.removable
    }

    /// Get the direct children of the block
    pub fn children(&self) -> &[BlockNode] {
        &self.children
    }

    /// Append a nested block with the given id and return it
    pub fn add_child(&mut self, id: BlockId) -> &mut BlockNode {
        self.children.push(BlockNode::new(id, true));
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    /// Find a block in this subtree by id
    pub fn find(&self, id: BlockId) -> Option<&BlockNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Find a block in this subtree by id, mutably
    pub fn find_mut(&mut self, id: BlockId) -> Option<&mut BlockNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Detach a removable descendant and its subtree
    pub(crate) fn detach(&mut self, id: BlockId) -> Option<BlockNode> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            if !self.children[index].removable {
                return None;
            }
            return Some(self.children.remove(index));
        }
        self.children.iter_mut().find_map(|child| child.detach(id))
    }

    /// Number of blocks in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    /// Switch the API type. SOAP and GraphQL values are kept when switching away.
    pub fn set_api_type(&mut self, api_type: ApiType) {
        self.settings.api_type = api_type;
    }

    /// Whether the SOAP section applies to this block
    pub fn soap_visible(&self) -> bool {
        self.settings.api_type == ApiType::Soap
    }

    /// Whether the GraphQL section applies to this block
    pub fn graphql_visible(&self) -> bool {
        self.settings.api_type == ApiType::Graphql
    }

    /// Select a saved auth preset. The URL is only filled in when empty.
    pub fn apply_saved_auth(&mut self, preset: &AuthPreset) {
        self.request.saved_auth_config_id = Some(preset.id);
        if self.request.url.is_empty() {
            self.request.url = preset.url.clone();
        }
    }

    /// Append a blank query parameter row
    pub fn add_param_row(&mut self) {
        self.request.query_params.push(blank_row());
    }

    /// Append a blank header row
    pub fn add_header_row(&mut self) {
        self.request.headers.push(blank_row());
    }

    /// Append imported rows to a request table. Rows whose cells are all
    /// blank are skipped; returns how many rows were added.
    pub fn append_rows(&mut self, table: RequestTable, rows: Vec<InputRow>) -> usize {
        let target = match table {
            RequestTable::Params => &mut self.request.query_params,
            RequestTable::Headers => &mut self.request.headers,
        };

        let before = target.len();
        target.extend(rows.into_iter().filter(|cells| cells.iter().any(|c| !c.trim().is_empty())));
        target.len() - before
    }

    /// Cache a live-preview response for column detection
    pub fn set_preview_response(&mut self, response: JsonValue) {
        self.preview_response = Some(response);
    }

    /// Detect candidate columns and render them into the column list
    pub fn detect_columns(&mut self, collector: &PathCollector) -> Detection {
        let detection = ColumnModel::detect(self, collector);
        self.columns.render(&detection.fields);
        detection
    }

    /// Replace the mapping rows with rows generated from the selected columns
    pub fn generate_mapping(&mut self) {
        self.mapping = MappingGenerator::generate(&self.columns.selected());
    }

    pub(crate) fn set_removable(&mut self, removable: bool) {
        self.removable = removable;
    }

    pub(crate) fn renumber(&mut self, next_id: &mut u64) {
        self.id = BlockId(*next_id);
        *next_id += 1;
        for child in &mut self.children {
            child.removable = true;
            child.renumber(next_id);
        }
    }
}
