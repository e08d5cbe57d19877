// Export module: serializes block trees into configuration documents
// Author: Gabriel Demetrios Lafis

mod model;

pub use model::*;

use crate::block::{ApiType, BlockNode, BlockTree, MappingRow};
use crate::data::{DataError, TableExtractor};

const DEFAULT_METHOD: &str = "GET";
const DEFAULT_PAGINATION: &str = "none";
const DEFAULT_LOAD_TYPE: &str = "full";
const DEFAULT_SORT_ORDER: &str = "asc";

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Reads block form state into [`BlockConfig`] documents.
///
/// Extraction is pure: it never mutates the blocks and never fails, so it can
/// back a live preview. Blocks are visited in pre-order.
pub struct ConfigExtractor;

impl ConfigExtractor {
    /// Extract a block and its subtree
    pub fn extract(block: &BlockNode) -> BlockConfig {
        let request = &block.request;
        let pagination = &block.pagination;
        let extraction = &block.extraction;
        let rules = &block.rules;
        let settings = &block.settings;

        let mut config = BlockConfig {
            condition: Some(block.condition.clone()).filter(|c| !c.is_empty()),
            request: RequestConfig {
                method: or_default(&request.method, DEFAULT_METHOD),
                url: request.url.clone(),
                saved_auth_config_id: request.saved_auth_config_id.filter(|id| *id != 0),
                query_params: TableExtractor::extract(&request.query_params),
                headers: TableExtractor::extract(&request.headers),
                body: request.body.clone(),
            },
            auth: AuthConfig {
                method: block.auth.method.clone(),
                token_placement: block.auth.token_placement.clone(),
                token_prefix: block.auth.token_prefix.clone(),
            },
            pagination: PaginationConfig {
                kind: or_default(&pagination.kind, DEFAULT_PAGINATION),
                offset_param: pagination.offset_param.clone(),
                limit_param: pagination.limit_param.clone(),
                initial_offset: pagination.initial_offset.clone(),
                records_per_page: pagination.records_per_page.clone(),
                cursor_path: pagination.cursor_path.clone(),
                has_next_path: pagination.has_next_path.clone(),
                next_link_path: pagination.next_link_path.clone(),
                next_token_path: pagination.next_token_path.clone(),
                auto_paginate: pagination.auto_paginate,
                stop_on_empty: pagination.stop_on_empty,
            },
            extraction: ExtractionConfig {
                root_path: extraction.root_path.clone(),
                data_path: extraction.data_path.clone(),
                id_field: extraction.id_field.clone(),
                flatten_nested: extraction.flatten_nested,
                handle_arrays: extraction.handle_arrays,
                sample_response: extraction.sample_response.clone(),
            },
            columns: ColumnsConfig {
                selected: block.columns.selected(),
            },
            mapping: MappingConfig {
                rows: Self::mapping_rows(&block.mapping),
            },
            rules: RulesConfig {
                success_expression: rules.success_expression.clone(),
                error_message_path: rules.error_message_path.clone(),
                record_count_path: rules.record_count_path.clone(),
                min_records: rules.min_records.clone(),
                max_records: rules.max_records.clone(),
                required_fields: rules.required_fields.clone(),
                validate_schema: rules.validate_schema,
                pre_request_script: rules.pre_request_script.clone(),
                post_response_script: rules.post_response_script.clone(),
            },
            settings: SettingsConfig {
                api_type: settings.api_type,
                auth_type: settings.auth_type.clone(),
                date_format: settings.date_format.clone(),
                timezone: settings.timezone.clone(),
                retry_limit: settings.retry_limit.clone(),
                sleep_time_ms: settings.sleep_time_ms.clone(),
                rate: RateConfig {
                    per_second: settings.rate.per_second.clone(),
                    per_minute: settings.rate.per_minute.clone(),
                    cool_off_seconds: settings.rate.cool_off_seconds.clone(),
                    retry_on_codes: settings.rate.retry_on_codes.clone(),
                },
                load: LoadConfig {
                    kind: or_default(&settings.load.kind, DEFAULT_LOAD_TYPE),
                    incremental_key: settings.load.incremental_key.clone(),
                    sort_order: or_default(&settings.load.sort_order, DEFAULT_SORT_ORDER),
                },
                response_format: settings.response_format.clone(),
                ssl_disable: settings.ssl_disable,
                active: settings.active,
                soap: None,
                graphql: None,
            },
            children: Vec::new(),
        };

        match settings.api_type {
            ApiType::Soap => {
                config.settings.soap = Some(SoapConfig {
                    wsdl: block.soap.wsdl.clone(),
                    action: block.soap.action.clone(),
                    envelope_template: block.soap.envelope_template.clone(),
                });
            }
            ApiType::Graphql => {
                config.settings.graphql = Some(GraphqlConfig {
                    query: block.graphql.query.clone(),
                    root_path: block.graphql.root_path.clone(),
                    has_next_path: block.graphql.has_next_path.clone(),
                    cursor_path: block.graphql.cursor_path.clone(),
                });
            }
            ApiType::Rest => {}
        }

        config.children = block.children().iter().map(Self::extract).collect();

        config
    }

    /// Extract every root block of a tree
    pub fn extract_tree(tree: &BlockTree) -> Vec<BlockConfig> {
        tree.roots().iter().map(Self::extract).collect()
    }

    /// Extract a block and render it as pretty-printed JSON
    pub fn to_json_pretty(block: &BlockNode) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(&Self::extract(block))?)
    }

    /// Rows with a blank source are dropped; the remaining cells are trimmed
    fn mapping_rows(rows: &[MappingRow]) -> Vec<MappingRowConfig> {
        rows.iter()
            .filter(|row| !row.source.trim().is_empty())
            .map(|row| MappingRowConfig {
                source: row.source.trim().to_string(),
                target: row.target.trim().to_string(),
                type_: row.type_.trim().to_string(),
                transform: row.transform.trim().to_string(),
            })
            .collect()
    }
}
