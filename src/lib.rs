// Rust API Config Builder
// Author: Gabriel Demetrios Lafis

//! # Rust API Config Builder
//!
//! Builds declarative configurations describing how to call external APIs
//! (REST, SOAP, GraphQL), paginate, authenticate, extract fields and map them
//! into output columns. The configurations are handed to an external engine;
//! nothing here executes them.
//!
//! ## Features
//!
//! - Recursive configuration blocks, each with its own request, auth,
//!   pagination, extraction, column, mapping, rules and settings sections
//! - Column detection from sample or preview responses
//! - Mapping generation from selected columns
//! - Serialization of block trees into nested JSON documents
//! - Saved auth presets in memory or on disk
//! - A demo request executor and a REST API for browser front-ends
//!
//! ## Example
//!
//! ```rust
//! use rust_api_config_builder::{
//!     block::{ApiType, BlockTree},
//!     data::PathCollector,
//!     export::ConfigExtractor,
//! };
//!
//! let mut tree = BlockTree::new();
//! let root = tree.roots()[0].id();
//!
//! let block = tree.find_mut(root).unwrap();
//! block.request.url = "https://api.example.com/users".to_string();
//! block.extraction.sample_response = r#"{"data": [{"id": 1, "profile": {"name": "Ada"}}]}"#.to_string();
//! block.set_api_type(ApiType::Rest);
//!
//! // Detect columns and generate the mapping
//! block.detect_columns(&PathCollector::default());
//! block.generate_mapping();
//!
//! // Nest a follow-up request
//! tree.add_child(root).unwrap();
//!
//! let configs = ConfigExtractor::extract_tree(&tree);
//! assert_eq!(configs[0].columns.selected, vec!["data.id", "data.profile.name"]);
//! assert_eq!(configs[0].mapping.rows[1].target, "data_profile_name");
//! assert_eq!(configs[0].children.len(), 1);
//! ```

pub mod data;
pub mod block;
pub mod export;
pub mod storage;
pub mod http;
pub mod api;
pub mod utils;

// Re-export main types
pub use block::{BlockNode, BlockTree};
pub use export::{BlockConfig, ConfigExtractor};
pub use storage::{AuthPreset, PresetStore};
pub use api::Server;
pub use utils::Config;
