// Demo request description
// Author: Gabriel Demetrios Lafis

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::block::BlockNode;
use crate::data::{TableExtractor, TableRow};
use crate::storage::PresetDraft;

const DEFAULT_METHOD: &str = "GET";

/// A single request to fire at an endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSpec {
    pub method: String,
    pub url: String,
    pub params: Vec<TableRow>,
    pub headers: Vec<TableRow>,
    pub body: String,
}

impl RequestSpec {
    /// Describe the request of the auth section
    pub fn from_draft(draft: &PresetDraft) -> Self {
        RequestSpec {
            method: draft.method.clone(),
            url: draft.url.clone(),
            params: TableExtractor::extract(&draft.params),
            headers: TableExtractor::extract(&draft.headers),
            body: draft.body.clone(),
        }
    }

    /// Describe the request of a block
    pub fn from_block(block: &BlockNode) -> Self {
        RequestSpec {
            method: block.request.method.clone(),
            url: block.request.url.clone(),
            params: TableExtractor::extract(&block.request.query_params),
            headers: TableExtractor::extract(&block.request.headers),
            body: block.request.body.clone(),
        }
    }

    /// Upper-cased method, defaulting to GET
    pub fn method(&self) -> String {
        let method = self.method.trim();
        if method.is_empty() {
            DEFAULT_METHOD.to_string()
        } else {
            method.to_uppercase()
        }
    }

    /// URL with the query parameters appended.
    ///
    /// Only parameters with both a key and a value are added. A URL that does
    /// not parse is returned as typed.
    pub fn full_url(&self) -> String {
        let mut url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(_) => return self.url.clone(),
        };

        let params: Vec<&TableRow> = self.params.iter()
            .filter(|p| !p.key.is_empty() && !p.value.is_empty())
            .collect();

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in params {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        url.to_string()
    }

    /// Whether the body goes on the wire: never for GET/HEAD or when empty
    pub fn sends_body(&self) -> bool {
        let method = self.method();
        method != "GET" && method != "HEAD" && !self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_appends_complete_params() {
        let spec = RequestSpec {
            url: "https://api.example.com/users?active=1".to_string(),
            params: vec![
                TableRow::new("page", "2", ""),
                TableRow::new("empty", "", ""),
                TableRow::new("q", "a b", ""),
            ],
            ..Default::default()
        };

        assert_eq!(spec.full_url(), "https://api.example.com/users?active=1&page=2&q=a+b");
    }

    #[test]
    fn test_full_url_without_params_is_unchanged() {
        let spec = RequestSpec {
            url: "https://api.example.com/users".to_string(),
            ..Default::default()
        };
        assert_eq!(spec.full_url(), "https://api.example.com/users");
    }

    #[test]
    fn test_unparseable_url_is_kept() {
        let spec = RequestSpec {
            url: "not a url".to_string(),
            params: vec![TableRow::new("page", "2", "")],
            ..Default::default()
        };
        assert_eq!(spec.full_url(), "not a url");
    }

    #[test]
    fn test_body_rules() {
        let mut spec = RequestSpec {
            method: "post".to_string(),
            body: "{}".to_string(),
            ..Default::default()
        };
        assert!(spec.sends_body());

        spec.method = "get".to_string();
        assert!(!spec.sends_body());

        spec.method = "HEAD".to_string();
        assert!(!spec.sends_body());

        spec.method = "PUT".to_string();
        spec.body.clear();
        assert!(!spec.sends_body());
    }

    #[test]
    fn test_from_block() {
        let mut block = BlockNode::default();
        block.request.url = "https://api.example.com".to_string();
        block.request.headers = vec![vec!["Accept".into(), "application/json".into()], vec![]];

        let spec = RequestSpec::from_block(&block);
        assert_eq!(spec.method(), "GET");
        assert_eq!(spec.headers, vec![TableRow::new("Accept", "application/json", "")]);
    }
}
