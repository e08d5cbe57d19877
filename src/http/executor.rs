// Demo request executor
// Author: Gabriel Demetrios Lafis

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::block::BlockNode;
use super::{RequestSpec, SendError};

/// What came back from an endpoint, whatever its status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub status: u16,
    pub status_text: String,
    pub elapsed_ms: u64,
    pub content_type: String,
    /// Pretty-printed JSON for JSON responses, raw text otherwise
    pub body: String,
    /// Parsed body of JSON responses
    #[serde(skip)]
    pub json: Option<JsonValue>,
}

impl ResponseSummary {
    /// One-line status summary, e.g. `200 OK • 35ms`
    pub fn meta_line(&self) -> String {
        format!("{} {} \u{2022} {}ms", self.status, self.status_text, self.elapsed_ms)
    }
}

/// Fires one request per call. Calls are independent of each other.
#[derive(Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    /// Create an executor; a zero timeout means no timeout
    pub fn new(timeout_secs: u64) -> Result<Self, SendError> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|e| SendError::InvalidRequest(e.to_string()))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        let client = builder.build()
            .map_err(|e| SendError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(RequestExecutor { client })
    }

    fn build_headers(spec: &RequestSpec) -> Result<HeaderMap, SendError> {
        let mut headers = HeaderMap::new();

        for header in &spec.headers {
            let name = HeaderName::from_bytes(header.key.as_bytes())
                .map_err(|_| SendError::InvalidRequest(format!("Invalid header name: {}", header.key)))?;
            let value = HeaderValue::from_str(&header.value)
                .map_err(|_| SendError::InvalidRequest(format!("Invalid value for header {}", header.key)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Send a request and summarize the response.
    ///
    /// Any status code is a successful call; only failures to build or
    /// deliver the request are errors.
    pub async fn send(&self, spec: &RequestSpec) -> Result<ResponseSummary, SendError> {
        let method = Method::from_bytes(spec.method().as_bytes())
            .map_err(|_| SendError::InvalidRequest(format!("Invalid method: {}", spec.method)))?;
        let url = spec.full_url();

        let mut request = self.client
            .request(method.clone(), url.as_str())
            .headers(Self::build_headers(spec)?);

        if spec.sends_body() {
            request = request.body(spec.body.clone());
        }

        debug!("Sending {} {}", method, url);
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            SendError::Transport(e.to_string())
        })?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let status = response.status();
        let content_type = response.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let text = response.text().await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let json = if content_type.contains("application/json") {
            serde_json::from_str::<JsonValue>(&text).ok()
        } else {
            None
        };

        let body = match json {
            Some(ref value) => serde_json::to_string_pretty(value).unwrap_or(text),
            None => text,
        };

        info!("{} {} -> {} in {}ms", method, url, status.as_u16(), elapsed_ms);

        Ok(ResponseSummary {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            elapsed_ms,
            content_type,
            body,
            json,
        })
    }

    /// Send a block's request and cache a JSON response as its preview
    pub async fn refresh_preview(&self, block: &mut BlockNode) -> Result<ResponseSummary, SendError> {
        let summary = self.send(&RequestSpec::from_block(block)).await?;

        if let Some(ref value) = summary.json {
            block.set_preview_response(value.clone());
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_line() {
        let summary = ResponseSummary {
            status: 404,
            status_text: "Not Found".to_string(),
            elapsed_ms: 12,
            content_type: String::new(),
            body: String::new(),
            json: None,
        };

        assert_eq!(summary.meta_line(), "404 Not Found \u{2022} 12ms");
    }

    #[tokio::test]
    async fn test_invalid_header_is_rejected_before_sending() {
        let executor = RequestExecutor::new(5).unwrap();
        let spec = RequestSpec {
            url: "http://127.0.0.1:9/".to_string(),
            headers: vec![crate::data::TableRow::new("bad header", "x", "")],
            ..Default::default()
        };

        let err = executor.send(&spec).await.unwrap_err();
        assert!(matches!(err, SendError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        let executor = RequestExecutor::new(5).unwrap();
        let spec = RequestSpec {
            url: "http://127.0.0.1:1/".to_string(),
            ..Default::default()
        };

        let err = executor.send(&spec).await.unwrap_err();
        assert!(matches!(err, SendError::Transport(_)));
        assert!(err.to_string().contains("execute API calls in backend"));
    }
}
