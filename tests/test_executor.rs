// Demo request executor tests
// Author: Gabriel Demetrios Lafis

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use rust_api_config_builder::{
    block::BlockTree,
    data::TableRow,
    http::{RequestExecutor, RequestSpec},
};

/// Serve one canned response and hand back the raw request
fn serve_once(status: &str, content_type: &str, body: &str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).unwrap();
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&buf[..n]).to_string()
    });

    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn test_error_status_is_not_a_failure() {
    let (base, handle) = serve_once("404 Not Found", "application/json", r#"{"error":"missing"}"#);

    let spec = RequestSpec {
        method: "get".to_string(),
        url: format!("{}/users", base),
        params: vec![
            TableRow::new("page", "2", ""),
            TableRow::new("skip", "", "no value"),
        ],
        headers: vec![TableRow::new("X-Api-Key", "secret", "")],
        body: String::new(),
    };

    let summary = RequestExecutor::new(5).unwrap().send(&spec).await.unwrap();
    let request = handle.join().unwrap();

    assert_eq!(summary.status, 404);
    assert!(summary.meta_line().starts_with("404 Not Found"));
    assert_eq!(summary.body, "{\n  \"error\": \"missing\"\n}");

    assert!(request.starts_with("GET /users?page=2 HTTP/1.1"));
    assert!(request.to_lowercase().contains("x-api-key: secret"));
}

#[tokio::test]
async fn test_plain_text_body_is_kept() {
    let (base, handle) = serve_once("200 OK", "text/plain", "pong");

    let spec = RequestSpec {
        url: base,
        ..Default::default()
    };

    let summary = RequestExecutor::new(5).unwrap().send(&spec).await.unwrap();
    handle.join().unwrap();

    assert_eq!(summary.body, "pong");
    assert!(summary.json.is_none());
}

#[tokio::test]
async fn test_refresh_preview_feeds_detection() {
    let (base, handle) = serve_once(
        "200 OK",
        "application/json; charset=utf-8",
        r#"{"results": [{"id": 7, "owner": {"login": "octo"}}]}"#,
    );

    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let block = tree.find_mut(root).unwrap();
    block.request.url = format!("{}/search", base);

    RequestExecutor::new(5).unwrap().refresh_preview(block).await.unwrap();
    handle.join().unwrap();

    let detection = block.detect_columns(&Default::default());
    assert_eq!(detection.fields, vec!["results.id", "results.owner.login"]);
}
