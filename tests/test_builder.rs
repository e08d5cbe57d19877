// Block builder tests
// Author: Gabriel Demetrios Lafis

use rust_api_config_builder::{
    block::{ApiType, BlockTree, DetectionSource, RequestTable, TYPE_PLACEHOLDER},
    data::{PathCollector, TableExtractor, TableRow},
    export::ConfigExtractor,
    storage::{FileStorage, MemoryStorage, PresetDraft, PresetStore},
};
use serde_json::json;

#[test]
fn test_detect_and_map_workflow() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let block = tree.find_mut(root).unwrap();

    block.extraction.sample_response = json!({
        "meta": {"page": 1},
        "users": [
            {"id": 1, "name": "Alice", "tags": ["a"]},
            {"id": 2, "name": "Bob", "email": "bob@example.com"}
        ]
    })
    .to_string();

    let detection = block.detect_columns(&PathCollector::default());
    assert_eq!(detection.source, DetectionSource::Sample);
    // arrays of scalars have no object fields to descend into
    assert_eq!(detection.fields, vec!["meta.page", "users.id", "users.name"]);

    block.columns.set_selected("meta.page", false);
    block.columns.add_manual("users.email");
    block.generate_mapping();

    let config = ConfigExtractor::extract(block);
    assert_eq!(config.columns.selected, vec!["users.id", "users.name", "users.email"]);

    let targets: Vec<&str> = config.mapping.rows.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["users_id", "users_name", "users_email"]);
}

#[test]
fn test_generate_mapping_replaces_previous_rows() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let block = tree.find_mut(root).unwrap();

    block.columns.render(&["a".to_string(), "b".to_string()]);
    block.generate_mapping();
    assert_eq!(block.mapping.len(), 2);

    block.columns.clear();
    block.generate_mapping();
    assert_eq!(block.mapping.len(), 1);
    assert!(block.mapping[0].source.is_empty());

    // the placeholder row never reaches the document
    assert!(ConfigExtractor::extract(block).mapping.rows.is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let child = tree.add_child(root).unwrap();
    tree.add_child(child).unwrap();

    let block = tree.find_mut(root).unwrap();
    block.request.url = "https://api.example.com/orders".to_string();
    block.set_api_type(ApiType::Graphql);
    block.graphql.query = "{ orders { id } }".to_string();

    let first = serde_json::to_value(ConfigExtractor::extract_tree(&tree)).unwrap();
    let second = serde_json::to_value(ConfigExtractor::extract_tree(&tree)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_api_type_extensions() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();

    let cases = [
        (ApiType::Soap, true, false),
        (ApiType::Graphql, false, true),
        (ApiType::Rest, false, false),
    ];

    for (api_type, has_soap, has_graphql) in cases {
        let block = tree.find_mut(root).unwrap();
        block.set_api_type(api_type);

        let value = serde_json::to_value(ConfigExtractor::extract(block)).unwrap();
        assert_eq!(value["settings"]["apiType"], json!(api_type.as_str()));
        assert_eq!(value["settings"].get("soap").is_some(), has_soap);
        assert_eq!(value["settings"].get("graphql").is_some(), has_graphql);
    }
}

#[test]
fn test_soap_values_survive_switching_back() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let block = tree.find_mut(root).unwrap();

    block.set_api_type(ApiType::Soap);
    block.soap.action = "GetOrders".to_string();
    block.set_api_type(ApiType::Rest);
    block.set_api_type(ApiType::Soap);

    let config = ConfigExtractor::extract(block);
    assert_eq!(config.settings.soap.unwrap().action, "GetOrders");
}

#[test]
fn test_removed_subtree_leaves_the_document() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let kept = tree.add_child(root).unwrap();
    let dropped = tree.add_child(root).unwrap();
    tree.add_child(dropped).unwrap();

    tree.find_mut(kept).unwrap().request.url = "https://api.example.com/kept".to_string();
    tree.find_mut(dropped).unwrap().request.url = "https://api.example.com/dropped".to_string();

    assert!(tree.remove(dropped, |_| true).is_some());

    let config = ConfigExtractor::extract(tree.find(root).unwrap());
    assert_eq!(config.children.len(), 1);
    assert_eq!(config.children[0].request.url, "https://api.example.com/kept");
}

#[test]
fn test_children_keep_order_and_depth() {
    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let mut parent = root;

    for depth in 0..10 {
        let child = tree.add_child(parent).unwrap();
        tree.find_mut(child).unwrap().condition = format!("depth == {}", depth);
        parent = child;
    }

    let mut config = ConfigExtractor::extract(tree.find(root).unwrap());
    for depth in 0..10 {
        assert_eq!(config.children.len(), 1);
        config = config.children.remove(0);
        assert_eq!(config.condition, Some(format!("depth == {}", depth)));
    }
    assert!(config.children.is_empty());
}

#[test]
fn test_saved_auth_only_fills_empty_url() {
    let mut presets = PresetStore::open(MemoryStorage::new()).unwrap();
    let mut draft = PresetDraft {
        name: "login".to_string(),
        method: "POST".to_string(),
        url: "https://auth.example.com/token".to_string(),
        ..Default::default()
    };
    let preset = presets.save(&mut draft).unwrap();

    let mut tree = BlockTree::new();
    let first = tree.roots()[0].id();
    let second = tree.add_root();
    tree.find_mut(second).unwrap().request.url = "https://api.example.com/users".to_string();

    tree.find_mut(first).unwrap().apply_saved_auth(&preset);
    tree.find_mut(second).unwrap().apply_saved_auth(&preset);

    let configs = ConfigExtractor::extract_tree(&tree);
    assert_eq!(configs[0].request.url, "https://auth.example.com/token");
    assert_eq!(configs[1].request.url, "https://api.example.com/users");
    assert_eq!(configs[1].request.saved_auth_config_id, Some(preset.id));
}

#[test]
fn test_workspace_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.json");

    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let child = tree.add_child(root).unwrap();
    let block = tree.find_mut(child).unwrap();
    block.request.method = "POST".to_string();
    block.add_header_row();
    block.request.headers[0][0] = "Accept".to_string();

    tree.save_workspace(&path).unwrap();
    let loaded = BlockTree::load_workspace(&path).unwrap();

    assert_eq!(
        ConfigExtractor::extract_tree(&loaded),
        ConfigExtractor::extract_tree(&tree)
    );
}

#[test]
fn test_presets_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut presets = PresetStore::open(FileStorage::new(dir.path()).unwrap()).unwrap();
    let saved = presets.save(&mut PresetDraft {
        name: "login".to_string(),
        ..Default::default()
    }).unwrap();

    let reopened = PresetStore::open(FileStorage::new(dir.path()).unwrap()).unwrap();
    assert_eq!(reopened.get(saved.id), Some(&saved));
    assert!(dir.path().join("savedAuthAPIs.json").exists());
}

#[test]
fn test_workspace_keeps_mapping_hints() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.json");

    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let block = tree.find_mut(root).unwrap();
    block.columns.render(&["user.id".to_string()]);
    block.generate_mapping();

    tree.save_workspace(&path).unwrap();
    let loaded = BlockTree::load_workspace(&path).unwrap();

    let row = &loaded.find(root).unwrap().mapping[0];
    assert_eq!(row.type_hint.as_deref(), Some(TYPE_PLACEHOLDER));

    // the exported document carries only the editable cells
    let value = serde_json::to_value(ConfigExtractor::extract(loaded.find(root).unwrap())).unwrap();
    assert!(value["mapping"]["rows"][0].get("typeHint").is_none());
}

#[test]
fn test_csv_rows_imported_into_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.json");

    let mut tree = BlockTree::new();
    let root = tree.roots()[0].id();
    let child = tree.add_child(root).unwrap();
    tree.save_workspace(&path).unwrap();

    let text = "key,value,description\nAccept, application/json ,media type\n,,\nX-Trace,1\n";
    let rows = TableExtractor::rows_from_csv(text.as_bytes(), true).unwrap();

    let mut loaded = BlockTree::load_workspace(&path).unwrap();
    let added = loaded.find_mut(child).unwrap().append_rows(RequestTable::Headers, rows);
    assert_eq!(added, 2);
    loaded.save_workspace(&path).unwrap();

    let reloaded = BlockTree::load_workspace(&path).unwrap();
    let config = ConfigExtractor::extract(reloaded.find(child).unwrap());
    assert_eq!(
        config.request.headers,
        vec![
            TableRow::new("Accept", "application/json", "media type"),
            TableRow::new("X-Trace", "1", ""),
        ]
    );
}
