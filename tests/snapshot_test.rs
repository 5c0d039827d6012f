//! Parser snapshots on disk: load, edit, save

#![cfg(not(target_arch = "wasm32"))]

mod common;

use std::io::Write;

use common::{children, OutlineBuilder};
use outline_wasm::models::{DocumentSnapshot, NodeType};
use outline_wasm::store::DocRead;
use outline_wasm::tree::{SequentialIds, TreeOp};
use outline_wasm::{Editor, EditorConfig};
use serde_json::json;
use tempfile::NamedTempFile;

fn parser_output() -> serde_json::Value {
    json!({
        "rootId": "doc",
        "nodes": {
            "doc": { "id": "doc", "type": "none", "children": ["intro", "chart"] },
            "intro": {
                "id": "intro",
                "type": "text",
                "parentId": "doc",
                "segments": ["s1", "s2"],
                "attr": { "selfClass": "lead", "fontSize": 14 }
            },
            "chart": { "id": "chart", "type": "mermaid", "parentId": "doc" }
        },
        "segments": {
            "s1": { "id": "s1", "parentNodeId": "intro", "type": "text", "textRaw": "See " },
            "s2": {
                "id": "s2",
                "parentNodeId": "intro",
                "type": "ref-bib",
                "textRaw": "[1]",
                "bibKeys": ["knuth84"]
            }
        },
        "assets": { "img-1": { "src": "figure.png", "width": 320 } },
        "refs": { "knuth84": { "title": "Literate Programming" } }
    })
}

fn write_snapshot(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(value).unwrap().as_bytes())
        .unwrap();
    file
}

fn read_snapshot(file: &NamedTempFile) -> DocumentSnapshot {
    let text = std::fs::read_to_string(file.path()).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_load_parser_output_from_disk() {
    let file = write_snapshot(&parser_output());
    let mut editor = Editor::default();
    editor.load(read_snapshot(&file)).unwrap();

    let doc = editor.document();
    assert_eq!(doc.root_id(), "doc");
    assert_eq!(doc.node_text("intro"), "See [1]");
    // unknown node kinds load and stay in the tree
    assert_eq!(doc.node("chart").unwrap().kind, NodeType::Unknown("mermaid".to_string()));
    assert_eq!(children(doc, "doc"), vec!["intro", "chart"]);
}

#[test]
fn test_save_carries_tables_and_directives_through() {
    let file = write_snapshot(&parser_output());
    let mut editor = Editor::with_ids(EditorConfig::default(), Box::new(SequentialIds::new()));
    editor.load(read_snapshot(&file)).unwrap();
    editor
        .apply_op(&TreeOp::UpdateSegmentText {
            segment_id: "s1".to_string(),
            text: "Read ".to_string(),
        })
        .unwrap();

    let saved = NamedTempFile::new().unwrap();
    std::fs::write(saved.path(), serde_json::to_vec(&editor.snapshot()).unwrap()).unwrap();
    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(saved.path()).unwrap()).unwrap();

    assert_eq!(value["assets"], parser_output()["assets"]);
    assert_eq!(value["refs"], parser_output()["refs"]);
    assert_eq!(value["nodes"]["intro"]["attr"]["fontSize"], 14);
    assert_eq!(value["segments"]["s1"]["textRaw"], "Read ");
    assert_eq!(value["segments"]["s2"]["bibKeys"], json!(["knuth84"]));
}

#[test]
fn test_saved_snapshot_reloads_identically() {
    let mut editor = Editor::with_ids(EditorConfig::default(), Box::new(SequentialIds::new()));
    editor
        .load(
            OutlineBuilder::new()
                .text("root", "a", "first")
                .text("root", "b", "second")
                .snapshot(),
        )
        .unwrap();
    editor
        .apply_op(&TreeOp::Indent {
            node_id: "b".to_string(),
        })
        .unwrap();
    editor
        .apply_op(&TreeOp::Split {
            node_id: "a".to_string(),
            position: 3,
        })
        .unwrap();
    let saved = editor.snapshot();

    let file = write_snapshot(&serde_json::to_value(&saved).unwrap());
    let mut reopened = Editor::default();
    reopened.load(read_snapshot(&file)).unwrap();

    assert_eq!(reopened.snapshot(), saved);
    assert_eq!(reopened.document().node_text("node-1"), "st");
}

#[test]
fn test_malformed_file_is_rejected() {
    let mut value = parser_output();
    value["nodes"]["intro"]["segments"] = json!(["s1", "missing"]);
    let file = write_snapshot(&value);

    let mut editor = Editor::default();
    assert!(editor.load(read_snapshot(&file)).is_err());
}

#[test]
fn test_save_keeps_tags_and_fields_it_does_not_model() {
    let mut value = parser_output();
    value["nodes"]["quote"] = json!({ "id": "quote", "type": "quote-block", "parentId": "doc" });
    value["nodes"]["doc"]["children"] = json!(["intro", "chart", "quote"]);
    value["segments"]["s1"]["lang"] = json!("en");
    value["segments"]["s1"]["marks"] = json!([{ "kind": "bold", "from": 0, "to": 3 }]);
    let file = write_snapshot(&value);

    let mut editor = Editor::default();
    editor.load(read_snapshot(&file)).unwrap();
    let saved = serde_json::to_value(editor.snapshot()).unwrap();

    assert_eq!(saved["nodes"]["quote"]["type"], "quote-block");
    assert_eq!(saved["nodes"]["chart"]["type"], "mermaid");
    assert_eq!(saved["nodes"]["doc"]["type"], "none");
    assert_eq!(saved["segments"]["s1"]["lang"], "en");
    assert_eq!(saved["segments"]["s1"]["marks"], value["segments"]["s1"]["marks"]);

    // a second load of the saved file reads back the same document
    let file = write_snapshot(&saved);
    let mut reopened = Editor::default();
    reopened.load(read_snapshot(&file)).unwrap();
    assert_eq!(reopened.snapshot(), editor.snapshot());
}
