//! Bullet alignment through the editor session

mod common;

use common::OutlineBuilder;
use outline_wasm::bullet::BulletKey;
use outline_wasm::layout::{ElementMetrics, MapMeasurer};
use outline_wasm::models::{NodeType, ResultCode, SegmentType};
use outline_wasm::tree::{SequentialIds, TreeOp};
use outline_wasm::{Editor, EditorConfig};

const CONTAINER: &str = "outline-body";

fn metrics(top: f64, height: f64, line_height: Option<f64>) -> ElementMetrics {
    ElementMetrics {
        top,
        height,
        line_height,
        header: None,
    }
}

fn served(editor: &mut Editor, measurer: &MapMeasurer, node: &str) -> (ResultCode, Option<f64>) {
    let key = BulletKey::new(node, CONTAINER);
    editor.request_bullet(&key);
    editor.serve_bullets(measurer);
    let slot = editor.bullet(&key).unwrap();
    (slot.result.code, slot.result.data)
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("a measured offset");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// root ── t (text)
///      ├─ m ($E=mc^2$ + " rest")
///      ├─ r ([ref] + " see")
///      ├─ p (panel)
///      ├─ v (video)
///      ├─ c (container, no children)
///      └─ e (empty text, no segments)
fn editor() -> Editor {
    let builder = OutlineBuilder::new()
        .text("root", "t", "plain text")
        .node("root", "m", NodeType::Text)
        .segment("m", "m1", SegmentType::LatexInline, "E=mc^2")
        .segment("m", "m2", SegmentType::Text, " rest")
        .node("root", "r", NodeType::Text)
        .segment("r", "r1", SegmentType::RefBib, "[1]")
        .segment("r", "r2", SegmentType::Text, " see")
        .node("root", "p", NodeType::Panel)
        .node("root", "v", NodeType::Video)
        .node("root", "c", NodeType::Container)
        .node("root", "e", NodeType::Text);
    let mut editor = Editor::with_ids(EditorConfig::default(), Box::new(SequentialIds::new()));
    editor.load(builder.snapshot()).unwrap();
    editor
}

fn measurer() -> MapMeasurer {
    MapMeasurer::new()
        .with_segment("t.s", metrics(4.0, 40.0, Some(20.0)))
        .with_segment("m1", metrics(0.0, 30.0, None))
        .with_segment("r1", metrics(10.0, 10.0, None))
        .with_node(
            "p",
            ElementMetrics {
                top: 0.0,
                height: 200.0,
                line_height: None,
                header: Some((8.0, 24.0)),
            },
        )
        .with_node("v", metrics(0.0, 50.0, Some(10.0)))
        .with_node("e", metrics(2.0, 18.0, None))
}

#[test]
fn test_text_uses_first_line_ratio() {
    let mut editor = editor();
    let (code, data) = served(&mut editor, &measurer(), "t");
    assert_eq!(code, ResultCode::Ok);
    // top + 0.6 * line height
    assert_close(data, 16.0);
}

#[test]
fn test_inline_math_uses_box_center() {
    let mut editor = editor();
    let (_, data) = served(&mut editor, &measurer(), "m");
    assert_close(data, 15.0);
}

#[test]
fn test_reference_uses_box_ratio() {
    let mut editor = editor();
    let (_, data) = served(&mut editor, &measurer(), "r");
    assert_close(data, 16.0);
}

#[test]
fn test_structural_node_uses_header_center() {
    let mut editor = editor();
    let (_, data) = served(&mut editor, &measurer(), "p");
    assert_close(data, 20.0);
}

#[test]
fn test_media_and_empty_text_use_own_first_line() {
    let mut editor = editor();
    let (_, video) = served(&mut editor, &measurer(), "v");
    assert_close(video, 6.0);

    // no computed line height: the box height stands in for it
    let (_, empty) = served(&mut editor, &measurer(), "e");
    assert_close(empty, 2.0 + 0.6 * 18.0);
}

#[test]
fn test_childless_container_reports_absence() {
    let mut editor = editor();
    let (code, data) = served(&mut editor, &measurer(), "c");
    assert_eq!(code, ResultCode::ForwardingAbsence);
    assert!(data.is_none());
}

#[test]
fn test_unrendered_target_is_an_error() {
    let mut editor = editor();
    let (code, _) = served(&mut editor, &MapMeasurer::new(), "t");
    assert_eq!(code, ResultCode::StructuralError);
}

#[test]
fn test_ratio_is_configurable() {
    let config = EditorConfig {
        bullet_anchor_ratio: 0.5,
        ..Default::default()
    };
    let mut editor = Editor::with_ids(config, Box::new(SequentialIds::new()));
    editor
        .load(OutlineBuilder::new().text("root", "t", "x").snapshot())
        .unwrap();

    let (_, data) = served(&mut editor, &measurer(), "t");
    assert_close(data, 14.0);
}

#[test]
fn test_response_does_not_retrigger() {
    let mut editor = editor();
    let key = BulletKey::new("t", CONTAINER);
    editor.request_bullet(&key);

    assert_eq!(editor.serve_bullets(&measurer()).len(), 1);
    assert!(editor.serve_bullets(&measurer()).is_empty());

    editor.request_bullet(&key);
    assert_eq!(editor.serve_bullets(&measurer()).len(), 1);
    assert_eq!(editor.bullet(&key).unwrap().response_counter, 2);
}

#[test]
fn test_deleted_node_drops_its_slots() {
    let mut editor = editor();
    let key = BulletKey::new("t", CONTAINER);
    editor.request_bullet(&key);
    editor.serve_bullets(&measurer());

    editor
        .apply_op(&TreeOp::Delete {
            node_id: "t".to_string(),
        })
        .unwrap();
    assert!(editor.bullet(&key).is_none());
}
