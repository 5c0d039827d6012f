//! Shared helpers for WASM API operations
//!
//! Serialization, error conversion and the UTF-16 / char offset bridge used by
//! every method of the facade.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::editor::Editor;
use crate::navigation::{Caret, FocusDirective};
use crate::utils::{char_to_utf16_offset, utf16_to_char_offset};

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Like `deserialize`, but `undefined` / `null` yield the type's default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps serialize as plain objects so records keep their JSON shape.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}

// ============================================================================
// Offset Helpers
// ============================================================================

fn segment_text<'a>(editor: &'a Editor, segment_id: &str) -> &'a str {
    editor
        .get_segment(segment_id)
        .map_or("", |segment| segment.text_raw.as_str())
}

/// Browser (UTF-16) caret offset inside a segment to a char offset
pub fn caret_from_dom(editor: &Editor, segment_id: &str, utf16_offset: usize) -> usize {
    utf16_to_char_offset(segment_text(editor, segment_id), utf16_offset)
}

/// Rewrite an `Offset` caret from chars to UTF-16 for the renderer
pub fn directive_for_dom(editor: &Editor, mut directive: FocusDirective) -> FocusDirective {
    if let (Caret::Offset { offset }, Some(segment_id)) =
        (directive.caret, directive.segment_id.as_deref())
    {
        directive.caret = Caret::Offset {
            offset: char_to_utf16_offset(segment_text(editor, segment_id), offset),
        };
    }
    directive
}
