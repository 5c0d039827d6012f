//! Outline Editor WASM Module
//!
//! Editing core for a hierarchical rich-text outline: a node/segment store,
//! pure tree edit operations that emit patches, and the counter-gated
//! navigation and bullet-alignment protocols the renderer talks through.
//!
//! ## Modules
//!
//! - `models`: Node, segment and snapshot records
//! - `store`: Node/segment stores, patches and the reactive state container
//! - `tree`: Tree edit engine (indent, outdent, split, merge, delete, ...)
//! - `navigation`: Focus requests, unfocus forwarding and child events
//! - `bullet`: Bullet alignment requests and forwarding
//! - `selection`: Native selection boundaries to segment ranges
//! - `layout`: Measurement capability and its DOM backend
//! - `convert`: Version-guarded source-to-markup conversion
//! - `undo`: Undo/redo of patch batches
//! - `editor`: Editor session tying the above together
//! - `api`: `wasm-bindgen` facade

pub mod api;
pub mod bullet;
pub mod config;
pub mod convert;
pub mod editor;
pub mod layout;
pub mod models;
pub mod navigation;
pub mod selection;
pub mod store;
pub mod tree;
pub mod undo;
pub mod utils;

// Re-export commonly used types
pub use api::OutlineEditor;
pub use config::EditorConfig;
pub use editor::{Editor, EditorState, NodeView};
pub use models::*;
pub use store::{Document, Patch};
pub use tree::{EditError, EditOutcome, TreeOp};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }

    log::info!("Outline Editor WASM module initialized");
}
