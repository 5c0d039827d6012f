//! Outline Editor WASM API
//!
//! This module provides the JavaScript-facing API for the outline editor.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling and offset conversion
//! - `types`: Result records returned to JavaScript
//! - `editor`: The `OutlineEditor` class wrapping one editor session

pub mod editor;
pub mod helpers;
pub mod types;

pub use editor::OutlineEditor;
pub use types::{BulletServed, EditResult};
