//! Selection resolution
//!
//! ## Modules
//!
//! - `boundary`: native selection boundary → segment id, over `DomAccess`
//! - `resolve`: document segment order and the selected node list
//! - `dom`: `DomAccess` for `web_sys::Node`

pub mod boundary;
pub mod dom;
pub mod resolve;

pub use boundary::{resolve_boundary, DomAccess};
pub use dom::{native_selection_segments, WebDom};
pub use resolve::{segment_order, selected_nodes, selected_range, SelectionRange};
