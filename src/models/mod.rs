//! Models module for the outline editor
//!
//! This module contains the record types shared by the stores, the tree edit
//! engine and the protocols.

pub mod node;
pub mod result;
pub mod segment;
pub mod snapshot;

// Re-export commonly used types
pub use node::*;
pub use result::{OpResult, ResultCode};
pub use segment::*;
pub use snapshot::DocumentSnapshot;
