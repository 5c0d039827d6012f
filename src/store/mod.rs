//! Data layer: node and segment stores, the document, patches and the
//! reactive container the editor state lives in.
//!
//! ## Modules
//!
//! - `node_store` / `segment_store`: point lookup and mutation of records
//! - `document`: both stores plus root id; patch application and validation
//! - `read`: tree queries shared by the document and engine drafts
//! - `patch`: declarative store edits
//! - `reactive`: `Store<T>` with get/set/update/subscribe
//! - `counter`: last-processed bookkeeping for counter-gated signals

pub mod counter;
pub mod document;
pub mod errors;
pub mod node_store;
pub mod patch;
pub mod reactive;
pub mod read;
pub mod segment_store;

pub use counter::CounterGate;
pub use document::Document;
pub use errors::StoreError;
pub use node_store::NodeStore;
pub use patch::{Patch, PatchKey};
pub use reactive::{Store, SubscriptionId};
pub use read::DocRead;
pub use segment_store::SegmentStore;
