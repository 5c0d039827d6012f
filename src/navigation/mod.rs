//! Navigation protocol
//!
//! Nodes and segments render independently; none of them knows the whole
//! tree. The cursor moves between them through counter-gated requests: a
//! sender publishes `{counter, type, ...}` into the target node's slot, and
//! the target resolves it to a segment and caret once it sees a counter above
//! the last one it handled.
//!
//! ## Modules
//!
//! - `request`: request slots, navigation types and focus intents
//! - `resolve`: request → segment + caret for the receiving node
//! - `unfocus`: cursor leaving a segment, hand-off to neighbours
//! - `targets`: up/down neighbour lookup skipping non-focusable units
//! - `focus`: focus state and cross-segment pointer selections
//! - `child_events`: segment → node edit requests
//! - `geometry`: page boxes used for x/point matching

pub mod child_events;
pub mod focus;
pub mod geometry;
pub mod request;
pub mod resolve;
pub mod targets;
pub mod unfocus;

pub use child_events::{ChildEvent, ChildEventBoard, ChildEventType};
pub use focus::{cross_segment_focus, FocusState, FocusTracker};
pub use geometry::{MapGeometry, NoGeometry, PageGeometry, Rect};
pub use request::{FocusExtra, FocusIntent, NavType, NavigationBoard, NavigationRequest};
pub use resolve::{resolve_focus, Caret, FocusDirective, DEFAULT_ROW_DISTANCE_WEIGHT};
pub use targets::{down_target, up_target};
pub use unfocus::{handle_unfocus, UnfocusDirection, UnfocusOutcome, UnfocusRequest};
