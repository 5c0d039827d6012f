//! Layout measurement
//!
//! Core protocols ask for pixel positions through the `LayoutMeasurer` and
//! `navigation::PageGeometry` traits only. `dom` implements both over the
//! browser DOM; `MapMeasurer` / `MapGeometry` take values from the host.

pub mod dom;
pub mod measure;

pub use dom::DomLayout;
pub use measure::{
    AnchorRule, ElementMetrics, LayoutMeasurer, MapMeasurer, MeasureTarget,
    DEFAULT_BULLET_ANCHOR_RATIO,
};
