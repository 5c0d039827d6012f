//! Utility modules for the outline editor

pub mod text;

// Re-export commonly used helpers
pub use text::*;
