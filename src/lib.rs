// Public library interface for pivotmap-rs
// The debug-layout tool and any renderer use these modules directly.

pub mod error;
pub mod layout;
pub mod render;
pub mod tree;
pub mod view;

pub use error::{ConfigError, LayoutError, ProtocolViolation, RowError};
pub use layout::{compute_layout, LayoutCache, LayoutEntry, Rect, Rounding, Style, StyleConfig};
pub use tree::{NodeFrame, TreeSource};
pub use view::TreemapView;
