//! Interactive tools for moving tokens around the board.
//!
//! ## Frame order
//!
//! ```text
//! Update
//!   ├─> DragInputPlugin      hover picking, rotate/select, grab/move/drop
//!   └─> IndicatorUpdate      attach, refresh and sync drop indicators
//! ```
//!
//! Drag systems run first so a token grabbed or moved this frame has its
//! indicator rebuilt in the same update.

/// Dashed guide line and landing disc under held tokens.
pub mod drop_indicator;

/// Hover, rotate, select and drag input for tokens.
pub mod token_drag;
