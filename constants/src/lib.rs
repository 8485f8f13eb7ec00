//! Shared tuning values for the token board.
//!
//! Runtime settings resources take their defaults from here, so a value only
//! needs changing in one place.

pub mod input_settings;
pub mod path;
pub mod render_settings;
