//! Asset data formats for levels and tokens.

/// Level documents: map reference, board frame and token placements.
pub mod level_data;

/// Token catalog JSON asset and the spawnable kinds built from it.
pub mod token_catalog;
