//! Procedural mesh generation for interaction overlays.
//!
//! Builders append into a reusable [`indicator_mesh::GeometryBuffer`] and never
//! hold state between calls; the buffer is copied into a Bevy `Mesh` asset
//! when it changes.

/// Dashed guide lines and landing discs for the drop indicator.
pub mod indicator_mesh;
