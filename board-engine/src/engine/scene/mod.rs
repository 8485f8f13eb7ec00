/// Marker components for the map, the token container and tokens.
pub mod token;
