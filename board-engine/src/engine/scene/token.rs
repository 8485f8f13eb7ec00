use bevy::prelude::*;

/// Live token spawned from a placement. The placement id is kept for lookup.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub placement_id: String,
    pub species: String,
    pub shiny: bool,
}

/// Map visual of the current level.
#[derive(Component, Debug, Clone)]
pub struct MapRoot {
    pub source: String,
}

/// Container every token of the current level is parented to.
#[derive(Component, Debug, Default)]
pub struct LevelTokens;
