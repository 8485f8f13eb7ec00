//! Drop indicator for held tokens.
//!
//! While a token is held, a probe ray is cast straight down from its anchor
//! (bottom centre of its collider), ignoring the token's own collider. The hit
//! drives two procedural meshes:
//!
//! ```text
//! anchor ─┐
//!         ┆  dashed guide line (dash/gap cycles of thin prisms)
//!         ┆
//!   ══════●══════  landing disc, lifted along the surface normal
//! ```
//!
//! A miss clears both meshes, so a token dragged off the board shows nothing.
//!
//! ## Systems
//!
//! - `attach_drop_indicators`: every new token gets a hidden `DropIndicator`
//!   and two mesh entities (line, disc) in world space.
//! - `refresh_drop_indicators`: rebuilds shown indicators according to
//!   `IndicatorSettings::refresh_policy`.
//! - `sync_indicator_meshes`: copies changed buffers into mesh assets and
//!   toggles node visibility.
//! - `despawn_indicator_nodes` (observer): removes the mesh entities with
//!   their owner.

/// Probe + mesh orchestration, independent of the ECS.
pub mod renderer;

/// Settings, components and render resources.
pub mod state;

/// ECS systems wiring indicators to tokens and mesh assets.
pub mod systems;

use bevy::prelude::*;

pub use renderer::DropIndicatorRenderer;
pub use state::{DropIndicator, IndicatorNode, IndicatorPart, IndicatorSettings, RefreshPolicy};

use systems::{
    attach_drop_indicators, create_indicator_material, despawn_indicator_nodes,
    refresh_drop_indicators, sync_indicator_meshes,
};

/// System set the drag tools order themselves before.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorUpdate;

pub struct DropIndicatorPlugin;

impl Plugin for DropIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IndicatorSettings>()
            .add_systems(Startup, create_indicator_material)
            .add_observer(despawn_indicator_nodes)
            .add_systems(
                Update,
                (
                    attach_drop_indicators,
                    refresh_drop_indicators,
                    sync_indicator_meshes,
                )
                    .chain()
                    .in_set(IndicatorUpdate),
            );
    }
}
