//! Pointer input for board tokens.
//!
//! Each token carries a [`DragInputController`] that turns hover, button and
//! pointer-motion events into yaw rotation and selection notifications:
//!
//! ```text
//! Idle ──hover──> Hovered ──rotate press──> Rotating
//!  ^                 │                          │
//!  └────hover exit───┘<──────rotate release─────┘
//! ```
//!
//! Grabbing is handled alongside the controller: the hovered token is lifted
//! and follows the cursor on a horizontal plane while the grab action is held,
//! with its drop indicator shown. On release the token is snapped down to the
//! probe hit and the indicator hidden.

/// Button bindings for the token actions.
pub mod bindings;

/// Per-token hover/rotate state machine.
pub mod controller;

/// Cursor picking against token colliders.
pub mod picking;

/// Settings, events and drag components.
pub mod state;

pub mod systems;

use bevy::prelude::*;

use crate::tools::drop_indicator::{IndicatorSettings, IndicatorUpdate};

pub use bindings::{ActionBindings, InputBinding};
pub use controller::{ControllerOutput, ControllerState, DragAction, DragInputController, InputEvent};
pub use state::{DragSettings, Held, HoverChanged, HoverTarget, RotationSettings, TokenSelected};

use picking::update_hover_target;
use systems::{
    attach_drag_controllers, drive_token_controllers, drop_held_tokens, grab_hovered_token,
    move_held_tokens,
};

pub struct DragInputPlugin;

impl Plugin for DragInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionBindings>()
            .init_resource::<RotationSettings>()
            .init_resource::<DragSettings>()
            .init_resource::<HoverTarget>()
            .init_resource::<IndicatorSettings>()
            .add_event::<HoverChanged>()
            .add_event::<TokenSelected>()
            .add_systems(
                Update,
                (
                    attach_drag_controllers,
                    update_hover_target,
                    drive_token_controllers,
                    grab_hovered_token,
                    move_held_tokens,
                    drop_held_tokens,
                )
                    .chain()
                    .before(IndicatorUpdate),
            );
    }
}
