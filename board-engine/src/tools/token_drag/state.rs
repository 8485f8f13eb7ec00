use bevy::prelude::*;
use constants::input_settings::{DRAG_LIFT_HEIGHT, ROTATION_FACTOR};

// Resources
#[derive(Resource, Debug, Clone, Copy)]
pub struct RotationSettings {
    /// Radians of yaw per pixel of horizontal pointer motion.
    pub speed: f32,
}
impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            speed: ROTATION_FACTOR,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct DragSettings {
    /// Height a grabbed token is lifted above where it was picked up.
    pub lift_height: f32,
}
impl Default for DragSettings {
    fn default() -> Self {
        Self {
            lift_height: DRAG_LIFT_HEIGHT,
        }
    }
}

/// Token currently under the cursor, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget(pub Option<Entity>);

// Components
/// Token being dragged. It follows the cursor on a horizontal plane.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Held {
    pub plane_height: f32,
}

// Events
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChanged {
    Entered(Entity),
    Exited(Entity),
}

impl HoverChanged {
    pub fn entity(&self) -> Entity {
        match *self {
            Self::Entered(entity) | Self::Exited(entity) => entity,
        }
    }
}

/// Select action pressed while hovering `body`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSelected {
    pub body: Entity,
}
