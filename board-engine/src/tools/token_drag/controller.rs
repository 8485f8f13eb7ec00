use bevy::prelude::*;

/// Actions the token input layer reacts to. Bindings map them to buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragAction {
    Grab,
    Rotate,
    Select,
}

/// Input as seen by one token's controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    HoverEntered,
    HoverExited,
    Pressed(DragAction),
    Released(DragAction),
    /// Pointer velocity in pixels since the previous motion event.
    PointerMotion { velocity: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Hovered,
    Rotating,
}

/// What the owner of the controller has to carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerOutput {
    /// Publish a token-selected notification.
    Select,
    /// Add this yaw (radians) to the body's rotation.
    Yaw(f32),
}

impl ControllerOutput {
    pub fn apply(self, body: &mut Transform) {
        if let Self::Yaw(angle) = self {
            body.rotate_y(angle);
        }
    }
}

/// Hover/rotate state machine for one token.
///
/// Rotation starts only while hovered but ends on release wherever the
/// pointer is. Grabbing is left to the drag systems.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragInputController {
    hovered: bool,
    rotating: bool,
}

impl DragInputController {
    pub fn state(&self) -> ControllerState {
        if self.rotating {
            ControllerState::Rotating
        } else if self.hovered {
            ControllerState::Hovered
        } else {
            ControllerState::Idle
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Advance the state machine. Motion while rotating yields an unclamped yaw
    /// increment of `velocity.x * rotation_speed`.
    pub fn handle(&mut self, event: InputEvent, rotation_speed: f32) -> Option<ControllerOutput> {
        match event {
            InputEvent::HoverEntered => self.hovered = true,
            InputEvent::HoverExited => self.hovered = false,
            InputEvent::Pressed(DragAction::Rotate) if self.hovered => self.rotating = true,
            InputEvent::Released(DragAction::Rotate) => self.rotating = false,
            InputEvent::Pressed(DragAction::Select) if self.hovered => {
                return Some(ControllerOutput::Select);
            }
            InputEvent::PointerMotion { velocity } if self.rotating => {
                return Some(ControllerOutput::Yaw(velocity.x * rotation_speed));
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 0.01;

    #[test]
    fn hover_toggles_state_only() {
        let mut c = DragInputController::default();
        assert_eq!(c.handle(InputEvent::HoverEntered, SPEED), None);
        assert_eq!(c.state(), ControllerState::Hovered);
        assert_eq!(c.handle(InputEvent::HoverExited, SPEED), None);
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn rotate_requires_hover_to_start() {
        let mut c = DragInputController::default();
        c.handle(InputEvent::Pressed(DragAction::Rotate), SPEED);
        assert_eq!(c.state(), ControllerState::Idle);

        c.handle(InputEvent::HoverEntered, SPEED);
        c.handle(InputEvent::Pressed(DragAction::Rotate), SPEED);
        assert_eq!(c.state(), ControllerState::Rotating);
    }

    #[test]
    fn rotate_release_ends_rotation_after_pointer_left() {
        let mut c = DragInputController::default();
        c.handle(InputEvent::HoverEntered, SPEED);
        c.handle(InputEvent::Pressed(DragAction::Rotate), SPEED);
        c.handle(InputEvent::HoverExited, SPEED);
        assert_eq!(c.state(), ControllerState::Rotating);

        c.handle(InputEvent::Released(DragAction::Rotate), SPEED);
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn motion_only_rotates_while_rotating() {
        let mut c = DragInputController::default();
        let motion = InputEvent::PointerMotion { velocity: Vec2::new(100.0, 40.0) };
        assert_eq!(c.handle(motion, SPEED), None);

        c.handle(InputEvent::HoverEntered, SPEED);
        c.handle(InputEvent::Pressed(DragAction::Rotate), SPEED);
        assert_eq!(c.handle(motion, SPEED), Some(ControllerOutput::Yaw(100.0 * SPEED)));
    }

    #[test]
    fn select_only_while_hovered() {
        let mut c = DragInputController::default();
        assert_eq!(c.handle(InputEvent::Pressed(DragAction::Select), SPEED), None);
        c.handle(InputEvent::HoverEntered, SPEED);
        assert_eq!(
            c.handle(InputEvent::Pressed(DragAction::Select), SPEED),
            Some(ControllerOutput::Select)
        );
    }

    #[test]
    fn grab_is_not_handled_here() {
        let mut c = DragInputController::default();
        c.handle(InputEvent::HoverEntered, SPEED);
        assert_eq!(c.handle(InputEvent::Pressed(DragAction::Grab), SPEED), None);
        assert_eq!(c.state(), ControllerState::Hovered);
    }
}
