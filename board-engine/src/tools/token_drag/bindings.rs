use bevy::prelude::*;

use super::controller::{DragAction, InputEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBinding {
    Mouse(MouseButton),
    Key(KeyCode),
}

impl InputBinding {
    pub fn just_pressed(&self, mouse: &ButtonInput<MouseButton>, keys: &ButtonInput<KeyCode>) -> bool {
        match *self {
            Self::Mouse(button) => mouse.just_pressed(button),
            Self::Key(key) => keys.just_pressed(key),
        }
    }

    pub fn just_released(&self, mouse: &ButtonInput<MouseButton>, keys: &ButtonInput<KeyCode>) -> bool {
        match *self {
            Self::Mouse(button) => mouse.just_released(button),
            Self::Key(key) => keys.just_released(key),
        }
    }
}

/// Buttons bound to each token action.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ActionBindings {
    pub grab: InputBinding,
    pub rotate: InputBinding,
    pub select: InputBinding,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            grab: InputBinding::Mouse(MouseButton::Left),
            rotate: InputBinding::Mouse(MouseButton::Right),
            select: InputBinding::Mouse(MouseButton::Middle),
        }
    }
}

impl ActionBindings {
    pub fn binding(&self, action: DragAction) -> InputBinding {
        match action {
            DragAction::Grab => self.grab,
            DragAction::Rotate => self.rotate,
            DragAction::Select => self.select,
        }
    }

    /// Press/release events for this frame, keyed by action.
    pub fn action_events(&self, mouse: &ButtonInput<MouseButton>, keys: &ButtonInput<KeyCode>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for action in [DragAction::Grab, DragAction::Rotate, DragAction::Select] {
            let binding = self.binding(action);
            if binding.just_pressed(mouse, keys) {
                events.push(InputEvent::Pressed(action));
            }
            if binding.just_released(mouse, keys) {
                events.push(InputEvent::Released(action));
            }
        }
        events
    }
}
