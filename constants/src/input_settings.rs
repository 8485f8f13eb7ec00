/// Yaw applied per pixel of horizontal pointer motion while rotating a token (radians).
pub const ROTATION_FACTOR: f32 = 0.01;

/// Height a token is raised above its pickup height while held.
pub const DRAG_LIFT_HEIGHT: f32 = 0.75;
