/// Length of one visible dash in the drop guide line (world units).
pub const DASH_LENGTH: f32 = 0.1;

/// Gap between two dashes of the drop guide line (world units).
pub const GAP_LENGTH: f32 = 0.05;

/// Cross-section width of a dash prism.
pub const LINE_THICKNESS: f32 = 0.02;

/// Radius of the landing disc drawn under a held token.
pub const DISC_RADIUS: f32 = 0.3;

/// Triangle fan resolution of the landing disc.
pub const DISC_SEGMENTS: usize = 32;

/// Lift of the landing disc along the surface normal, keeps it off the surface plane.
pub const DISC_SURFACE_OFFSET: f32 = 0.01;

/// How far below the anchor the drop probe searches for a surface.
pub const PROBE_DISTANCE: f32 = 1000.0;

/// Guide lines shorter than this produce no geometry.
pub const LINE_EPSILON: f32 = 0.001;

/// Squared length under which a cross product is treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1.0e-6;

/// Indicator colour (linear RGBA).
pub const INDICATOR_COLOUR: [f32; 4] = [1.0, 0.85, 0.2, 0.9];
