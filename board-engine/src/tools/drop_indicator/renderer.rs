use bevy::prelude::*;

use crate::engine::mesh::indicator_mesh::{GeometryBuffer, append_dashed_line, append_disc};
use crate::engine::physics::{PhysicsWorld, RayHit};

use super::state::IndicatorSettings;

/// Guide line and landing disc for one dragged token.
///
/// Both buffers are cleared at the start of every refresh and rebuilt from a
/// fresh probe, so they only ever hold the latest result.
#[derive(Debug, Default, Clone)]
pub struct DropIndicatorRenderer {
    line: GeometryBuffer,
    disc: GeometryBuffer,
    visible: bool,
}

impl DropIndicatorRenderer {
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide and drop the current geometry.
    pub fn hide(&mut self) {
        self.visible = false;
        self.line.clear();
        self.disc.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn line(&self) -> &GeometryBuffer {
        &self.line
    }

    pub fn disc(&self) -> &GeometryBuffer {
        &self.disc
    }

    pub fn triangle_count(&self) -> usize {
        self.line.triangle_count() + self.disc.triangle_count()
    }

    /// Probe straight down from `anchor`, ignoring `exclude`, and rebuild both
    /// buffers from the hit. A miss leaves both empty.
    pub fn refresh(
        &mut self,
        anchor: Vec3,
        physics: &dyn PhysicsWorld,
        exclude: Option<Entity>,
        settings: &IndicatorSettings,
    ) -> Option<RayHit> {
        self.line.clear();
        self.disc.clear();

        let target = anchor + Vec3::NEG_Y * settings.probe_distance;
        let hit = physics.cast_ray(anchor, target, exclude)?;

        append_dashed_line(&mut self.line, anchor, hit.position, &settings.dash_style());
        append_disc(
            &mut self.disc,
            hit.position + hit.normal * settings.surface_offset,
            hit.normal,
            settings.disc_radius,
            settings.disc_segments,
        );
        Some(hit)
    }
}
