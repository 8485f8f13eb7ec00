use bevy::prelude::*;
use constants::render_settings::{
    DASH_LENGTH, DISC_RADIUS, DISC_SEGMENTS, DISC_SURFACE_OFFSET, GAP_LENGTH, LINE_THICKNESS,
    PROBE_DISTANCE,
};

use crate::engine::mesh::indicator_mesh::DashStyle;

use super::renderer::DropIndicatorRenderer;

/// When shown indicators are rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Only when the token moved since the last refresh.
    #[default]
    OnMove,
    EveryFrame,
}

// Resources
#[derive(Resource, Debug, Clone)]
pub struct IndicatorSettings {
    pub dash_length: f32,
    pub gap_length: f32,
    pub thickness: f32,
    pub disc_radius: f32,
    pub disc_segments: usize,
    pub surface_offset: f32,
    pub probe_distance: f32,
    pub refresh_policy: RefreshPolicy,
}
impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            dash_length: DASH_LENGTH,
            gap_length: GAP_LENGTH,
            thickness: LINE_THICKNESS,
            disc_radius: DISC_RADIUS,
            disc_segments: DISC_SEGMENTS,
            surface_offset: DISC_SURFACE_OFFSET,
            probe_distance: PROBE_DISTANCE,
            refresh_policy: RefreshPolicy::OnMove,
        }
    }
}
impl IndicatorSettings {
    pub fn dash_style(&self) -> DashStyle {
        DashStyle {
            dash_length: self.dash_length,
            gap_length: self.gap_length,
            thickness: self.thickness,
        }
    }
}

#[derive(Resource)]
pub struct IndicatorAssets {
    pub material: Handle<StandardMaterial>,
}

// Components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPart {
    Line,
    Disc,
}

/// Mesh entity drawing one half of a token's indicator, in world space.
#[derive(Component, Debug, Clone, Copy)]
pub struct IndicatorNode {
    pub owner: Entity,
    pub part: IndicatorPart,
}

/// Drop indicator owned by a token, with the entities its buffers are drawn on.
#[derive(Component, Debug)]
pub struct DropIndicator {
    pub renderer: DropIndicatorRenderer,
    pub line_node: Entity,
    pub disc_node: Entity,
    /// Set by `show`, forces the next refresh regardless of policy.
    pub stale: bool,
}

impl DropIndicator {
    pub fn new(line_node: Entity, disc_node: Entity) -> Self {
        Self {
            renderer: DropIndicatorRenderer::default(),
            line_node,
            disc_node,
            stale: false,
        }
    }

    pub fn show(&mut self) {
        self.renderer.show();
        self.stale = true;
    }

    pub fn hide(&mut self) {
        self.renderer.hide();
        self.stale = false;
    }
}
