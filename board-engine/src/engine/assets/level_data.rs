use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Coordinate frame a placement's position is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementFrame {
    /// Map-local coordinates, moved and scaled with the level's map.
    #[default]
    Board,
    /// Absolute world coordinates.
    World,
}

/// Declarative record of one token's initial state within a level. Mirrors JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSpec {
    pub placement_id: String,
    pub species: String,
    pub position: [f32; 3],
    /// Euler angles in degrees, applied X then Y then Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub shiny: bool,
    #[serde(default)]
    pub frame: PlacementFrame,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Level document. Mirrors JSON structure exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub map_asset_path: String,
    #[serde(default = "unit_scale")]
    pub map_scale: [f32; 3],
    #[serde(default)]
    pub map_offset: [f32; 3],
    /// Size of the playable surface collider; its top face sits at the map origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_extent: Option<[f32; 3]>,
    #[serde(default)]
    pub placements: Vec<PlacementSpec>,
}

/// Level-wide frame that board-relative placements are resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelFrame {
    pub offset: Vec3,
    pub scale: Vec3,
}

impl LevelFrame {
    pub fn to_world(&self, point: Vec3) -> Vec3 {
        self.offset + self.scale * point
    }
}

impl LevelData {
    pub fn frame(&self) -> LevelFrame {
        LevelFrame {
            offset: Vec3::from_array(self.map_offset),
            scale: Vec3::from_array(self.map_scale),
        }
    }

    pub fn map_transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.map_offset))
            .with_scale(Vec3::from_array(self.map_scale))
    }

    pub fn placement(&self, placement_id: &str) -> Option<&PlacementSpec> {
        self.placements
            .iter()
            .find(|p| p.placement_id == placement_id)
    }
}

impl PlacementSpec {
    /// World transform of the token, or `None` when any component is non-finite
    /// or the scale collapses an axis.
    pub fn world_transform(&self, frame: &LevelFrame) -> Option<Transform> {
        let position = Vec3::from_array(self.position);
        let rotation = Vec3::from_array(self.rotation);
        let scale = Vec3::from_array(self.scale);

        if !position.is_finite() || !rotation.is_finite() || !scale.is_finite() {
            return None;
        }
        if scale.abs().min_element() <= f32::EPSILON {
            return None;
        }

        let translation = match self.frame {
            PlacementFrame::Board => frame.to_world(position),
            PlacementFrame::World => position,
        };
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            rotation.x.to_radians(),
            rotation.y.to_radians(),
            rotation.z.to_radians(),
        );

        Some(Transform {
            translation,
            rotation,
            scale,
        })
    }
}
