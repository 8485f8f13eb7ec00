use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One spawnable token species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenKindDefinition {
    pub species: String,
    /// Collider and mesh size at unit scale.
    pub size: [f32; 3],
    #[serde(default = "default_colour")]
    pub color: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shiny_color: Option<[f32; 3]>,
}

fn default_colour() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}

/// Token catalog as a Bevy asset, loaded from JSON.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct TokenCatalog {
    pub kinds: Vec<TokenKindDefinition>,
}

impl TokenCatalog {
    pub fn get(&self, species: &str) -> Option<&TokenKindDefinition> {
        self.kinds.iter().find(|k| k.species == species)
    }
}

/// Render handles and collider size of a species, ready to spawn.
#[derive(Debug, Clone)]
pub struct TokenKind {
    pub size: Vec3,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub shiny_material: Handle<StandardMaterial>,
}

/// Spawnable species keyed by species identifier.
#[derive(Resource, Debug, Clone, Default)]
pub struct TokenKinds {
    kinds: HashMap<String, TokenKind>,
}

impl TokenKinds {
    pub fn insert(&mut self, species: impl Into<String>, kind: TokenKind) {
        self.kinds.insert(species.into(), kind);
    }

    pub fn get(&self, species: &str) -> Option<&TokenKind> {
        self.kinds.get(species)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Build meshes and materials for every catalog entry. Degenerate sizes are
    /// clamped so the collider never collapses.
    pub fn from_catalog(
        catalog: &TokenCatalog,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        let mut kinds = Self::default();
        for def in &catalog.kinds {
            let size = Vec3::from_array(def.size).max(Vec3::splat(0.001));
            let [r, g, b] = def.color;
            let shiny = def.shiny_color.unwrap_or([1.0, 0.84, 0.0]);

            let mesh = Mesh::from(Cuboid::from_size(size)).translated_by(Vec3::Y * size.y * 0.5);
            kinds.insert(
                def.species.clone(),
                TokenKind {
                    size,
                    mesh: meshes.add(mesh),
                    material: materials.add(StandardMaterial {
                        base_color: Color::srgb(r, g, b),
                        perceptual_roughness: 0.8,
                        ..default()
                    }),
                    shiny_material: materials.add(StandardMaterial {
                        base_color: Color::srgb(shiny[0], shiny[1], shiny[2]),
                        metallic: 0.6,
                        perceptual_roughness: 0.25,
                        ..default()
                    }),
                },
            );
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_parses_and_looks_up_species() {
        let catalog: TokenCatalog = serde_json::from_str(
            r#"{ "kinds": [
                { "species": "pidgey", "size": [0.4, 0.6, 0.4] },
                { "species": "onix", "size": [1.0, 2.0, 1.0], "color": [0.5, 0.5, 0.5], "shiny_color": [0.2, 0.8, 0.2] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(catalog.kinds.len(), 2);
        assert_eq!(catalog.get("pidgey").unwrap().color, [0.8, 0.8, 0.8]);
        assert!(catalog.get("onix").unwrap().shiny_color.is_some());
        assert!(catalog.get("mew").is_none());
    }
}
