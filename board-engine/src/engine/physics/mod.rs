//! Box-collider physics queries used for hover picking and drop probing.
//!
//! Every token and the board surface carry a [`Collider`]: an oriented box in
//! the entity's local space. Queries run synchronously against the colliders'
//! current `GlobalTransform`s; there is no broadphase, scenes hold a handful of
//! bodies at most.

/// Slab-method ray intersection against oriented boxes.
pub mod ray;

use bevy::prelude::*;

use ray::ray_hits_obb;

/// Oriented box collider in the owning entity's local space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec3,
    pub offset: Vec3,
}

impl Collider {
    /// Box centred on the entity origin.
    pub fn cuboid(size: Vec3) -> Self {
        Self {
            size,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Box resting on the entity origin, the way token models are authored.
    pub fn standing(size: Vec3) -> Self {
        Self::cuboid(size).with_offset(Vec3::Y * size.y * 0.5)
    }

    /// Local-space bottom centre of the box.
    pub fn base(&self) -> Vec3 {
        self.offset - Vec3::Y * self.size.y * 0.5
    }
}

/// World-space anchor of a body: the bottom centre of its collider.
pub fn anchor_point(xf: &GlobalTransform, collider: &Collider) -> Vec3 {
    xf.transform_point(collider.base())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub position: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Point-in-time ray queries against the physics state.
pub trait PhysicsWorld {
    /// First body hit on the segment `from..to`, skipping `exclude`.
    fn cast_ray(&self, from: Vec3, to: Vec3, exclude: Option<Entity>) -> Option<RayHit>;
}

/// Nearest hit of the segment `from..to` over a set of bodies.
pub fn cast_against<'a>(
    bodies: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Collider)>,
    from: Vec3,
    to: Vec3,
    exclude: Option<Entity>,
) -> Option<RayHit> {
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return None;
    }
    let dir = delta / length;

    let mut best: Option<RayHit> = None;
    for (entity, xf, collider) in bodies {
        if Some(entity) == exclude {
            continue;
        }
        let Some((t, normal)) = ray_hits_obb(from, dir, xf, collider) else {
            continue;
        };
        if t > length || best.is_some_and(|b| t >= b.distance) {
            continue;
        }
        best = Some(RayHit {
            entity,
            position: from + dir * t,
            normal,
            distance: t,
        });
    }
    best
}

/// Owned snapshot of collider bodies.
#[derive(Debug, Default, Clone)]
pub struct ColliderWorld {
    bodies: Vec<(Entity, GlobalTransform, Collider)>,
}

impl ColliderWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, xf: impl Into<GlobalTransform>, collider: Collider) {
        self.bodies.push((entity, xf.into(), collider));
    }

    pub fn with_body(mut self, entity: Entity, xf: impl Into<GlobalTransform>, collider: Collider) -> Self {
        self.insert(entity, xf, collider);
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl PhysicsWorld for ColliderWorld {
    fn cast_ray(&self, from: Vec3, to: Vec3, exclude: Option<Entity>) -> Option<RayHit> {
        cast_against(self.bodies.iter().map(|(e, xf, c)| (*e, xf, c)), from, to, exclude)
    }
}

/// Read-only query over live colliders, used directly as a [`PhysicsWorld`] inside systems.
pub type ColliderQuery<'w, 's> = Query<'w, 's, (Entity, &'static GlobalTransform, &'static Collider)>;

pub struct LiveColliders<'q, 'w, 's>(pub &'q ColliderQuery<'w, 's>);

impl PhysicsWorld for LiveColliders<'_, '_, '_> {
    fn cast_ray(&self, from: Vec3, to: Vec3, exclude: Option<Entity>) -> Option<RayHit> {
        cast_against(self.0.iter(), from, to, exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(world: &mut World) -> Entity {
        world.spawn_empty().id()
    }

    #[test]
    fn nearest_body_wins() {
        let mut ecs = World::new();
        let low = body(&mut ecs);
        let high = body(&mut ecs);
        let physics = ColliderWorld::new()
            .with_body(low, Transform::IDENTITY, Collider::cuboid(Vec3::new(10.0, 1.0, 10.0)).with_offset(Vec3::Y * -0.5))
            .with_body(high, Transform::from_xyz(0.0, 2.0, 0.0), Collider::standing(Vec3::ONE));

        let hit = physics.cast_ray(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -10.0, 0.0), None).unwrap();
        assert_eq!(hit.entity, high);
        assert!(hit.position.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-4));
    }

    #[test]
    fn excluded_body_is_transparent() {
        let mut ecs = World::new();
        let floor = body(&mut ecs);
        let token = body(&mut ecs);
        let physics = ColliderWorld::new()
            .with_body(floor, Transform::IDENTITY, Collider::cuboid(Vec3::new(10.0, 1.0, 10.0)).with_offset(Vec3::Y * -0.5))
            .with_body(token, Transform::from_xyz(0.0, 2.0, 0.0), Collider::standing(Vec3::ONE));

        let hit = physics
            .cast_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -100.0, 0.0), Some(token))
            .unwrap();
        assert_eq!(hit.entity, floor);
        assert!(hit.position.abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(hit.normal.abs_diff_eq(Vec3::Y, 1e-4));
    }

    #[test]
    fn hit_beyond_segment_is_ignored() {
        let mut ecs = World::new();
        let floor = body(&mut ecs);
        let physics = ColliderWorld::new().with_body(floor, Transform::IDENTITY, Collider::cuboid(Vec3::ONE));

        assert!(physics.cast_ray(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 5.0, 0.0), None).is_none());
    }

    #[test]
    fn anchor_is_collider_base() {
        let xf = GlobalTransform::from(Transform::from_xyz(1.0, 2.0, 3.0));
        let anchor = anchor_point(&xf, &Collider::standing(Vec3::new(0.5, 1.0, 0.5)));
        assert!(anchor.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }
}
