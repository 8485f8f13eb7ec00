use bevy::prelude::*;

use super::Collider;

/// Entry distance along `dir` and the local-space face normal the ray entered through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabHit {
    pub t: f32,
    pub normal: Vec3,
}

/// Ray against a collider box placed by `xf`. `t` is measured in units of `dir`,
/// so it stays valid in world space when `dir` is normalised.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, collider: &Collider) -> Option<(f32, Vec3)> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = collider.size * 0.5;

    let hit = ray_aabb_hit(o_local, d_local, collider.offset - he, collider.offset + he)?;

    // Normals go through the inverse transpose so non-uniform scale keeps them perpendicular.
    let normal = inv
        .transpose()
        .transform_vector3(hit.normal)
        .normalize_or_zero();
    Some((hit.t, normal))
}

// Slab-method ray-AABB intersection. A ray starting inside the box reports t = 0
// on the face it would have entered through.
pub fn ray_aabb_hit(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<SlabHit> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis: Option<usize> = None;

    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_direction[axis];

        if d.abs() < f32::EPSILON {
            // Parallel to this slab: either always inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_enter {
            t_enter = t0;
            enter_axis = Some(axis);
        }
        t_exit = t_exit.min(t1);

        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    let axis = enter_axis?;

    let mut normal = Vec3::ZERO;
    normal[axis] = -ray_direction[axis].signum();

    Some(SlabHit {
        t: t_enter.max(0.0),
        normal,
    })
}
