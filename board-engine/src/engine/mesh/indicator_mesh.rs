use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use constants::render_settings::{DEGENERATE_EPSILON, LINE_EPSILON};

/// Fixed forward axis the landing disc basis is derived from.
const DISC_FORWARD: Vec3 = Vec3::NEG_Z;

/// Reusable triangle list. Cleared and refilled in place, capacity is kept
/// between rebuilds.
#[derive(Debug, Default, Clone)]
pub struct GeometryBuffer {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl GeometryBuffer {
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Flat quad `a b c d`, counter-clockwise seen from `normal`.
    pub fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let [a, b, c, d] = corners.map(|p| self.push_vertex(p, normal));
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Copy into `mesh`, reusing its attribute storage when the layout already matches.
    pub fn write_to_mesh(&self, mesh: &mut Mesh) {
        copy_attribute(mesh, Mesh::ATTRIBUTE_POSITION, &self.positions);
        copy_attribute(mesh, Mesh::ATTRIBUTE_NORMAL, &self.normals);

        match mesh.indices_mut() {
            Some(Indices::U32(existing)) => {
                existing.clear();
                existing.extend_from_slice(&self.indices);
            }
            _ => mesh.insert_indices(Indices::U32(self.indices.clone())),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = empty_indicator_mesh();
        self.write_to_mesh(&mut mesh);
        mesh
    }
}

fn copy_attribute(mesh: &mut Mesh, attribute: bevy::render::mesh::MeshVertexAttribute, values: &[[f32; 3]]) {
    if let Some(VertexAttributeValues::Float32x3(existing)) = mesh.attribute_mut(attribute.id) {
        existing.clear();
        existing.extend_from_slice(values);
        return;
    }
    mesh.insert_attribute(attribute, values.to_vec());
}

/// Triangle-list mesh with empty position/normal/index storage, kept in the main
/// world so it can be rewritten every drag update.
pub fn empty_indicator_mesh() -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, Vec::<[f32; 3]>::new());
    mesh.insert_indices(Indices::U32(Vec::new()));
    mesh
}

/// Dash pattern of the guide line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStyle {
    pub dash_length: f32,
    pub gap_length: f32,
    pub thickness: f32,
}

impl DashStyle {
    pub fn cycle(&self) -> f32 {
        self.dash_length + self.gap_length
    }
}

/// Two unit offsets perpendicular to `dir` and to each other.
///
/// The first is `dir × up`; when `dir` is (anti)parallel to up that product
/// vanishes and `dir × X` is used instead. The second is `dir × first`.
pub fn line_offsets(dir: Vec3) -> (Vec3, Vec3) {
    let mut side = dir.cross(Vec3::Y);
    if side.length_squared() < DEGENERATE_EPSILON {
        side = dir.cross(Vec3::X);
    }
    let side = side.normalize();
    let lift = dir.cross(side).normalize();
    (side, lift)
}

/// In-plane basis of a surface with `normal`: `normal × forward(-Z)`, falling back
/// to `normal × X` when the normal runs along forward. `tangent × bitangent == normal`.
pub fn disc_basis(normal: Vec3) -> (Vec3, Vec3) {
    let mut tangent = normal.cross(DISC_FORWARD);
    if tangent.length_squared() < DEGENERATE_EPSILON {
        tangent = normal.cross(Vec3::X);
    }
    let tangent = tangent.normalize();
    let bitangent = normal.cross(tangent).normalize();
    (tangent, bitangent)
}

/// Number of dashes a line of `length` produces with `style`.
pub fn dash_count(length: f32, style: &DashStyle) -> usize {
    if length < LINE_EPSILON || style.cycle() <= 0.0 {
        return 0;
    }
    (length / style.cycle()).ceil() as usize
}

/// Append a dashed line from `from` to `to` as thin square prisms.
/// Returns the number of dashes emitted.
pub fn append_dashed_line(buffer: &mut GeometryBuffer, from: Vec3, to: Vec3, style: &DashStyle) -> usize {
    let displacement = to - from;
    let length = displacement.length();
    let count = dash_count(length, style);
    if count == 0 {
        return 0;
    }

    let dir = displacement / length;
    let (side, lift) = line_offsets(dir);
    let half = style.thickness * 0.5;

    let mut emitted = 0;
    for i in 0..count {
        let start = i as f32 * style.cycle();
        // Float rounding in `dash_count` may add a cycle that starts at or past the end.
        if start >= length {
            break;
        }
        let end = (start + style.dash_length).min(length);
        append_prism(buffer, from + dir * start, from + dir * end, side * half, lift * half);
        emitted += 1;
    }
    emitted
}

/// Four side faces of a square prism between `start` and `end`.
fn append_prism(buffer: &mut GeometryBuffer, start: Vec3, end: Vec3, side: Vec3, lift: Vec3) {
    // Corners wind counter-clockwise around the segment direction.
    let ring = [side + lift, -side + lift, -side - lift, side - lift];

    for k in 0..4 {
        let a = ring[k];
        let b = ring[(k + 1) % 4];
        let normal = (a + b).normalize_or_zero();
        buffer.push_quad([start + a, start + b, end + b, end + a], normal);
    }
}

/// Append a flat disc centred on `center` facing `normal`, as a fan of `segments` triangles.
pub fn append_disc(buffer: &mut GeometryBuffer, center: Vec3, normal: Vec3, radius: f32, segments: usize) {
    if segments < 3 {
        return;
    }
    let normal = normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return;
    }
    let (tangent, bitangent) = disc_basis(normal);

    let hub = buffer.push_vertex(center, normal);
    let first = hub + 1;
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let rim = center + (tangent * angle.cos() + bitangent * angle.sin()) * radius;
        buffer.push_vertex(rim, normal);
    }
    for i in 0..segments as u32 {
        let next = (i + 1) % segments as u32;
        buffer.push_triangle(hub, first + i, first + next);
    }
}
