/// Unit cube mesh whose faces sample the impostor atlas.
use crate::atlas::AtlasLayout;
use crate::bounds::AxisAlignedBounds;
use crate::direction::FaceName;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Corner positions of each face, listed so that (0,1,2),(0,2,3) winds
/// counter-clockwise seen from outside and vertex 0 is the tile's
/// bottom-left UV corner.
const FACE_CORNERS: [(FaceName, [[f32; 3]; 4]); 6] = [
    (
        FaceName::Front,
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    ),
    (
        FaceName::Back,
        [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
    ),
    (
        FaceName::Left,
        [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
    ),
    (
        FaceName::Right,
        [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
    ),
    (
        FaceName::Up,
        [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
    ),
    (
        FaceName::Down,
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
    ),
];

/// Local triangle indices within one face quad.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Plain vertex/index arrays for the impostor cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpostorMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// xyz tangent, w is the bitangent sign.
    pub tangents: Vec<[f32; 4]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl ImpostorMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex range `[start, start + 4)` used by a face.
    pub fn face_vertices(face: FaceName) -> std::ops::Range<usize> {
        let start = face.index() * 4;
        start..start + 4
    }
}

/// World transform for the unit cube: centred on the bounds and scaled to
/// their full size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpostorPlacement {
    pub position: Vec3,
    pub scale: Vec3,
}

impl ImpostorPlacement {
    pub fn from_bounds(bounds: &AxisAlignedBounds) -> Self {
        Self {
            position: bounds.center,
            scale: bounds.size(),
        }
    }
}

/// Builds the 24-vertex cube. Each face gets its own 4 vertices so normals
/// and tangents stay flat, and its UVs are the corners of the face's tile.
pub fn build_cube_mesh(layout: &AtlasLayout) -> ImpostorMesh {
    let mut positions = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, corners) in FACE_CORNERS {
        let base = positions.len() as u32;
        let uv_corners = layout.tile(face).uv_bounds.corners();
        for (corner, uv) in corners.into_iter().zip(uv_corners) {
            positions.push(corner);
            uvs.push(uv);
        }
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    let normals = compute_normals(&positions, &indices);
    let tangents = compute_tangents(&positions, &normals, &uvs, &indices);

    ImpostorMesh {
        positions,
        normals,
        tangents,
        uvs,
        indices,
    }
}

/// Area-weighted vertex normals from triangle winding.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = Vec3::from(positions[i0]);
        let p1 = Vec3::from(positions[i1]);
        let p2 = Vec3::from(positions[i2]);
        let n = (p1 - p0).cross(p2 - p0);
        for idx in [i0, i1, i2] {
            accum[idx] += n;
        }
    }

    accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

/// Per-vertex tangents from UV gradients (Lengyel), orthogonalized against
/// the normal. Degenerate UV triangles contribute nothing.
pub fn compute_tangents(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    uvs: &[[f32; 2]],
    indices: &[u32],
) -> Vec<[f32; 4]> {
    let mut tan = vec![Vec3::ZERO; positions.len()];
    let mut bitan = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let e1 = Vec3::from(positions[i1]) - Vec3::from(positions[i0]);
        let e2 = Vec3::from(positions[i2]) - Vec3::from(positions[i0]);
        let d1 = Vec2::from(uvs[i1]) - Vec2::from(uvs[i0]);
        let d2 = Vec2::from(uvs[i2]) - Vec2::from(uvs[i0]);

        let denom = d1.x * d2.y - d2.x * d1.y;
        if denom.abs() < 1e-12 {
            continue;
        }
        let r = 1.0 / denom;
        let t = (e1 * d2.y - e2 * d1.y) * r;
        let b = (e2 * d1.x - e1 * d2.x) * r;

        for idx in [i0, i1, i2] {
            tan[idx] += t;
            bitan[idx] += b;
        }
    }

    normals
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let n = Vec3::from(*n);
            let t = (tan[i] - n * n.dot(tan[i])).try_normalize().unwrap_or(Vec3::X);
            let handedness = if n.cross(t).dot(bitan[i]) < 0.0 { -1.0 } else { 1.0 };
            [t.x, t.y, t.z, handedness]
        })
        .collect()
}
