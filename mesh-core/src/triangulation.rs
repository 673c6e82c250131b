//! Face triangulator
//!
//! Sweeps a `resolution × resolution` quad grid per face with a single
//! linear loop, resolves each quad corner through the shape's lattice
//! mapping and the exclusion map to a physical vertex slot, and stamps that
//! slot's normal and UV.
//!
//! # Triangle space
//!
//! A face's own grid has `(resolution + 1)²` unique indices
//! `u = row * edge + col`. The loop walks a zig-zag window over two rows:
//! even window positions `k` land on `k / 2` (lower row), odd ones on
//! `k / 2 + edge` (upper row). Advancing the window by 2 moves one quad
//! right; at the end of a row it advances by 4 to skip the closing column.

use glam::{Vec2, Vec3};

use crate::vertices::VertexBuild;

/// Visitation order of a quad's corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Clockwise = 0,
    CounterClockwise = 1,
}

impl TraversalOrder {
    pub fn inverted(self) -> Self {
        match self {
            TraversalOrder::Clockwise => TraversalOrder::CounterClockwise,
            TraversalOrder::CounterClockwise => TraversalOrder::Clockwise,
        }
    }

    fn bit(self) -> usize {
        self as usize
    }
}

/// Affine map from a face's triangle-space index to the shape's raw lattice index:
/// `raw = start + row * row_stride + col * col_stride`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLattice {
    pub start: usize,
    pub row_stride: usize,
    pub col_stride: usize,
}

impl FaceLattice {
    pub const fn new(start: usize, row_stride: usize, col_stride: usize) -> Self {
        Self {
            start,
            row_stride,
            col_stride,
        }
    }

    pub fn raw_index(&self, unique: usize, edge: usize) -> usize {
        self.start + (unique / edge) * self.row_stride + (unique % edge) * self.col_stride
    }
}

/// UV layout of a face: `(row, col) / resolution`, optionally swapped, then flipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceUv {
    pub swap: bool,
    pub flip_u: bool,
    pub flip_v: bool,
}

impl FaceUv {
    pub fn uv(&self, unique: usize, edge: usize) -> Vec2 {
        let step = 1.0 / (edge - 1) as f32;
        let row = (unique / edge) as f32 * step;
        let col = (unique % edge) as f32 * step;

        let (u, v) = if self.swap { (col, row) } else { (row, col) };
        Vec2::new(
            if self.flip_u { 1.0 - u } else { u },
            if self.flip_v { 1.0 - v } else { v },
        )
    }
}

/// Everything the triangulator needs to know about one face
#[derive(Debug, Clone, Copy)]
pub struct FaceDescriptor {
    /// Corner order that winds the face outward
    pub traversal: TraversalOrder,
    pub lattice: FaceLattice,
    /// Outward normal for a forward-facing mesh
    pub normal: Vec3,
    pub uv: FaceUv,
    /// Which slot of a shared vertex group belongs to this face
    pub axis_slot: usize,
}

/// Mesh-wide triangulation settings
#[derive(Debug, Clone, Copy)]
pub struct TriangulationParams {
    pub resolution: usize,
    pub forward_facing: bool,
    pub backface_culling: bool,
    /// Axis slot of the shape's base face; faces using it subtract it on
    /// their side seams so they don't collide with the neighbouring face.
    pub base_edge_slot: Option<usize>,
}

/// Index count of a single face
pub fn face_index_count(resolution: usize) -> usize {
    6 * resolution * resolution
}

/// Triangulate all faces.
///
/// Returns the index buffer; normals and UVs are written into the given
/// buffers at every resolved vertex. With backfaces emitted, face `k` fills
/// index ranges `2k` (front) and `2k + 1` (back).
pub fn triangulate(
    faces: &[FaceDescriptor],
    build: &VertexBuild,
    params: &TriangulationParams,
    normals: &mut [Vec3],
    uvs: &mut [Vec2],
) -> Vec<u32> {
    let per_face = face_index_count(params.resolution);
    let copies = if params.backface_culling { 1 } else { 2 };
    let mut indices = vec![0u32; copies * faces.len() * per_face];
    let facing = if params.forward_facing { 1.0 } else { -1.0 };

    for (i, face) in faces.iter().enumerate() {
        let order = if params.forward_facing {
            face.traversal
        } else {
            face.traversal.inverted()
        };

        let front = FacePass {
            order,
            normal: face.normal * facing,
            raw_offset: 0,
        };
        let start = copies * i * per_face;
        fill_face(
            &mut indices[start..start + per_face],
            face,
            &front,
            build,
            params,
            normals,
            uvs,
        );

        if !params.backface_culling {
            let back = FacePass {
                order: order.inverted(),
                normal: -front.normal,
                raw_offset: build.mirror_raw_offset(),
            };
            let start = start + per_face;
            fill_face(
                &mut indices[start..start + per_face],
                face,
                &back,
                build,
                params,
                normals,
                uvs,
            );
        }
    }

    indices
}

/// Per-pass overrides of a face (front or mirrored back)
struct FacePass {
    order: TraversalOrder,
    normal: Vec3,
    raw_offset: usize,
}

fn to_triangle_space(window: usize, edge: usize) -> usize {
    if window % 2 == 0 {
        window / 2
    } else {
        window / 2 + edge
    }
}

fn fill_face(
    out: &mut [u32],
    face: &FaceDescriptor,
    pass: &FacePass,
    build: &VertexBuild,
    params: &TriangulationParams,
    normals: &mut [Vec3],
    uvs: &mut [Vec2],
) {
    let resolution = params.resolution;
    let edge = resolution + 1;
    let o = pass.order.bit();

    // Side seams: first and last row of the face, excluding the corners
    let min_side_seam = resolution * edge;
    let max_side_seam = resolution * (resolution + 2);
    let on_side_seam = |unique: usize| {
        (unique > 0 && unique < resolution) || (unique > min_side_seam && unique < max_side_seam)
    };
    let overlap_correction = match params.base_edge_slot {
        Some(base) if base == face.axis_slot => base,
        _ => 0,
    };

    let mut window = 0;

    for quad in out.chunks_exact_mut(6) {
        // Unique corners A, B, C, D of the quad in triangle space
        let a = to_triangle_space(window + o, edge);
        let b = to_triangle_space(window + 1 - o, edge);
        let c = to_triangle_space(window + 2, edge);
        let d = to_triangle_space(window + 3, edge);
        let mut corners = [a, b, c, d];

        for unique in &mut corners {
            let raw = face.lattice.raw_index(*unique, edge) + pass.raw_offset;
            let group_index = build
                .exclusion_map
                .get(raw)
                .unwrap_or_else(|| panic!("face references excluded lattice point {raw}"));

            let axis_slot = if on_side_seam(*unique) {
                face.axis_slot - overlap_correction
            } else {
                face.axis_slot
            };
            let vertex = build.groups[group_index].slot(axis_slot) as usize;

            normals[vertex] = pass.normal;
            uvs[vertex] = face.uv.uv(*unique, edge);
            *unique = vertex;
        }

        let [a, b, c, d] = corners.map(|v| v as u32);
        let triangles = match pass.order {
            TraversalOrder::Clockwise => [a, b, c, b, d, c],
            TraversalOrder::CounterClockwise => [a, b, c, d, a, c],
        };
        quad.copy_from_slice(&triangles);

        let repeated = window % (2 * edge);
        window += 2 * (1 + (repeated / 2 % resolution) / (resolution - 1).max(1));
    }
}
