//! Wavefront OBJ writer
//!
//! Positions, UVs and normals are deduplicated by exact bit pattern, so
//! vertices that differ only in one attribute share the others' records.
//! Positions and normals are mirrored on X for the export convention, and
//! every quad (six quad-ordered indices) becomes one 4-corner `f` record
//! with its winding reversed to match the mirror.

use std::io::Write;

use anyhow::Result;
use glam::{Vec2, Vec3};
use hashbrown::HashMap;
use procmesh_core::MeshData;

use crate::error::ExportError;

/// Insertion-ordered set of float tuples keyed by bit pattern
struct UniqueRecords<const N: usize> {
    lookup: HashMap<[u32; N], usize>,
    values: Vec<[f32; N]>,
}

impl<const N: usize> UniqueRecords<N> {
    fn new() -> Self {
        Self {
            lookup: HashMap::new(),
            values: Vec::new(),
        }
    }

    fn insert(&mut self, value: [f32; N]) -> usize {
        let key = value.map(f32::to_bits);
        *self.lookup.entry(key).or_insert_with(|| {
            self.values.push(value);
            self.values.len() - 1
        })
    }
}

/// 1-based `v/vt/vn` references of one physical vertex
#[derive(Debug, Clone, Copy)]
struct VertexRefs {
    position: usize,
    uv: usize,
    normal: usize,
}

/// OBJ object name: lowercase with spaces turned into dashes
pub fn object_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

fn mirror_x(v: Vec3) -> [f32; 3] {
    // -0.0 would print as "-0.000000" and dedupe apart from 0.0
    [-v.x, v.y, v.z].map(|f| if f == 0.0 { 0.0 } else { f })
}

/// Corners of a quad in OBJ order, derived from its two triangles.
///
/// The triangles are read back to front; if the second triangle's first
/// index already belongs to the first triangle, the quad is walked from the
/// second triangle instead.
pub fn quad_corners(quad: &[u32]) -> [u32; 4] {
    let (v1, v2, v3, v4) = (quad[2], quad[1], quad[0], quad[3]);
    if v4 == v1 || v4 == v2 || v4 == v3 {
        [quad[5], quad[4], quad[3], quad[0]]
    } else {
        [v1, v2, v3, v4]
    }
}

/// Write `mesh` as a single OBJ object
pub fn write_obj<W: Write>(w: &mut W, mesh: &MeshData) -> Result<()> {
    if mesh.triangles.len() % 6 != 0 {
        return Err(ExportError::NotQuads(mesh.triangles.len()).into());
    }

    let mut positions = UniqueRecords::<3>::new();
    let mut uvs = UniqueRecords::<2>::new();
    let mut normals = UniqueRecords::<3>::new();

    let refs: Vec<VertexRefs> = (0..mesh.vertex_count())
        .map(|i| {
            let uv: Vec2 = mesh.uv[i];
            VertexRefs {
                position: positions.insert(mirror_x(mesh.vertices[i])) + 1,
                uv: uvs.insert(uv.to_array()) + 1,
                normal: normals.insert(mirror_x(mesh.normals[i])) + 1,
            }
        })
        .collect();

    writeln!(w, "o {}", object_name(&mesh.name))?;
    for [x, y, z] in &positions.values {
        writeln!(w, "v {x:.6} {y:.6} {z:.6}")?;
    }
    for [u, v] in &uvs.values {
        writeln!(w, "vt {u:.6} {v:.6}")?;
    }
    for [x, y, z] in &normals.values {
        writeln!(w, "vn {x:.6} {y:.6} {z:.6}")?;
    }

    for quad in mesh.triangles.chunks_exact(6) {
        let corners = quad_corners(quad).map(|i| {
            let r = refs[i as usize];
            format!("{}/{}/{}", r.position, r.uv, r.normal)
        });
        writeln!(w, "f {}", corners.join(" "))?;
    }

    Ok(())
}

/// Render `mesh` as OBJ text
pub fn obj_string(mesh: &MeshData) -> Result<String> {
    let mut buffer = Vec::new();
    write_obj(&mut buffer, mesh)?;
    Ok(String::from_utf8(buffer)?)
}
