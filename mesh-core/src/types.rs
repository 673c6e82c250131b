//! Mesh data types
//!
//! Shared types for procedural mesh generation.

use std::fmt::Write as _;
use std::ops::Range;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One unique lattice position mapped onto 1..N physical vertex slots.
///
/// A lattice point that sits on a cube edge or corner is shared by two or
/// three faces; each face gets its own slot so it can carry its own normal
/// and UV. Slots of a group are always consecutive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexGroup {
    /// Position of the group in the compacted group array
    pub self_index: u32,
    /// Lattice position before scale/offset
    pub position: Vec3,
    start: u32,
    len: u32,
}

impl VertexGroup {
    pub fn new(self_index: u32, position: Vec3, start: u32, len: u32) -> Self {
        assert!(len >= 1, "vertex group {self_index} must own at least one slot");
        Self {
            self_index,
            position,
            start,
            len,
        }
    }

    /// True when the group owns exactly one physical vertex
    pub fn is_single(&self) -> bool {
        self.len == 1
    }

    /// The only slot of a single-vertex group
    pub fn single_index(&self) -> Option<u32> {
        self.is_single().then_some(self.start)
    }

    /// Number of physical vertex slots owned by the group
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Groups are never empty; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Physical slot for the given axis slot, clamped to the last owned slot
    pub fn slot(&self, axis_slot: usize) -> u32 {
        self.start + (axis_slot as u32).min(self.len - 1)
    }

    /// All physical slots owned by the group
    pub fn indices(&self) -> Range<u32> {
        self.start..self.start + self.len
    }
}

/// Raw lattice index -> compacted vertex group index.
///
/// Excluded lattice points hold [`ExclusionMap::EXCLUDED`]. For any
/// non-excluded raw index `i` the entry equals `i` minus the number of
/// excluded entries before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionMap {
    entries: Vec<i32>,
}

impl ExclusionMap {
    pub const EXCLUDED: i32 = -1;

    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            entries: vec![Self::EXCLUDED; len],
        }
    }

    pub(crate) fn set(&mut self, raw: usize, group: usize) {
        self.entries[raw] = group as i32;
    }

    /// Compacted group index, or `None` if the lattice point is excluded
    pub fn get(&self, raw: usize) -> Option<usize> {
        match self.entries[raw] {
            Self::EXCLUDED => None,
            group => Some(group as usize),
        }
    }

    pub fn is_excluded(&self, raw: usize) -> bool {
        self.entries[raw] == Self::EXCLUDED
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.entries
    }
}

/// Axis-aligned bounding box stored as center + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let size = max - min;
        Self {
            center: min + 0.5 * size,
            size,
        }
    }

    /// Tight bounds of a point set; unit bounds at the origin when empty
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(&first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Self::from_min_max(min, max)
    }

    pub fn min(&self) -> Vec3 {
        self.center - 0.5 * self.size
    }

    pub fn max(&self) -> Vec3 {
        self.center + 0.5 * self.size
    }

    pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
        let min = self.min() - Vec3::splat(tolerance);
        let max = self.max() + Vec3::splat(tolerance);
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ONE)
    }
}

/// Generated mesh: parallel vertex buffers, quad-ordered triangles and bounds.
///
/// Besides the exportable buffers this keeps the vertex-group bookkeeping
/// the mesh was built from, so debug tooling can map a physical vertex back
/// to its lattice point.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Mesh name used by exporters
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uv: Vec<Vec2>,
    /// Triangle indices; every 6 consecutive entries form one quad
    pub triangles: Vec<u32>,
    pub bounds: Bounds,
    vertex_groups: Vec<VertexGroup>,
    exclusion_map: ExclusionMap,
    group_of_vertex: Vec<u32>,
    backface_culling: bool,
}

impl MeshData {
    /// Allocate buffers for the given groups; positions are filled from the
    /// groups, normals and UVs start zeroed until faces are triangulated.
    pub(crate) fn from_groups(
        name: impl Into<String>,
        vertex_groups: Vec<VertexGroup>,
        exclusion_map: ExclusionMap,
        slot_count: usize,
        backface_culling: bool,
    ) -> Self {
        let mut vertices = vec![Vec3::ZERO; slot_count];
        let mut group_of_vertex = vec![0; slot_count];

        for group in &vertex_groups {
            for slot in group.indices() {
                vertices[slot as usize] = group.position;
                group_of_vertex[slot as usize] = group.self_index;
            }
        }

        Self {
            name: name.into(),
            vertices,
            normals: vec![Vec3::ZERO; slot_count],
            uv: vec![Vec2::ZERO; slot_count],
            triangles: Vec::new(),
            bounds: Bounds::default(),
            vertex_groups,
            exclusion_map,
            group_of_vertex,
            backface_culling,
        }
    }

    /// Number of physical vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of physical vertices on the front-facing half of the buffer
    pub fn front_vertex_count(&self) -> usize {
        if self.backface_culling {
            self.vertices.len()
        } else {
            self.vertices.len() / 2
        }
    }

    pub fn backface_culling(&self) -> bool {
        self.backface_culling
    }

    pub fn vertex_groups(&self) -> &[VertexGroup] {
        &self.vertex_groups
    }

    pub fn exclusion_map(&self) -> &ExclusionMap {
        &self.exclusion_map
    }

    /// Vertex group that owns the given physical vertex
    pub fn group_of_vertex(&self, vertex: usize) -> &VertexGroup {
        &self.vertex_groups[self.group_of_vertex[vertex] as usize]
    }

    /// Debug label listing every slot that shares the vertex's lattice point,
    /// e.g. `V[0,1,2]`, with the mirrored slot appended when backfaces are
    /// emitted.
    pub fn vertex_label(&self, vertex: usize) -> String {
        let group = self.group_of_vertex(vertex);
        let mut label = String::from("V[");

        for (i, slot) in group.indices().enumerate() {
            if i > 0 {
                label.push(',');
            }
            let _ = write!(label, "{slot}");
        }

        if !self.backface_culling && vertex < self.front_vertex_count() {
            let _ = write!(label, ",{}", vertex + self.front_vertex_count());
        }

        label.push(']');
        label
    }
}
