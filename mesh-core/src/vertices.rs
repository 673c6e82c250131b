//! Vertex builder
//!
//! Walks a shape's dense parametric lattice and turns it into compacted
//! vertex groups plus the exclusion map used by the triangulator.

use glam::Vec3;

use crate::types::{ExclusionMap, VertexGroup};

/// Dense parametric index space of a shape.
///
/// Implementors are small parameter structs rather than closures so the
/// per-vertex calls stay static and allocation free.
pub trait Lattice {
    /// Number of lattice points that produce geometry
    fn group_count(&self) -> usize;

    /// Number of lattice points that must be skipped
    fn excluded_count(&self) -> usize {
        0
    }

    /// Position of a raw lattice index, before scale/offset
    fn position(&self, raw: usize) -> Vec3;

    /// True for raw indices that never emit a vertex
    fn is_excluded(&self, _raw: usize) -> bool {
        false
    }

    /// Number of faces meeting at a raw index
    fn group_size(&self, _raw: usize) -> usize {
        1
    }
}

/// Output of [`build_vertex_groups`]
#[derive(Debug, Clone)]
pub struct VertexBuild {
    pub groups: Vec<VertexGroup>,
    pub exclusion_map: ExclusionMap,
    /// Dense lattice size, `group_count + excluded_count`
    pub raw_count: usize,
    /// Physical slots used by the front-facing groups
    pub front_slot_count: usize,
    /// Physical slots used in total (doubled when backfaces are emitted)
    pub slot_count: usize,
    pub backface_culling: bool,
}

impl VertexBuild {
    /// Raw index offset of the mirrored copy of the lattice
    pub fn mirror_raw_offset(&self) -> usize {
        self.raw_count
    }
}

/// Build vertex groups for a lattice.
///
/// Slots are assigned in raw-index order. When `backface_culling` is false
/// every group is mirrored: the copy sits at the same position, its slots are
/// offset by the front slot count, and its map entry lives at
/// `raw + raw_count`.
pub fn build_vertex_groups<L: Lattice>(lattice: &L, backface_culling: bool) -> VertexBuild {
    let group_count = lattice.group_count();
    let raw_count = group_count + lattice.excluded_count();
    let copies = if backface_culling { 1 } else { 2 };

    let mut groups = Vec::with_capacity(copies * group_count);
    let mut exclusion_map = ExclusionMap::with_len(copies * raw_count);
    let mut excluded_so_far = 0;
    let mut next_slot = 0u32;

    for raw in 0..raw_count {
        if lattice.is_excluded(raw) {
            excluded_so_far += 1;
            continue;
        }

        let compact = raw - excluded_so_far;
        let len = lattice.group_size(raw).max(1) as u32;
        groups.push(VertexGroup::new(
            compact as u32,
            lattice.position(raw),
            next_slot,
            len,
        ));
        exclusion_map.set(raw, compact);
        next_slot += len;
    }

    assert_eq!(
        groups.len(),
        group_count,
        "lattice reported {group_count} groups but {} survived exclusion",
        groups.len()
    );

    let front_slot_count = next_slot as usize;

    if !backface_culling {
        for i in 0..group_count {
            let front = groups[i];
            groups.push(VertexGroup::new(
                (i + group_count) as u32,
                front.position,
                front.indices().start + front_slot_count as u32,
                front.len() as u32,
            ));
        }
        for raw in 0..raw_count {
            if let Some(compact) = exclusion_map.get(raw) {
                exclusion_map.set(raw + raw_count, compact + group_count);
            }
        }
    }

    VertexBuild {
        groups,
        exclusion_map,
        raw_count,
        front_slot_count,
        slot_count: copies * front_slot_count,
        backface_culling,
    }
}
