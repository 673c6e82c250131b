//! Procedural mesh tessellation
//!
//! Turns a small [`MeshRequest`] (shape, resolution, size, offset, facing
//! flags) into an indexed triangle mesh with per-vertex normals and UVs.
//!
//! # Pipeline
//!
//! 1. A shape describes its dense parametric [`Lattice`].
//! 2. [`build_vertex_groups`] compacts the lattice into [`VertexGroup`]s and
//!    an [`ExclusionMap`]; points shared by several faces own one physical
//!    slot per face.
//! 3. [`triangulate`] walks every face's quad grid, resolves each corner to
//!    its slot and stamps normals/UVs.
//! 4. Shape post-processes (rounding, sphere projection, plane remap) run,
//!    followed by scale-and-offset.
//!
//! # Example
//! ```
//! use glam::Vec3;
//! use procmesh_core::{MeshRequest, create_mesh};
//!
//! let request = MeshRequest::cube("crate", 4, Vec3::ONE, 0.25);
//! let mesh = create_mesh(&request)?;
//! assert_eq!(mesh.vertex_count(), 6 * 5 * 5);
//! # Ok::<(), procmesh_core::MeshError>(())
//! ```

mod axis;
mod error;
mod request;
mod shapes;
mod triangulation;
mod types;
mod vertices;

#[cfg(test)]
mod tests;

pub use axis::Plane;
pub use error::MeshError;
pub use request::{MAX_RESOLUTION, MeshRequest, PostProcess, ShapeKind};
pub use shapes::{CubeLattice, PlaneLattice, create_mesh, cube_faces, cube_to_sphere, plane_face};
pub use triangulation::{
    FaceDescriptor, FaceLattice, FaceUv, TraversalOrder, TriangulationParams, face_index_count,
    triangulate,
};
pub use types::{Bounds, ExclusionMap, MeshData, VertexGroup};
pub use vertices::{Lattice, VertexBuild, build_vertex_groups};
