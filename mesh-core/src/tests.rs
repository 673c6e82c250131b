//! Tests for vertex groups, triangulation and shape creators

use glam::{Vec2, Vec3};

use super::*;

const EPSILON: f32 = 1e-5;

fn assert_vec3_eq(a: Vec3, b: Vec3) {
    assert!(a.abs_diff_eq(b, EPSILON), "expected {b:?}, got {a:?}");
}

// ========================================================================
// Vertex Group Tests
// ========================================================================

#[test]
fn test_vertex_group_single_slot() {
    let group = VertexGroup::new(3, Vec3::ONE, 7, 1);
    assert!(group.is_single());
    assert_eq!(group.single_index(), Some(7));
    assert_eq!(group.slot(0), 7);
    assert_eq!(group.slot(2), 7);
    assert_eq!(group.indices(), 7..8);
}

#[test]
fn test_vertex_group_slot_clamps_to_last() {
    let group = VertexGroup::new(0, Vec3::ZERO, 10, 2);
    assert!(!group.is_single());
    assert_eq!(group.single_index(), None);
    assert_eq!(group.slot(0), 10);
    assert_eq!(group.slot(1), 11);
    assert_eq!(group.slot(2), 11);
}

#[test]
#[should_panic]
fn test_vertex_group_rejects_empty() {
    let _ = VertexGroup::new(0, Vec3::ZERO, 0, 0);
}

// ========================================================================
// Vertex Builder Tests
// ========================================================================

#[test]
fn test_plane_lattice_groups_are_identity_mapped() {
    let build = build_vertex_groups(&PlaneLattice::new(2), true);

    assert_eq!(build.groups.len(), 9);
    assert_eq!(build.raw_count, 9);
    assert_eq!(build.slot_count, 9);
    for (i, group) in build.groups.iter().enumerate() {
        assert_eq!(build.exclusion_map.get(i), Some(i));
        assert_eq!(group.single_index(), Some(i as u32));
    }
    assert_vec3_eq(build.groups[5].position, Vec3::new(1.0, 0.5, 0.0));
}

#[test]
fn test_cube_lattice_resolution_one() {
    let lattice = CubeLattice::new(1);
    assert_eq!(lattice.group_count(), 8);
    assert_eq!(lattice.excluded_count(), 0);

    let build = build_vertex_groups(&lattice, true);
    assert_eq!(build.slot_count, 24);
    assert!(build.groups.iter().all(|g| g.len() == 3));
}

#[test]
fn test_cube_lattice_excludes_interior() {
    let lattice = CubeLattice::new(3);
    assert_eq!(lattice.excluded_count(), 8);
    assert_eq!(lattice.group_count(), 64 - 8);

    let build = build_vertex_groups(&lattice, true);
    let mut excluded_before = 0;
    for raw in 0..build.raw_count {
        match build.exclusion_map.get(raw) {
            None => {
                let [x, y, z] = lattice.coords(raw);
                assert!((1..3).contains(&x) && (1..3).contains(&y) && (1..3).contains(&z));
                excluded_before += 1;
            }
            Some(compact) => assert_eq!(compact, raw - excluded_before),
        }
    }
    assert_eq!(excluded_before, 8);
}

#[test]
fn test_cube_group_sizes_count_faces() {
    let lattice = CubeLattice::new(2);
    // corner, edge midpoint, face center
    assert_eq!(lattice.group_size(0), 3);
    assert_eq!(lattice.group_size(1), 2);
    assert_eq!(lattice.group_size(3 + 1), 1);
    // the single interior point
    assert!(lattice.is_excluded(9 + 3 + 1));
}

#[test]
fn test_slot_sum_matches_slot_count() {
    for resolution in 1..=5 {
        let build = build_vertex_groups(&CubeLattice::new(resolution), true);
        let sum: usize = build.groups.iter().map(|g| g.len()).sum();
        assert_eq!(sum, build.slot_count);
        assert_eq!(sum, 6 * (resolution + 1) * (resolution + 1));
    }
}

#[test]
fn test_backface_groups_are_mirrored() {
    let build = build_vertex_groups(&PlaneLattice::new(1), false);

    assert_eq!(build.groups.len(), 8);
    assert_eq!(build.front_slot_count, 4);
    assert_eq!(build.slot_count, 8);
    assert_eq!(build.exclusion_map.len(), 8);

    for i in 0..4 {
        let front = build.groups[i];
        let back = build.groups[i + 4];
        assert_eq!(back.self_index, front.self_index + 4);
        assert_eq!(back.position, front.position);
        assert_eq!(back.slot(0), front.slot(0) + 4);
        assert_eq!(build.exclusion_map.get(i + 4), Some(i + 4));
    }
}

#[test]
fn test_mirrored_exclusion_map_is_stable_compaction() {
    let build = build_vertex_groups(&CubeLattice::new(3), false);
    let entries = build.exclusion_map.as_slice();

    assert_eq!(entries.len(), 2 * build.raw_count);
    let mut sentinels = 0;
    for (k, &entry) in entries.iter().enumerate() {
        if entry == ExclusionMap::EXCLUDED {
            sentinels += 1;
        } else {
            assert_eq!(entry as usize, k - sentinels);
        }
    }
    assert_eq!(sentinels, 16);
}

// ========================================================================
// Face Triangulator Tests
// ========================================================================

#[test]
fn test_face_lattice_raw_index() {
    let edge = 4;
    // XZ face at y = r on a resolution-3 cube
    let lattice = FaceLattice::new(3, 16, 4);
    assert_eq!(lattice.raw_index(0, edge), 3);
    assert_eq!(lattice.raw_index(1, edge), 7);
    assert_eq!(lattice.raw_index(edge, edge), 19);
}

#[test]
fn test_face_uv_layouts() {
    let edge = 3;
    let plain = FaceUv::default();
    let swapped_flipped = FaceUv {
        swap: true,
        flip_u: false,
        flip_v: true,
    };

    // unique index 5 = row 1, col 2
    assert_eq!(plain.uv(5, edge), Vec2::new(0.5, 1.0));
    assert_eq!(swapped_flipped.uv(5, edge), Vec2::new(1.0, 0.5));
}

#[test]
fn test_single_quad_clockwise_indices() {
    let build = build_vertex_groups(&PlaneLattice::new(1), true);
    let params = TriangulationParams {
        resolution: 1,
        forward_facing: true,
        backface_culling: true,
        base_edge_slot: None,
    };
    let mut normals = vec![Vec3::ZERO; 4];
    let mut uvs = vec![Vec2::ZERO; 4];

    let indices = triangulate(&[plane_face(1)], &build, &params, &mut normals, &mut uvs);

    assert_eq!(indices, vec![0, 2, 1, 2, 3, 1]);
    assert!(normals.iter().all(|&n| n == Vec3::NEG_Z));
    assert_eq!(uvs[3], Vec2::ONE);
}

#[test]
fn test_inverted_facing_flips_winding_and_normals() {
    let build = build_vertex_groups(&PlaneLattice::new(1), true);
    let params = TriangulationParams {
        resolution: 1,
        forward_facing: false,
        backface_culling: true,
        base_edge_slot: None,
    };
    let mut normals = vec![Vec3::ZERO; 4];
    let mut uvs = vec![Vec2::ZERO; 4];

    let indices = triangulate(&[plane_face(1)], &build, &params, &mut normals, &mut uvs);

    assert_eq!(indices, vec![2, 0, 1, 3, 2, 1]);
    assert!(normals.iter().all(|&n| n == Vec3::Z));
}

#[test]
fn test_row_stride_skips_closing_column() {
    let build = build_vertex_groups(&PlaneLattice::new(2), true);
    let params = TriangulationParams {
        resolution: 2,
        forward_facing: true,
        backface_culling: true,
        base_edge_slot: None,
    };
    let mut normals = vec![Vec3::ZERO; 9];
    let mut uvs = vec![Vec2::ZERO; 9];

    let indices = triangulate(&[plane_face(2)], &build, &params, &mut normals, &mut uvs);

    assert_eq!(indices.len(), face_index_count(2));
    // the lower-left corner of each quad, row by row
    let quad_origins: Vec<u32> = indices.chunks(6).map(|q| q[0]).collect();
    assert_eq!(quad_origins, vec![0, 1, 3, 4]);
}

#[test]
fn test_cube_faces_never_share_a_slot() {
    for resolution in 1..=4 {
        let request = MeshRequest::cube("cube", resolution, Vec3::ONE, 0.0);
        let mesh = create_mesh(&request).unwrap();

        let mut owner = vec![None; mesh.vertex_count()];
        for (face, chunk) in mesh
            .triangles
            .chunks(face_index_count(resolution as usize))
            .enumerate()
        {
            for &v in chunk {
                let previous = owner[v as usize].replace(face);
                assert!(previous.is_none() || previous == Some(face));
            }
        }
        assert!(owner.iter().all(Option::is_some));
    }
}

// ========================================================================
// Request Validation Tests
// ========================================================================

#[test]
fn test_validation_rejects_zero_resolution() {
    let request = MeshRequest::plane("p", 0, Vec2::ONE, Plane::Xy);
    assert_eq!(create_mesh(&request).unwrap_err(), MeshError::ResolutionOutOfRange(0));
}

#[test]
fn test_validation_rejects_huge_resolution() {
    let request = MeshRequest::sphere("s", MAX_RESOLUTION + 1, Vec3::ONE);
    assert!(matches!(
        request.validate(),
        Err(MeshError::ResolutionOutOfRange(_))
    ));
}

#[test]
fn test_validation_rejects_bad_size_and_roundness() {
    let flat_cube = MeshRequest::cube("c", 2, Vec3::new(1.0, 0.0, 1.0), 0.0);
    assert!(matches!(flat_cube.validate(), Err(MeshError::InvalidSize(_))));

    let rounded = MeshRequest::cube("c", 2, Vec3::ONE, 1.5);
    assert_eq!(rounded.validate(), Err(MeshError::RoundnessOutOfRange(1.5)));

    let nan_offset = MeshRequest::sphere("s", 2, Vec3::ONE).with_offset(Vec3::NAN);
    assert!(matches!(
        nan_offset.validate(),
        Err(MeshError::NonFiniteOffset(_))
    ));
}

#[test]
fn test_validation_accepts_flat_plane_size() {
    let request = MeshRequest::plane("p", 3, Vec2::new(2.0, 1.0), Plane::Yz);
    assert_eq!(request.size, Vec3::new(2.0, 1.0, 0.0));
    assert!(request.validate().is_ok());
}

#[test]
fn test_validation_rejects_thick_plane() {
    for axis in Plane::ALL {
        let request = MeshRequest::new("p", ShapeKind::Plane { axis }, 2, Vec3::ONE);
        assert_eq!(
            request.validate(),
            Err(MeshError::InvalidSize([1.0, 1.0, 1.0])),
            "{axis}"
        );
        assert!(create_mesh(&request).is_err());
    }
}

#[test]
fn test_flat_plane_sits_on_unused_axis_offset() {
    let request = MeshRequest::new("p", ShapeKind::Plane { axis: Plane::Xy }, 1, Vec3::new(1.0, 1.0, 0.5))
        .with_offset(Vec3::new(0.0, 0.0, 3.0));
    assert!(request.validate().is_err());

    // The same extent without thickness sits on the offset of its unused axis
    let flat = MeshRequest::plane("p", 2, Vec2::ONE, Plane::Xy).with_offset(Vec3::new(0.0, 0.0, 3.0));
    let mesh = create_mesh(&flat).unwrap();
    for v in &mesh.vertices {
        assert_eq!(v.z, 3.0);
        assert!(mesh.bounds.contains(*v, EPSILON));
    }
}

// ========================================================================
// Shape Creator Tests
// ========================================================================

#[test]
fn test_plane_resolution_one_scenario() {
    let request = MeshRequest::plane("plane", 1, Vec2::ONE, Plane::Xy);
    let mesh = create_mesh(&request).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangles.len(), 6);
    assert_vec3_eq(mesh.vertices[0], Vec3::new(-0.5, -0.5, 0.0));
    assert_vec3_eq(mesh.vertices[1], Vec3::new(0.5, -0.5, 0.0));
    assert_vec3_eq(mesh.vertices[2], Vec3::new(-0.5, 0.5, 0.0));
    assert_vec3_eq(mesh.vertices[3], Vec3::new(0.5, 0.5, 0.0));
    assert!(mesh.normals.iter().all(|&n| n == Vec3::NEG_Z));

    let reversed = create_mesh(&request.clone().with_forward_facing(false)).unwrap();
    assert!(reversed.normals.iter().all(|&n| n == Vec3::Z));
}

#[test]
fn test_plane_remap_onto_xz() {
    let offset = Vec3::new(1.0, 2.0, 3.0);
    let request =
        MeshRequest::plane("floor", 2, Vec2::new(4.0, 2.0), Plane::Xz).with_offset(offset);
    let mesh = create_mesh(&request).unwrap();

    assert!(mesh.vertices.iter().all(|v| (v.y - offset.y).abs() < EPSILON));
    assert!(mesh.normals.iter().all(|&n| n.abs_diff_eq(Vec3::Y, EPSILON)));
    assert_eq!(mesh.bounds.center, offset);
    assert_eq!(mesh.bounds.size, Vec3::new(4.0, 0.0, 2.0));
    assert!(mesh.vertices.iter().all(|&v| mesh.bounds.contains(v, EPSILON)));
}

#[test]
fn test_plane_remap_onto_yz() {
    let request = MeshRequest::plane("wall", 1, Vec2::new(2.0, 3.0), Plane::Yz);
    let mesh = create_mesh(&request).unwrap();

    assert!(mesh.vertices.iter().all(|v| v.x.abs() < EPSILON));
    assert!(mesh.normals.iter().all(|&n| n.abs_diff_eq(Vec3::NEG_X, EPSILON)));
    assert_eq!(mesh.bounds.size, Vec3::new(0.0, 2.0, 3.0));
}

#[test]
fn test_cube_resolution_one_scenario() {
    let offset = Vec3::new(0.0, 1.0, 0.0);
    let size = Vec3::new(2.0, 1.0, 3.0);
    let request = MeshRequest::cube("cube", 1, size, 0.0).with_offset(offset);
    let mesh = create_mesh(&request).unwrap();

    assert_eq!(mesh.vertex_groups().len(), 8);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangles.len(), 36);
    assert_eq!(mesh.bounds, Bounds::new(offset, size));

    // every corner position appears exactly three times
    for group in mesh.vertex_groups() {
        let position = mesh.vertices[group.slot(0) as usize];
        let copies = mesh.vertices.iter().filter(|&&v| v == position).count();
        assert_eq!(copies, 3);
    }
}

#[test]
fn test_cube_normals_are_axis_aligned_and_outward() {
    let mesh = create_mesh(&MeshRequest::cube("cube", 3, Vec3::ONE, 0.0)).unwrap();

    for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
        assert_eq!(n.abs().element_sum(), 1.0);
        let axis = (0..3).find(|&i| n[i] != 0.0).unwrap();
        // the vertex lies on the face the normal points out of
        assert!((v[axis] - 0.5 * n[axis]).abs() < EPSILON);
    }
}

#[test]
fn test_rounded_cube_keeps_face_centers_flat() {
    let request = MeshRequest::cube("rounded", 4, Vec3::ONE, 0.5).with_offset(Vec3::splat(0.5));
    let mesh = create_mesh(&request).unwrap();

    for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
        assert!((n.length() - 1.0).abs() < EPSILON);
        assert!(mesh.bounds.contains(*v, EPSILON));
    }

    // center of the z = 0 face is untouched by rounding
    let center = Vec3::new(0.5, 0.5, 0.0);
    let index = mesh
        .vertices
        .iter()
        .position(|v| v.abs_diff_eq(center, EPSILON))
        .expect("face center vertex");
    assert_vec3_eq(mesh.normals[index], Vec3::NEG_Z);
}

#[test]
fn test_full_roundness_makes_a_sphere() {
    let request = MeshRequest::cube("ball", 4, Vec3::ONE, 1.0).with_offset(Vec3::splat(0.5));
    let mesh = create_mesh(&request).unwrap();

    for v in &mesh.vertices {
        assert!(((*v - Vec3::splat(0.5)).length() - 0.5).abs() < EPSILON);
    }
}

#[test]
fn test_sphere_vertices_on_unit_sphere() {
    let offset = Vec3::new(3.0, -1.0, 2.0);
    let size = Vec3::new(2.0, 4.0, 6.0);
    let request = MeshRequest::sphere("sphere", 5, size).with_offset(offset);
    let mesh = create_mesh(&request).unwrap();

    for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
        let local = 2.0 * (*v - offset) / size;
        assert!((local.length() - 1.0).abs() < 1e-4);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(local.abs_diff_eq(*n, 1e-4));
    }
    assert_eq!(mesh.bounds, Bounds::new(offset, size));
}

#[test]
fn test_cube_to_sphere_fixes_face_centers() {
    assert_vec3_eq(cube_to_sphere(Vec3::X), Vec3::X);
    assert_vec3_eq(cube_to_sphere(Vec3::NEG_Z), Vec3::NEG_Z);
    assert_vec3_eq(cube_to_sphere(Vec3::ONE), Vec3::ONE / 3f32.sqrt());
}

#[test]
fn test_post_process_runs_last() {
    fn lift(mesh: &mut MeshData) {
        for v in &mut mesh.vertices {
            v.y += 10.0;
        }
    }

    let request = MeshRequest::plane("p", 1, Vec2::ONE, Plane::Xy).with_post_process(lift);
    let mesh = create_mesh(&request).unwrap();
    assert_vec3_eq(mesh.vertices[0], Vec3::new(-0.5, 9.5, 0.0));
}

// ========================================================================
// Mesh Data Tests
// ========================================================================

#[test]
fn test_vertex_labels() {
    let cube = create_mesh(&MeshRequest::cube("c", 1, Vec3::ONE, 0.0)).unwrap();
    assert_eq!(cube.vertex_label(0), "V[0,1,2]");
    assert_eq!(cube.vertex_label(4), "V[3,4,5]");
    assert_eq!(cube.group_of_vertex(5).self_index, 1);

    let plane = create_mesh(
        &MeshRequest::plane("p", 1, Vec2::ONE, Plane::Xy).with_backface_culling(false),
    )
    .unwrap();
    assert_eq!(plane.front_vertex_count(), 4);
    assert_eq!(plane.vertex_label(1), "V[1,5]");
    assert_eq!(plane.vertex_label(5), "V[5]");
}

#[test]
fn test_bounds_from_points() {
    let bounds = Bounds::from_points(&[Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 2.0)]);
    assert_eq!(bounds.center, Vec3::new(1.0, 2.0, 2.0));
    assert_eq!(bounds.size, Vec3::new(4.0, 4.0, 0.0));
    assert_eq!(bounds.min(), Vec3::new(-1.0, 0.0, 2.0));
    assert_eq!(Bounds::from_points(&[]), Bounds::default());
}
