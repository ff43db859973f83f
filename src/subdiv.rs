use glam::Vec3;
use tracing::debug;

use crate::{
    edge::{Edge, EdgeMidpoints},
    error::Error,
    math::{angle_at, face_normal},
    mesh::{Face, TriMesh},
    topol::EdgeAdjacency,
};

impl TriMesh {
    /// Subdivide the mesh once according to the [Loop subdivision
    /// scheme](https://en.wikipedia.org/wiki/Loop_subdivision_surface).
    ///
    /// Every face splits into four children around its edge midpoints. A
    /// midpoint vertex is created once per distinct edge: an interior edge
    /// blends its endpoints with the opposite vertices of the two incident
    /// faces, a boundary edge takes the plain average of its endpoints. The
    /// original vertices are then repositioned against their neighborhoods,
    /// and angle-weighted unit normals are computed for every vertex of the
    /// refined mesh.
    ///
    /// The input must be a 2-manifold triangle mesh, possibly with
    /// boundary. Malformed input fails with an [`Error`] before any output
    /// is produced.
    ///
    /// ```rust
    /// use mica::TriMesh;
    ///
    /// let mesh = TriMesh::tetrahedron(1.0);
    /// let refined = mesh.subdivide_loop().expect("Cannot subdivide");
    /// // Four children per face, one new vertex per distinct edge.
    /// assert_eq!(16, refined.num_faces());
    /// assert_eq!(10, refined.num_vertices());
    /// assert_eq!(refined.num_vertices(), refined.normals().len());
    /// ```
    pub fn subdivide_loop(&self) -> Result<TriMesh, Error> {
        self.check_faces()?;
        let adjacency = EdgeAdjacency::build(&self.faces)?;
        debug!(
            "subdividing {} vertices, {} faces, {} edges",
            self.num_vertices(),
            self.num_faces(),
            adjacency.num_edges()
        );
        let mut points = self.points.clone();
        points.reserve(adjacency.num_edges());
        let mut midpoints = EdgeMidpoints::with_capacity(adjacency.num_edges());
        let mut faces = Vec::with_capacity(self.faces.len() * 4);
        for f in &self.faces {
            let Face(v1, v2, v3) = *f;
            let a = midpoint_vertex(Edge::new(v1, v2), &adjacency, &mut midpoints, &mut points);
            let b = midpoint_vertex(Edge::new(v2, v3), &adjacency, &mut midpoints, &mut points);
            let c = midpoint_vertex(Edge::new(v3, v1), &adjacency, &mut midpoints, &mut points);
            // The children keep the winding sense of the parent:
            //         v2
            //         /\
            //        a--b
            //       / \/ \
            //     v1---c---v3
            faces.push(Face(v1, a, c));
            faces.push(Face(a, b, c));
            faces.push(Face(c, b, v3));
            faces.push(Face(a, v2, b));
        }
        debug_assert_eq!(midpoints.len(), adjacency.num_edges());
        self.reposition(&mut points)?;
        let normals = vertex_normals(&points, &faces);
        debug!(
            "subdivided into {} vertices, {} faces",
            points.len(),
            faces.len()
        );
        Ok(TriMesh {
            points,
            faces,
            normals,
        })
    }

    /// Move every original vertex against its incident faces: each face adds
    /// its other two corners to the vertex's ring sum and bumps the
    /// occurrence count. A ring neighbor enters the sum once per face that
    /// contains both vertices, so an interior neighbor is counted twice;
    /// the 3/16 coefficient is stated against that per-face count.
    fn reposition(&self, points: &mut [Vec3]) -> Result<(), Error> {
        let mut occurrences = vec![0u32; self.points.len()];
        let mut ring = vec![Vec3::ZERO; self.points.len()];
        for f in &self.faces {
            let Face(v1, v2, v3) = *f;
            occurrences[v1 as usize] += 1;
            ring[v1 as usize] += self.points[v2 as usize] + self.points[v3 as usize];
            occurrences[v2 as usize] += 1;
            ring[v2 as usize] += self.points[v1 as usize] + self.points[v3 as usize];
            occurrences[v3 as usize] += 1;
            ring[v3 as usize] += self.points[v1 as usize] + self.points[v2 as usize];
        }
        for (i, (&n, &sum)) in occurrences.iter().zip(ring.iter()).enumerate() {
            if n == 0 {
                return Err(Error::IsolatedVertex(i as u32));
            }
            points[i] = self.points[i] * (5.0 / 8.0) + sum * (3.0 / (16.0 * n as f32));
        }
        Ok(())
    }
}

/// Resolve the midpoint vertex of `e`, creating it on first use. The
/// registry guarantees that an edge shared by two faces produces exactly one
/// vertex, no matter which face resolves it first.
fn midpoint_vertex(
    e: Edge,
    adjacency: &EdgeAdjacency,
    midpoints: &mut EdgeMidpoints,
    points: &mut Vec<Vec3>,
) -> u32 {
    if let Some(index) = midpoints.index(e) {
        return index;
    }
    let (va, vb) = e.ends();
    let ends = points[va as usize] + points[vb as usize];
    let pos = match adjacency.opposites(e) {
        &[oppa, oppb] => {
            ends * (3.0 / 8.0) + (points[oppa as usize] + points[oppb as usize]) * (1.0 / 8.0)
        }
        // Boundary edge.
        _ => ends * 0.5,
    };
    let index = points.len() as u32;
    points.push(pos);
    midpoints.add(e, index);
    index
}

/// Angle-weighted vertex normals: every face adds its flat normal to the
/// accumulator of each of its corners, scaled by the interior angle at that
/// corner. A zero-area face has no normal to contribute and is skipped, and
/// a vertex whose accumulator stays zero keeps a zero normal instead of
/// normalizing into NaN.
fn vertex_normals(points: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; points.len()];
    for f in faces {
        let Face(v1, v2, v3) = *f;
        let (p1, p2, p3) = (
            points[v1 as usize],
            points[v2 as usize],
            points[v3 as usize],
        );
        let norm = face_normal(p1, p2, p3);
        if norm == Vec3::ZERO {
            continue;
        }
        normals[v1 as usize] += norm * angle_at(p1, p2, p3);
        normals[v2 as usize] += norm * angle_at(p2, p3, p1);
        normals[v3 as usize] += norm * angle_at(p3, p1, p2);
    }
    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}

#[cfg(test)]
mod test {
    use crate::{
        edge::Edge,
        error::Error,
        math::face_normal,
        mesh::{Face, TriMesh},
    };
    use glam::{Vec3, vec3};

    fn strip() -> TriMesh {
        TriMesh::new(
            vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(0.5, 1.0, 0.0),
                vec3(1.5, 1.0, 0.0),
            ],
            vec![Face(0, 1, 2), Face(1, 3, 2)],
        )
    }

    fn integer_tetrahedron() -> TriMesh {
        TriMesh::new(
            vec![
                vec3(1.0, 1.0, 1.0),
                vec3(1.0, -1.0, -1.0),
                vec3(-1.0, 1.0, -1.0),
                vec3(-1.0, -1.0, 1.0),
            ],
            vec![Face(0, 1, 2), Face(0, 2, 3), Face(0, 3, 1), Face(3, 2, 1)],
        )
    }

    #[test]
    fn t_single_triangle() {
        let mesh = TriMesh::new(
            vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
            ],
            vec![Face(0, 1, 2)],
        );
        let refined = mesh.subdivide_loop().expect("Cannot subdivide");
        assert_eq!(6, refined.num_vertices());
        assert_eq!(4, refined.num_faces());
        // All three edges are boundary edges, so the midpoints are plain
        // averages of their endpoints.
        assert_eq!(vec3(0.5, 0.0, 0.0), refined.points()[3]);
        assert_eq!(vec3(0.5, 0.5, 0.0), refined.points()[4]);
        assert_eq!(vec3(0.0, 0.5, 0.0), refined.points()[5]);
        // Each corner occurs in the single face once.
        assert_eq!(vec3(0.1875, 0.1875, 0.0), refined.points()[0]);
        assert_eq!(vec3(0.625, 0.1875, 0.0), refined.points()[1]);
        assert_eq!(vec3(0.1875, 0.625, 0.0), refined.points()[2]);
        assert_eq!(
            [Face(0, 3, 5), Face(3, 4, 5), Face(5, 4, 2), Face(3, 1, 4)].as_slice(),
            refined.faces()
        );
        // The mesh is flat, so every vertex normal is the face normal.
        assert_eq!(refined.num_vertices(), refined.normals().len());
        for n in refined.normals() {
            assert!((*n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn t_tetrahedron_interior_midpoints() {
        let mesh = integer_tetrahedron();
        let refined = mesh.subdivide_loop().expect("Cannot subdivide");
        // One new vertex per distinct edge, four children per face.
        assert_eq!(10, refined.num_vertices());
        assert_eq!(16, refined.num_faces());
        assert_eq!(24, refined.num_edges());
        // Every edge is interior; the midpoint of (0, 1) blends the
        // endpoints with the two remaining vertices of the tetrahedron.
        let expected = (mesh.points()[0] + mesh.points()[1]) * (3.0 / 8.0)
            + (mesh.points()[2] + mesh.points()[3]) * (1.0 / 8.0);
        assert_eq!(vec3(0.5, 0.0, 0.0), expected);
        assert_eq!(expected, refined.points()[4]);
        // Valence 3 everywhere collapses the update to v/2.
        for i in 0..4 {
            assert_eq!(mesh.points()[i] * 0.5, refined.points()[i]);
        }
    }

    #[test]
    fn t_winding_preserved() {
        let mesh = integer_tetrahedron();
        let refined = mesh.subdivide_loop().expect("Cannot subdivide");
        for (i, f) in mesh.faces().iter().enumerate() {
            let [a, b, c] = f.vertices();
            let parent = face_normal(
                mesh.points()[a as usize],
                mesh.points()[b as usize],
                mesh.points()[c as usize],
            );
            for child in &refined.faces()[i * 4..(i + 1) * 4] {
                let [x, y, z] = child.vertices();
                let n = face_normal(
                    refined.points()[x as usize],
                    refined.points()[y as usize],
                    refined.points()[z as usize],
                );
                assert!(parent.dot(n) > 0.0, "child of face {} flipped", i);
            }
        }
    }

    #[test]
    fn t_unit_normals() {
        let refined = TriMesh::tetrahedron(1.0)
            .subdivide_loop()
            .expect("Cannot subdivide");
        for n in refined.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn t_strip_boundary_midpoints() {
        let mesh = strip();
        let refined = mesh.subdivide_loop().expect("Cannot subdivide");
        assert_eq!(9, refined.num_vertices());
        assert_eq!(8, refined.num_faces());
        // Boundary edges average their endpoints.
        assert_eq!(vec3(0.5, 0.0, 0.0), refined.points()[4]);
        assert_eq!(vec3(0.25, 0.5, 0.0), refined.points()[6]);
        assert_eq!(vec3(1.25, 0.5, 0.0), refined.points()[7]);
        assert_eq!(vec3(1.0, 1.0, 0.0), refined.points()[8]);
        // The shared edge (1, 2) is interior and blends in the opposite
        // vertices of both faces.
        assert_eq!(vec3(0.75, 0.5, 0.0), refined.points()[5]);
    }

    #[test]
    fn t_shared_edge_single_midpoint() {
        let refined = strip().subdivide_loop().expect("Cannot subdivide");
        // Both parents' children reference the one midpoint of the shared
        // edge; a duplicate would have pushed the vertex count to 10.
        assert_eq!(9, refined.num_vertices());
        let (first, second) = refined.faces().split_at(4);
        assert!(first.iter().any(|f| f.vertices().contains(&5)));
        assert!(second.iter().any(|f| f.vertices().contains(&5)));
    }

    #[test]
    fn t_boundary_vertex_repositioning() {
        let mesh = strip();
        let refined = mesh.subdivide_loop().expect("Cannot subdivide");
        // The update is uniform: boundary vertices use the same formula as
        // interior ones. v0 occurs in one face, v1 in both.
        assert_eq!(vec3(0.28125, 0.1875, 0.0), refined.points()[0]);
        assert_eq!(vec3(0.859375, 0.28125, 0.0), refined.points()[1]);
    }

    #[test]
    fn t_two_passes() {
        let refined = TriMesh::octahedron(1.0)
            .subdivide_loop()
            .expect("Cannot subdivide")
            .subdivide_loop()
            .expect("Cannot subdivide");
        assert_eq!(66, refined.num_vertices());
        assert_eq!(128, refined.num_faces());
        for n in refined.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn t_empty_mesh() {
        let refined = TriMesh::new(Vec::new(), Vec::new())
            .subdivide_loop()
            .expect("Cannot subdivide");
        assert_eq!(0, refined.num_vertices());
        assert_eq!(0, refined.num_faces());
        assert_eq!(0, refined.normals().len());
    }

    #[test]
    fn t_vertex_out_of_bounds() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![Face(0, 1, 7)]);
        assert!(matches!(
            mesh.subdivide_loop(),
            Err(Error::VertexOutOfBounds(0, 7))
        ));
    }

    #[test]
    fn t_degenerate_face() {
        let mesh = TriMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![Face(0, 1, 1)]);
        assert!(matches!(
            mesh.subdivide_loop(),
            Err(Error::DegenerateFace(0))
        ));
    }

    #[test]
    fn t_non_manifold_edge() {
        let mesh = TriMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE],
            vec![Face(0, 1, 2), Face(0, 1, 3), Face(0, 1, 4)],
        );
        assert!(matches!(
            mesh.subdivide_loop(),
            Err(Error::NonManifoldEdge(e)) if e == Edge::new(0, 1)
        ));
    }

    #[test]
    fn t_isolated_vertex() {
        let mesh = TriMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![Face(0, 1, 2)],
        );
        assert!(matches!(
            mesh.subdivide_loop(),
            Err(Error::IsolatedVertex(3))
        ));
    }
}
