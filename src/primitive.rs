use glam::vec3;

use crate::mesh::{Face, TriMesh};

/// Platonic solids.
impl TriMesh {
    /// Create a tetrahedron centered at the origin, with circumradius
    /// `radius`. The vertices of the mesh will lie on the sphere of that
    /// radius, and every face winds outward.
    pub fn tetrahedron(radius: f32) -> TriMesh {
        let a = radius * (1.0 / 3.0);
        let b = radius * (8.0f32 / 9.0).sqrt();
        let c = radius * (2.0f32 / 9.0).sqrt();
        let d = radius * (2.0f32 / 3.0).sqrt();
        TriMesh::new(
            vec![
                vec3(0.0, 0.0, radius),
                vec3(-c, d, -a),
                vec3(-c, -d, -a),
                vec3(b, 0.0, -a),
            ],
            vec![Face(0, 1, 2), Face(0, 2, 3), Face(0, 3, 1), Face(3, 2, 1)],
        )
    }

    /// Create an octahedron centered at the origin, with circumradius
    /// `radius`. The vertices of the mesh will lie on the sphere of that
    /// radius, and every face winds outward.
    pub fn octahedron(radius: f32) -> TriMesh {
        TriMesh::new(
            vec![
                vec3(radius, 0.0, 0.0),
                vec3(0.0, radius, 0.0),
                vec3(-radius, 0.0, 0.0),
                vec3(0.0, -radius, 0.0),
                vec3(0.0, 0.0, radius),
                vec3(0.0, 0.0, -radius),
            ],
            vec![
                Face(0, 4, 3),
                Face(1, 4, 0),
                Face(2, 4, 1),
                Face(3, 4, 2),
                Face(3, 5, 0),
                Face(0, 5, 1),
                Face(1, 5, 2),
                Face(2, 5, 3),
            ],
        )
    }
}
