use glam::Vec3;
use hashbrown::HashSet;

use crate::{edge::Edge, error::Error};

/**
 * A triangle as an ordered triple of vertex indices.
 *
 * The winding order of the three corners is significant: it defines the
 * orientation of the triangle, and with it the direction of every normal
 * computed from it.
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face(pub u32, pub u32, pub u32);

impl Face {
    /// The vertex indices in winding order.
    pub fn vertices(self) -> [u32; 3] {
        [self.0, self.1, self.2]
    }

    /// The three edges of the face, each paired with the vertex opposite it.
    pub fn edges(self) -> [(Edge, u32); 3] {
        let Face(v1, v2, v3) = self;
        [
            (Edge::new(v1, v2), v3),
            (Edge::new(v2, v3), v1),
            (Edge::new(v3, v1), v2),
        ]
    }
}

/**
 * Triangle mesh stored as flat sequences: vertex positions, faces, and
 * per-vertex normals. A vertex is identified by its position in the point
 * list; faces index into that list.
 *
 * The mesh is assumed to be a 2-manifold triangle mesh, possibly with
 * boundary: every edge is shared by at most two faces. Operations that
 * depend on this fail with an [`Error`] when it does not hold.
 */
pub struct TriMesh {
    pub(crate) points: Vec<Vec3>,
    pub(crate) faces: Vec<Face>,
    pub(crate) normals: Vec<Vec3>,
}

impl TriMesh {
    /// Create a mesh from vertex positions and faces.
    ///
    /// Normals start out empty; a subdivision pass produces them for the
    /// refined mesh.
    pub fn new(points: Vec<Vec3>, faces: Vec<Face>) -> TriMesh {
        TriMesh {
            points,
            faces,
            normals: Vec::new(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The number of distinct undirected edges in the face list.
    pub fn num_edges(&self) -> usize {
        let mut edges: HashSet<Edge> = HashSet::with_capacity(self.faces.len() * 3 / 2);
        for f in &self.faces {
            edges.extend(f.edges().map(|(e, _)| e));
        }
        edges.len()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Per-vertex unit normals, indexed like the points. Empty until a
    /// subdivision pass computes them.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Every face must reference three distinct vertices inside the point
    /// list.
    pub(crate) fn check_faces(&self) -> Result<(), Error> {
        let nverts = self.points.len() as u32;
        for (i, f) in self.faces.iter().enumerate() {
            let [v1, v2, v3] = f.vertices();
            if let Some(&v) = [v1, v2, v3].iter().find(|&&v| v >= nverts) {
                return Err(Error::VertexOutOfBounds(i, v));
            }
            if v1 == v2 || v2 == v3 || v3 == v1 {
                return Err(Error::DegenerateFace(i));
            }
        }
        Ok(())
    }
}
