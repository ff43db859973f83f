use arrayvec::ArrayVec;
use hashbrown::HashMap;

use crate::{edge::Edge, error::Error, mesh::Face};

/**
 * Per-edge incidence of a face list: for every distinct edge, the "opposite"
 * vertex of each face incident on it, i.e. the third corner that is not an
 * endpoint of the edge.
 *
 * An edge with one incident face is a boundary edge; an edge with two is
 * interior, and its two opposite vertices feed the interior midpoint
 * blending rule of the subdivision pass.
 */
pub struct EdgeAdjacency {
    map: HashMap<Edge, ArrayVec<u32, 2>>,
}

impl EdgeAdjacency {
    /// Scan `faces` once and index the opposite vertices of every distinct
    /// edge. An edge incident on more than two faces makes the mesh
    /// non-manifold and fails the build.
    pub fn build(faces: &[Face]) -> Result<EdgeAdjacency, Error> {
        let mut map: HashMap<Edge, ArrayVec<u32, 2>> =
            HashMap::with_capacity(faces.len() * 3 / 2);
        for f in faces {
            for (e, opposite) in f.edges() {
                map.entry(e)
                    .or_default()
                    .try_push(opposite)
                    .map_err(|_| Error::NonManifoldEdge(e))?;
            }
        }
        Ok(EdgeAdjacency { map })
    }

    /// The number of distinct edges in the indexed face list.
    pub fn num_edges(&self) -> usize {
        self.map.len()
    }

    /// Check if the edge has exactly one incident face.
    pub fn is_boundary(&self, e: Edge) -> bool {
        self.opposites(e).len() == 1
    }

    /// The opposite vertices of the faces incident on `e`: two for an
    /// interior edge, one for a boundary edge, none if the edge does not
    /// appear in the indexed face list.
    pub fn opposites(&self, e: Edge) -> &[u32] {
        self.map.get(&e).map(|opp| opp.as_slice()).unwrap_or(&[])
    }
}
