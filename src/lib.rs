/*!
One-pass [Loop
subdivision](https://en.wikipedia.org/wiki/Loop_subdivision_surface) for
indexed triangle meshes.

# Overview

+ A mesh is a flat list of vertex positions and a flat list of faces, each
  face an ordered triple of vertex indices ([`TriMesh`], [`Face`]). The
  position of a vertex in the point list is its identity; the winding order
  of a face defines its orientation.

+ [`TriMesh::subdivide_loop`] refines the mesh by one step: every face
  splits into four around its edge midpoints. Interior edges blend their
  endpoints with the opposite vertices of the two incident faces, boundary
  edges take the plain average of their endpoints. The original vertices are
  repositioned against their neighborhoods, and fresh angle-weighted unit
  normals are computed for every vertex of the refined mesh.

+ The pass is a pure function over the input mesh. All bookkeeping (the
  edge-midpoint registry, the per-edge adjacency) is local to one
  invocation. Malformed input, such as out-of-range indices, non-manifold
  edges or isolated vertices, fails fast with an [`Error`] instead of
  producing a patched-up mesh.

+ Geometry uses [`glam`](https://crates.io/crates/glam) vectors. The
  building blocks ([`Edge`], [`EdgeMidpoints`], [`EdgeAdjacency`]) and a
  couple of platonic-solid constructors on [`TriMesh`] are exported for
  callers that want to assemble their own tooling on top.
*/

mod edge;
mod error;
mod math;
mod mesh;
mod primitive;
mod subdiv;
mod topol;

pub use edge::{Edge, EdgeMidpoints};
pub use error::Error;
pub use math::{angle_at, face_normal};
pub use mesh::{Face, TriMesh};
pub use topol::EdgeAdjacency;
