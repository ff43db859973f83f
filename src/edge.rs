use hashbrown::HashMap;
use std::fmt::{Debug, Display};

/**
 * An undirected edge, identified by the indices of its two endpoint
 * vertices. Two edges are equal iff they connect the same pair of vertices,
 * regardless of the order in which the endpoints were given.
 */
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    a: u32,
    b: u32,
}

impl Edge {
    /// Create the edge connecting vertices `u` and `v`. The endpoints are
    /// stored in canonical order, so `Edge::new(u, v)` and `Edge::new(v, u)`
    /// are the same key. The endpoints must be distinct.
    pub fn new(u: u32, v: u32) -> Edge {
        debug_assert_ne!(u, v, "an edge must connect two distinct vertices");
        if u < v { Edge { a: u, b: v } } else { Edge { a: v, b: u } }
    }

    /// The endpoint indices, smaller one first.
    pub fn ends(self) -> (u32, u32) {
        (self.a, self.b)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({}, {})", self.a, self.b)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({}, {})", self.a, self.b)
    }
}

/**
 * Map from an edge to the index of the midpoint vertex created on it.
 *
 * This is the deduplication cache of the subdivision pass: an edge shared by
 * two faces is resolved to the same midpoint vertex no matter which face
 * asks first. Entries are never removed or updated within a pass.
 */
pub struct EdgeMidpoints {
    map: HashMap<Edge, u32>,
}

impl Default for EdgeMidpoints {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeMidpoints {
    pub fn new() -> EdgeMidpoints {
        EdgeMidpoints {
            map: HashMap::new(),
        }
    }

    pub fn with_capacity(nedges: usize) -> EdgeMidpoints {
        EdgeMidpoints {
            map: HashMap::with_capacity(nedges),
        }
    }

    pub fn contains(&self, e: Edge) -> bool {
        self.map.contains_key(&e)
    }

    /// Register the midpoint vertex created for `e`. The edge must not have
    /// been registered before.
    pub fn add(&mut self, e: Edge, vertex: u32) {
        let prev = self.map.insert(e, vertex);
        debug_assert!(prev.is_none(), "{} already has a midpoint", e);
    }

    /// The index of the midpoint vertex registered for `e`, if any.
    pub fn index(&self, e: Edge) -> Option<u32> {
        self.map.get(&e).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
