use std::hash::{Hash, Hasher};

use super::vertex::{Vertex, VertexKey};

/// An undirected edge between two vertices
///
/// `Edge::new(u, v) == Edge::new(v, u)` and both hash identically, so edges
/// can be deduplicated through a `HashSet` regardless of winding.
#[derive(Debug, Clone, Copy)]
pub struct Edge<T> {
    u: Vertex<T>,
    v: Vertex<T>,
}

impl<T> Edge<T> {
    pub fn new(u: Vertex<T>, v: Vertex<T>) -> Self {
        Self { u, v }
    }

    #[inline]
    pub fn u(&self) -> &Vertex<T> {
        &self.u
    }

    #[inline]
    pub fn v(&self) -> &Vertex<T> {
        &self.v
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f32 {
        self.u.distance_to(&self.v)
    }

    /// Check if `vertex` is one of the endpoints
    pub fn contains(&self, vertex: &Vertex<T>) -> bool {
        self.u == *vertex || self.v == *vertex
    }

    /// The endpoint opposite to `vertex`, or `None` if `vertex` is not an endpoint
    pub fn other(&self, vertex: &Vertex<T>) -> Option<&Vertex<T>> {
        if self.u == *vertex {
            Some(&self.v)
        } else if self.v == *vertex {
            Some(&self.u)
        } else {
            None
        }
    }

    /// Endpoint keys in canonical order
    pub(crate) fn key(&self) -> (VertexKey, VertexKey) {
        VertexKey::pair(self.u.key(), self.v.key())
    }
}

impl<T> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.u == other.u && self.v == other.v) || (self.u == other.v && self.v == other.u)
    }
}

impl<T> Eq for Edge<T> {}

impl<T> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
