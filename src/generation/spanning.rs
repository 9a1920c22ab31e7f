//! Minimum spanning tree over triangulation edges (Prim's algorithm)
//!
//! The tree is the mandatory corridor skeleton: every room reachable from the
//! start vertex is connected with the least total corridor length. Choosing
//! extra loop corridors from the leftover edges is up to the caller, see
//! [`remaining_edges`].

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::geometry::{Edge, Vertex, VertexKey};

/// A graph edge weighted by the Euclidean distance between its endpoints
///
/// Equality and hashing are undirected and ignore the weight, which is fully
/// determined by the endpoints anyway.
#[derive(Debug, Clone, Copy)]
pub struct WeightedEdge<T> {
    u: Vertex<T>,
    v: Vertex<T>,
    weight: f32,
}

impl<T> WeightedEdge<T> {
    pub fn new(u: Vertex<T>, v: Vertex<T>) -> Self {
        let weight = u.distance_to(&v);
        Self { u, v, weight }
    }

    #[inline]
    pub fn u(&self) -> &Vertex<T> {
        &self.u
    }

    #[inline]
    pub fn v(&self) -> &Vertex<T> {
        &self.v
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// The unweighted geometric edge
    pub fn edge(&self) -> Edge<T>
    where
        T: Clone,
    {
        Edge::new(self.u.clone(), self.v.clone())
    }
}

impl<T: Clone> From<&Edge<T>> for WeightedEdge<T> {
    fn from(edge: &Edge<T>) -> Self {
        Self::new(edge.u().clone(), edge.v().clone())
    }
}

impl<T: Clone> From<Edge<T>> for WeightedEdge<T> {
    fn from(edge: Edge<T>) -> Self {
        Self::from(&edge)
    }
}

impl<T> PartialEq for WeightedEdge<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.u == other.u && self.v == other.v) || (self.u == other.v && self.v == other.u)
    }
}

impl<T> Eq for WeightedEdge<T> {}

impl<T> Hash for WeightedEdge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        VertexKey::pair(self.u.key(), self.v.key()).hash(state);
    }
}

/// Build a minimum spanning tree with Prim's algorithm
///
/// Starting from `{start}`, repeatedly takes the lightest edge with exactly
/// one endpoint in the tree. Ties go to the edge that comes first in `edges`.
///
/// Only `start`'s connected component is spanned: vertices unreachable from
/// `start` are silently left out, so callers needing full coverage must check
/// the vertex count of the result. A connected graph of `n` vertices yields
/// exactly `n - 1` edges.
///
/// # Example
///
/// ```
/// use dungeon_layout::{minimum_spanning_tree, Vertex, WeightedEdge};
/// use glam::Vec2;
///
/// let a = Vertex::new(Vec2::new(0.0, 0.0), ());
/// let b = Vertex::new(Vec2::new(10.0, 0.0), ());
/// let c = Vertex::new(Vec2::new(10.0, 1.0), ());
///
/// let edges = vec![
///     WeightedEdge::new(a, b),
///     WeightedEdge::new(b, c),
///     WeightedEdge::new(a, c),
/// ];
/// let tree = minimum_spanning_tree(&edges, &a);
///
/// assert_eq!(tree.len(), 2);
/// assert!(!tree.contains(&WeightedEdge::new(a, c)));
/// ```
pub fn minimum_spanning_tree<T: Clone>(
    edges: &[WeightedEdge<T>],
    start: &Vertex<T>,
) -> Vec<WeightedEdge<T>> {
    let mut in_tree: HashSet<VertexKey> = HashSet::new();
    in_tree.insert(start.key());

    let mut tree = Vec::new();

    loop {
        let mut lightest: Option<&WeightedEdge<T>> = None;

        for edge in edges {
            let crosses_cut = in_tree.contains(&edge.u.key()) != in_tree.contains(&edge.v.key());
            if !crosses_cut {
                continue;
            }
            if lightest.map_or(true, |best| edge.weight < best.weight) {
                lightest = Some(edge);
            }
        }

        let Some(edge) = lightest else {
            break;
        };

        in_tree.insert(edge.u.key());
        in_tree.insert(edge.v.key());
        tree.push(edge.clone());
    }

    log::debug!(
        "spanning tree covers {} vertices with {} of {} edges",
        in_tree.len(),
        tree.len(),
        edges.len()
    );

    tree
}

/// Edges of `all` that are not in `tree`, deduplicated, in input order
///
/// These are the candidates for redundant loop corridors.
pub fn remaining_edges<T: Clone>(
    all: &[WeightedEdge<T>],
    tree: &[WeightedEdge<T>],
) -> Vec<WeightedEdge<T>> {
    let mut excluded: HashSet<&WeightedEdge<T>> = tree.iter().collect();
    all.iter()
        .filter(|edge| excluded.insert(*edge))
        .cloned()
        .collect()
}
