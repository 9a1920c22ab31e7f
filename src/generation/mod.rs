//! Core dungeon layout algorithms
//!
//! Places rooms, connects their anchors with a Delaunay triangulation and
//! picks the hallways to build: a minimum spanning tree plus a random share
//! of the leftover triangulation edges.

pub mod delaunay;
pub mod rooms;
pub mod spanning;

pub use delaunay::{triangulate, Circumcircle, Triangle, Triangulation};
pub use rooms::place_rooms;
pub use spanning::{minimum_spanning_tree, remaining_edges, WeightedEdge};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DungeonConfig;
use crate::geometry::Vertex;
use crate::room::Room;

/// A dungeon layout without hallway routing (graph only)
///
/// This is an intermediate representation used during generation. Vertex
/// payloads are room IDs.
#[derive(Debug, Clone)]
pub struct RawLayout {
    /// Placed rooms, indexed by ID
    pub rooms: Vec<Room>,
    /// Candidate connections between room anchors
    pub candidate_edges: Vec<WeightedEdge<usize>>,
    /// Minimum spanning tree of the candidates (mandatory hallways)
    pub spanning_edges: Vec<WeightedEdge<usize>>,
    /// Spanning tree edges followed by the randomly kept extra edges
    pub selected_edges: Vec<WeightedEdge<usize>>,
}

/// Generate the room graph from configuration (without hallway routing)
pub fn generate_layout(config: &DungeonConfig) -> RawLayout {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    // Step 1: Place rooms
    let rooms = place_rooms(config, &mut rng);

    // Step 2: Connect room anchors
    let candidate_edges = candidate_edges(&rooms);

    // Step 3: Spanning tree plus extra loops
    let (spanning_edges, selected_edges) = select_hallways(&candidate_edges, config.extra_hallway_chance, &mut rng);

    if spanning_edges.len() + 1 < rooms.len() {
        log::warn!(
            "spanning tree reaches only {} of {} rooms",
            spanning_edges.len() + 1,
            rooms.len()
        );
    }

    RawLayout {
        rooms,
        candidate_edges,
        spanning_edges,
        selected_edges,
    }
}

/// Triangulation edges between room anchors
///
/// When the anchors admit no triangle (two rooms, or all anchors on one line)
/// every pair of rooms is a candidate instead.
pub fn candidate_edges(rooms: &[Room]) -> Vec<WeightedEdge<usize>> {
    let vertices: Vec<Vertex<usize>> = rooms.iter().map(|room| Vertex::new(room.anchor(), room.id)).collect();

    let triangulation = triangulate(&vertices);
    if !triangulation.edges().is_empty() {
        return triangulation.edges().iter().map(WeightedEdge::from).collect();
    }

    let mut edges = Vec::new();
    for (i, u) in vertices.iter().enumerate() {
        for v in &vertices[i + 1..] {
            if u != v {
                edges.push(WeightedEdge::new(*u, *v));
            }
        }
    }
    edges
}

/// Choose the hallways to build from the candidate edges
///
/// Returns `(spanning_tree, selected)`. The tree is grown from the first
/// endpoint of the first candidate; every remaining candidate is then kept
/// with probability `extra_chance`, drawn in candidate order.
pub fn select_hallways<T: Clone>(
    candidates: &[WeightedEdge<T>],
    extra_chance: f64,
    rng: &mut ChaCha8Rng,
) -> (Vec<WeightedEdge<T>>, Vec<WeightedEdge<T>>) {
    let Some(first) = candidates.first() else {
        return (Vec::new(), Vec::new());
    };

    let tree = minimum_spanning_tree(candidates, first.u());
    let mut selected = tree.clone();

    for edge in remaining_edges(candidates, &tree) {
        if rng.gen::<f64>() < extra_chance {
            selected.push(edge);
        }
    }

    (tree, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DungeonConfigBuilder;
    use glam::{IVec2, UVec2};
    use std::collections::HashSet;

    fn room(id: usize, x: i32, y: i32) -> Room {
        Room::new(id, IVec2::new(x, y), UVec2::new(3, 3))
    }

    #[test]
    fn test_candidate_edges_two_rooms() {
        let rooms = vec![room(0, 0, 0), room(1, 10, 0)];
        let edges = candidate_edges(&rooms);

        assert_eq!(edges.len(), 1);
        assert_eq!(*edges[0].u().data(), 0);
        assert_eq!(*edges[0].v().data(), 1);
    }

    #[test]
    fn test_candidate_edges_collinear_rooms() {
        let rooms = vec![room(0, 0, 0), room(1, 10, 0), room(2, 20, 0)];
        let edges = candidate_edges(&rooms);

        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn test_candidate_edges_triangulated() {
        let rooms = vec![room(0, 0, 0), room(1, 20, 0), room(2, 0, 20), room(3, 25, 22)];
        let edges = candidate_edges(&rooms);

        assert_eq!(edges.len(), 5);
    }

    #[test]
    fn test_select_hallways_bounds() {
        let rooms = vec![room(0, 0, 0), room(1, 20, 0), room(2, 0, 20), room(3, 25, 22), room(4, 40, 5)];
        let edges = candidate_edges(&rooms);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (tree, none_extra) = select_hallways(&edges, 0.0, &mut rng);
        assert_eq!(tree.len(), rooms.len() - 1);
        assert_eq!(none_extra, tree);

        let (tree, all) = select_hallways(&edges, 1.0, &mut rng);
        assert_eq!(all.len(), edges.len());
        assert_eq!(&all[..tree.len()], &tree[..]);
    }

    #[test]
    fn test_select_hallways_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (tree, selected) = select_hallways::<usize>(&[], 0.5, &mut rng);
        assert!(tree.is_empty());
        assert!(selected.is_empty());
    }

    #[test]
    fn test_generate_layout() {
        let config = DungeonConfigBuilder::new()
            .seed(2024)
            .size(UVec2::new(100, 80))
            .unwrap()
            .room_count(30)
            .unwrap()
            .build()
            .unwrap();
        let layout = generate_layout(&config);

        assert!(layout.rooms.len() >= 3);
        assert_eq!(layout.spanning_edges.len(), layout.rooms.len() - 1);
        assert!(layout.selected_edges.len() >= layout.spanning_edges.len());
        assert!(layout.selected_edges.len() <= layout.candidate_edges.len());

        let connected: HashSet<usize> = layout
            .spanning_edges
            .iter()
            .flat_map(|e| [*e.u().data(), *e.v().data()])
            .collect();
        assert_eq!(connected.len(), layout.rooms.len());
    }

    #[test]
    fn test_generate_layout_deterministic() {
        let config = DungeonConfigBuilder::new().seed(77).build().unwrap();

        let first = generate_layout(&config);
        let second = generate_layout(&config);

        assert_eq!(first.rooms, second.rooms);
        assert_eq!(first.selected_edges, second.selected_edges);
    }
}
