//! Procedural 2D dungeon layout generation
//!
//! The algorithmic core of a room-and-corridor dungeon generator, suitable
//! for use with any game engine (Bevy, Godot, etc.): Delaunay triangulation of
//! room anchors, a minimum spanning tree for the corridor skeleton, and grid
//! pathfinding to route each corridor around obstacles.
//!
//! # Quick Start
//!
//! ```rust
//! use dungeon_layout::*;
//!
//! // Generate a dungeon
//! let config = DungeonConfigBuilder::new()
//!     .seed(42)
//!     .room_count(20).unwrap()
//!     .build().unwrap();
//!
//! let dungeon = Dungeon::generate(config);
//! println!("Generated {} rooms and {} hallways", dungeon.rooms().len(), dungeon.hallways().len());
//! ```
//!
//! The building blocks are usable on their own:
//!
//! ```rust
//! use dungeon_layout::*;
//! use glam::{IVec2, UVec2, Vec2};
//!
//! let anchors = [Vec2::new(4.0, 4.0), Vec2::new(30.0, 6.0), Vec2::new(12.0, 25.0), Vec2::new(40.0, 30.0)];
//! let vertices: Vec<Vertex<usize>> = anchors.iter().enumerate().map(|(i, &p)| Vertex::new(p, i)).collect();
//!
//! let triangulation = triangulate(&vertices);
//! let edges: Vec<WeightedEdge<usize>> = triangulation.edges().iter().map(WeightedEdge::from).collect();
//! let tree = minimum_spanning_tree(&edges, &vertices[0]);
//! assert_eq!(tree.len(), 3);
//!
//! let mut pathfinder = Pathfinder::new(UVec2::new(48, 36));
//! let path = pathfinder.find_path(IVec2::new(4, 4), IVec2::new(30, 6), |_, _| PathCost::traversable(1.0));
//! assert_eq!(path.map(|p| p.len()), Some(29));
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-room lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, rooms and hallways

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod generation;
pub mod pathfinding;
pub mod room;
pub mod dungeon;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{LayoutError, Result};
pub use config::{DungeonConfig, DungeonConfigBuilder};
pub use geometry::{Edge, Vertex};
pub use grid::Grid2D;
pub use generation::{
    minimum_spanning_tree, remaining_edges, triangulate, Circumcircle, RawLayout, Triangle, Triangulation,
    WeightedEdge,
};
pub use pathfinding::{PathCost, PathNode, Pathfinder};
pub use room::Room;
pub use dungeon::{CellType, Dungeon, Hallway};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{IVec2, UVec2, Vec2};
