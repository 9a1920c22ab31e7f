//! Dungeon main structure

use glam::{IVec2, UVec2};
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::error::{LayoutError, Result};
use crate::generation::{generate_layout, WeightedEdge};
use crate::grid::Grid2D;
use crate::pathfinding::{PathCost, Pathfinder};
use crate::room::Room;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;
#[cfg(feature = "spatial-index")]
use glam::Vec2;

/// Extra cost of routing a hallway through a room tile
const ROOM_TILE_COST: f32 = 10.0;
/// Extra cost of carving through solid rock
const EMPTY_TILE_COST: f32 = 5.0;
/// Extra cost of reusing an existing hallway tile
const HALLWAY_TILE_COST: f32 = 1.0;

/// What occupies a tile
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// Solid rock
    #[default]
    None,
    /// Floor of a room
    Room,
    /// Corridor floor
    Hallway,
}

/// A routed corridor between two rooms
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Hallway {
    /// Room the corridor starts from
    pub from: usize,
    /// Room the corridor leads to
    pub to: usize,
    /// Tiles from the anchor of `from` to the anchor of `to`, inclusive
    pub path: Vec<IVec2>,
}

/// A complete generated dungeon
///
/// Holds the tile grid together with the graph it was built from, so callers
/// can rasterize tiles, draw the triangulation or query room connectivity.
///
/// # Examples
///
/// ```
/// use dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(42)
///     .room_count(15)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let dungeon = Dungeon::generate(config);
/// println!("Generated {} rooms", dungeon.rooms().len());
///
/// for hallway in dungeon.hallways() {
///     println!("Room {} -> room {}: {} tiles", hallway.from, hallway.to, hallway.path.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// Configuration used to generate this dungeon
    config: DungeonConfig,

    /// All rooms (indexed by room ID)
    rooms: Vec<Room>,

    /// Tile occupancy
    grid: Grid2D<CellType>,

    /// Every candidate connection between room anchors
    triangulation_edges: Vec<WeightedEdge<usize>>,

    /// Mandatory connections (minimum spanning tree)
    spanning_edges: Vec<WeightedEdge<usize>>,

    /// Corridors that were successfully routed
    hallways: Vec<Hallway>,

    /// Nearest-room lookup (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl Dungeon {
    /// Generate a dungeon from configuration
    ///
    /// Rooms are placed and marked on the grid, connected through a
    /// triangulation and spanning tree, and each selected connection is routed
    /// tile by tile. Routes prefer existing hallways, then rock, then rooms,
    /// and are pulled toward their goal.
    pub fn generate(config: DungeonConfig) -> Self {
        let layout = generate_layout(&config);

        let mut grid: Grid2D<CellType> = Grid2D::new(config.size, IVec2::ZERO);
        for room in &layout.rooms {
            for tile in room.tiles() {
                grid.set(tile, CellType::Room);
            }
        }

        let hallways = route_hallways(&mut grid, &layout.rooms, &layout.selected_edges);

        log::info!(
            "generated dungeon with {} rooms, {} candidate edges, {} of {} hallways routed",
            layout.rooms.len(),
            layout.candidate_edges.len(),
            hallways.len(),
            layout.selected_edges.len()
        );

        #[cfg(feature = "spatial-index")]
        let spatial_index = if layout.rooms.is_empty() {
            None
        } else {
            let anchors: Vec<Vec2> = layout.rooms.iter().map(|r| r.anchor()).collect();
            Some(SpatialIndex::new(&anchors))
        };

        Self {
            config,
            rooms: layout.rooms,
            grid,
            triangulation_edges: layout.candidate_edges,
            spanning_edges: layout.spanning_edges,
            hallways,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    #[inline]
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Map size in tiles
    #[inline]
    pub fn size(&self) -> UVec2 {
        self.grid.size()
    }

    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Get a room by ID
    ///
    /// Returns `None` if the room ID is out of bounds.
    #[inline]
    pub fn get_room(&self, id: usize) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Get a room by ID
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if the room ID is out of bounds
    pub fn room(&self, id: usize) -> Result<&Room> {
        self.rooms.get(id).ok_or(LayoutError::RoomNotFound(id))
    }

    /// Tile occupancy at a position, `None` outside the map
    #[inline]
    pub fn cell(&self, position: IVec2) -> Option<CellType> {
        self.grid.get(position).copied()
    }

    #[inline]
    pub fn grid(&self) -> &Grid2D<CellType> {
        &self.grid
    }

    /// All candidate connections (the triangulation edges between room anchors)
    #[inline]
    pub fn triangulation_edges(&self) -> &[WeightedEdge<usize>] {
        &self.triangulation_edges
    }

    /// Minimum spanning tree of the candidate connections
    #[inline]
    pub fn spanning_edges(&self) -> &[WeightedEdge<usize>] {
        &self.spanning_edges
    }

    #[inline]
    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    /// Number of tiles carved as hallway
    pub fn hallway_tile_count(&self) -> usize {
        self.grid.iter().filter(|(_, &cell)| cell == CellType::Hallway).count()
    }

    /// Room IDs reachable from `room_id` through hallways (BFS)
    ///
    /// Includes `room_id` itself. Returns an empty vec if the ID is invalid.
    pub fn connected_rooms(&self, room_id: usize) -> Vec<usize> {
        if room_id >= self.rooms.len() {
            return vec![];
        }

        let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
        for hallway in &self.hallways {
            adjacency.entry(hallway.from).or_default().push(hallway.to);
            adjacency.entry(hallway.to).or_default().push(hallway.from);
        }

        let mut visited = HashSet::new();
        let mut current = vec![room_id];
        visited.insert(room_id);

        while !current.is_empty() {
            let mut next = Vec::new();
            for id in &current {
                for &neighbor in adjacency.get(id).map(Vec::as_slice).unwrap_or(&[]) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut rooms: Vec<usize> = visited.into_iter().collect();
        rooms.sort_unstable();
        rooms
    }

    /// Check if every room can be reached from every other room
    pub fn is_fully_connected(&self) -> bool {
        self.rooms.is_empty() || self.connected_rooms(0).len() == self.rooms.len()
    }

    /// Find the room whose anchor is nearest to a position (requires spatial-index feature)
    ///
    /// Returns `None` if the dungeon has no rooms.
    #[cfg(feature = "spatial-index")]
    pub fn nearest_room(&self, position: Vec2) -> Option<&Room> {
        let index = self.spatial_index.as_ref()?;
        self.rooms.get(index.find_nearest(position))
    }
}

/// Route every selected edge across the grid and carve the paths as hallways
fn route_hallways(grid: &mut Grid2D<CellType>, rooms: &[Room], edges: &[WeightedEdge<usize>]) -> Vec<Hallway> {
    let mut pathfinder = Pathfinder::new(grid.size());
    let mut hallways = Vec::with_capacity(edges.len());

    for edge in edges {
        let (from, to) = (*edge.u().data(), *edge.v().data());
        let (Some(start_room), Some(goal_room)) = (rooms.get(from), rooms.get(to)) else {
            continue;
        };
        let start = start_room.center();
        let goal = goal_room.center();

        let tiles = &*grid;
        let path = pathfinder.find_path(start, goal, |_, next| {
            let position = next.position();
            let heuristic = position.as_vec2().distance(goal.as_vec2());
            let penalty = match tiles.get(position) {
                Some(CellType::Room) => ROOM_TILE_COST,
                Some(CellType::Hallway) => HALLWAY_TILE_COST,
                _ => EMPTY_TILE_COST,
            };
            PathCost::traversable(heuristic + penalty)
        });

        let Some(path) = path else {
            log::warn!("could not route hallway from room {} to room {}", from, to);
            continue;
        };

        for &tile in &path {
            if grid.get(tile) == Some(&CellType::None) {
                grid.set(tile, CellType::Hallway);
            }
        }

        hallways.push(Hallway { from, to, path });
    }

    hallways
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DungeonConfigBuilder;

    fn test_config(seed: u64) -> DungeonConfig {
        DungeonConfigBuilder::new()
            .seed(seed)
            .size(UVec2::new(80, 60))
            .unwrap()
            .room_count(25)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_dungeon_generation() {
        let config = test_config(42);
        let dungeon = Dungeon::generate(config);

        assert!(dungeon.rooms().len() >= 2);
        assert_eq!(dungeon.size(), config.size);
        assert_eq!(dungeon.config(), &config);
        assert!(!dungeon.hallways().is_empty());
        assert!(dungeon.hallway_tile_count() > 0);
    }

    #[test]
    fn test_rooms_marked_on_grid() {
        let dungeon = Dungeon::generate(test_config(5));

        for room in dungeon.rooms() {
            for tile in room.tiles() {
                assert_eq!(dungeon.cell(tile), Some(CellType::Room));
            }
        }
        assert_eq!(dungeon.cell(IVec2::new(-1, 0)), None);
    }

    #[test]
    fn test_hallways_connect_anchors() {
        let dungeon = Dungeon::generate(test_config(11));

        for hallway in dungeon.hallways() {
            let from = dungeon.room(hallway.from).unwrap();
            let to = dungeon.room(hallway.to).unwrap();
            assert_eq!(hallway.path.first(), Some(&from.center()));
            assert_eq!(hallway.path.last(), Some(&to.center()));

            for pair in hallway.path.windows(2) {
                let step = (pair[1] - pair[0]).abs();
                assert_eq!(step.x + step.y, 1);
            }
            for &tile in &hallway.path {
                assert_ne!(dungeon.cell(tile), Some(CellType::None));
            }
        }
    }

    #[test]
    fn test_spanning_tree_connects_all_rooms() {
        for seed in [1, 2, 3] {
            let dungeon = Dungeon::generate(test_config(seed));

            assert_eq!(dungeon.spanning_edges().len() + 1, dungeon.rooms().len());
            assert!(dungeon.hallways().len() >= dungeon.spanning_edges().len());
            assert!(dungeon.is_fully_connected());
        }
    }

    #[test]
    fn test_tree_only_dungeon() {
        let config = DungeonConfigBuilder::new()
            .seed(8)
            .extra_hallway_chance(0.0)
            .unwrap()
            .build()
            .unwrap();
        let dungeon = Dungeon::generate(config);

        assert_eq!(dungeon.hallways().len(), dungeon.spanning_edges().len());
    }

    #[test]
    fn test_deterministic_generation() {
        let first = Dungeon::generate(test_config(1234));
        let second = Dungeon::generate(test_config(1234));

        assert_eq!(first.rooms(), second.rooms());
        assert_eq!(first.hallways(), second.hallways());
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn test_invalid_room_id() {
        let dungeon = Dungeon::generate(test_config(42));

        assert!(dungeon.get_room(999).is_none());
        assert_eq!(dungeon.room(999), Err(LayoutError::RoomNotFound(999)));
        assert!(dungeon.connected_rooms(999).is_empty());
    }

    #[test]
    fn test_no_rooms() {
        let config = DungeonConfigBuilder::new()
            .seed(3)
            .room_count(0)
            .unwrap()
            .build()
            .unwrap();
        let dungeon = Dungeon::generate(config);

        assert!(dungeon.rooms().is_empty());
        assert!(dungeon.hallways().is_empty());
        assert_eq!(dungeon.hallway_tile_count(), 0);
        assert!(dungeon.is_fully_connected());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_nearest_room() {
        let dungeon = Dungeon::generate(test_config(42));

        for room in dungeon.rooms() {
            let found = dungeon.nearest_room(room.anchor()).unwrap();
            assert_eq!(found.id, room.id);
        }
    }
}
