//! Room Structure
//!
//! An axis-aligned rectangle of tiles placed on the dungeon map.

use glam::{IVec2, UVec2, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular room on the dungeon grid
///
/// The room covers tiles `position.x .. position.x + size.x` by
/// `position.y .. position.y + size.y` (end exclusive).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    /// Index of the room in placement order
    pub id: usize,

    /// Top-left tile
    pub position: IVec2,

    /// Extent in tiles
    pub size: UVec2,
}

impl Room {
    pub fn new(id: usize, position: IVec2, size: UVec2) -> Self {
        Self { id, position, size }
    }

    /// First tile past the room on both axes
    #[inline]
    pub fn end(&self) -> IVec2 {
        self.position + self.size.as_ivec2()
    }

    /// Anchor tile used for triangulation and corridor endpoints
    ///
    /// `position + size / 2` with integer division.
    #[inline]
    pub fn center(&self) -> IVec2 {
        self.position + (self.size / 2).as_ivec2()
    }

    /// The anchor as a point for triangulation
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.center().as_vec2()
    }

    /// Check if a tile lies inside the room
    pub fn contains(&self, tile: IVec2) -> bool {
        let end = self.end();
        tile.x >= self.position.x && tile.y >= self.position.y && tile.x < end.x && tile.y < end.y
    }

    /// Check if two rooms share at least one tile
    pub fn intersects(&self, other: &Room) -> bool {
        let (a_end, b_end) = (self.end(), other.end());
        self.position.x < b_end.x
            && other.position.x < a_end.x
            && self.position.y < b_end.y
            && other.position.y < a_end.y
    }

    /// This room grown by `margin` tiles on every side
    pub fn expanded(&self, margin: u32) -> Room {
        Room {
            id: self.id,
            position: self.position - IVec2::splat(margin as i32),
            size: self.size + UVec2::splat(margin * 2),
        }
    }

    /// Iterate every tile of the room, row by row
    pub fn tiles(&self) -> impl Iterator<Item = IVec2> {
        let (start, end) = (self.position, self.end());
        (start.y..end.y).flat_map(move |y| (start.x..end.x).map(move |x| IVec2::new(x, y)))
    }

    #[inline]
    pub fn area(&self) -> u32 {
        self.size.x * self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_geometry() {
        let room = Room::new(0, IVec2::new(2, 3), UVec2::new(5, 4));

        assert_eq!(room.end(), IVec2::new(7, 7));
        assert_eq!(room.center(), IVec2::new(4, 5));
        assert_eq!(room.anchor(), Vec2::new(4.0, 5.0));
        assert_eq!(room.area(), 20);
        assert_eq!(room.tiles().count(), 20);
        assert!(room.tiles().all(|t| room.contains(t)));
    }

    #[test]
    fn test_contains() {
        let room = Room::new(0, IVec2::new(0, 0), UVec2::new(3, 3));

        assert!(room.contains(IVec2::new(0, 0)));
        assert!(room.contains(IVec2::new(2, 2)));
        assert!(!room.contains(IVec2::new(3, 2)));
        assert!(!room.contains(IVec2::new(-1, 0)));
    }

    #[test]
    fn test_intersects() {
        let a = Room::new(0, IVec2::new(0, 0), UVec2::new(4, 4));
        let b = Room::new(1, IVec2::new(3, 3), UVec2::new(2, 2));
        let c = Room::new(2, IVec2::new(4, 0), UVec2::new(2, 2));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching edges do not overlap
        assert!(!a.intersects(&c));
        // But they do once a buffer is added
        assert!(a.expanded(1).intersects(&c));
    }

    #[test]
    fn test_expanded() {
        let room = Room::new(3, IVec2::new(5, 5), UVec2::new(2, 3));
        let grown = room.expanded(1);

        assert_eq!(grown.id, 3);
        assert_eq!(grown.position, IVec2::new(4, 4));
        assert_eq!(grown.size, UVec2::new(4, 5));
    }
}
