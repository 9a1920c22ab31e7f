//! Spatial indexing for fast position-to-room lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::Vec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around KD-tree for nearest-anchor queries
///
/// Maps an arbitrary map position (a click, a spawn point, a tile) to the
/// room whose anchor is closest.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

impl SpatialIndex {
    /// Build spatial index from room anchors
    ///
    /// The index of each anchor in `anchors` is what queries return.
    ///
    /// # Example
    ///
    /// ```
    /// use dungeon_layout::*;
    /// use glam::Vec2;
    ///
    /// let anchors = vec![Vec2::new(5.0, 5.0), Vec2::new(40.0, 12.0), Vec2::new(20.0, 30.0)];
    ///
    /// let index = SpatialIndex::new(&anchors);
    /// assert_eq!(index.find_nearest(Vec2::new(38.0, 10.0)), 1);
    /// ```
    pub fn new(anchors: &[Vec2]) -> Self {
        let points: Vec<[f32; 2]> = anchors.iter().map(|a| [a.x, a.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the index of the anchor nearest to a position
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let anchors = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
        ];

        let index = SpatialIndex::new(&anchors);

        assert_eq!(index.find_nearest(Vec2::new(1.0, 2.0)), 0);
        assert_eq!(index.find_nearest(Vec2::new(9.0, -3.0)), 1);
        assert_eq!(index.find_nearest(Vec2::new(-2.0, 8.0)), 2);
        assert_eq!(index.find_nearest(Vec2::new(30.0, 30.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let anchors = vec![Vec2::new(12.0, 4.0), Vec2::new(3.0, 20.0)];

        let index = SpatialIndex::new(&anchors);

        assert_eq!(index.find_nearest(anchors[0]), 0);
        assert_eq!(index.find_nearest(anchors[1]), 1);
    }
}
