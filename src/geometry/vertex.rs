use glam::Vec2;
use std::hash::{Hash, Hasher};

/// Bit-level identity of a position, used as a map/set key
///
/// `-0.0` is folded into `0.0` so that keys agree with float equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct VertexKey(u32, u32);

impl VertexKey {
    pub(crate) fn of(position: Vec2) -> Self {
        VertexKey((position.x + 0.0).to_bits(), (position.y + 0.0).to_bits())
    }

    /// Key of an undirected pair: the same for `(a, b)` and `(b, a)`
    pub(crate) fn pair(a: Self, b: Self) -> (Self, Self) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// A 2D point carrying an opaque payload
///
/// Equality and hashing look at the position only: two vertices at the same
/// coordinates are the same vertex whatever their payload. Positions must be
/// finite; a NaN coordinate never compares equal to anything.
///
/// # Example
///
/// ```
/// use dungeon_layout::Vertex;
/// use glam::Vec2;
///
/// let a = Vertex::new(Vec2::new(1.0, 2.0), "entrance");
/// let b = Vertex::new(Vec2::new(1.0, 2.0), "treasury");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Vertex<T> {
    position: Vec2,
    data: T,
}

impl<T> Vertex<T> {
    pub fn new(position: Vec2, data: T) -> Self {
        Self { position, data }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// The payload attached by the caller (e.g. a room id)
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    pub fn distance_to(&self, other: &Vertex<T>) -> f32 {
        self.position.distance(other.position)
    }

    #[inline]
    pub(crate) fn key(&self) -> VertexKey {
        VertexKey::of(self.position)
    }
}

impl<T> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Vertex<T> {}

impl<T> Hash for Vertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_payload() {
        let a = Vertex::new(Vec2::new(3.0, 4.0), 1usize);
        let b = Vertex::new(Vec2::new(3.0, 4.0), 2usize);
        let c = Vertex::new(Vec2::new(3.0, 4.5), 1usize);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_collapses_same_position() {
        let mut set = HashSet::new();
        set.insert(Vertex::new(Vec2::new(1.0, 1.0), 'a'));
        set.insert(Vertex::new(Vec2::new(1.0, 1.0), 'b'));
        set.insert(Vertex::new(Vec2::new(2.0, 1.0), 'c'));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let a = Vertex::new(Vec2::new(0.0, -0.0), ());
        let b = Vertex::new(Vec2::new(-0.0, 0.0), ());

        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_pair_ignores_order() {
        let a = VertexKey::of(Vec2::new(3.0, 1.0));
        let b = VertexKey::of(Vec2::new(-2.0, 5.0));

        assert_eq!(VertexKey::pair(a, b), VertexKey::pair(b, a));
        assert_ne!(VertexKey::pair(a, b), VertexKey::pair(a, a));
    }

    #[test]
    fn test_distance_to() {
        let a = Vertex::new(Vec2::new(0.0, 0.0), ());
        let b = Vertex::new(Vec2::new(3.0, 4.0), ());
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }
}
