//! Dense 2D tile storage
//!
//! A fixed-size grid addressed by integer coordinates. An offset is added to
//! every coordinate before indexing, so a grid with offset `(5, 5)` accepts
//! logical coordinates from `(-5, -5)` upward.

use glam::{IVec2, UVec2};
use std::ops::{Index, IndexMut};

/// Fixed-size dense 2D container
///
/// Cell `(x, y)` lives at flat index `x + width * y` after the offset is
/// applied. The grid never resizes after construction.
///
/// # Example
///
/// ```
/// use dungeon_layout::Grid2D;
/// use glam::{IVec2, UVec2};
///
/// let mut grid: Grid2D<u8> = Grid2D::new(UVec2::new(4, 3), IVec2::new(2, 0));
/// grid[IVec2::new(-2, 0)] = 7;
///
/// assert!(grid.in_bounds(IVec2::new(-2, 0)));
/// assert!(!grid.in_bounds(IVec2::new(2, 0)));
/// assert_eq!(grid.get(IVec2::new(-2, 0)), Some(&7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D<T> {
    data: Vec<T>,
    size: UVec2,
    offset: IVec2,
}

impl<T: Clone + Default> Grid2D<T> {
    /// Create a grid filled with `T::default()`
    pub fn new(size: UVec2, offset: IVec2) -> Self {
        Self {
            data: vec![T::default(); (size.x as usize) * (size.y as usize)],
            size,
            offset,
        }
    }
}

impl<T> Grid2D<T> {
    /// Create a grid whose cells are produced by `f(logical_position)`
    pub fn from_fn<F>(size: UVec2, offset: IVec2, mut f: F) -> Self
    where
        F: FnMut(IVec2) -> T,
    {
        let mut data = Vec::with_capacity((size.x as usize) * (size.y as usize));
        for y in 0..size.y as i32 {
            for x in 0..size.x as i32 {
                data.push(f(IVec2::new(x, y) - offset));
            }
        }
        Self { data, size, offset }
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    #[inline]
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Check if a logical position maps to a stored cell
    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        self.index_of(pos).is_some()
    }

    /// Flat storage index of a logical position
    fn index_of(&self, pos: IVec2) -> Option<usize> {
        let local = pos + self.offset;
        if local.x < 0 || local.y < 0 {
            return None;
        }
        let (x, y) = (local.x as u32, local.y as u32);
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        Some(x as usize + self.size.x as usize * y as usize)
    }

    pub fn get(&self, pos: IVec2) -> Option<&T> {
        self.index_of(pos).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, pos: IVec2) -> Option<&mut T> {
        self.index_of(pos).map(move |i| &mut self.data[i])
    }

    /// Overwrite a cell, returning `false` if `pos` is out of bounds
    pub fn set(&mut self, pos: IVec2, value: T) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Iterate every logical position in storage order (row by row)
    pub fn positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        let width = self.size.x as i32;
        let height = self.size.y as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| IVec2::new(x, y) - self.offset))
    }

    /// Iterate `(logical_position, cell)` pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
        self.positions().zip(self.data.iter())
    }

    /// Mutable access to every cell in storage order
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.data.iter_mut()
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }
}

impl<T> Index<IVec2> for Grid2D<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds
    fn index(&self, pos: IVec2) -> &T {
        match self.index_of(pos) {
            Some(i) => &self.data[i],
            None => panic!("grid position {} out of bounds for size {}", pos, self.size),
        }
    }
}

impl<T> IndexMut<IVec2> for Grid2D<T> {
    fn index_mut(&mut self, pos: IVec2) -> &mut T {
        match self.index_of(pos) {
            Some(i) => &mut self.data[i],
            None => panic!("grid position {} out of bounds for size {}", pos, self.size),
        }
    }
}
