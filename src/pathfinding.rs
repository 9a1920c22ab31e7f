//! Grid pathfinding for routing corridors
//!
//! Uniform-cost search (Dijkstra) over a 4-connected tile grid with a
//! caller-supplied step cost, so the same search can prefer already carved
//! tiles, avoid rooms or treat rock as impassable.

use glam::{IVec2, UVec2};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::Grid2D;

/// Von Neumann neighborhood: +x, -x, +y, -y
const NEIGHBORS: [IVec2; 4] = [IVec2::new(1, 0), IVec2::new(-1, 0), IVec2::new(0, 1), IVec2::new(0, -1)];

/// Search state of one grid cell
///
/// Allocated once per cell when the pathfinder is built and reset at the
/// start of every search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    position: IVec2,
    previous: Option<IVec2>,
    cost: f32,
    closed: bool,
}

impl PathNode {
    fn new(position: IVec2) -> Self {
        Self {
            position,
            previous: None,
            cost: f32::INFINITY,
            closed: false,
        }
    }

    /// Logical grid coordinate of this node
    #[inline]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Predecessor on the cheapest known path, if discovered
    #[inline]
    pub fn previous(&self) -> Option<IVec2> {
        self.previous
    }

    /// Cost of the cheapest known path from the start (infinite until discovered)
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Whether the cheapest path to this node is final
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn reset(&mut self) {
        self.previous = None;
        self.cost = f32::INFINITY;
        self.closed = false;
    }
}

/// Result of evaluating one step between adjacent nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCost {
    /// Whether the step may be taken at all
    pub traversable: bool,
    /// Cost of the step; must be non-negative
    pub cost: f32,
}

impl PathCost {
    /// A step that may be taken at the given cost
    pub fn traversable(cost: f32) -> Self {
        Self {
            traversable: true,
            cost,
        }
    }

    /// A step that may not be taken
    pub fn blocked() -> Self {
        Self {
            traversable: false,
            cost: f32::INFINITY,
        }
    }
}

/// Open set entry; stale entries are skipped when popped
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f32,
    position: IVec2,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| (other.position.y, other.position.x).cmp(&(self.position.y, self.position.x)))
    }
}

/// Reusable shortest-path search over a fixed-size grid
///
/// Node state and the open queue are allocated once and reset on every [`find_path`](Pathfinder::find_path) call. A pathfinder is
/// not reentrant: run one search at a time per instance.
///
/// # Example
///
/// ```
/// use dungeon_layout::{PathCost, Pathfinder};
/// use glam::{IVec2, UVec2};
///
/// let mut pathfinder = Pathfinder::new(UVec2::new(5, 5));
/// let path = pathfinder
///     .find_path(IVec2::new(0, 0), IVec2::new(4, 4), |_, _| PathCost::traversable(1.0))
///     .unwrap();
///
/// assert_eq!(path.len(), 9);
/// assert_eq!(path[0], IVec2::new(0, 0));
/// assert_eq!(path[8], IVec2::new(4, 4));
/// ```
#[derive(Debug, Clone)]
pub struct Pathfinder {
    grid: Grid2D<PathNode>,
    queue: BinaryHeap<QueueEntry>,
}

impl Pathfinder {
    /// Create a pathfinder for coordinates `[0, size.x) x [0, size.y)`
    pub fn new(size: UVec2) -> Self {
        Self::with_offset(size, IVec2::ZERO)
    }

    /// Create a pathfinder whose grid is shifted by `offset`, see [`Grid2D`]
    pub fn with_offset(size: UVec2, offset: IVec2) -> Self {
        Self {
            grid: Grid2D::from_fn(size, offset, PathNode::new),
            queue: BinaryHeap::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        self.grid.size()
    }

    /// Search state of a node after the last search
    pub fn node(&self, position: IVec2) -> Option<&PathNode> {
        self.grid.get(position)
    }

    /// Find the cheapest 4-connected path from `start` to `end`
    ///
    /// `cost_fn(from, to)` is asked for every step the search considers and
    /// must never report a negative cost.
    ///
    /// # Returns
    ///
    /// The coordinates from `start` to `end` inclusive, or `None` when `end`
    /// cannot be reached under `cost_fn` or either endpoint is outside the grid.
    pub fn find_path<F>(&mut self, start: IVec2, end: IVec2, mut cost_fn: F) -> Option<Vec<IVec2>>
    where
        F: FnMut(&PathNode, &PathNode) -> PathCost,
    {
        if !self.grid.in_bounds(start) || !self.grid.in_bounds(end) {
            log::warn!("path endpoints {} -> {} outside grid of size {}", start, end, self.grid.size());
            return None;
        }

        self.reset();

        self.grid[start].cost = 0.0;
        self.queue.push(QueueEntry {
            cost: 0.0,
            position: start,
        });

        while let Some(entry) = self.queue.pop() {
            let current = &mut self.grid[entry.position];
            if current.closed {
                continue;
            }
            current.closed = true;

            let node = *current;
            if node.position == end {
                return Some(self.reconstruct_path(end));
            }

            for offset in NEIGHBORS {
                let next = node.position + offset;
                let Some(neighbor) = self.grid.get_mut(next) else {
                    continue;
                };
                if neighbor.closed {
                    continue;
                }

                let step = cost_fn(&node, neighbor);
                if !step.traversable {
                    continue;
                }

                let new_cost = node.cost + step.cost;
                if new_cost < neighbor.cost {
                    neighbor.previous = Some(node.position);
                    neighbor.cost = new_cost;
                    self.queue.push(QueueEntry {
                        cost: new_cost,
                        position: next,
                    });
                }
            }
        }

        log::debug!("no path from {} to {}", start, end);
        None
    }

    fn reset(&mut self) {
        for node in self.grid.cells_mut() {
            node.reset();
        }
        self.queue.clear();
    }

    fn reconstruct_path(&self, end: IVec2) -> Vec<IVec2> {
        let mut path = vec![end];
        let mut current = end;

        while let Some(previous) = self.grid[current].previous {
            path.push(previous);
            current = previous;
        }

        path.reverse();
        path
    }
}
