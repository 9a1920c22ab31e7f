//! Incremental Delaunay triangulation (Bowyer–Watson)
//!
//! Points are inserted one at a time into a mesh seeded with a synthetic
//! super-triangle. Each insertion removes every triangle whose circumcircle
//! contains the new point and re-triangulates the cavity boundary as a fan
//! around it. Triangles still touching the super-triangle are stripped at the
//! end.
//!
//! # Degenerate input
//!
//! The circumcircle is computed with the closed-form circumcenter formula,
//! which divides by zero for exactly collinear triples. Such triangles get a
//! non-finite circumcircle; nothing panics, but the mesh around them is not a
//! valid Delaunay triangulation. Callers must avoid all-collinear input.

use glam::{DVec2, Vec2};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::geometry::{Edge, Vertex, VertexKey};

/// Super-triangle legs extend this many bounding-box extents past the minimum corner
///
/// A synthetic vertex close to the input can fall inside the circumcircle of a
/// flat hull triangle and keep that triangle out of the mesh, so the corners
/// sit far enough away that hull circumcircles never reach them.
const SUPER_TRIANGLE_REACH: f64 = 20_000.0;

/// Super-triangle vertices sit this many extents outside the bounding box
const SUPER_TRIANGLE_MARGIN: f64 = 3_000.0;

/// The circle through a triangle's three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    /// Circle center
    pub center: DVec2,
    /// Squared radius
    pub radius_squared: f64,
}

impl Circumcircle {
    /// Circumcircle of the triangle `(a, b, c)`
    ///
    /// Collinear points produce a non-finite center.
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self::from_points(a.as_dvec2(), b.as_dvec2(), c.as_dvec2())
    }

    pub(crate) fn from_points(a: DVec2, b: DVec2, c: DVec2) -> Self {
        let a_sq = a.length_squared();
        let b_sq = b.length_squared();
        let c_sq = c.length_squared();

        let x = (a_sq * (c.y - b.y) + b_sq * (a.y - c.y) + c_sq * (b.y - a.y))
            / (a.x * (c.y - b.y) + b.x * (a.y - c.y) + c.x * (b.y - a.y));
        let y = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x))
            / (a.y * (c.x - b.x) + b.y * (a.x - c.x) + c.y * (b.x - a.x));

        let center = DVec2::new(x / 2.0, y / 2.0);
        Self {
            center,
            radius_squared: a.distance_squared(center),
        }
    }

    /// Check if `point` lies inside or on the circle
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.contains_point(point.as_dvec2())
    }

    #[inline]
    pub(crate) fn contains_point(&self, point: DVec2) -> bool {
        point.distance_squared(self.center) <= self.radius_squared
    }
}

/// A mesh triangle
///
/// Identity is the unordered set of its three vertices: `(a, b, c)`,
/// `(b, c, a)` and `(c, b, a)` are all the same triangle.
#[derive(Debug, Clone, Copy)]
pub struct Triangle<T> {
    a: Vertex<T>,
    b: Vertex<T>,
    c: Vertex<T>,
}

impl<T> Triangle<T> {
    pub fn new(a: Vertex<T>, b: Vertex<T>, c: Vertex<T>) -> Self {
        Self { a, b, c }
    }

    /// Vertices in construction order
    pub fn vertices(&self) -> [&Vertex<T>; 3] {
        [&self.a, &self.b, &self.c]
    }

    /// The edges `ab`, `bc` and `ca`
    pub fn edges(&self) -> [Edge<T>; 3]
    where
        T: Clone,
    {
        [
            Edge::new(self.a.clone(), self.b.clone()),
            Edge::new(self.b.clone(), self.c.clone()),
            Edge::new(self.c.clone(), self.a.clone()),
        ]
    }

    pub fn contains_vertex(&self, vertex: &Vertex<T>) -> bool {
        self.a == *vertex || self.b == *vertex || self.c == *vertex
    }

    pub fn circumcircle(&self) -> Circumcircle {
        Circumcircle::new(self.a.position(), self.b.position(), self.c.position())
    }

    /// Check if `point` lies inside or on this triangle's circumcircle
    pub fn circumcircle_contains(&self, point: Vec2) -> bool {
        self.circumcircle().contains(point)
    }

    fn sorted_keys(&self) -> [VertexKey; 3] {
        let mut keys = [self.a.key(), self.b.key(), self.c.key()];
        keys.sort_unstable();
        keys
    }
}

impl<T> PartialEq for Triangle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices()
            .iter()
            .all(|v| other.contains_vertex(v))
            && other.vertices().iter().all(|v| self.contains_vertex(v))
    }
}

impl<T> Eq for Triangle<T> {}

impl<T> Hash for Triangle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_keys().hash(state);
    }
}

/// Result of Delaunay triangulation
///
/// Contains the inserted vertices, the triangles of the mesh and its
/// deduplicated undirected edges.
#[derive(Debug, Clone)]
pub struct Triangulation<T> {
    vertices: Vec<Vertex<T>>,
    triangles: Vec<Triangle<T>>,
    edges: Vec<Edge<T>>,
}

impl<T> Triangulation<T> {
    /// Input vertices that were inserted, in input order
    ///
    /// Vertices repeating an earlier position are not inserted.
    pub fn vertices(&self) -> &[Vertex<T>] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle<T>] {
        &self.triangles
    }

    /// Undirected mesh edges in first-seen order
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge<T>> {
        self.edges
    }
}

/// A triangle under construction, stored by point index with its cached circumcircle
struct MeshTriangle {
    corners: [usize; 3],
    circle: Circumcircle,
}

impl MeshTriangle {
    fn new(corners: [usize; 3], points: &[DVec2]) -> Self {
        let circle = Circumcircle::from_points(points[corners[0]], points[corners[1]], points[corners[2]]);
        Self { corners, circle }
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.corners;
        [(a, b), (b, c), (c, a)]
    }
}

#[inline]
fn undirected(edge: (usize, usize)) -> (usize, usize) {
    if edge.0 <= edge.1 {
        edge
    } else {
        (edge.1, edge.0)
    }
}

/// Compute the Delaunay triangulation of a set of vertices
///
/// Vertices are inserted in input order. A vertex whose position repeats an
/// earlier one is skipped, as is any vertex with a non-finite coordinate.
/// Fewer than three distinct positions produce an empty mesh.
///
/// # Example
///
/// ```
/// use dungeon_layout::{triangulate, Vertex};
/// use glam::Vec2;
///
/// let vertices = vec![
///     Vertex::new(Vec2::new(0.0, 0.0), 0),
///     Vertex::new(Vec2::new(10.0, 0.0), 1),
///     Vertex::new(Vec2::new(0.0, 10.0), 2),
///     Vertex::new(Vec2::new(12.0, 11.0), 3),
/// ];
///
/// let triangulation = triangulate(&vertices);
/// assert_eq!(triangulation.triangles().len(), 2);
/// assert_eq!(triangulation.edges().len(), 5);
/// ```
pub fn triangulate<T: Clone>(vertices: &[Vertex<T>]) -> Triangulation<T> {
    let mut seen = HashSet::new();
    let inserted: Vec<Vertex<T>> = vertices
        .iter()
        .filter(|vertex| {
            let position = vertex.position();
            if !position.is_finite() {
                log::warn!("skipping vertex with non-finite position {}", position);
                return false;
            }
            if !seen.insert(vertex.key()) {
                log::debug!("skipping duplicate vertex at {}", position);
                return false;
            }
            true
        })
        .cloned()
        .collect();

    if inserted.is_empty() {
        return Triangulation {
            vertices: inserted,
            triangles: Vec::new(),
            edges: Vec::new(),
        };
    }

    let count = inserted.len();
    let mut points: Vec<DVec2> = inserted.iter().map(|v| v.position().as_dvec2()).collect();
    points.extend(super_triangle(&points));

    let mut mesh = vec![MeshTriangle::new([count, count + 1, count + 2], &points)];

    for index in 0..count {
        insert_point(&mut mesh, &points, index);
    }

    mesh.retain(|triangle| triangle.corners.iter().all(|&corner| corner < count));

    let triangles: Vec<Triangle<T>> = mesh
        .iter()
        .map(|triangle| {
            let [a, b, c] = triangle.corners;
            Triangle::new(inserted[a].clone(), inserted[b].clone(), inserted[c].clone())
        })
        .collect();

    let mut edge_set = HashSet::new();
    let mut edges = Vec::new();
    for triangle in &mesh {
        for edge in triangle.edges() {
            if edge_set.insert(undirected(edge)) {
                edges.push(Edge::new(inserted[edge.0].clone(), inserted[edge.1].clone()));
            }
        }
    }

    log::debug!(
        "triangulated {} vertices into {} triangles and {} edges",
        count,
        triangles.len(),
        edges.len()
    );

    Triangulation {
        vertices: inserted,
        triangles,
        edges,
    }
}

/// Three points enclosing the bounding box of `points` with a wide margin
fn super_triangle(points: &[DVec2]) -> [DVec2; 3] {
    let (min, max) = points
        .iter()
        .fold((points[0], points[0]), |(min, max), &p| (min.min(p), max.max(p)));

    let extent = (max - min).max_element().max(1.0);
    let margin = extent * SUPER_TRIANGLE_MARGIN;
    let reach = extent * SUPER_TRIANGLE_REACH;

    [
        DVec2::new(min.x - margin, min.y - margin),
        DVec2::new(min.x - margin, min.y + reach),
        DVec2::new(min.x + reach, min.y - margin),
    ]
}

/// Insert `points[index]` into the mesh, replacing its cavity with a fan
fn insert_point(mesh: &mut Vec<MeshTriangle>, points: &[DVec2], index: usize) {
    let point = points[index];
    let mut polygon = Vec::new();

    mesh.retain(|triangle| {
        if triangle.circle.contains_point(point) {
            polygon.extend(triangle.edges());
            false
        } else {
            true
        }
    });

    // Edges shared by two removed triangles are interior to the cavity
    let mut occurrences: HashMap<(usize, usize), usize> = HashMap::new();
    for &edge in &polygon {
        *occurrences.entry(undirected(edge)).or_insert(0) += 1;
    }

    for (u, v) in polygon {
        if occurrences[&undirected((u, v))] == 1 {
            mesh.push(MeshTriangle::new([u, v, index], points));
        }
    }
}
