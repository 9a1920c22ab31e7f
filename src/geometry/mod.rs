//! Geometric primitives shared by the triangulation and spanning tree
//!
//! Both types are immutable values with identity by position: payloads never
//! take part in equality or hashing.

mod edge;
mod vertex;

pub use edge::Edge;
pub use vertex::Vertex;

pub(crate) use vertex::VertexKey;
