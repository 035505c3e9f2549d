//! **waymesh-core** — Navigation-mesh core types.
//!
//! This crate provides the graph side of the *waymesh* ecosystem: geometry
//! primitives, node identity and records, the polymorphic [`NavMesh`]
//! contract, and its two implementations: a dense baked lattice
//! ([`GridMesh`]) and a sparse manually-authored graph ([`FreeMesh`]).
//! The search algorithm itself lives in *waymesh-paths*.

pub mod free;
pub mod geom;
pub mod grid;
pub mod mesh;
pub mod node;

pub use free::FreeMesh;
pub use geom::{Cell, Vec2, manhattan, octile};
pub use grid::{GridConfig, GridMesh};
pub use mesh::NavMesh;
pub use node::{MeshId, Node, NodeId, NodeRef};
