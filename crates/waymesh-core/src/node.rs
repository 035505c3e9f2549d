//! Node identity and the per-vertex record owned by a mesh.
//!
//! Nodes are addressed by [`NodeId`] (an arena index within one mesh) and
//! handed to callers as a [`NodeRef`], which also carries the owning mesh's
//! [`MeshId`] so that requests mixing nodes from different meshes can be
//! detected without the node holding a reference back to its mesh.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::geom::Vec2;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Index of a node within its owning mesh.
///
/// Ids are only meaningful for the mesh that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// Build an id from a raw arena index.
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Process-unique identity of a mesh instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshId(u32);

static NEXT_MESH_ID: AtomicU32 = AtomicU32::new(0);

impl MeshId {
    /// Allocate a fresh mesh id.
    pub(crate) fn next() -> Self {
        Self(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh{}", self.0)
    }
}

/// A mesh-tagged node handle: the currency callers pass to the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef {
    pub mesh: MeshId,
    pub node: NodeId,
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mesh, self.node)
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One graph vertex: world position, traversal weight, availability, and
/// the ordered adjacency list.
///
/// All fields are readable so external tooling (debug draw, editors) can
/// inspect the mesh; mutation goes through the owning mesh.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) position: Vec2,
    pub(crate) base_cost: i32,
    pub(crate) available: bool,
    pub(crate) neighbors: Vec<NodeId>,
}

impl Node {
    /// `base_cost` is clamped to ≥ 1.
    pub(crate) fn new(position: Vec2, base_cost: i32, available: bool) -> Self {
        Self {
            position,
            base_cost: base_cost.max(1),
            available,
            neighbors: Vec::new(),
        }
    }

    /// World-space position. Immutable after creation.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Caller-assigned traversal weight (≥ 1).
    #[inline]
    pub fn base_cost(&self) -> i32 {
        self.base_cost
    }

    /// Whether the search may enter this node.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Ordered ids of adjacent nodes within the same mesh.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trip() {
        let id = NodeId::from_index(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "n42");
    }

    #[test]
    fn mesh_ids_are_unique() {
        let a = MeshId::next();
        let b = MeshId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn base_cost_clamped_to_one() {
        let n = Node::new(Vec2::ZERO, 0, true);
        assert_eq!(n.base_cost(), 1);
        let n = Node::new(Vec2::ZERO, -5, true);
        assert_eq!(n.base_cost(), 1);
        let n = Node::new(Vec2::ZERO, 7, true);
        assert_eq!(n.base_cost(), 7);
    }
}
