//! The polymorphic mesh contract shared by [`GridMesh`](crate::GridMesh)
//! and [`FreeMesh`](crate::FreeMesh).

use crate::node::{MeshId, Node, NodeId, NodeRef};

/// A navigable graph: a collection of [`Node`]s with adjacency and step
/// costs. This is the only surface the search algorithm sees.
pub trait NavMesh {
    /// Identity of this mesh instance.
    fn mesh_id(&self) -> MeshId;

    /// Number of live nodes.
    fn len(&self) -> usize;

    /// Whether the mesh has no live nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` names a live node of this mesh.
    fn contains(&self, id: NodeId) -> bool;

    /// The node record for `id`, or `None` if it is not part of this mesh.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// A mesh-tagged handle for `id`, or `None` if it is not part of this
    /// mesh.
    fn node_ref(&self, id: NodeId) -> Option<NodeRef> {
        self.contains(id).then(|| NodeRef {
            mesh: self.mesh_id(),
            node: id,
        })
    }

    /// Adjacent node ids. Empty for unknown ids.
    fn neighbors(&self, id: NodeId) -> &[NodeId];

    /// Whether the search may enter `id`. Unknown ids are unavailable.
    fn is_available(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_available)
    }

    /// Cost of stepping onto `into` from adjacent `from`.
    ///
    /// Uses `into`'s base cost, so entering a penalized node is expensive
    /// regardless of the direction of travel. Deterministic, non-negative,
    /// and monotone with distance.
    fn step_cost(&self, into: NodeId, from: NodeId) -> i32;
}
