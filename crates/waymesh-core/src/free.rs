//! Sparse freeform mesh: nodes and edges are supplied by an external
//! authoring step rather than baked from a lattice.

use crate::geom::Vec2;
use crate::mesh::NavMesh;
use crate::node::{MeshId, Node, NodeId};

/// A growable set of manually-authored nodes.
///
/// Storage is a slotted arena with a free-list, so removing a node never
/// invalidates the ids of the others. Edge symmetry is maintained by the
/// mesh itself: every add/remove/link/unlink updates both endpoints'
/// neighbor lists in the same call.
pub struct FreeMesh {
    id: MeshId,
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
}

impl Default for FreeMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            id: MeshId::next(),
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Add a node at `position` with the given traversal weight,
    /// availability, and initial neighbors.
    ///
    /// If a live node already occupies exactly `position`, the call is a
    /// no-op and returns that node's id. Neighbor ids that do not name live
    /// nodes are skipped. The new id is also appended to each referenced
    /// node's own list, keeping adjacency symmetric.
    pub fn add_node(
        &mut self,
        position: Vec2,
        base_cost: i32,
        available: bool,
        neighbors: &[NodeId],
    ) -> NodeId {
        if let Some(existing) = self.id_at_position(position) {
            return existing;
        }

        let mut node = Node::new(position, base_cost, available);
        for &n in neighbors {
            if self.contains(n) && !node.neighbors.contains(&n) {
                node.neighbors.push(n);
            }
        }
        let linked = node.neighbors.clone();

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(node);
                NodeId::from_index(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId::from_index((self.slots.len() - 1) as u32)
            }
        };
        self.live += 1;

        for n in linked {
            let list = &mut self.slots[n.index()].as_mut().unwrap().neighbors;
            if !list.contains(&id) {
                list.push(id);
            }
        }
        id
    }

    /// Remove a node, stripping its id from every other node's neighbor
    /// list. Returns `false` if `id` is not part of this mesh.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        self.free.push(id.index() as u32);
        self.live -= 1;
        for slot in self.slots.iter_mut().flatten() {
            slot.neighbors.retain(|&n| n != id);
        }
        true
    }

    /// Symmetrically connect two live nodes. Returns `false` if either id
    /// is unknown or `a == b`.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        let la = &mut self.slots[a.index()].as_mut().unwrap().neighbors;
        if !la.contains(&b) {
            la.push(b);
        }
        let lb = &mut self.slots[b.index()].as_mut().unwrap().neighbors;
        if !lb.contains(&a) {
            lb.push(a);
        }
        true
    }

    /// Symmetrically disconnect two nodes. Returns `false` if either id is
    /// unknown.
    pub fn unlink(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.slots[a.index()].as_mut().unwrap().neighbors.retain(|&n| n != b);
        self.slots[b.index()].as_mut().unwrap().neighbors.retain(|&n| n != a);
        true
    }

    /// Ids of all live nodes, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| NodeId::from_index(i as u32))
    }

    /// The live node at exactly `position`, if any.
    pub fn id_at_position(&self, position: Vec2) -> Option<NodeId> {
        self.ids()
            .find(|&id| self.slots[id.index()].as_ref().unwrap().position == position)
    }
}

impl NavMesh for FreeMesh {
    fn mesh_id(&self) -> MeshId {
        self.id
    }

    fn len(&self) -> usize {
        self.live
    }

    fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.index()).is_some_and(Option::is_some)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::neighbors).unwrap_or(&[])
    }

    /// Squared Euclidean distance (rounded to the nearest integer) plus the
    /// square of the entered node's base cost.
    ///
    /// # Panics
    ///
    /// Panics if either id is not part of this mesh.
    fn step_cost(&self, into: NodeId, from: NodeId) -> i32 {
        let a = self.node(into).expect("step_cost: unknown node id");
        let b = self.node(from).expect("step_cost: unknown node id");
        let d = a.position.distance_sq(b.position).round() as i32;
        d + a.base_cost * a.base_cost
    }
}
