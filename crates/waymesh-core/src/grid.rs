//! Dense 2D lattice mesh baked from world-space dimensions and an external
//! walkability query.

use crate::geom::{Cell, Vec2, octile};
use crate::mesh::NavMesh;
use crate::node::{MeshId, Node, NodeId, NodeRef};

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Bake parameters for a [`GridMesh`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// World-space position of the lattice's minimum corner.
    pub origin: Vec2,
    /// World-space extent covered by the lattice.
    pub dimensions: Vec2,
    /// Half the side length of one cell.
    pub node_radius: f32,
    /// Whether diagonal lattice steps are allowed (8-connected vs
    /// 4-connected).
    pub allow_diagonal: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            dimensions: Vec2::new(10.0, 10.0),
            node_radius: 0.5,
            allow_diagonal: true,
        }
    }
}

// ---------------------------------------------------------------------------
// GridMesh
// ---------------------------------------------------------------------------

/// A dense rectangular lattice of nodes, row-major.
///
/// The lattice resolution is derived from the configured dimensions and
/// node radius: `width = round(dimensions.x / (2 × node_radius))`, height
/// analogously (both at least 1). Availability of each node comes from the
/// walkability query at bake time; unavailable nodes still appear in
/// neighbor lists and are skipped by the search instead.
pub struct GridMesh {
    id: MeshId,
    config: GridConfig,
    width: usize,
    height: usize,
    nodes: Vec<Node>,
}

impl GridMesh {
    /// Bake a new lattice.
    ///
    /// `is_walkable(center, radius)` is queried once per cell against the
    /// world state current at this call.
    pub fn bake<F>(config: GridConfig, is_walkable: F) -> Self
    where
        F: Fn(Vec2, f32) -> bool,
    {
        let mut mesh = Self {
            id: MeshId::next(),
            config,
            width: 0,
            height: 0,
            nodes: Vec::new(),
        };
        mesh.rebuild(&is_walkable);
        mesh
    }

    /// Re-bake with the stored geometry parameters against the current
    /// world state. Used after the environment changes.
    ///
    /// Per-node base costs assigned through [`set_base_cost`](Self::set_base_cost)
    /// are reset to 1.
    pub fn refresh<F>(&mut self, is_walkable: F)
    where
        F: Fn(Vec2, f32) -> bool,
    {
        self.rebuild(&is_walkable);
    }

    fn rebuild(&mut self, is_walkable: &dyn Fn(Vec2, f32) -> bool) {
        let diameter = self.config.node_radius * 2.0;
        self.width = (self.config.dimensions.x / diameter).round().max(1.0) as usize;
        self.height = (self.config.dimensions.y / diameter).round().max(1.0) as usize;
        log::debug!(
            "baking {}x{} lattice over {} at radius {}",
            self.width,
            self.height,
            self.config.dimensions,
            self.config.node_radius
        );

        self.nodes.clear();
        self.nodes.reserve(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let center = self.config.origin
                    + Vec2::new(
                        x as f32 * diameter + self.config.node_radius,
                        y as f32 * diameter + self.config.node_radius,
                    );
                let available = is_walkable(center, self.config.node_radius);
                self.nodes.push(Node::new(center, 1, available));
            }
        }

        // Adjacency from the lattice, skipping out-of-bounds cells.
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell::new(x as i32, y as i32);
                let mut list = Vec::new();
                if self.config.allow_diagonal {
                    for n in cell.neighbors_8() {
                        if let Some(id) = self.id_at(n) {
                            list.push(id);
                        }
                    }
                } else {
                    for n in cell.neighbors_4() {
                        if let Some(id) = self.id_at(n) {
                            list.push(id);
                        }
                    }
                }
                self.nodes[y * self.width + x].neighbors = list;
            }
        }
    }

    /// Lattice width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lattice height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The bake parameters this mesh was built from.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The id of the node at `cell`, or `None` if out of bounds.
    #[inline]
    pub fn id_at(&self, cell: Cell) -> Option<NodeId> {
        if cell.x < 0
            || cell.y < 0
            || cell.x as usize >= self.width
            || cell.y as usize >= self.height
        {
            return None;
        }
        Some(NodeId::from_index(
            (cell.y as usize * self.width + cell.x as usize) as u32,
        ))
    }

    /// The lattice cell of a node id.
    #[inline]
    pub fn cell_of(&self, id: NodeId) -> Cell {
        let i = id.index();
        Cell::new((i % self.width) as i32, (i / self.width) as i32)
    }

    /// The node whose cell contains (or is nearest to) the world position
    /// `p`. Positions outside the lattice clamp to its edge, so the lookup
    /// always succeeds.
    pub fn node_from_position(&self, p: Vec2) -> NodeRef {
        let rel = p - self.config.origin;
        let px = (rel.x / self.config.dimensions.x).clamp(0.0, 1.0);
        let py = (rel.y / self.config.dimensions.y).clamp(0.0, 1.0);
        let x = ((self.width - 1) as f32 * px).round() as usize;
        let y = ((self.height - 1) as f32 * py).round() as usize;
        NodeRef {
            mesh: self.id,
            node: NodeId::from_index((y * self.width + x) as u32),
        }
    }

    /// Assign a traversal weight (clamped to ≥ 1) to one node. Returns
    /// `false` if `id` is not part of this mesh.
    pub fn set_base_cost(&mut self, id: NodeId, cost: i32) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(n) => {
                n.base_cost = cost.max(1);
                true
            }
            None => false,
        }
    }
}

impl NavMesh for GridMesh {
    fn mesh_id(&self) -> MeshId {
        self.id
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(Node::neighbors)
            .unwrap_or(&[])
    }

    /// Octile lattice distance scaled by the entered node's base cost:
    /// 10 per cardinal step, 14 per diagonal, ×`base_cost(into)`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds.
    fn step_cost(&self, into: NodeId, from: NodeId) -> i32 {
        let d = octile(self.cell_of(into), self.cell_of(from));
        d * self.nodes[into.index()].base_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_5x5() -> GridMesh {
        GridMesh::bake(
            GridConfig {
                dimensions: Vec2::new(5.0, 5.0),
                ..GridConfig::default()
            },
            |_, _| true,
        )
    }

    #[test]
    fn bake_derives_lattice_size() {
        let mesh = open_5x5();
        assert_eq!(mesh.width(), 5);
        assert_eq!(mesh.height(), 5);
        assert_eq!(mesh.len(), 25);
    }

    #[test]
    fn bake_rounds_fractional_dimensions() {
        let mesh = GridMesh::bake(
            GridConfig {
                dimensions: Vec2::new(4.6, 5.4),
                ..GridConfig::default()
            },
            |_, _| true,
        );
        assert_eq!(mesh.width(), 5);
        assert_eq!(mesh.height(), 5);
    }

    #[test]
    fn bake_never_collapses_to_zero() {
        let mesh = GridMesh::bake(
            GridConfig {
                dimensions: Vec2::new(0.1, 0.1),
                ..GridConfig::default()
            },
            |_, _| true,
        );
        assert_eq!(mesh.width(), 1);
        assert_eq!(mesh.height(), 1);
    }

    #[test]
    fn node_centers_and_availability() {
        // Mark everything left of x = 1.0 as blocked: exactly column 0.
        let mesh = GridMesh::bake(
            GridConfig {
                dimensions: Vec2::new(5.0, 5.0),
                ..GridConfig::default()
            },
            |center, _| center.x > 1.0,
        );
        for y in 0..5 {
            let id = mesh.id_at(Cell::new(0, y)).unwrap();
            assert!(!mesh.is_available(id));
            assert_eq!(mesh.node(id).unwrap().position(), Vec2::new(0.5, y as f32 + 0.5));
            let id = mesh.id_at(Cell::new(1, y)).unwrap();
            assert!(mesh.is_available(id));
        }
    }

    #[test]
    fn neighbor_counts_8_connected() {
        let mesh = open_5x5();
        let corner = mesh.id_at(Cell::new(0, 0)).unwrap();
        let edge = mesh.id_at(Cell::new(2, 0)).unwrap();
        let interior = mesh.id_at(Cell::new(2, 2)).unwrap();
        assert_eq!(mesh.neighbors(corner).len(), 3);
        assert_eq!(mesh.neighbors(edge).len(), 5);
        assert_eq!(mesh.neighbors(interior).len(), 8);
    }

    #[test]
    fn neighbor_counts_4_connected() {
        let mesh = GridMesh::bake(
            GridConfig {
                dimensions: Vec2::new(5.0, 5.0),
                allow_diagonal: false,
                ..GridConfig::default()
            },
            |_, _| true,
        );
        let corner = mesh.id_at(Cell::new(0, 0)).unwrap();
        let interior = mesh.id_at(Cell::new(2, 2)).unwrap();
        assert_eq!(mesh.neighbors(corner).len(), 2);
        assert_eq!(mesh.neighbors(interior).len(), 4);
    }

    #[test]
    fn unavailable_nodes_stay_in_neighbor_lists() {
        let mesh = GridMesh::bake(
            GridConfig {
                dimensions: Vec2::new(3.0, 3.0),
                ..GridConfig::default()
            },
            |center, _| center != Vec2::new(1.5, 1.5), // block the middle
        );
        let middle = mesh.id_at(Cell::new(1, 1)).unwrap();
        assert!(!mesh.is_available(middle));
        let corner = mesh.id_at(Cell::new(0, 0)).unwrap();
        assert!(mesh.neighbors(corner).contains(&middle));
    }

    #[test]
    fn node_from_position_hits_cells() {
        let mesh = open_5x5();
        let r = mesh.node_from_position(Vec2::new(2.5, 2.5));
        assert_eq!(mesh.cell_of(r.node), Cell::new(2, 2));
        assert_eq!(r.mesh, mesh.mesh_id());
    }

    #[test]
    fn node_from_position_clamps() {
        let mesh = open_5x5();
        let r = mesh.node_from_position(Vec2::new(-10.0, -10.0));
        assert_eq!(mesh.cell_of(r.node), Cell::new(0, 0));
        let r = mesh.node_from_position(Vec2::new(100.0, 100.0));
        assert_eq!(mesh.cell_of(r.node), Cell::new(4, 4));
    }

    #[test]
    fn refresh_picks_up_world_changes() {
        let mut mesh = open_5x5();
        let middle = mesh.id_at(Cell::new(2, 2)).unwrap();
        assert!(mesh.is_available(middle));
        mesh.refresh(|center, _| center != Vec2::new(2.5, 2.5));
        assert!(!mesh.is_available(middle));
        assert_eq!(mesh.len(), 25);
    }

    #[test]
    fn step_costs() {
        let mut mesh = open_5x5();
        let a = mesh.id_at(Cell::new(1, 1)).unwrap();
        let right = mesh.id_at(Cell::new(2, 1)).unwrap();
        let diag = mesh.id_at(Cell::new(2, 2)).unwrap();
        assert_eq!(mesh.step_cost(right, a), 10);
        assert_eq!(mesh.step_cost(diag, a), 14);
        // Entering a weighted node scales by its base cost.
        assert!(mesh.set_base_cost(right, 3));
        assert_eq!(mesh.step_cost(right, a), 30);
        assert_eq!(mesh.step_cost(a, right), 10);
    }

    #[test]
    fn meshes_get_distinct_ids() {
        let a = open_5x5();
        let b = open_5x5();
        assert_ne!(a.mesh_id(), b.mesh_id());
    }
}
