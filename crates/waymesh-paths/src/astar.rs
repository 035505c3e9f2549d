//! A* search over a [`NavMesh`], using the [`IndexedHeap`] as open set.

use std::collections::HashSet;

use waymesh_core::{NavMesh, NodeId, NodeRef, Vec2};

use crate::error::RequestError;
use crate::heap::IndexedHeap;

/// Heap key: total cost first, heuristic slot as tie-breaker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Cost {
    f: i32,
    h: i32,
}

/// A successful search result: node ids ordered start → end, plus the
/// accumulated cost of walking them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoundPath {
    pub nodes: Vec<NodeId>,
    pub cost: i32,
}

impl FoundPath {
    /// Number of nodes on the path, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path has no nodes. Paths returned by the finder always
    /// contain at least their two endpoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

const NO_PARENT: u32 = u32::MAX;

/// Reusable A* search context.
///
/// Owns the open heap, the closed set, and per-node cost/parent tables.
/// Every call to [`find_path`](Self::find_path) invalidates the previous
/// search's table entries with a generation stamp, so no reset between
/// searches is required and the scratch allocations are reused. The
/// `&mut self` receiver keeps one context to one in-flight search; distinct
/// contexts may search the same mesh at the same time.
pub struct PathFinder {
    open: IndexedHeap<Cost>,
    closed: HashSet<NodeId>,
    g: Vec<i32>,
    parent: Vec<u32>,
    stamp: Vec<u32>,
    generation: u32,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFinder {
    /// Create a search context. Scratch storage is allocated lazily, sized
    /// to the meshes actually searched.
    pub fn new() -> Self {
        Self {
            open: IndexedHeap::with_capacity(0),
            closed: HashSet::new(),
            g: Vec::new(),
            parent: Vec::new(),
            stamp: Vec::new(),
            generation: 0,
        }
    }

    /// Drop all per-search scratch state.
    ///
    /// Never required for correctness: every search invalidates the
    /// previous one's state on entry, so calling this any number of times
    /// between searches does not change results. Useful to release memory
    /// after searching a large mesh.
    pub fn reset(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.g.clear();
        self.parent.clear();
        self.stamp.clear();
        self.generation = 0;
    }

    /// Find the cheapest path from `start` to `end` on `mesh`.
    ///
    /// Returns `Err` if the request is refused (same node, mixed meshes, or
    /// a handle foreign to `mesh`); nothing is searched in that case.
    /// Returns `Ok(None)` when the open set is exhausted without reaching
    /// `end`: "no path" is an expected outcome, not an error.
    pub fn find_path<M: NavMesh>(
        &mut self,
        mesh: &M,
        start: NodeRef,
        end: NodeRef,
    ) -> Result<Option<FoundPath>, RequestError> {
        validate(mesh, start, end)?;
        let (start, end) = (start.node, end.node);

        self.prepare(mesh.len());
        let cur_gen = self.generation;

        self.g[start.index()] = 0;
        self.parent[start.index()] = NO_PARENT;
        self.stamp[start.index()] = cur_gen;
        self.open.push(start, Cost { f: 0, h: 0 });

        while let Some((current, _)) = self.open.pop() {
            if current == end {
                return Ok(Some(self.retrace(end)));
            }
            self.closed.insert(current);
            let current_g = self.g[current.index()];

            for &nb in mesh.neighbors(current) {
                if !mesh.is_available(nb) || self.closed.contains(&nb) {
                    continue;
                }
                let tentative = current_g + mesh.step_cost(nb, current);
                let ni = nb.index();
                let seen = self.stamp[ni] == cur_gen;
                let in_open = self.open.contains(nb);
                if seen && in_open && tentative >= self.g[ni] {
                    continue;
                }

                self.g[ni] = tentative;
                self.parent[ni] = current.index() as u32;
                self.stamp[ni] = cur_gen;
                // The heuristic slot carries the tentative cumulative cost
                // itself, so ordering degenerates to uniform-cost search
                // with path-so-far tie-breaking.
                let key = Cost {
                    f: tentative + tentative,
                    h: tentative,
                };
                if in_open {
                    self.open.update(nb, key);
                } else {
                    self.open.push(nb, key);
                }
            }
        }

        log::debug!("open set exhausted before reaching {end}");
        Ok(None)
    }

    /// Like [`find_path`](Self::find_path), but maps the result to the
    /// world-space waypoints agents and renderers consume.
    pub fn find_waypoints<M: NavMesh>(
        &mut self,
        mesh: &M,
        start: NodeRef,
        end: NodeRef,
    ) -> Result<Option<Vec<Vec2>>, RequestError> {
        Ok(self.find_path(mesh, start, end)?.map(|path| {
            path.nodes
                .iter()
                .map(|&id| {
                    mesh.node(id)
                        .expect("path node must belong to the searched mesh")
                        .position()
                })
                .collect()
        }))
    }

    /// Invalidate the previous search and size the tables for `len` nodes.
    fn prepare(&mut self, len: usize) {
        self.open.clear();
        self.closed.clear();
        self.generation = self.generation.wrapping_add(1);
        if self.g.len() < len {
            self.g.resize(len, 0);
            self.parent.resize(len, NO_PARENT);
            self.stamp.resize(len, 0);
        }
    }

    /// Walk parent links end → start, then reverse into start → end order.
    fn retrace(&self, end: NodeId) -> FoundPath {
        let mut nodes = Vec::new();
        let mut cur = end.index() as u32;
        while cur != NO_PARENT {
            nodes.push(NodeId::from_index(cur));
            cur = self.parent[cur as usize];
        }
        nodes.reverse();
        FoundPath {
            cost: self.g[end.index()],
            nodes,
        }
    }
}

/// Refuse malformed requests before any search work happens.
fn validate<M: NavMesh>(mesh: &M, start: NodeRef, end: NodeRef) -> Result<(), RequestError> {
    if start == end {
        log::warn!("refusing search: start and end are the same node ({start})");
        return Err(RequestError::SameNode { node: start });
    }
    if start.mesh != end.mesh {
        log::warn!(
            "refusing search: start belongs to {} but end belongs to {}",
            start.mesh,
            end.mesh
        );
        return Err(RequestError::MeshMismatch {
            start: start.mesh,
            end: end.mesh,
        });
    }
    for r in [start, end] {
        if r.mesh != mesh.mesh_id() || !mesh.contains(r.node) {
            log::warn!("refusing search: {r} is not part of {}", mesh.mesh_id());
            return Err(RequestError::ForeignNode {
                node: r,
                mesh: mesh.mesh_id(),
            });
        }
    }
    Ok(())
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn found_path_round_trip() {
        let path = FoundPath {
            nodes: vec![NodeId::from_index(0), NodeId::from_index(3)],
            cost: 14,
        };
        let json = serde_json::to_string(&path).unwrap();
        let back: FoundPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
