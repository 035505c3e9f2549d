//! **waymesh-paths** — A* search over *waymesh* navigation meshes.
//!
//! The search runs against anything implementing
//! [`NavMesh`](waymesh_core::NavMesh) (the dense baked grid or the sparse
//! freeform mesh from *waymesh-core*) and uses an [`IndexedHeap`] as the
//! open-set priority queue so membership tests and re-keying are cheap.
//!
//! # Outcomes
//!
//! [`PathFinder::find_path`] distinguishes three results:
//!
//! | Outcome | Meaning |
//! |---|---|
//! | `Ok(Some(path))` | A cheapest path, ordered start → end |
//! | `Ok(None)` | No path exists; expected, not an error |
//! | `Err(RequestError)` | Request refused; nothing was searched |

mod astar;
mod error;
mod heap;

pub use astar::{FoundPath, PathFinder};
pub use error::RequestError;
pub use heap::IndexedHeap;
