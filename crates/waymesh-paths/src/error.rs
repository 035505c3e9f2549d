use thiserror::Error;

use waymesh_core::{MeshId, NodeRef};

/// Reasons a search request is refused before any search work is done.
///
/// These are recoverable caller mistakes, not faults: the finder logs them
/// and returns without touching its search state. An exhausted search ("no
/// path") is not an error; it comes back as `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Start and end are the same node.
    #[error("start and end are the same node ({node})")]
    SameNode { node: NodeRef },

    /// Start and end belong to different meshes.
    #[error("start belongs to {start} but end belongs to {end}")]
    MeshMismatch { start: MeshId, end: MeshId },

    /// A handle does not name a live node of the queried mesh.
    #[error("node {node} is not part of {mesh}")]
    ForeignNode { node: NodeRef, mesh: MeshId },
}
