//! Points-to / escape graph data model: abstract heap nodes, tagged heap
//! edges, the mutation and escape sets, and the node-merging pass that
//! bounds graph growth.

pub mod merger;
pub mod node;
pub mod points_to;

pub use node::{Node, NodeKind};
pub use points_to::{EdgeKind, EdgeTarget, MutatedField, PointsToGraph};
