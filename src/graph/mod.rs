pub mod dot;
pub mod graph;
pub mod node;

pub use graph::Graph;
pub use node::{GadgetRole, NodeId, Reference};
