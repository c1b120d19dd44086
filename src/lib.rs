//! Reduction from 3-SAT to graph 3-coloring, with DSATUR coloring and
//! model recovery from a finished coloring.

pub mod cnf;
pub mod color;
pub mod error;
pub mod graph;
pub mod reduce;
pub mod solver;

pub use error::{Error, Result};
