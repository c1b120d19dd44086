use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Self-loops are rejected; the graph stays simple.
    #[error("invalid edge: self-loop on node {node}")]
    InvalidEdge { node: String },

    #[error("invalid clause {clause}: literal {literal} is outside 1..={num_vars}")]
    InvalidClause {
        clause: usize,
        literal: i64,
        num_vars: u32,
    },

    #[error("invalid seed: {reason}")]
    InvalidSeed { reason: String },

    /// The coloring needed a 4th color, or an oracle proved there is no model.
    #[error("unsatisfiable: {reason}")]
    Unsatisfiable { reason: String },

    #[error("incomplete coloring: node {node} has no color")]
    IncompleteColoring { node: String },

    #[error("oracle failure ({backend}): {reason}")]
    Oracle {
        backend: &'static str,
        reason: String,
    },

    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl Error {
    pub fn unsat(reason: impl Into<String>) -> Self {
        Self::Unsatisfiable {
            reason: reason.into(),
        }
    }

    pub fn invalid_seed(reason: impl Into<String>) -> Self {
        Self::InvalidSeed {
            reason: reason.into(),
        }
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsatisfiable { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
