use tracing::{debug, trace};

use crate::cnf::formula::{Clause3, Formula};
use crate::error::Result;
use crate::graph::{GadgetRole, Graph, NodeId};

/// Builds the 3-coloring instance for a 3-CNF formula.
///
/// The graph is 3-colorable exactly when the formula is satisfiable. T, F
/// and N form a triangle; every literal pair `(i, -i)` forms a triangle
/// with N, so literals only ever take the colors of T and F. Each clause
/// adds two chained OR gadgets whose final node sits next to F and N and
/// so must take T's color, which is possible iff one input literal does.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseGadgetBuilder;

impl ClauseGadgetBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validates every clause before touching the graph.
    pub fn build(&self, formula: &Formula) -> Result<Graph<NodeId>> {
        formula.validate()?;

        let mut graph = self.skeleton(formula.num_vars)?;
        for (k, clause) in formula.clauses.iter().enumerate() {
            add_clause_gadget(&mut graph, k, *clause)?;
        }

        debug!(
            num_vars = formula.num_vars,
            num_clauses = formula.clauses.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built clause gadget graph"
        );
        Ok(graph)
    }

    /// Reference triangle plus one literal triangle per variable.
    pub fn skeleton(&self, num_vars: u32) -> Result<Graph<NodeId>> {
        let mut graph = Graph::new();
        graph.add_edges([
            (NodeId::TRUE, NodeId::FALSE),
            (NodeId::NEUTRAL, NodeId::FALSE),
            (NodeId::TRUE, NodeId::NEUTRAL),
        ])?;
        for var in 1..=num_vars {
            let pos = NodeId::Literal {
                var,
                positive: true,
            };
            let neg = NodeId::Literal {
                var,
                positive: false,
            };
            graph.add_edges([(pos, neg), (pos, NodeId::NEUTRAL), (neg, NodeId::NEUTRAL)])?;
        }
        Ok(graph)
    }
}

/// The six auxiliary nodes of clause `k`, in [`GadgetRole::ALL`] order.
pub fn gadget_nodes(k: usize) -> [NodeId; 6] {
    GadgetRole::ALL.map(|role| NodeId::gadget(k, role))
}

/// Edges of the `(x1 ∨ x2) ∨ x3` gadget for clause `k`. Expects a clause
/// that already passed validation.
pub fn gadget_edges(k: usize, clause: Clause3) -> [(NodeId, NodeId); 12] {
    let [x1, x2, x3] = clause.map(NodeId::literal);
    let [in1, in2, or12, in12, in3, out] = gadget_nodes(k);
    [
        (x1, in1),
        (x2, in2),
        (in1, in2),
        (in1, or12),
        (in2, or12),
        (or12, in12),
        (x3, in3),
        (in12, in3),
        (in12, out),
        (in3, out),
        (out, NodeId::FALSE),
        (out, NodeId::NEUTRAL),
    ]
}

pub fn add_clause_gadget(graph: &mut Graph<NodeId>, k: usize, clause: Clause3) -> Result<()> {
    trace!(clause = k, x1 = clause[0], x2 = clause[1], x3 = clause[2], "adding gadget");
    graph.add_edges(gadget_edges(k, clause))
}
