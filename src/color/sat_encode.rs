use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use crate::cnf::cnf::{Cnf, Lit};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::solver::{IncrementalSolver, SolveResult, load_cnf};

use super::{Color, Coloring, ColoringOracle, validate_seed};

/// Direct encoding of "`graph` has a proper coloring from `palette`
/// extending the seed": one variable per (node, color).
#[derive(Debug, Clone)]
pub struct ColoringEncoding {
    pub cnf: Cnf,
    pub num_nodes: usize,
    pub palette: Vec<Color>,
}

impl ColoringEncoding {
    /// Variable meaning "node `node` takes `palette[color]`".
    pub fn var(&self, node: usize, color: usize) -> u32 {
        (node * self.palette.len() + color + 1) as u32
    }

    /// Reads a coloring back from a model; `None` if some node has no color.
    pub fn decode<N, F>(&self, graph: &Graph<N>, value: F) -> Option<Coloring<N>>
    where
        N: Clone + Hash + Eq + Display,
        F: Fn(u32) -> Option<bool>,
    {
        let mut out = Coloring::with_capacity(self.num_nodes);
        for (i, node) in graph.nodes().enumerate() {
            let c = (0..self.palette.len()).find(|&c| value(self.var(i, c)) == Some(true))?;
            out.insert(node.clone(), self.palette[c]);
        }
        Some(out)
    }
}

pub fn encode_coloring<N>(
    graph: &Graph<N>,
    seed: &Coloring<N>,
    palette: &[Color],
) -> Result<ColoringEncoding>
where
    N: Clone + Hash + Eq + Display,
{
    validate_seed(graph, seed)?;
    let k = palette.len();
    let n = graph.node_count();
    let mut enc = ColoringEncoding {
        cnf: Cnf::new((n * k) as u32),
        num_nodes: n,
        palette: palette.to_vec(),
    };

    for i in 0..n {
        // at least one color
        let any = (0..k).map(|c| Lit::pos(enc.var(i, c))).collect::<Vec<_>>();
        enc.cnf.add_clause(any);
        // at most one color
        for a in 0..k {
            for b in (a + 1)..k {
                enc.cnf
                    .add_clause(vec![Lit::neg_of(enc.var(i, a)), Lit::neg_of(enc.var(i, b))]);
            }
        }
    }

    for (u, v) in graph.edges() {
        let (Some(ui), Some(vi)) = (graph.index_of(u), graph.index_of(v)) else {
            continue;
        };
        for c in 0..k {
            enc.cnf
                .add_clause(vec![Lit::neg_of(enc.var(ui, c)), Lit::neg_of(enc.var(vi, c))]);
        }
    }

    for (node, color) in seed {
        let Some(c) = palette.iter().position(|p| p == color) else {
            return Err(Error::invalid_seed(format!(
                "seed color {color} of node {node} is not in the palette"
            )));
        };
        if let Some(i) = graph.index_of(node) {
            enc.cnf.add_clause(vec![Lit::pos(enc.var(i, c))]);
        }
    }

    Ok(enc)
}

/// Exact k-coloring through a SAT backend; a fresh solver per call.
#[derive(Default)]
pub struct SatColoring<S> {
    _backend: PhantomData<S>,
}

impl<S: IncrementalSolver + Default> SatColoring<S> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<N, S> ColoringOracle<N> for SatColoring<S>
where
    N: Clone + Hash + Eq + Display,
    S: IncrementalSolver + Default,
{
    fn color(
        &mut self,
        graph: &Graph<N>,
        seed: &Coloring<N>,
        palette: &[Color],
    ) -> Result<Option<Coloring<N>>> {
        let enc = encode_coloring(graph, seed, palette)?;
        let mut solver = S::default();
        load_cnf(&mut solver, &enc.cnf);
        let res = solver.solve(&[])?;
        debug!(
            backend = solver.backend_name(),
            vars = enc.cnf.num_vars,
            clauses = enc.cnf.clauses.len(),
            colors = palette.len(),
            sat = res == SolveResult::Sat,
            "coloring cnf solved"
        );
        if res == SolveResult::Unsat {
            return Ok(None);
        }
        enc.decode(graph, |v| solver.model_value(v))
            .map(Some)
            .ok_or_else(|| Error::Oracle {
                backend: solver.backend_name(),
                reason: "model leaves a node uncolored".to_string(),
            })
    }

    fn oracle_name(&self) -> &'static str {
        "sat-coloring"
    }
}
