use std::fmt::Display;
use std::hash::Hash;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;

use super::{Color, Coloring, ColoringOracle, validate_seed};

const MAX_PALETTE: usize = 64;

/// Exact k-coloring by backtracking with forward checking. Each node keeps
/// a bitmask of palette positions still open; the most constrained node is
/// branched on first.
#[derive(Debug, Clone, Default)]
pub struct BacktrackColoring {
    step_limit: Option<u64>,
    steps: u64,
}

impl BacktrackColoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives up with an oracle error after `limit` branching steps.
    pub fn with_step_limit(limit: u64) -> Self {
        Self {
            step_limit: Some(limit),
            steps: 0,
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

struct Search<'g, N: Hash + Eq> {
    graph: &'g Graph<N>,
    domains: Vec<u64>,
    assigned: Vec<Option<usize>>,
    steps: u64,
    step_limit: Option<u64>,
}

impl<N: Clone + Hash + Eq + Display> Search<'_, N> {
    /// Fixes `node` to palette position `c` and prunes `c` from uncolored
    /// neighbors. Returns the pruned neighbors, or `None` on a wipeout
    /// (after undoing its own pruning).
    fn assign(&mut self, node: usize, c: usize) -> Option<Vec<usize>> {
        let bit = 1u64 << c;
        self.assigned[node] = Some(c);
        let mut pruned = Vec::new();
        let mut wiped = false;
        for j in self.graph.neighbor_indices(node) {
            if self.assigned[j].is_some() || self.domains[j] & bit == 0 {
                continue;
            }
            self.domains[j] &= !bit;
            pruned.push(j);
            if self.domains[j] == 0 {
                wiped = true;
                break;
            }
        }
        if wiped {
            self.undo(node, c, &pruned);
            return None;
        }
        Some(pruned)
    }

    fn undo(&mut self, node: usize, c: usize, pruned: &[usize]) {
        let bit = 1u64 << c;
        for &j in pruned {
            self.domains[j] |= bit;
        }
        self.assigned[node] = None;
    }

    /// Smallest open domain, then highest degree, then earliest node.
    fn pick(&self) -> Option<usize> {
        (0..self.assigned.len())
            .filter(|&i| self.assigned[i].is_none())
            .min_by_key(|&i| {
                (
                    self.domains[i].count_ones(),
                    std::cmp::Reverse(self.graph.degree_at(i)),
                    i,
                )
            })
    }

    fn solve(&mut self) -> Result<bool> {
        let Some(node) = self.pick() else {
            return Ok(true);
        };
        let mut open = self.domains[node];
        while open != 0 {
            let c = open.trailing_zeros() as usize;
            open &= open - 1;

            self.steps += 1;
            if let Some(limit) = self.step_limit {
                if self.steps > limit {
                    return Err(Error::Oracle {
                        backend: "backtrack",
                        reason: format!("step limit {limit} exceeded"),
                    });
                }
            }

            let Some(pruned) = self.assign(node, c) else {
                continue;
            };
            if self.solve()? {
                return Ok(true);
            }
            self.undo(node, c, &pruned);
        }
        Ok(false)
    }
}

impl<N: Clone + Hash + Eq + Display> ColoringOracle<N> for BacktrackColoring {
    fn color(
        &mut self,
        graph: &Graph<N>,
        seed: &Coloring<N>,
        palette: &[Color],
    ) -> Result<Option<Coloring<N>>> {
        validate_seed(graph, seed)?;
        if palette.len() > MAX_PALETTE {
            return Err(Error::Oracle {
                backend: "backtrack",
                reason: format!("palette of {} colors exceeds {MAX_PALETTE}", palette.len()),
            });
        }

        let n = graph.node_count();
        let full = if palette.len() == MAX_PALETTE {
            u64::MAX
        } else {
            (1u64 << palette.len()) - 1
        };
        let mut search = Search {
            graph,
            domains: vec![full; n],
            assigned: vec![None; n],
            steps: 0,
            step_limit: self.step_limit,
        };

        for (node, color) in seed {
            let Some(c) = palette.iter().position(|p| p == color) else {
                return Err(Error::invalid_seed(format!(
                    "seed color {color} of node {node} is not in the palette"
                )));
            };
            let Some(i) = graph.index_of(node) else {
                continue;
            };
            if search.assign(i, c).is_none() {
                self.steps = 0;
                return Ok(None);
            }
        }

        let found = search.solve();
        self.steps = search.steps;
        debug!(nodes = n, colors = palette.len(), steps = self.steps, "backtrack search done");
        if !found? {
            return Ok(None);
        }

        let mut out = Coloring::with_capacity(n);
        for (i, node) in graph.nodes().enumerate() {
            if let Some(c) = search.assigned[i] {
                out.insert(node.clone(), palette[c]);
            }
        }
        Ok(Some(out))
    }

    fn oracle_name(&self) -> &'static str {
        "backtrack"
    }
}
