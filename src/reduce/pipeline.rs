use tracing::{debug, info};

use crate::cnf::formula::{Assignment, Formula};
use crate::color::backtrack::BacktrackColoring;
use crate::color::dsatur::Dsatur;
use crate::color::sat_encode::SatColoring;
use crate::color::{Coloring, ColoringOracle, colors_used, is_proper};
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::solver::solve_formula as sat_solve;
use crate::solver::varisat::VarisatSolver;

use super::extract::{ColorRoles, ModelExtractor};
use super::gadget::ClauseGadgetBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// DSATUR seeded with T/F/N only. A fourth color is read as UNSAT,
    /// which can be wrong for satisfiable formulas.
    Dsatur,
    /// SAT oracle model pins the literal nodes, DSATUR colors the gadgets.
    #[default]
    ModelSeeded,
    /// Exact 3-coloring through the CNF coloring encoding.
    SatColoring,
    /// Exact 3-coloring by backtracking search.
    Backtrack,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Dsatur => "dsatur",
            Strategy::ModelSeeded => "model",
            Strategy::SatColoring => "sat",
            Strategy::Backtrack => "backtrack",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    pub strategy: Strategy,
    pub roles: ColorRoles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable(Assignment),
    Unsatisfiable { reason: String },
}

impl Verdict {
    pub fn is_sat(&self) -> bool {
        matches!(self, Verdict::Satisfiable(_))
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Verdict::Satisfiable(a) => Some(a),
            Verdict::Unsatisfiable { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub oracle: &'static str,
    pub graph: Graph<NodeId>,
    /// Absent when an oracle answered UNSAT without producing a coloring.
    pub coloring: Option<Coloring<NodeId>>,
    pub colors_used: usize,
    pub verdict: Verdict,
}

pub fn solve_formula(formula: &Formula, opts: &SolveOptions) -> Result<Solution> {
    let roles = opts.roles;
    match opts.strategy {
        Strategy::Dsatur => solve_with_oracle(formula, &mut Dsatur::new(), roles),
        Strategy::SatColoring => {
            solve_with_oracle(formula, &mut SatColoring::<VarisatSolver>::new(), roles)
        }
        Strategy::Backtrack => solve_with_oracle(formula, &mut BacktrackColoring::new(), roles),
        Strategy::ModelSeeded => solve_model_seeded(formula, roles),
    }
}

/// Reduction with any coloring oracle; T/F/N are seeded with `roles`.
pub fn solve_with_oracle<O>(formula: &Formula, oracle: &mut O, roles: ColorRoles) -> Result<Solution>
where
    O: ColoringOracle<NodeId> + ?Sized,
{
    let graph = ClauseGadgetBuilder::new().build(formula)?;
    let coloring = oracle.color(&graph, &roles.reference_seed(), &roles.palette())?;
    finish(formula, graph, oracle.oracle_name(), roles, coloring)
}

fn solve_model_seeded(formula: &Formula, roles: ColorRoles) -> Result<Solution> {
    let graph = ClauseGadgetBuilder::new().build(formula)?;
    let mut solver = VarisatSolver::new();
    let Some(model) = sat_solve(&mut solver, formula)? else {
        info!(oracle = "model", "sat oracle reports unsat");
        return Ok(Solution {
            oracle: "model",
            graph,
            coloring: None,
            colors_used: 0,
            verdict: Verdict::Unsatisfiable {
                reason: "sat oracle found no model".to_string(),
            },
        });
    };
    let seed = model_seed(roles, &model);
    let coloring = Dsatur::new().color(&graph, &seed, &roles.palette())?;
    finish(formula, graph, "model", roles, coloring)
}

/// Reference triangle plus every literal node colored by `model`.
pub fn model_seed(roles: ColorRoles, model: &Assignment) -> Coloring<NodeId> {
    let mut seed = roles.reference_seed();
    for (var, value) in model.iter() {
        let lit = NodeId::literal(var as i32);
        let (t, f) = if value {
            (roles.true_color, roles.false_color)
        } else {
            (roles.false_color, roles.true_color)
        };
        seed.insert(lit, t);
        if let Some(neg) = lit.negated() {
            seed.insert(neg, f);
        }
    }
    seed
}

fn finish(
    formula: &Formula,
    graph: Graph<NodeId>,
    oracle: &'static str,
    roles: ColorRoles,
    coloring: Option<Coloring<NodeId>>,
) -> Result<Solution> {
    let Some(coloring) = coloring else {
        info!(oracle, "no 3-coloring exists");
        return Ok(Solution {
            oracle,
            graph,
            coloring: None,
            colors_used: 0,
            verdict: Verdict::Unsatisfiable {
                reason: format!("{oracle} found no 3-coloring"),
            },
        });
    };

    if !is_proper(&graph, &coloring) {
        return Err(Error::Oracle {
            backend: oracle,
            reason: "coloring is incomplete or has a monochromatic edge".to_string(),
        });
    }

    let used = colors_used(&coloring).len();
    let verdict = match ModelExtractor::new(roles).extract(&coloring, formula.num_vars) {
        Ok(assignment) => {
            if !formula.is_satisfied_by(&assignment) {
                return Err(Error::Oracle {
                    backend: oracle,
                    reason: "extracted assignment falsifies a clause".to_string(),
                });
            }
            Verdict::Satisfiable(assignment)
        }
        Err(Error::Unsatisfiable { reason }) => Verdict::Unsatisfiable { reason },
        Err(e) => return Err(e),
    };
    debug!(oracle, colors_used = used, sat = verdict.is_sat(), "reduction finished");

    Ok(Solution {
        oracle,
        graph,
        coloring: Some(coloring),
        colors_used: used,
        verdict,
    })
}
