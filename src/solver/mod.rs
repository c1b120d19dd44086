pub mod varisat;

use tracing::debug;

use crate::cnf::cnf::{Cnf, Lit};
use crate::cnf::formula::{Assignment, Formula};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub vars: usize,
    pub clauses: usize,
}

/// SAT oracle seam. Variables are numbered from 1 in creation order.
pub trait IncrementalSolver {
    fn new_var(&mut self) -> u32;
    fn add_clause(&mut self, clause: &[Lit]);
    fn solve(&mut self, assumptions: &[Lit]) -> Result<SolveResult>;
    /// Value of `var` in the model of the last `Sat` answer.
    fn model_value(&self, var: u32) -> Option<bool>;
    fn stats(&self) -> SolverStats;
    fn backend_name(&self) -> &'static str;
}

/// Allocates variables up to `cnf.num_vars` and adds every clause.
pub fn load_cnf<S: IncrementalSolver + ?Sized>(solver: &mut S, cnf: &Cnf) {
    let have = solver.stats().vars as u32;
    for _ in have..cnf.num_vars {
        solver.new_var();
    }
    for clause in &cnf.clauses {
        solver.add_clause(clause);
    }
}

/// Solves `formula` on a fresh oracle. `None` means unsatisfiable.
pub fn solve_formula<S: IncrementalSolver + ?Sized>(
    solver: &mut S,
    formula: &Formula,
) -> Result<Option<Assignment>> {
    formula.validate()?;
    load_cnf(solver, &formula.to_cnf());
    let res = solver.solve(&[])?;
    debug!(
        backend = solver.backend_name(),
        num_vars = formula.num_vars,
        num_clauses = formula.clauses.len(),
        sat = res == SolveResult::Sat,
        "sat oracle answered"
    );
    match res {
        SolveResult::Unsat => Ok(None),
        SolveResult::Sat => {
            // variables no clause mentions may be left out of the model
            let values = (1..=formula.num_vars)
                .map(|v| solver.model_value(v).unwrap_or(false))
                .collect();
            Ok(Some(Assignment::from_values(values)))
        }
    }
}
