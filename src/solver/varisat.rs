use varisat::ExtendFormula;

use crate::cnf::cnf::Lit;
use crate::error::{Error, Result};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    vars: Vec<varisat::Var>,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            vars: Vec::new(),
            last_model: None,
            stats: SolverStats::default(),
        }
    }

    fn to_lit(&self, lit: Lit) -> Option<varisat::Lit> {
        let idx = (lit.var as usize).checked_sub(1)?;
        self.vars.get(idx).map(|v| v.lit(lit.sign))
    }

    fn to_lits(&self, lits: &[Lit]) -> Vec<varisat::Lit> {
        lits.iter().filter_map(|&x| self.to_lit(x)).collect()
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for VarisatSolver {
    fn new_var(&mut self) -> u32 {
        let v = self.inner.new_var();
        self.vars.push(v);
        self.stats.vars = self.vars.len();
        self.vars.len() as u32
    }

    /// Literals over variables never allocated are dropped.
    fn add_clause(&mut self, clause: &[Lit]) {
        let lits = self.to_lits(clause);
        self.inner.add_clause(&lits);
        self.stats.clauses += 1;
    }

    fn solve(&mut self, assumptions: &[Lit]) -> Result<SolveResult> {
        self.stats.solve_calls += 1;
        self.last_model = None;
        let assumps = self.to_lits(assumptions);
        self.inner.assume(&assumps);
        let sat = self.inner.solve().map_err(|e| Error::Oracle {
            backend: "varisat",
            reason: e.to_string(),
        })?;
        if !sat {
            return Ok(SolveResult::Unsat);
        }

        let model = self.inner.model().unwrap_or_default();
        let mut by_index = vec![false; self.vars.len()];
        for lit in model {
            if let Some(slot) = by_index.get_mut(lit.var().index()) {
                *slot = lit.is_positive();
            }
        }
        let values = self
            .vars
            .iter()
            .map(|v| by_index.get(v.index()).copied().unwrap_or(false))
            .collect();
        self.last_model = Some(values);
        Ok(SolveResult::Sat)
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = (var as usize).checked_sub(1)?;
        self.last_model.as_ref()?.get(idx).copied()
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "varisat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assumptions_flip_the_answer() {
        let mut s = VarisatSolver::new();
        let a = s.new_var();
        let b = s.new_var();
        s.add_clause(&[Lit::pos(a), Lit::pos(b)]);
        s.add_clause(&[Lit::neg_of(a)]);

        assert_eq!(s.solve(&[]), Ok(SolveResult::Sat));
        assert_eq!(s.model_value(a), Some(false));
        assert_eq!(s.model_value(b), Some(true));

        assert_eq!(s.solve(&[Lit::neg_of(b)]), Ok(SolveResult::Unsat));
        assert_eq!(s.model_value(b), None);
        assert_eq!(s.stats().solve_calls, 2);
    }
}
