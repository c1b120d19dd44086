use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};

use super::cnf::{Cnf, Lit};

/// Three signed, non-zero variable indices.
pub type Clause3 = [i32; 3];

/// A 3-CNF formula over variables `1..=num_vars`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    pub num_vars: u32,
    pub clauses: Vec<Clause3>,
}

impl Formula {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn with_clauses(num_vars: u32, clauses: Vec<Clause3>) -> Self {
        Self { num_vars, clauses }
    }

    pub fn add_clause(&mut self, clause: Clause3) {
        self.clauses.push(clause);
    }

    /// Rejects zero literals and literals whose variable exceeds `num_vars`.
    pub fn validate(&self) -> Result<()> {
        for (k, clause) in self.clauses.iter().enumerate() {
            for &lit in clause {
                if lit == 0 || lit.unsigned_abs() > self.num_vars {
                    return Err(Error::InvalidClause {
                        clause: k,
                        literal: i64::from(lit),
                        num_vars: self.num_vars,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| assignment.lit_value(lit) == Some(true)))
    }

    pub fn to_cnf(&self) -> Cnf {
        let mut cnf = Cnf::new(self.num_vars);
        for clause in &self.clauses {
            let lits = clause
                .iter()
                .filter_map(|&x| Lit::from_dimacs(i64::from(x)))
                .collect::<Vec<_>>();
            cnf.add_clause(lits);
        }
        cnf
    }

    /// Uniform random 3-SAT; literals may repeat inside a clause.
    pub fn random(num_vars: u32, num_clauses: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let num_vars = clamp_vars(num_vars);
        let mut formula = Self::new(num_vars);
        if num_vars == 0 {
            return formula;
        }
        for _ in 0..num_clauses {
            let clause = [
                random_lit(&mut rng, num_vars),
                random_lit(&mut rng, num_vars),
                random_lit(&mut rng, num_vars),
            ];
            formula.add_clause(clause);
        }
        formula
    }

    /// Random 3-SAT where every clause is satisfied by a hidden assignment,
    /// which is returned alongside the formula.
    pub fn planted(num_vars: u32, num_clauses: usize, seed: u64) -> (Self, Assignment) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let num_vars = clamp_vars(num_vars);
        let hidden = Assignment::from_values((0..num_vars).map(|_| rng.random::<bool>()).collect());
        let mut formula = Self::new(num_vars);
        if num_vars == 0 {
            return (formula, hidden);
        }
        for _ in 0..num_clauses {
            let mut clause = [
                random_lit(&mut rng, num_vars),
                random_lit(&mut rng, num_vars),
                random_lit(&mut rng, num_vars),
            ];
            if !clause.iter().any(|&x| hidden.lit_value(x) == Some(true)) {
                // flipping any literal of an all-false clause makes it true under `hidden`
                let pos = rng.random_range(0..3);
                clause[pos] = -clause[pos];
            }
            formula.add_clause(clause);
        }
        (formula, hidden)
    }
}

fn clamp_vars(num_vars: u32) -> u32 {
    num_vars.min(i32::MAX as u32)
}

fn random_lit(rng: &mut ChaCha8Rng, num_vars: u32) -> i32 {
    let var = rng.random_range(1..=num_vars) as i32;
    if rng.random::<bool>() { var } else { -var }
}

/// Truth values for variables `1..=num_vars`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// `values[i]` is the value of variable `i + 1`.
    pub fn from_values(values: Vec<bool>) -> Self {
        Self { values }
    }

    pub fn num_vars(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn get(&self, var: u32) -> Option<bool> {
        let idx = (var as usize).checked_sub(1)?;
        self.values.get(idx).copied()
    }

    pub fn lit_value(&self, lit: i32) -> Option<bool> {
        let v = self.get(lit.unsigned_abs())?;
        Some(if lit > 0 { v } else { !v })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as u32 + 1, v))
    }

    /// Model in the `v 1 -2 3 0` style of SAT competition output.
    pub fn to_dimacs_line(&self) -> String {
        let mut out = String::from("v");
        for (var, value) in self.iter() {
            if value {
                out.push_str(&format!(" {var}"));
            } else {
                out.push_str(&format!(" -{var}"));
            }
        }
        out.push_str(" 0");
        out
    }
}
