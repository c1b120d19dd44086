#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        Self { var, sign }
    }

    pub fn pos(var: u32) -> Self {
        Self::new(var, true)
    }

    pub fn neg_of(var: u32) -> Self {
        Self::new(var, false)
    }

    /// `None` for the DIMACS terminator `0`.
    pub fn from_dimacs(x: i64) -> Option<Self> {
        if x == 0 {
            return None;
        }
        let var = u32::try_from(x.unsigned_abs()).ok()?;
        Some(Self::new(var, x > 0))
    }

    pub fn to_dimacs(self) -> i64 {
        let v = i64::from(self.var);
        if self.sign { v } else { -v }
    }

    /// `model[var]` holds the value of `var`; index 0 is unused.
    pub fn eval(self, model: &[bool]) -> Option<bool> {
        model
            .get(self.var as usize)
            .map(|&v| if self.sign { v } else { !v })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub num_vars: u32,
    pub clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn add_clause(&mut self, clause: Vec<Lit>) {
        if let Some(max) = clause.iter().map(|l| l.var).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    pub fn eval_clause(clause: &[Lit], model: &[bool]) -> bool {
        clause.iter().any(|&lit| lit.eval(model) == Some(true))
    }

    pub fn eval(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|c| Self::eval_clause(c, model))
    }
}
