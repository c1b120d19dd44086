use std::io::BufRead;

use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::cnf::Cnf;
use super::formula::{Clause3, Formula};

pub fn to_dimacs(cnf: &Cnf) -> String {
    let mut out = String::new();
    out.push_str(&format!("p cnf {} {}\n", cnf.num_vars, cnf.clauses.len()));
    for clause in &cnf.clauses {
        for &lit in clause {
            out.push_str(&format!("{} ", lit.to_dimacs()));
        }
        out.push_str("0\n");
    }
    out
}

pub fn formula_to_dimacs(formula: &Formula) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "p cnf {} {}\n",
        formula.num_vars,
        formula.clauses.len()
    ));
    for [a, b, c] in &formula.clauses {
        out.push_str(&format!("{a} {b} {c} 0\n"));
    }
    out
}

pub fn parse_formula_str(s: &str) -> Result<Formula> {
    parse_formula_reader(std::io::Cursor::new(s.as_bytes()))
}

/// Reads a 3-CNF in DIMACS form. Clauses end with `0` and may span lines;
/// a line starting with `%` ends the input (SATLIB convention). Without a
/// `p cnf` header the variable count is the largest variable seen.
pub fn parse_formula_reader<R: BufRead>(r: R) -> Result<Formula> {
    let mut declared: Option<(u32, usize)> = None;
    let mut clauses = Vec::<Clause3>::new();
    let mut pending = Vec::<i32>::new();
    let mut max_var = 0u32;
    let mut last_line = 0usize;

    for (idx, line) in r.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line.map_err(|e| Error::Parse {
            line: line_no,
            reason: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }
        if trimmed.starts_with('p') {
            if declared.is_some() {
                return Err(parse_err(line_no, "duplicate problem line"));
            }
            declared = Some(parse_header(trimmed, line_no)?);
            continue;
        }

        for tok in trimmed.split_whitespace() {
            let x = tok
                .parse::<i32>()
                .map_err(|_| parse_err(line_no, format!("invalid literal '{tok}'")))?;
            if x != 0 {
                max_var = max_var.max(x.unsigned_abs());
                pending.push(x);
                continue;
            }
            clauses.push(take_clause(&mut pending, line_no)?);
        }
    }

    if !pending.is_empty() {
        // tolerate a missing terminator on the last clause
        clauses.push(take_clause(&mut pending, last_line)?);
    }

    let num_vars = match declared {
        Some((vars, count)) => {
            if count != clauses.len() {
                warn!(
                    declared = count,
                    found = clauses.len(),
                    "clause count differs from problem line"
                );
            }
            vars
        }
        None => max_var,
    };

    let formula = Formula::with_clauses(num_vars, clauses);
    formula.validate()?;
    debug!(
        num_vars = formula.num_vars,
        num_clauses = formula.clauses.len(),
        "parsed dimacs"
    );
    Ok(formula)
}

fn parse_header(line: &str, line_no: usize) -> Result<(u32, usize)> {
    let parts = line.split_whitespace().collect::<Vec<_>>();
    if parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
        return Err(parse_err(line_no, "invalid header, expected: p cnf VARS CLAUSES"));
    }
    let vars = parts[2]
        .parse::<u32>()
        .map_err(|_| parse_err(line_no, format!("invalid variable count '{}'", parts[2])))?;
    let count = parts[3]
        .parse::<usize>()
        .map_err(|_| parse_err(line_no, format!("invalid clause count '{}'", parts[3])))?;
    Ok((vars, count))
}

fn take_clause(pending: &mut Vec<i32>, line_no: usize) -> Result<Clause3> {
    let lits = std::mem::take(pending);
    match lits.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(parse_err(
            line_no,
            format!("expected 3 literals per clause, found {}", lits.len()),
        )),
    }
}

fn parse_err(line: usize, reason: impl Into<String>) -> Error {
    Error::Parse {
        line,
        reason: reason.into(),
    }
}
