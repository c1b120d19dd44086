use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use satcolor::cnf::dimacs::{formula_to_dimacs, parse_formula_reader, to_dimacs};
use satcolor::cnf::formula::Formula;
use satcolor::color::sat_encode::encode_coloring;
use satcolor::color::{Color, Coloring};
use satcolor::graph::dot::to_dot;
use satcolor::reduce::{
    ClauseGadgetBuilder, ColorRoles, SolveOptions, Strategy, Verdict, solve_formula,
};

#[derive(Debug, Parser)]
#[command(name = "satcolor")]
#[command(about = "3-SAT to graph 3-coloring reduction with DSATUR")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Build the gadget graph and report its size
    Reduce {
        path: String,
        #[arg(long)]
        dot: Option<String>,
    },
    /// Decide satisfiability through the coloring
    Solve {
        path: String,
        #[arg(long, default_value = "model")]
        strategy: String,
        #[arg(long)]
        dot: Option<String>,
    },
    /// Write a random 3-CNF
    Gen {
        #[arg(long)]
        vars: u32,
        #[arg(long)]
        clauses: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long)]
        planted: bool,
        #[arg(long)]
        emit: String,
    },
    /// Encode the gadget graph's k-coloring problem as DIMACS
    GraphCnf {
        path: String,
        #[arg(long, default_value_t = 3)]
        colors: u32,
        #[arg(long)]
        emit: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Cmd::Reduce { path, dot } => reduce_cmd(&path, dot.as_deref())?,
        Cmd::Solve {
            path,
            strategy,
            dot,
        } => solve_cmd(&path, &strategy, dot.as_deref())?,
        Cmd::Gen {
            vars,
            clauses,
            seed,
            planted,
            emit,
        } => gen_cmd(vars, clauses, seed, planted, &emit)?,
        Cmd::GraphCnf {
            path,
            colors,
            emit,
        } => graph_cnf_cmd(&path, colors, &emit)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_formula(path: &str) -> Result<Formula> {
    let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
    let formula = parse_formula_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {path}"))?;
    Ok(formula)
}

fn reduce_cmd(path: &str, dot: Option<&str>) -> Result<()> {
    let formula = load_formula(path)?;
    let graph = ClauseGadgetBuilder::new().build(&formula)?;
    println!(
        "vars={} clauses={} nodes={} edges={}",
        formula.num_vars,
        formula.clauses.len(),
        graph.node_count(),
        graph.edge_count()
    );
    if let Some(out) = dot {
        std::fs::write(out, to_dot(&graph, None))
            .with_context(|| format!("failed to write {out}"))?;
    }
    Ok(())
}

fn solve_cmd(path: &str, strategy: &str, dot: Option<&str>) -> Result<()> {
    let formula = load_formula(path)?;
    let opts = SolveOptions {
        strategy: parse_strategy(strategy)?,
        roles: ColorRoles::default(),
    };
    let solution = solve_formula(&formula, &opts)?;
    println!(
        "oracle={} nodes={} edges={} colors_used={}",
        solution.oracle,
        solution.graph.node_count(),
        solution.graph.edge_count(),
        solution.colors_used
    );
    match &solution.verdict {
        Verdict::Satisfiable(model) => {
            println!("s SATISFIABLE");
            println!("{}", model.to_dimacs_line());
        }
        Verdict::Unsatisfiable { reason } => {
            println!("s UNSATISFIABLE");
            println!("c {reason}");
        }
    }
    if let Some(out) = dot {
        let text = to_dot(&solution.graph, solution.coloring.as_ref());
        std::fs::write(out, text).with_context(|| format!("failed to write {out}"))?;
    }
    Ok(())
}

fn gen_cmd(vars: u32, clauses: usize, seed: u64, planted: bool, emit: &str) -> Result<()> {
    if vars == 0 && clauses > 0 {
        bail!("--vars must be >= 1 when clauses are requested");
    }
    let formula = if planted {
        Formula::planted(vars, clauses, seed).0
    } else {
        Formula::random(vars, clauses, seed)
    };
    std::fs::write(emit, formula_to_dimacs(&formula))
        .with_context(|| format!("failed to write {emit}"))?;
    println!(
        "GEN: wrote {} | vars={} clauses={} planted={}",
        emit,
        formula.num_vars,
        formula.clauses.len(),
        planted
    );
    Ok(())
}

fn graph_cnf_cmd(path: &str, colors: u32, emit: &str) -> Result<()> {
    if colors == 0 {
        bail!("--colors must be >= 1");
    }
    let formula = load_formula(path)?;
    let graph = ClauseGadgetBuilder::new().build(&formula)?;
    let palette = (0..colors).map(Color).collect::<Vec<_>>();
    let enc = encode_coloring(&graph, &Coloring::new(), &palette)?;
    std::fs::write(emit, to_dimacs(&enc.cnf))
        .with_context(|| format!("failed to write {emit}"))?;
    println!(
        "nodes={} colors={} vars={} clauses={}",
        graph.node_count(),
        colors,
        enc.cnf.num_vars,
        enc.cnf.clauses.len()
    );
    Ok(())
}

fn parse_strategy(s: &str) -> Result<Strategy> {
    match s {
        "model" => Ok(Strategy::ModelSeeded),
        "dsatur" => Ok(Strategy::Dsatur),
        "sat" => Ok(Strategy::SatColoring),
        "backtrack" => Ok(Strategy::Backtrack),
        _ => bail!("unknown strategy '{}', expected model|dsatur|sat|backtrack", s),
    }
}
