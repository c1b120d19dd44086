use proptest::prelude::*;

use satcolor::cnf::formula::{Assignment, Formula};
use satcolor::reduce::{SolveOptions, Strategy, Verdict, solve_formula};

const ALL: [Strategy; 4] = [
    Strategy::Dsatur,
    Strategy::ModelSeeded,
    Strategy::SatColoring,
    Strategy::Backtrack,
];

fn opts(strategy: Strategy) -> SolveOptions {
    SolveOptions {
        strategy,
        ..SolveOptions::default()
    }
}

fn brute_force_sat(formula: &Formula) -> bool {
    let n = formula.num_vars;
    (0u32..(1 << n)).any(|bits| {
        let a = Assignment::from_values((0..n).map(|i| bits & (1 << i) != 0).collect());
        formula.is_satisfied_by(&a)
    })
}

#[test]
fn two_clause_formula_is_satisfiable_under_every_strategy() {
    let formula = Formula::with_clauses(3, vec![[1, 2, 3], [1, -2, -3]]);
    for strategy in ALL {
        let s = solve_formula(&formula, &opts(strategy)).expect("solve");
        assert_eq!(s.graph.node_count(), 21);
        assert_eq!(s.graph.edge_count(), 36);
        let model = s.verdict.assignment().expect("satisfiable");
        assert!(formula.is_satisfied_by(model), "{}", strategy.name());
        assert_eq!(s.colors_used, 3);
    }
}

#[test]
fn plain_dsatur_finds_all_true_model() {
    let formula = Formula::with_clauses(3, vec![[1, 2, 3], [1, -2, -3]]);
    let s = solve_formula(&formula, &opts(Strategy::Dsatur)).expect("solve");
    assert_eq!(s.oracle, "dsatur");
    assert_eq!(
        s.verdict,
        Verdict::Satisfiable(Assignment::from_values(vec![true, true, true]))
    );
}

#[test]
fn contradictory_formula_is_unsatisfiable_under_every_strategy() {
    let formula = Formula::with_clauses(3, vec![[1, 1, 1], [-1, -1, -1], [1, 2, 3]]);
    for strategy in ALL {
        let s = solve_formula(&formula, &opts(strategy)).expect("solve");
        assert_eq!(s.graph.node_count(), 27);
        assert_eq!(s.graph.edge_count(), 48);
        assert!(!s.verdict.is_sat(), "{}", strategy.name());
    }

    let s = solve_formula(&formula, &opts(Strategy::Dsatur)).expect("solve");
    assert_eq!(s.colors_used, 4);
    assert!(s.coloring.is_some());

    let s = solve_formula(&formula, &opts(Strategy::SatColoring)).expect("solve");
    assert!(s.coloring.is_none());
    assert_eq!(s.oracle, "sat-coloring");
}

#[test]
fn empty_formula_is_trivially_satisfiable() {
    let formula = Formula::new(2);
    for strategy in ALL {
        let s = solve_formula(&formula, &opts(strategy)).expect("solve");
        assert_eq!(s.graph.node_count(), 7);
        let model = s.verdict.assignment().expect("no clauses");
        assert_eq!(model.num_vars(), 2);
    }
}

#[test]
fn out_of_range_literal_is_rejected_before_solving() {
    let formula = Formula::with_clauses(2, vec![[1, 2, 3]]);
    let err = solve_formula(&formula, &SolveOptions::default()).expect_err("var 3 > 2");
    assert!(matches!(err, satcolor::Error::InvalidClause { .. }));
}

#[test]
fn repeated_runs_agree() {
    let formula = Formula::random(6, 20, 7);
    for strategy in ALL {
        let a = solve_formula(&formula, &opts(strategy)).expect("solve");
        let b = solve_formula(&formula, &opts(strategy)).expect("solve");
        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.coloring, b.coloring);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn planted_formulas_come_back_satisfied(
        vars in 1u32..8,
        clauses in 0usize..24,
        seed in any::<u64>(),
    ) {
        let (formula, _) = Formula::planted(vars, clauses, seed);
        for strategy in [Strategy::ModelSeeded, Strategy::SatColoring] {
            let s = solve_formula(&formula, &opts(strategy)).expect("solve");
            let model = s.verdict.assignment().expect("planted formula");
            prop_assert!(formula.is_satisfied_by(model));
            prop_assert_eq!(s.colors_used, 3);
        }
    }

    #[test]
    fn exact_strategies_match_brute_force(
        vars in 1u32..6,
        clauses in 0usize..30,
        seed in any::<u64>(),
    ) {
        let formula = Formula::random(vars, clauses, seed);
        let expected = brute_force_sat(&formula);
        for strategy in [Strategy::ModelSeeded, Strategy::SatColoring] {
            let s = solve_formula(&formula, &opts(strategy)).expect("solve");
            prop_assert_eq!(s.verdict.is_sat(), expected, "{}", strategy.name());
        }
    }

    #[test]
    fn dsatur_never_claims_a_false_model(
        vars in 1u32..6,
        clauses in 0usize..20,
        seed in any::<u64>(),
    ) {
        let formula = Formula::random(vars, clauses, seed);
        let s = solve_formula(&formula, &opts(Strategy::Dsatur)).expect("solve");
        if let Some(model) = s.verdict.assignment() {
            prop_assert!(formula.is_satisfied_by(model));
        }
    }
}
