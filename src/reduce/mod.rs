pub mod extract;
pub mod gadget;
pub mod pipeline;

pub use extract::{ColorRoles, ModelExtractor, extract};
pub use gadget::ClauseGadgetBuilder;
pub use pipeline::{SolveOptions, Solution, Strategy, Verdict, solve_formula, solve_with_oracle};
