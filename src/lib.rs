mod assignment;
pub mod caches;
pub mod cnf;
pub mod error;
mod graph_utils;
pub mod local_search;
pub mod pipeline;
mod sat_encoder;
pub mod sat_solver;
mod seating_problem;
pub mod solution;

pub use assignment::Assignment;
pub use error::{
    ClausesOutOfRange, EncodingError, Error, Result, SearchExhausted, SolutionParseError,
};
pub use graph_utils::{conflicting_pairs, relation_graph, save_as_svg, DotFormat, RelationGraph};
pub use local_search::{Model, WalkSat, WalkSatConfig};
pub use pipeline::{solve, solve_with, Oracle, SolverOptions, Stage};
pub use sat_encoder::{encode_exactly_one, encode_must_not_share, encode_must_share, SatEncoder};
pub use sat_solver::dpll::Dpll;
pub use sat_solver::resolution::{ResolutionConfig, ResolutionOracle};
pub use sat_solver::{SatResult, SatSolver};
pub use seating_problem::constraint::{Constraint, Relation};
pub use seating_problem::{SeatingProblem, Violation};
pub use solution::Solution;
