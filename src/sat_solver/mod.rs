pub mod dpll;
pub mod resolution;

use std::fmt;

use crate::cnf::ClauseSet;
use dpll::Dpll;

/// Enumerator for SAT solver's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatResult {
    Satisfiable,
    Unsatisfiable,
    /// The procedure gave up before reaching a verdict.
    Indeterminate,
}

impl fmt::Display for SatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SatResult::Satisfiable => "satisfiable",
            SatResult::Unsatisfiable => "unsatisfiable",
            SatResult::Indeterminate => "indeterminate",
        };
        write!(f, "{}", text)
    }
}

/// A procedure that decides satisfiability of a clause set.
pub trait DecisionProcedure {
    fn name(&self) -> &'static str;
    fn decide(&self, clauses: &ClauseSet) -> SatResult;
}

/// SAT problem solver.
///
/// The solution from the solver is either [`SatResult::Satisfiable`] or [`SatResult::Unsatisfiable`].
///
/// More about SAT [here](https://en.wikipedia.org/wiki/Boolean_satisfiability_problem).
pub struct SatSolver {}

impl SatSolver {
    /// Solves SAT problem using DPLL.
    ///
    /// Returns enumerator [`SatResult`] stating the solver's result.
    pub fn solve(clauses: &ClauseSet) -> SatResult {
        Dpll::new().solve(clauses)
    }
}
