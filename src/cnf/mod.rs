//! Propositional building blocks: literals, clauses and clause sets.

mod clause;
mod literal;

pub use clause::{Clause, ClauseSet};
pub use literal::Literal;
