//! DPLL decision procedure.
//!
//! Rules, tried in this order on every step:
//! 1. an empty clause set is satisfied,
//! 2. an empty clause is a conflict,
//! 3. unit propagation,
//! 4. pure literal elimination,
//! 5. branching on the first literal of the first clause.
//!
//! Branches live on an explicit stack. Every branch owns its reduced clause set,
//! so backtracking is just popping the next pending branch.

use log::debug;
use std::collections::BTreeSet;

use super::{DecisionProcedure, SatResult};
use crate::assignment::Assignment;
use crate::cnf::{ClauseSet, Literal};
use crate::error::ClausesOutOfRange;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DpllStats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_eliminations: usize,
    pub conflicts: usize,
}

struct Branch {
    clauses: ClauseSet,
    /// Literals made true on the way to this branch.
    fixed: Vec<Literal>,
}

impl Branch {
    fn assume(&self, literal: Literal) -> Branch {
        let mut fixed = self.fixed.clone();
        fixed.push(literal);
        Branch {
            clauses: assign(&self.clauses, literal),
            fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Dpll;

impl Dpll {
    pub fn new() -> Self {
        Dpll
    }

    /// Decides satisfiability of `clauses`.
    pub fn solve(&self, clauses: &ClauseSet) -> SatResult {
        self.solve_with_stats(clauses).0
    }

    pub fn solve_with_stats(&self, clauses: &ClauseSet) -> (SatResult, DpllStats) {
        let (fixed, stats) = self.search(clauses);
        let result = match fixed {
            Some(_) => SatResult::Satisfiable,
            None => SatResult::Unsatisfiable,
        };
        (result, stats)
    }

    /// Finds a satisfying assignment of `clauses` over an `entity_count` × `slot_count` matrix.
    ///
    /// Literals fixed on the successful branch are made true, every other cell is false.
    /// Returns `Ok(None)` if the clauses are unsatisfiable, and an error without searching
    /// if some clause does not fit the matrix.
    pub fn find_model(
        &self,
        clauses: &ClauseSet,
        entity_count: usize,
        slot_count: usize,
    ) -> Result<Option<Assignment>, ClausesOutOfRange> {
        if !clauses.fits(entity_count, slot_count) {
            return Err(ClausesOutOfRange {
                entity_count,
                slot_count,
            });
        }

        let fixed = match self.search(clauses).0 {
            Some(fixed) => fixed,
            None => return Ok(None),
        };
        let mut assignment = Assignment::new(entity_count, slot_count);
        for literal in fixed.into_iter().filter(Literal::is_positive) {
            assignment.set(literal.entity(), literal.slot(), true);
        }
        Ok(Some(assignment))
    }

    fn search(&self, clauses: &ClauseSet) -> (Option<Vec<Literal>>, DpllStats) {
        let mut stats = DpllStats::default();
        let mut stack = vec![Branch {
            clauses: clauses.clone(),
            fixed: vec![],
        }];

        while let Some(mut branch) = stack.pop() {
            loop {
                // The empty clause sorts first, so looking at the first clause is enough.
                let first = match branch.clauses.iter().next() {
                    None => {
                        debug!("DPLL found a model: {:?}", stats);
                        return (Some(branch.fixed), stats);
                    }
                    Some(clause) if clause.is_empty() => {
                        stats.conflicts += 1;
                        break;
                    }
                    Some(clause) => clause.literals()[0],
                };

                if let Some(unit) = find_unit(&branch.clauses) {
                    stats.propagations += 1;
                    branch = branch.assume(unit);
                    continue;
                }

                let pure = find_pure(&branch.clauses);
                if !pure.is_empty() {
                    stats.pure_eliminations += pure.len();
                    branch.clauses = eliminate(&branch.clauses, &pure);
                    branch.fixed.extend(pure);
                    continue;
                }

                stats.decisions += 1;
                stack.push(branch.assume(first.complement()));
                branch = branch.assume(first);
            }
        }

        debug!("DPLL refuted the clauses: {:?}", stats);
        (None, stats)
    }
}

impl DecisionProcedure for Dpll {
    fn name(&self) -> &'static str {
        "dpll"
    }

    fn decide(&self, clauses: &ClauseSet) -> SatResult {
        self.solve(clauses)
    }
}

fn find_unit(clauses: &ClauseSet) -> Option<Literal> {
    clauses
        .iter()
        .find(|clause| clause.is_unit())
        .map(|clause| clause.literals()[0])
}

/// Returns literals whose complement does not occur anywhere in `clauses`.
fn find_pure(clauses: &ClauseSet) -> BTreeSet<Literal> {
    let literals = clauses.literals();
    literals
        .iter()
        .filter(|literal| !literals.contains(&literal.complement()))
        .copied()
        .collect()
}

/// Makes `literal` true: drops satisfied clauses and strips the complement from the rest.
fn assign(clauses: &ClauseSet, literal: Literal) -> ClauseSet {
    let complement = literal.complement();
    clauses
        .iter()
        .filter(|clause| !clause.contains(&literal))
        .map(|clause| {
            if clause.contains(&complement) {
                clause.without(&complement)
            } else {
                clause.clone()
            }
        })
        .collect()
}

/// Drops every clause containing one of `pure`.
fn eliminate(clauses: &ClauseSet, pure: &BTreeSet<Literal>) -> ClauseSet {
    clauses
        .iter()
        .filter(|clause| !clause.iter().any(|literal| pure.contains(literal)))
        .cloned()
        .collect::<ClauseSet>()
}
