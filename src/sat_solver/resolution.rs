//! Propositional resolution.
//!
//! The oracle saturates a clause set under binary resolution. Deriving the empty
//! clause refutes the set; reaching a fixpoint without it proves satisfiability.
//! The closure can grow exponentially, so saturation runs under a clause budget
//! and an optional time limit and reports [`SatResult::Indeterminate`] when
//! either is exceeded.

use itertools::Itertools;
use log::debug;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::{DecisionProcedure, SatResult};
use crate::cnf::{Clause, ClauseSet};

/// Budget of the resolution oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Largest number of distinct clauses (input clauses included) kept before giving up.
    pub max_clauses: usize,
    pub time_limit: Option<Duration>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        ResolutionConfig {
            max_clauses: 20_000,
            time_limit: None,
        }
    }
}

/// Returns every resolvent of `c1` and `c2`.
///
/// One resolvent is produced per literal of `c1` whose complement occurs in `c2`.
pub fn resolve(c1: &Clause, c2: &Clause) -> Vec<Clause> {
    c1.iter()
        .filter(|literal| c2.contains(&literal.complement()))
        .map(|literal| {
            let complement = literal.complement();
            c1.iter()
                .filter(|&l| l != literal)
                .chain(c2.iter().filter(|&l| *l != complement))
                .copied()
                .collect::<Clause>()
        })
        .collect_vec()
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionOracle {
    config: ResolutionConfig,
}

impl ResolutionOracle {
    pub fn new(config: ResolutionConfig) -> Self {
        Self { config }
    }

    /// Saturates `clauses` under resolution.
    ///
    /// Every round resolves the clauses derived in the previous round against all
    /// clauses known so far; pairs of older clauses were already resolved. Tautologies
    /// are dropped as they cannot take part in a refutation.
    pub fn saturate(&self, clauses: &ClauseSet) -> SatResult {
        let started = Instant::now();

        if clauses.iter().any(Clause::is_empty) {
            return SatResult::Unsatisfiable;
        }

        let mut known: HashSet<Clause> = clauses.iter().cloned().collect();
        let mut all = clauses.iter().cloned().collect_vec();
        let mut frontier = 0;
        let mut round = 0;

        loop {
            round += 1;
            let end = all.len();
            let mut fresh = vec![];

            for j in frontier..end {
                if self.out_of_time(started) {
                    debug!("Resolution ran out of time in round {}", round);
                    return SatResult::Indeterminate;
                }

                for i in 0..j {
                    for resolvent in resolve(&all[i], &all[j]) {
                        if resolvent.is_empty() {
                            debug!(
                                "Resolution derived the empty clause in round {} from {} and {}",
                                round, all[i], all[j]
                            );
                            return SatResult::Unsatisfiable;
                        }
                        if resolvent.is_tautology() || known.contains(&resolvent) {
                            continue;
                        }
                        known.insert(resolvent.clone());
                        fresh.push(resolvent);

                        if known.len() > self.config.max_clauses {
                            debug!(
                                "Resolution exceeded {} clauses in round {}",
                                self.config.max_clauses, round
                            );
                            return SatResult::Indeterminate;
                        }
                    }
                }
            }

            if fresh.is_empty() {
                debug!(
                    "Resolution reached a fixpoint with {} clauses after {} rounds",
                    all.len(),
                    round
                );
                return SatResult::Satisfiable;
            }

            all.extend(fresh);
            frontier = end;
        }
    }

    fn out_of_time(&self, started: Instant) -> bool {
        self.config
            .time_limit
            .map_or(false, |limit| started.elapsed() >= limit)
    }
}

impl DecisionProcedure for ResolutionOracle {
    fn name(&self) -> &'static str {
        "resolution"
    }

    fn decide(&self, clauses: &ClauseSet) -> SatResult {
        self.saturate(clauses)
    }
}
