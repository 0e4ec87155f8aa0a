//! WalkSAT local search.
//!
//! Starts from a random matrix and repairs one broken clause per flip, either with a
//! random flip or with the flip that satisfies the most clauses.

use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::model::Model;
use crate::assignment::Assignment;
use crate::cnf::{ClauseSet, Literal};
use crate::error::SearchExhausted;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSatConfig {
    /// Chance of a random flip instead of a greedy one.
    pub flip_probability: f64,
    pub max_flips: usize,
    /// Fixed seed for reproducible runs. Entropy is used when `None`.
    pub seed: Option<u64>,
}

impl Default for WalkSatConfig {
    fn default() -> Self {
        Self {
            flip_probability: 0.5,
            max_flips: 100_000,
            seed: None,
        }
    }
}

/// Incomplete stochastic search for a satisfying assignment.
///
/// The clause set should be known to be satisfiable. On an unsatisfiable set the
/// search always ends with [`SearchExhausted`].
pub struct WalkSat {
    config: WalkSatConfig,
    rng: SmallRng,
}

impl WalkSat {
    pub fn new(config: WalkSatConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        Self { config, rng }
    }

    /// Searches from a uniformly random `entity_count` × `slot_count` matrix.
    ///
    /// The clauses must fit the matrix, see [`ClauseSet::fits`].
    pub fn search(
        &mut self,
        clauses: &ClauseSet,
        entity_count: usize,
        slot_count: usize,
    ) -> Result<Assignment, SearchExhausted> {
        let model = Model::random(entity_count, slot_count, &mut self.rng);
        self.search_from(clauses, model)
    }

    /// Searches from the given starting matrix.
    pub fn search_from(
        &mut self,
        clauses: &ClauseSet,
        mut model: Model,
    ) -> Result<Assignment, SearchExhausted> {
        for flips in 0..self.config.max_flips {
            let broken = model.broken_clauses(clauses);
            if broken.is_empty() {
                debug!("WalkSAT found a model after {} flips", flips);
                return Ok(model.to_assignment());
            }

            let clause = broken[self.rng.gen_range(0..broken.len())];
            if clause.is_empty() {
                debug!("WalkSAT hit the empty clause");
                return Err(SearchExhausted { flips });
            }

            let literal = if self.rng.gen::<f64>() < self.config.flip_probability {
                clause.literals()[self.rng.gen_range(0..clause.len())]
            } else {
                greedy_choice(&mut model, clauses, clause.literals())
            };
            model.flip(literal.entity(), literal.slot());
        }

        if model.is_satisfied(clauses) {
            return Ok(model.to_assignment());
        }
        debug!("WalkSAT gave up after {} flips", self.config.max_flips);
        Err(SearchExhausted {
            flips: self.config.max_flips,
        })
    }
}

/// Returns the first literal whose flip satisfies the most clauses.
fn greedy_choice(model: &mut Model, clauses: &ClauseSet, candidates: &[Literal]) -> Literal {
    let mut best = candidates[0];
    let mut best_count = None;
    for &literal in candidates {
        let count = model.with_flipped(literal.entity(), literal.slot(), |m| {
            m.count_satisfied(clauses)
        });
        if best_count.map_or(true, |best_count| count > best_count) {
            best = literal;
            best_count = Some(count);
        }
    }
    best
}
