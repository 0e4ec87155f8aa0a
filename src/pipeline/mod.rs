//! Solving a seating problem from start to end.
//!
//! check the constraint graph → look up the cache → encode → decide
//! → search for a witness (→ complete search if local search gives up) → store in the cache

use log::{debug, error, info, warn};
use std::{fmt, str::FromStr, time::Instant};

use crate::assignment::Assignment;
use crate::caches::SolutionCache;
use crate::cnf::ClauseSet;
use crate::error::{ClausesOutOfRange, Error, Result};
use crate::graph_utils::{conflicting_pairs, relation_graph};
use crate::local_search::{WalkSat, WalkSatConfig};
use crate::sat_encoder::SatEncoder;
use crate::sat_solver::dpll::Dpll;
use crate::sat_solver::resolution::{ResolutionConfig, ResolutionOracle};
use crate::sat_solver::SatResult;
use crate::solution::Solution;
use crate::SeatingProblem;

/// Decision procedure used to tell satisfiable problems from unsatisfiable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oracle {
    Dpll,
    Resolution,
    /// Runs both and fails if they disagree.
    Both,
}

impl FromStr for Oracle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dpll" => Ok(Oracle::Dpll),
            "resolution" => Ok(Oracle::Resolution),
            "both" => Ok(Oracle::Both),
            _ => Err(format!("Unknown oracle '{}'", s)),
        }
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Oracle::Dpll => "dpll",
            Oracle::Resolution => "resolution",
            Oracle::Both => "both",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub oracle: Oracle,
    pub resolution: ResolutionConfig,
    pub walksat: WalkSatConfig,
    /// Take the witness from a complete DPLL search when WalkSAT gives up.
    pub dpll_fallback: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            oracle: Oracle::Dpll,
            resolution: ResolutionConfig::default(),
            walksat: WalkSatConfig::default(),
            dpll_fallback: true,
        }
    }
}

/// Steps of [`solve_with`], reported as they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckingGraph,
    Encoding,
    Deciding(Oracle),
    Searching,
}

impl Stage {
    pub const COUNT: usize = 4;

    /// 1-based position of the stage.
    pub fn number(&self) -> usize {
        match self {
            Stage::CheckingGraph => 1,
            Stage::Encoding => 2,
            Stage::Deciding(_) => 3,
            Stage::Searching => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CheckingGraph => write!(f, "Checking the constraint graph..."),
            Stage::Encoding => write!(f, "Encoding the problem into a SAT problem..."),
            Stage::Deciding(oracle) => write!(f, "Deciding satisfiability with {}...", oracle),
            Stage::Searching => write!(f, "Searching for a seating..."),
        }
    }
}

/// Solves `problem` and returns either a verified witness or the unsatisfiable verdict.
pub fn solve(problem: &SeatingProblem, options: &SolverOptions) -> Result<Solution> {
    solve_with(problem, options, None, &mut |_| ())
}

/// Like [`solve`], but reads and stores solutions in `cache` and calls `on_stage`
/// before every step.
///
/// A cached solution is used only if it verifies against `problem`.
/// Otherwise the problem is solved again and the cache entry is replaced.
pub fn solve_with(
    problem: &SeatingProblem,
    options: &SolverOptions,
    cache: Option<&mut dyn SolutionCache>,
    on_stage: &mut dyn FnMut(Stage),
) -> Result<Solution> {
    on_stage(Stage::CheckingGraph);
    let conflicts = conflicting_pairs(&relation_graph(problem));
    if !conflicts.is_empty() {
        warn!(
            "{} must-not-share constraints join entities that must share a slot",
            conflicts.len()
        );
    }

    if let Some(cache) = cache.as_deref() {
        if let Some(solution) = cache.read_solution(problem)? {
            match solution.verify(problem).as_slice() {
                [] => {
                    info!("Found the solution in the cache");
                    return Ok(solution);
                }
                [first, ..] => warn!("Ignoring a cached solution: {}", first),
            }
        }
    }

    let now = Instant::now();
    on_stage(Stage::Encoding);
    let clauses = SatEncoder::new(problem).encode();
    info!(
        "Encoded {} clauses in {} ms",
        clauses.len(),
        now.elapsed().as_millis()
    );

    let now = Instant::now();
    on_stage(Stage::Deciding(options.oracle));
    let satisfiable = decide(&clauses, options)?;
    info!("Decided in {} ms", now.elapsed().as_millis());

    let solution = if satisfiable {
        let now = Instant::now();
        on_stage(Stage::Searching);
        let assignment = find_witness(
            &clauses,
            problem.entity_count(),
            problem.slot_count(),
            options,
        )?;
        info!("Found a witness in {} ms", now.elapsed().as_millis());
        debug_assert!(problem.violations(&assignment).is_empty());
        Solution::Satisfiable(assignment)
    } else {
        Solution::Unsatisfiable
    };

    if let Some(cache) = cache {
        if let Err(e) = cache.write_solution(problem, &solution) {
            error!("Failed to cache the solution: {}", e);
        }
    }

    Ok(solution)
}

/// Tells if `clauses` is satisfiable using the oracle chosen in `options`.
pub fn decide(clauses: &ClauseSet, options: &SolverOptions) -> Result<bool> {
    let run_resolution = || ResolutionOracle::new(options.resolution).saturate(clauses);
    let result = match options.oracle {
        Oracle::Dpll => Dpll::new().solve(clauses),
        Oracle::Resolution => run_resolution(),
        Oracle::Both => {
            let dpll = Dpll::new().solve(clauses);
            match run_resolution() {
                SatResult::Indeterminate => {
                    warn!("Resolution gave up, using the DPLL verdict only");
                    dpll
                }
                resolution if resolution != dpll => {
                    return Err(Error::OracleDisagreement {
                        dpll: dpll.to_string(),
                        resolution: resolution.to_string(),
                    })
                }
                _ => dpll,
            }
        }
    };
    debug!("{} says {}", options.oracle, result);

    match result {
        SatResult::Satisfiable => Ok(true),
        SatResult::Unsatisfiable => Ok(false),
        SatResult::Indeterminate => Err(Error::Indeterminate),
    }
}

/// Finds an assignment satisfying `clauses`, which are known to be satisfiable.
///
/// Fails without searching if some clause does not fit the `entity_count` × `slot_count` matrix.
pub fn find_witness(
    clauses: &ClauseSet,
    entity_count: usize,
    slot_count: usize,
    options: &SolverOptions,
) -> Result<Assignment> {
    if !clauses.fits(entity_count, slot_count) {
        return Err(ClausesOutOfRange {
            entity_count,
            slot_count,
        }
        .into());
    }

    let mut walksat = WalkSat::new(options.walksat);
    let exhausted = match walksat.search(clauses, entity_count, slot_count) {
        Ok(assignment) => return Ok(assignment),
        Err(exhausted) => exhausted,
    };

    if !options.dpll_fallback {
        return Err(exhausted.into());
    }
    warn!("{}, falling back to DPLL", exhausted);
    Dpll::new()
        .find_model(clauses, entity_count, slot_count)?
        .ok_or_else(|| exhausted.into())
}
