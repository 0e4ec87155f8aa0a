use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    io::{self, Write},
};

use crate::assignment::Assignment;
use crate::error::SolutionParseError;
use crate::sat_encoder::SatEncoder;
use crate::sat_solver::{dpll::Dpll, SatResult};
use crate::seating_problem::{SeatingProblem, Violation};

/// Final answer for one seating problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solution {
    /// The problem is satisfiable and the assignment is a witness.
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl Solution {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Solution::Satisfiable(_))
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Solution::Satisfiable(assignment) => Some(assignment),
            Solution::Unsatisfiable => None,
        }
    }

    /// Lists the ways in which this answer is wrong for `problem`.
    ///
    /// A witness is checked against every constraint. An unsatisfiable answer
    /// is checked with a complete DPLL search over the encoded problem.
    pub fn verify(&self, problem: &SeatingProblem) -> Vec<Violation> {
        match self {
            Solution::Satisfiable(assignment) => problem.violations(assignment),
            Solution::Unsatisfiable => {
                let clauses = SatEncoder::new(problem).encode();
                match Dpll::new().solve(&clauses) {
                    SatResult::Satisfiable => vec![Violation::WrongVerdict],
                    _ => vec![],
                }
            }
        }
    }
}

/// `yes` and one `entity slot` line per true cell, or `no`.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Satisfiable(assignment) => {
                writeln!(f, "yes")?;
                for (entity, slot) in assignment.true_cells() {
                    writeln!(f, "{} {}", entity, slot)?;
                }
            }
            Solution::Unsatisfiable => writeln!(f, "no")?,
        }
        Ok(())
    }
}

pub fn write_solution<W: Write>(writer: &mut W, solution: &Solution) -> io::Result<()> {
    write!(writer, "{}", solution)
}

/// Reads a solution over an `entity_count` × `slot_count` matrix.
///
/// Cells not listed are false. Blank lines are skipped.
pub fn read_solution(
    text: &str,
    entity_count: usize,
    slot_count: usize,
) -> Result<Solution, SolutionParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, verdict) = lines.next().ok_or(SolutionParseError::EmptyInput)?;
    match verdict {
        "no" => return Ok(Solution::Unsatisfiable),
        "yes" => (),
        _ => return Err(SolutionParseError::UnknownVerdict(verdict.to_string())),
    }

    let mut assignment = Assignment::new(entity_count, slot_count);
    for (line, content) in lines {
        let malformed = || SolutionParseError::MalformedCell {
            line,
            content: content.to_string(),
        };
        let (entity, slot) = content
            .split_whitespace()
            .collect_tuple()
            .ok_or_else(malformed)?;
        let entity = entity.parse::<usize>().map_err(|_| malformed())?;
        let slot = slot.parse::<usize>().map_err(|_| malformed())?;

        if !(1..=entity_count).contains(&entity) || !(1..=slot_count).contains(&slot) {
            return Err(SolutionParseError::CellOutOfRange {
                entity,
                slot,
                entity_count,
                slot_count,
            });
        }
        assignment.set(entity, slot, true);
    }

    Ok(Solution::Satisfiable(assignment))
}
