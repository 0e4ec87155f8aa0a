pub mod constraint;

use constraint::{Constraint, Relation};
use itertools::Itertools;
use rand::Rng;
use std::{
    fmt,
    fs::File,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use crate::assignment::Assignment;
use crate::error::{EncodingError, Result};

/// Relational assignment problem: entities are placed into slots,
/// subject to pairwise must-share and must-not-share constraints.
///
/// Text format:
/// ```text
/// <entities> <slots>
/// <entity> <entity> <F|E>
/// ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeatingProblem {
    entity_count: usize,
    slot_count: usize,
    constraints: Vec<Constraint>,
}

/// A way in which an assignment fails an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    NoSlot { entity: usize },
    SeveralSlots { entity: usize, slots: Vec<usize> },
    Separated { first: usize, second: usize, slot: usize },
    SharedSlot { first: usize, second: usize, slot: usize },
    DimensionMismatch,
    /// The problem was answered `no` but it has a seating.
    WrongVerdict,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NoSlot { entity } => write!(f, "entity {} has no slot", entity),
            Violation::SeveralSlots { entity, slots } => write!(
                f,
                "entity {} has several slots: {}",
                entity,
                slots.iter().join(", ")
            ),
            Violation::Separated {
                first,
                second,
                slot,
            } => write!(
                f,
                "entities {} and {} must share a slot but only one of them is in slot {}",
                first, second, slot
            ),
            Violation::SharedSlot {
                first,
                second,
                slot,
            } => write!(
                f,
                "entities {} and {} must not share a slot but both are in slot {}",
                first, second, slot
            ),
            Violation::DimensionMismatch => {
                write!(f, "the assignment has wrong dimensions")
            }
            Violation::WrongVerdict => {
                write!(f, "the problem is satisfiable but the answer is no")
            }
        }
    }
}

impl SeatingProblem {
    pub fn new(entity_count: usize, slot_count: usize) -> Self {
        Self {
            entity_count,
            slot_count,
            constraints: vec![],
        }
    }

    /// Adds a constraint after checking that both entities exist.
    pub fn add_constraint(
        &mut self,
        first: usize,
        second: usize,
        relation: Relation,
    ) -> std::result::Result<(), EncodingError> {
        for &entity in &[first, second] {
            if !(1..=self.entity_count).contains(&entity) {
                return Err(EncodingError::EntityOutOfRange {
                    entity,
                    entity_count: self.entity_count,
                });
            }
        }
        self.constraints
            .push(Constraint::new(first, second, relation));
        Ok(())
    }

    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Reads and validates a problem from `path`.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::read_from(&mut file)
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(text.parse()?)
    }

    /// Writes the problem in its text format and removes old content.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_string().as_bytes())?;
        Ok(())
    }

    /// Generates a random problem with `constraint_count` constraints between distinct entities.
    ///
    /// Problems with fewer than two entities get no constraints.
    pub fn generate_random<R: Rng + ?Sized>(
        entity_count: usize,
        slot_count: usize,
        constraint_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut problem = Self::new(entity_count, slot_count);
        if entity_count < 2 {
            return problem;
        }

        for _ in 0..constraint_count {
            let first = rng.gen_range(1..=entity_count);
            let mut second = rng.gen_range(1..entity_count);
            if second >= first {
                second += 1;
            }
            let relation = if rng.gen_bool(0.5) {
                Relation::MustShare
            } else {
                Relation::MustNotShare
            };
            problem
                .constraints
                .push(Constraint::new(first, second, relation));
        }
        problem
    }

    /// Lists every way in which `assignment` breaks this problem.
    ///
    /// An empty result means the assignment is a valid seating.
    pub fn violations(&self, assignment: &Assignment) -> Vec<Violation> {
        if !assignment.is_well_formed()
            || assignment.entity_count() != self.entity_count
            || assignment.slot_count() != self.slot_count
        {
            return vec![Violation::DimensionMismatch];
        }

        let mut violations = vec![];
        for entity in 1..=self.entity_count {
            let slots = assignment.slots_of(entity);
            match slots.len() {
                0 => violations.push(Violation::NoSlot { entity }),
                1 => (),
                _ => violations.push(Violation::SeveralSlots { entity, slots }),
            }
        }

        for constraint in &self.constraints {
            let (first, second) = (constraint.first, constraint.second);
            for slot in 1..=self.slot_count {
                let a = assignment.get(first, slot);
                let b = assignment.get(second, slot);
                match constraint.relation {
                    Relation::MustShare if a != b => violations.push(Violation::Separated {
                        first,
                        second,
                        slot,
                    }),
                    Relation::MustNotShare if a && b => {
                        violations.push(Violation::SharedSlot {
                            first,
                            second,
                            slot,
                        })
                    }
                    _ => (),
                }
            }
        }
        violations
    }
}

impl FromStr for SeatingProblem {
    type Err = EncodingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or(EncodingError::EmptyInput)?;
        let (entity_count, slot_count) = header
            .split_whitespace()
            .map(|field| field.parse::<usize>())
            .collect_tuple()
            .and_then(|(m, n)| Some((m.ok()?, n.ok()?)))
            .ok_or_else(|| EncodingError::MalformedHeader(header.to_string()))?;

        let mut problem = Self::new(entity_count, slot_count);

        for (line, content) in lines {
            let malformed = || EncodingError::MalformedConstraint {
                line,
                content: content.to_string(),
            };

            let (first, second, code) = content
                .split_whitespace()
                .collect_tuple()
                .ok_or_else(malformed)?;
            let first = first.parse::<usize>().map_err(|_| malformed())?;
            let second = second.parse::<usize>().map_err(|_| malformed())?;
            let relation = code.parse::<Relation>()?;

            problem.add_constraint(first, second, relation)?;
        }

        Ok(problem)
    }
}

impl fmt::Display for SeatingProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.entity_count, self.slot_count)?;
        for constraint in &self.constraints {
            writeln!(f, "{}", constraint)?;
        }
        Ok(())
    }
}
