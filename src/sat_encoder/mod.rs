use crate::cnf::{Clause, ClauseSet, Literal};
use crate::seating_problem::constraint::Relation;
use crate::SeatingProblem;
use itertools::Itertools;
use std::io::{self, Write};

/// SAT problem encoder for seating problems.
///
/// `SatEncoder` turns a [`SeatingProblem`] into a CNF clause set over the variables
/// `X(a, i)` = "entity `a` sits in slot `i`".
/// Solving this encoded form tells if the entities can be seated.
///
/// More about SAT [here](https://en.wikipedia.org/wiki/Boolean_satisfiability_problem).
pub struct SatEncoder<'a> {
    problem: &'a SeatingProblem,
}

impl<'a> SatEncoder<'a> {
    pub fn new(problem: &'a SeatingProblem) -> SatEncoder<'a> {
        SatEncoder { problem }
    }

    /// Encodes the seating problem into CNF form.
    ///
    /// 1. Every entity sits in exactly one slot.
    /// 2. Every constraint adds its own clauses.
    pub fn encode(&self) -> ClauseSet {
        let slot_count = self.problem.slot_count();
        let mut clauses: ClauseSet =
            encode_exactly_one(self.problem.entity_count(), slot_count)
                .into_iter()
                .collect();

        for constraint in self.problem.constraints() {
            let (a, b) = (constraint.first, constraint.second);
            match constraint.relation {
                Relation::MustShare => clauses.extend(encode_must_share(a, b, slot_count)),
                Relation::MustNotShare => {
                    clauses.extend(encode_must_not_share(a, b, slot_count))
                }
            }
        }

        debug_assert!(clauses.fits(self.problem.entity_count(), slot_count));
        clauses
    }

    /// Writes clauses in a human-readable format, one per line.
    pub fn write_clauses<W: Write>(&self, writer: &mut W, clauses: &ClauseSet) -> io::Result<()> {
        writeln!(
            writer,
            "c {} entities, {} slots, {} clauses",
            self.problem.entity_count(),
            self.problem.slot_count(),
            clauses.len()
        )?;
        clauses
            .iter()
            .try_for_each(|clause| writeln!(writer, "{} ∧", clause))
    }
}

/// Every entity in `1..=entity_count` sits in exactly one of the slots `1..=slot_count`.
///
/// Produces `entity_count * (1 + C(slot_count, 2))` clauses.
pub fn encode_exactly_one(entity_count: usize, slot_count: usize) -> Vec<Clause> {
    (1..=entity_count)
        .flat_map(|a| {
            let literals = (1..=slot_count).map(|i| Literal::pos(a, i)).collect_vec();
            only_one(&literals)
        })
        .collect_vec()
}

/// Entities `a` and `b` sit in the same slot: `X(a, i) ↔ X(b, i)` for every slot `i`.
pub fn encode_must_share(a: usize, b: usize, slot_count: usize) -> Vec<Clause> {
    (1..=slot_count)
        .flat_map(|i| {
            let (x, y) = (Literal::pos(a, i), Literal::pos(b, i));
            [implies(x, y), implies(y, x)]
        })
        .collect_vec()
}

/// Entities `a` and `b` never sit in the same slot: `¬X(a, i) ∨ ¬X(b, i)` for every slot `i`.
pub fn encode_must_not_share(a: usize, b: usize, slot_count: usize) -> Vec<Clause> {
    (1..=slot_count)
        .flat_map(|i| at_most_one(&[Literal::pos(a, i), Literal::pos(b, i)]))
        .collect_vec()
}

fn at_least_one(literals: &[Literal]) -> Clause {
    Clause::new(literals.iter().copied())
}

fn at_most_one(literals: &[Literal]) -> Vec<Clause> {
    literals
        .iter()
        .map(|x| x.complement())
        .combinations(2)
        .map(Clause::new)
        .collect_vec()
}

fn only_one(literals: &[Literal]) -> Vec<Clause> {
    let mut clauses = vec![at_least_one(literals)];
    clauses.extend(at_most_one(literals));
    clauses
}

fn implies(premise: Literal, conclusion: Literal) -> Clause {
    Clause::new(vec![premise.complement(), conclusion])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least_one() {
        let literals = vec![Literal::pos(1, 1), Literal::pos(1, 2), Literal::pos(1, 3)];
        assert_eq!(at_least_one(&literals).literals(), &literals[..]);
    }

    #[test]
    fn test_at_most_one() {
        let literals = vec![Literal::pos(1, 1), Literal::pos(1, 2), Literal::pos(1, 3)];
        let right = vec![
            Clause::new(vec![Literal::neg(1, 1), Literal::neg(1, 2)]),
            Clause::new(vec![Literal::neg(1, 1), Literal::neg(1, 3)]),
            Clause::new(vec![Literal::neg(1, 2), Literal::neg(1, 3)]),
        ];
        assert_eq!(at_most_one(&literals), right);
    }

    #[test]
    fn test_implies() {
        assert_eq!(
            implies(Literal::pos(1, 1), Literal::pos(2, 1)),
            Clause::new(vec![Literal::neg(1, 1), Literal::pos(2, 1)])
        );
    }

    #[test]
    fn test_exactly_one_clause_count() {
        for (m, n) in [(1usize, 1usize), (3, 2), (4, 5), (2, 0)] {
            let expected = m * (1 + n * n.saturating_sub(1) / 2);
            assert_eq!(encode_exactly_one(m, n).len(), expected);
        }
    }

    #[test]
    fn test_exactly_one_without_slots_is_empty_clause() {
        let clauses = encode_exactly_one(1, 0);
        assert_eq!(clauses, vec![Clause::empty()]);
    }

    #[test]
    fn test_must_share() {
        let clauses = encode_must_share(1, 2, 2);
        assert_eq!(clauses.len(), 4);
        assert!(clauses.contains(&Clause::new(vec![Literal::neg(1, 1), Literal::pos(2, 1)])));
        assert!(clauses.contains(&Clause::new(vec![Literal::pos(1, 1), Literal::neg(2, 1)])));
        assert!(clauses.contains(&Clause::new(vec![Literal::neg(1, 2), Literal::pos(2, 2)])));
        assert!(clauses.contains(&Clause::new(vec![Literal::pos(1, 2), Literal::neg(2, 2)])));
    }

    #[test]
    fn test_must_not_share() {
        let clauses = encode_must_not_share(2, 3, 2);
        assert_eq!(
            clauses,
            vec![
                Clause::new(vec![Literal::neg(2, 1), Literal::neg(3, 1)]),
                Clause::new(vec![Literal::neg(2, 2), Literal::neg(3, 2)]),
            ]
        );
    }

    #[test]
    fn test_encode_is_order_independent() -> Result<(), Box<dyn std::error::Error>> {
        let a: SeatingProblem = "3 2\n1 2 F\n2 3 E\n".parse()?;
        let b: SeatingProblem = "3 2\n3 2 E\n2 1 F\n1 2 F\n".parse()?;
        assert_eq!(SatEncoder::new(&a).encode(), SatEncoder::new(&b).encode());
        Ok(())
    }

    #[test]
    fn test_encode_clause_count() -> Result<(), Box<dyn std::error::Error>> {
        let problem: SeatingProblem = "3 2\n1 2 F\n2 3 E\n".parse()?;
        let clauses = SatEncoder::new(&problem).encode();
        // 3 * (1 + 1) exactly-one, 2 * 2 must-share, 2 must-not-share
        assert_eq!(clauses.len(), 6 + 4 + 2);
        assert!(clauses.fits(3, 2));
        Ok(())
    }

    #[test]
    fn test_write_clauses() -> Result<(), Box<dyn std::error::Error>> {
        let problem: SeatingProblem = "2 1\n1 2 E\n".parse()?;
        let encoder = SatEncoder::new(&problem);
        let clauses = encoder.encode();

        let mut buffer = vec![];
        encoder.write_clauses(&mut buffer, &clauses)?;
        let text = String::from_utf8(buffer)?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "c 2 entities, 1 slots, 3 clauses");
        assert_eq!(lines.len(), 1 + clauses.len());
        assert!(lines[1..].iter().all(|line| line.ends_with(" ∧")));
        Ok(())
    }
}
