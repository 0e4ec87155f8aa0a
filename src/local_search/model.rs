use rand::Rng;

use crate::assignment::Assignment;
use crate::cnf::{Clause, ClauseSet, Literal};

/// Mutable entity × slot matrix that clauses are evaluated against.
///
/// Nothing forces an entity into exactly one slot here; only matrices that satisfy
/// the encoded clause set have that shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    slot_count: usize,
    assigned: Vec<Vec<bool>>,
}

impl Model {
    /// Creates a model where every cell is an independent fair coin flip.
    pub fn random<R: Rng + ?Sized>(entity_count: usize, slot_count: usize, rng: &mut R) -> Self {
        let assigned: Vec<Vec<bool>> = (0..entity_count)
            .map(|_| (0..slot_count).map(|_| rng.gen::<bool>()).collect())
            .collect();
        Self {
            slot_count,
            assigned,
        }
    }

    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            slot_count: assignment.slot_count(),
            assigned: assignment.rows().to_vec(),
        }
    }

    pub fn to_assignment(&self) -> Assignment {
        Assignment::with_rows(self.slot_count, self.assigned.clone())
    }

    pub fn literal_value(&self, literal: &Literal) -> bool {
        let value = self.assigned[literal.entity() - 1][literal.slot() - 1];
        value == literal.is_positive()
    }

    /// Disjunction of the literal values. The empty clause is false.
    pub fn clause_value(&self, clause: &Clause) -> bool {
        clause.iter().any(|literal| self.literal_value(literal))
    }

    pub fn is_satisfied(&self, clauses: &ClauseSet) -> bool {
        clauses.iter().all(|clause| self.clause_value(clause))
    }

    pub fn count_satisfied(&self, clauses: &ClauseSet) -> usize {
        clauses
            .iter()
            .filter(|clause| self.clause_value(clause))
            .count()
    }

    /// Returns the clauses that are currently false, in clause order.
    pub fn broken_clauses<'c>(&self, clauses: &'c ClauseSet) -> Vec<&'c Clause> {
        clauses
            .iter()
            .filter(|clause| !self.clause_value(clause))
            .collect()
    }

    /// Negates `X(entity, slot)`.
    pub fn flip(&mut self, entity: usize, slot: usize) {
        let cell = &mut self.assigned[entity - 1][slot - 1];
        *cell = !*cell;
    }

    /// Evaluates `f` with `X(entity, slot)` flipped, then flips it back.
    pub fn with_flipped<T, F>(&mut self, entity: usize, slot: usize, f: F) -> T
    where
        F: FnOnce(&Model) -> T,
    {
        self.flip(entity, slot);
        let result = f(self);
        self.flip(entity, slot);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn model(rows: Vec<Vec<bool>>) -> Model {
        Model::from_assignment(&Assignment::from_rows(rows))
    }

    #[test]
    fn test_literal_value() {
        let model = model(vec![vec![true, false]]);
        assert!(model.literal_value(&Literal::pos(1, 1)));
        assert!(!model.literal_value(&Literal::neg(1, 1)));
        assert!(!model.literal_value(&Literal::pos(1, 2)));
        assert!(model.literal_value(&Literal::neg(1, 2)));
    }

    #[test]
    fn test_clause_value() {
        let model = model(vec![vec![false, false]]);
        assert!(!model.clause_value(&Clause::new(vec![Literal::pos(1, 1), Literal::pos(1, 2)])));
        assert!(model.clause_value(&Clause::new(vec![Literal::pos(1, 1), Literal::neg(1, 2)])));
        assert!(!model.clause_value(&Clause::empty()));
    }

    #[test]
    fn test_count_and_broken() {
        let clauses: ClauseSet = vec![
            Clause::new(vec![Literal::pos(1, 1)]),
            Clause::new(vec![Literal::pos(2, 1)]),
            Clause::new(vec![Literal::neg(1, 1), Literal::neg(2, 1)]),
        ]
        .into_iter()
        .collect();
        let model = model(vec![vec![true], vec![false]]);
        assert_eq!(model.count_satisfied(&clauses), 2);
        assert!(!model.is_satisfied(&clauses));
        assert_eq!(
            model.broken_clauses(&clauses),
            vec![&Clause::new(vec![Literal::pos(2, 1)])]
        );
    }

    #[test]
    fn test_with_flipped_restores() {
        let clauses: ClauseSet = vec![Clause::new(vec![Literal::pos(1, 2)])]
            .into_iter()
            .collect();
        let mut model = model(vec![vec![true, false]]);
        let before = model.clone();

        let count = model.with_flipped(1, 2, |m| m.count_satisfied(&clauses));
        assert_eq!(count, 1);
        assert_eq!(model, before);
        assert_eq!(model.count_satisfied(&clauses), 0);
    }

    #[test]
    fn test_random_dimensions() {
        let mut rng = SmallRng::seed_from_u64(1);
        let assignment = Model::random(4, 3, &mut rng).to_assignment();
        assert_eq!(assignment.entity_count(), 4);
        assert_eq!(assignment.slot_count(), 3);

        let assignment = Model::random(0, 3, &mut rng).to_assignment();
        assert_eq!(assignment, Assignment::new(0, 3));
    }
}
