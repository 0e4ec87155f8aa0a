use itertools::Itertools;
use std::collections::{btree_set, BTreeSet};
use std::fmt;
use std::iter::FromIterator;

use super::Literal;

/// A disjunction of literals.
///
/// Literals are kept sorted and deduplicated, so the order in which they are
/// given does not matter: `(a ∨ b)`, `(b ∨ a)` and `(a ∨ b ∨ a)` are the same clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new<I>(literals: I) -> Self
    where
        I: IntoIterator<Item = Literal>,
    {
        let mut literals = literals.into_iter().collect_vec();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// The empty clause, which is always false.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.binary_search(literal).is_ok()
    }

    /// Checks if the clause contains some literal and its complement.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.is_complementary(b))
    }

    /// Returns a copy of the clause without `literal`.
    pub fn without(&self, literal: &Literal) -> Self {
        Self {
            literals: self
                .literals
                .iter()
                .filter(|&l| l != literal)
                .copied()
                .collect_vec(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.literals.iter()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "□");
        }
        write!(f, "({})", self.literals.iter().join(" ∨ "))
    }
}

/// A conjunction of clauses.
///
/// Backed by an ordered set, so iteration order is stable between runs and
/// duplicate clauses are stored once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClauseSet {
    clauses: BTreeSet<Clause>,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause. Returns false if an equal clause was already present.
    pub fn insert(&mut self, clause: Clause) -> bool {
        self.clauses.insert(clause)
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Returns every literal occurring in some clause, in literal order.
    pub fn literals(&self) -> BTreeSet<Literal> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.iter().copied())
            .collect()
    }

    /// Checks that every literal refers to an entity in `1..=entity_count`
    /// and a slot in `1..=slot_count`.
    pub fn fits(&self, entity_count: usize, slot_count: usize) -> bool {
        self.clauses.iter().flatten().all(|literal| {
            (1..=entity_count).contains(&literal.entity())
                && (1..=slot_count).contains(&literal.slot())
        })
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Extend<Clause> for ClauseSet {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        self.clauses.extend(iter)
    }
}

impl IntoIterator for ClauseSet {
    type Item = Clause;
    type IntoIter = btree_set::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = btree_set::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.iter().join(" ∧ "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_is_canonical() {
        let a = Clause::new(vec![Literal::pos(1, 1), Literal::neg(2, 1)]);
        let b = Clause::new(vec![
            Literal::neg(2, 1),
            Literal::pos(1, 1),
            Literal::neg(2, 1),
        ]);
        assert_eq!(a, b);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_clause_set_deduplicates_reordered_clauses() {
        let mut clauses = ClauseSet::new();
        assert!(clauses.insert(Clause::new(vec![Literal::pos(1, 1), Literal::pos(1, 2)])));
        assert!(!clauses.insert(Clause::new(vec![Literal::pos(1, 2), Literal::pos(1, 1)])));
        assert_eq!(clauses.len(), 1);
    }

    #[test]
    fn test_unit_and_empty() {
        assert!(Clause::empty().is_empty());
        assert!(!Clause::empty().is_unit());
        assert!(Clause::new(vec![Literal::neg(3, 3)]).is_unit());
    }

    #[test]
    fn test_contains_and_without() {
        let clause = Clause::new(vec![Literal::pos(1, 1), Literal::neg(1, 2), Literal::pos(2, 2)]);
        assert!(clause.contains(&Literal::neg(1, 2)));
        assert!(!clause.contains(&Literal::pos(1, 2)));

        let smaller = clause.without(&Literal::neg(1, 2));
        assert_eq!(smaller, Clause::new(vec![Literal::pos(2, 2), Literal::pos(1, 1)]));
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::new(vec![Literal::pos(1, 1), Literal::neg(1, 1)]).is_tautology());
        assert!(!Clause::new(vec![Literal::pos(1, 1), Literal::neg(1, 2)]).is_tautology());
        assert!(!Clause::empty().is_tautology());
    }

    #[test]
    fn test_literals_are_sorted() {
        let clauses: ClauseSet = vec![
            Clause::new(vec![Literal::pos(2, 1)]),
            Clause::new(vec![Literal::neg(1, 1), Literal::pos(2, 1)]),
        ]
        .into_iter()
        .collect();
        let literals = clauses.literals().into_iter().collect_vec();
        assert_eq!(literals, vec![Literal::neg(1, 1), Literal::pos(2, 1)]);
    }

    #[test]
    fn test_fits() {
        let clauses: ClauseSet = vec![Clause::new(vec![Literal::pos(2, 3)])].into_iter().collect();
        assert!(clauses.fits(2, 3));
        assert!(!clauses.fits(1, 3));
        assert!(!clauses.fits(2, 2));
    }

    #[test]
    fn test_display() {
        let clause = Clause::new(vec![Literal::neg(1, 2), Literal::pos(1, 1)]);
        assert_eq!(clause.to_string(), "(X(1,1) ∨ ¬X(1,2))");
        assert_eq!(Clause::empty().to_string(), "□");
    }
}
