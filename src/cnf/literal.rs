use std::fmt;

/// A signed proposition `X(entity, slot)`, meaning "entity sits in slot".
///
/// Entities and slots are 1-indexed. Literals are ordered by entity, then slot,
/// then polarity (negative first), which is the order every solver uses when
/// it needs a deterministic "first" literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    entity: usize,
    slot: usize,
    positive: bool,
}

impl Literal {
    pub fn new(positive: bool, entity: usize, slot: usize) -> Self {
        Self {
            entity,
            slot,
            positive,
        }
    }

    /// Shorthand for `X(entity, slot)`.
    pub fn pos(entity: usize, slot: usize) -> Self {
        Self::new(true, entity, slot)
    }

    /// Shorthand for `¬X(entity, slot)`.
    pub fn neg(entity: usize, slot: usize) -> Self {
        Self::new(false, entity, slot)
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    pub fn entity(&self) -> usize {
        self.entity
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns the same proposition with the opposite polarity.
    pub fn complement(&self) -> Self {
        Self {
            positive: !self.positive,
            ..*self
        }
    }

    /// Checks if `other` is the negation of `self`.
    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.entity == other.entity && self.slot == other.slot && self.positive != other.positive
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { "" } else { "¬" };
        write!(f, "{}X({},{})", sign, self.entity, self.slot)
    }
}
