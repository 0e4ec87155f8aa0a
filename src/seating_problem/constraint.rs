use std::{fmt, str::FromStr};

use crate::error::EncodingError;

/// Pairwise relation between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// Both entities must be assigned to the same slot. Written as `F`.
    MustShare,
    /// The entities must not be assigned to the same slot. Written as `E`.
    MustNotShare,
}

impl Relation {
    pub fn code(&self) -> char {
        match self {
            Relation::MustShare => 'F',
            Relation::MustNotShare => 'E',
        }
    }
}

impl FromStr for Relation {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Relation::MustShare),
            "E" => Ok(Relation::MustNotShare),
            _ => Err(EncodingError::UnknownRelation(s.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A declared relation between entities `first` and `second` (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constraint {
    pub first: usize,
    pub second: usize,
    pub relation: Relation,
}

impl Constraint {
    pub fn new(first: usize, second: usize, relation: Relation) -> Self {
        Self {
            first,
            second,
            relation,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first, self.second, self.relation)
    }
}
