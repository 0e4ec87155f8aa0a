use thiserror::Error;

/// Problems found while reading or validating an instance.
///
/// These are always reported before any solving starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("The instance is empty")]
    EmptyInput,

    #[error("Malformed header line '{0}', expected '<entities> <slots>'")]
    MalformedHeader(String),

    #[error("Malformed constraint on line {line}: '{content}'")]
    MalformedConstraint { line: usize, content: String },

    #[error("Entity {entity} is out of range 1..={entity_count}")]
    EntityOutOfRange { entity: usize, entity_count: usize },

    #[error("Unknown relation code '{0}', expected 'F' or 'E'")]
    UnknownRelation(String),
}

/// WalkSAT used its whole flip budget without satisfying every clause.
///
/// This says nothing about the formula itself, only that the local search gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Local search exhausted after {flips} flips")]
pub struct SearchExhausted {
    pub flips: usize,
}

/// A clause mentions a cell outside of the matrix it is supposed to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("The clauses mention cells outside of the {entity_count}x{slot_count} matrix")]
pub struct ClausesOutOfRange {
    pub entity_count: usize,
    pub slot_count: usize,
}

/// Problems found while reading a solution file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionParseError {
    #[error("The solution is empty")]
    EmptyInput,

    #[error("Unknown verdict '{0}', expected 'yes' or 'no'")]
    UnknownVerdict(String),

    #[error("Malformed cell on line {line}: '{content}'")]
    MalformedCell { line: usize, content: String },

    #[error("Cell ({entity}, {slot}) is outside of the {entity_count}x{slot_count} matrix")]
    CellOutOfRange {
        entity: usize,
        slot: usize,
        entity_count: usize,
        slot_count: usize,
    },
}

/// The main error type of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    SearchExhausted(#[from] SearchExhausted),

    #[error(transparent)]
    ClausesOutOfRange(#[from] ClausesOutOfRange),

    #[error(transparent)]
    SolutionParse(#[from] SolutionParseError),

    /// The resolution oracle ran out of budget before reaching a verdict.
    #[error("Resolution ran out of budget before reaching a verdict")]
    Indeterminate,

    #[error("Oracles disagree: DPLL says {dpll}, resolution says {resolution}")]
    OracleDisagreement { dpll: String, resolution: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
