use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Snapshot of an entity × slot matrix.
///
/// `cells[a - 1][i - 1]` tells if entity `a` sits in slot `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    entity_count: usize,
    slot_count: usize,
    cells: Vec<Vec<bool>>,
}

impl Assignment {
    /// Creates an assignment where every cell is false.
    pub fn new(entity_count: usize, slot_count: usize) -> Self {
        Self {
            entity_count,
            slot_count,
            cells: vec![vec![false; slot_count]; entity_count],
        }
    }

    /// Creates an assignment from rows of equal length.
    ///
    /// The slot count is taken from the first row, or 0 when there are no rows.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let slot_count = rows.first().map_or(0, |row| row.len());
        Self::with_rows(slot_count, rows)
    }

    /// Creates an assignment from rows of `slot_count` cells each.
    ///
    /// Keeps the slot count when there are no rows. Panics on rows of another length.
    pub(crate) fn with_rows(slot_count: usize, rows: Vec<Vec<bool>>) -> Self {
        assert!(rows.iter().all(|row| row.len() == slot_count));
        Self {
            entity_count: rows.len(),
            slot_count,
            cells: rows,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Tells if the stored cells match the stated dimensions.
    ///
    /// Always true for assignments built in this crate. A deserialized one may not be.
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.entity_count
            && self.cells.iter().all(|row| row.len() == self.slot_count)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// Value of `X(entity, slot)`, both 1-indexed.
    pub fn get(&self, entity: usize, slot: usize) -> bool {
        self.cells[entity - 1][slot - 1]
    }

    pub fn set(&mut self, entity: usize, slot: usize, value: bool) {
        self.cells[entity - 1][slot - 1] = value;
    }

    /// Returns the slots of `entity` that are true.
    pub fn slots_of(&self, entity: usize) -> Vec<usize> {
        self.cells[entity - 1]
            .iter()
            .positions(|&value| value)
            .map(|i| i + 1)
            .collect_vec()
    }

    /// Returns all true cells as 1-indexed `(entity, slot)` pairs in row-major order.
    pub fn true_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(a, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &value)| value)
                .map(move |(i, _)| (a + 1, i + 1))
        })
    }
}
