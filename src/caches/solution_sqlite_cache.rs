use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{SolutionCache, SCHEMA};
use crate::error::Result;
use crate::solution::Solution;
use crate::SeatingProblem;

/// Solution cache in an SQLite database.
///
/// Problems are keyed by their text format, solutions are stored as bincode blobs.
pub struct SqliteSolutionCache {
    db: Connection,
}

impl SqliteSolutionCache {
    /// Opens a cache created with [`super::create_database`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Connection::open(path)?;
        Ok(Self { db })
    }

    /// Creates a fresh cache that lives only as long as this value.
    pub fn in_memory() -> Result<Self> {
        let db = Connection::open_in_memory()?;
        db.execute(SCHEMA, [])?;
        Ok(Self { db })
    }
}

impl SolutionCache for SqliteSolutionCache {
    fn read_solution(&self, problem: &SeatingProblem) -> Result<Option<Solution>> {
        let data: Option<Vec<u8>> = self
            .db
            .query_row(
                "SELECT data FROM solution WHERE problem=?1",
                params![problem.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            Some(data) => {
                debug!("Cache hit");
                Ok(Some(bincode::deserialize(&data)?))
            }
            None => Ok(None),
        }
    }

    fn write_solution(&mut self, problem: &SeatingProblem, solution: &Solution) -> Result<()> {
        let data = bincode::serialize(solution)?;
        self.db.execute(
            "INSERT OR REPLACE INTO solution (problem, data) VALUES (?1, ?2)",
            params![problem.to_string(), data],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Assignment;

    #[test]
    fn test_write_then_read() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut cache = SqliteSolutionCache::in_memory()?;
        let problem: SeatingProblem = "2 2\n1 2 E\n".parse()?;
        assert_eq!(cache.read_solution(&problem)?, None);

        let solution =
            Solution::Satisfiable(Assignment::from_rows(vec![vec![true, false], vec![false, true]]));
        cache.write_solution(&problem, &solution)?;
        assert_eq!(cache.read_solution(&problem)?, Some(solution));

        let other: SeatingProblem = "2 1\n1 2 E\n".parse()?;
        assert_eq!(cache.read_solution(&other)?, None);
        Ok(())
    }

    #[test]
    fn test_write_replaces() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut cache = SqliteSolutionCache::in_memory()?;
        let problem: SeatingProblem = "1 1\n".parse()?;
        cache.write_solution(&problem, &Solution::Unsatisfiable)?;
        let solution = Solution::Satisfiable(Assignment::from_rows(vec![vec![true]]));
        cache.write_solution(&problem, &solution)?;
        assert_eq!(cache.read_solution(&problem)?, Some(solution));
        Ok(())
    }

    #[test]
    fn test_create_database() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let path = std::env::temp_dir().join(format!("slot_sat_cache_{}.sqlite", std::process::id()));
        let _ = std::fs::remove_file(&path);
        super::super::create_database(&path)?;

        let mut cache = SqliteSolutionCache::open(&path)?;
        let problem: SeatingProblem = "1 1\n".parse()?;
        cache.write_solution(&problem, &Solution::Unsatisfiable)?;
        assert_eq!(cache.read_solution(&problem)?, Some(Solution::Unsatisfiable));

        std::fs::remove_file(&path)?;
        Ok(())
    }
}
