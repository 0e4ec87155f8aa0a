pub mod solution_sqlite_cache;

use rusqlite::DatabaseName::Main;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::solution::Solution;
use crate::SeatingProblem;

pub use solution_sqlite_cache::SqliteSolutionCache;

/// Storage of already solved problems.
pub trait SolutionCache {
    /// Returns the stored solution of `problem`, if any.
    fn read_solution(&self, problem: &SeatingProblem) -> Result<Option<Solution>>;

    /// Stores `solution` for `problem`, replacing an older one.
    fn write_solution(&mut self, problem: &SeatingProblem, solution: &Solution) -> Result<()>;
}

const SCHEMA: &str = "CREATE TABLE solution (
        problem         TEXT NOT NULL,
        data            BLOB,
        CONSTRAINT solution_pk PRIMARY KEY (problem)
    );";

/// Creates an empty SQLite solution cache at `path`.
pub fn create_database<P: AsRef<Path>>(path: P) -> Result<()> {
    let db = rusqlite::Connection::open_in_memory()?;
    db.execute(SCHEMA, [])?;
    db.backup(Main, path, None)?;
    Ok(())
}

/// Default cache location under the user's cache directory.
pub fn default_cache_path() -> Option<PathBuf> {
    let mut path = dirs::cache_dir()?;
    path.push("slot_sat");
    path.push("solutions");
    path.set_extension("sqlite");
    Some(path)
}
