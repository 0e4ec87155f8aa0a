use clap::ArgMatches;
use slot_sat_lib::caches::{create_database, default_cache_path};
use std::fs;
use std::path::PathBuf;

pub fn create_cache(matches_create_cache: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let path = match matches_create_cache.value_of("sqlite_cache") {
        Some(path) => PathBuf::from(path),
        None => default_cache_path().ok_or("The user has no cache directory")?,
    };
    eprintln!("Trying to create a new SQLite database for caching...");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    create_database(&path)?;
    eprintln!("Created {}!", path.display());

    Ok(())
}
