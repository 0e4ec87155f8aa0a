pub mod model;
pub mod walksat;

pub use model::Model;
pub use walksat::{WalkSat, WalkSatConfig};
