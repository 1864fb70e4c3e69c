//! This module is responsible for loading street data from an OSM PBF
//! extract: streaming the file into a temporary staging store and
//! reading it back as street fragments.

mod extract;
mod pbf;
mod staging;

pub use extract::generate_streets;
pub use pbf::stage_pbf;
pub use staging::{StagedWay, StagingStore};
