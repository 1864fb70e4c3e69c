// Re-export key components
pub use crate::loading::{StagingStore, generate_streets, stage_pbf};
pub use crate::merge::merge_streets;
pub use crate::normalize::{
    DEFAULT_PARSER_URL, HttpNameParser, NameNormalizer, ParseStreetName, cluster_by_name,
};
pub use crate::output::{GeometryFormat, OutputConfig, render_street, write_streets};

// Core data model
pub use crate::ClusterMap;
pub use crate::Error;
pub use crate::model::{Oneway, Path, Street, Vector};
