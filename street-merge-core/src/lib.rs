//! Street-merge engine
//!
//! An OSM extract describes one named street as many way fragments:
//! per-block segments, dual carriageways, one-way lane pairs. This crate
//! collapses those fragments into the smallest set of connected
//! polylines per canonical street name, preserving geometry and
//! direction, for gazetteer and geocoder ingestion.
//!
//! The pipeline is strictly sequential: stream the PBF into a temporary
//! staging store, extract fragments, normalize names through the
//! external parser service, then run the geometric passes (proximity
//! grouping, direction grouping, end-to-end stitching, lane collapsing,
//! final joining) and emit records sorted by canonical name.

mod error;

pub mod loading;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod output;
pub mod prelude;

pub use error::Error;

use std::collections::BTreeMap;

use model::Street;

/// Mapping from cluster key to fragment list, threaded between pipeline
/// stages. Keys are canonical street names refined with partitioning
/// suffixes; the ordered map keeps iteration and output deterministic.
pub type ClusterMap = BTreeMap<String, Vec<Street>>;
