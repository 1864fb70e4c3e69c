//! Collapsing of parallel one-way siblings onto a backbone fragment.

use crate::ClusterMap;
use crate::model::Street;

use super::{
    DISTANCE_TOLERANCE, StitchOutcome, endpoint_min_distance, realizes_any_minimum,
    realizes_same_direction_minimum, same_direction_distance, shortest_same_direction_to_group,
    shortest_to_group, sort_descending_length, try_stitch_any_orientation,
    try_stitch_same_direction,
};

/// Intersection guard for the lane pass, in lon/lat degrees
/// (roughly 50 m).
pub(crate) const INTERSECT_GUARD: f64 = 0.0005;

/// Collapses each direction sub-group onto its longest fragment.
///
/// Unlike the stitching pass the backbone stays fixed: everything either
/// chains onto it or survives on its own. Output keys drop the direction
/// suffix, so the opposing lanes of a dual carriageway land back in one
/// bucket per proximity group.
pub fn collapse_lanes(clusters: ClusterMap) -> ClusterMap {
    let mut collapsed = ClusterMap::new();

    for (key, fragments) in clusters {
        let stripped = key
            .split_once("--")
            .map_or(key.as_str(), |(base, _)| base)
            .to_string();
        let streets = collapse_group(fragments);
        collapsed.entry(stripped).or_default().extend(streets);
    }

    collapsed
}

fn collapse_group(mut fragments: Vec<Street>) -> Vec<Street> {
    sort_descending_length(&mut fragments);
    if fragments.len() <= 1 {
        return fragments;
    }

    let mut base = fragments.remove(0);
    let mut standalone = Vec::new();

    let mut i = 0;
    while i < fragments.len() {
        let shortest = shortest_to_group(&base, &fragments);
        let shortest_same_direction = shortest_same_direction_to_group(&base, &fragments);

        let outcome = if fragments[i].is_oneway() {
            collapse_oneway(&mut base, &mut fragments[i], shortest_same_direction)
        } else {
            collapse_twoway(&mut base, &mut fragments[i], shortest)
        };

        match outcome {
            StitchOutcome::Merged => {
                // The backbone's endpoints moved; rescan from the top.
                fragments.remove(i);
                i = 0;
            }
            StitchOutcome::Standalone => {
                standalone.push(fragments.remove(i));
            }
            StitchOutcome::Keep => {
                i += 1;
            }
        }
    }

    let mut result = Vec::with_capacity(1 + standalone.len() + fragments.len());
    result.push(base);
    result.extend(standalone);
    result.extend(fragments);
    result
}

fn collapse_oneway(base: &mut Street, candidate: &mut Street, shortest: f64) -> StitchOutcome {
    let pair_distance = same_direction_distance(&base.path, &candidate.path);
    if (base.path.intersects(&candidate.path) && pair_distance > INTERSECT_GUARD)
        || pair_distance > DISTANCE_TOLERANCE
    {
        // Can never chain onto the fixed backbone.
        return StitchOutcome::Standalone;
    }

    if try_stitch_same_direction(base, candidate, shortest) {
        return StitchOutcome::Merged;
    }

    if realizes_same_direction_minimum(base, candidate, shortest) && shortest >= DISTANCE_TOLERANCE
    {
        return StitchOutcome::Standalone;
    }

    StitchOutcome::Keep
}

fn collapse_twoway(base: &mut Street, candidate: &mut Street, shortest: f64) -> StitchOutcome {
    let pair_distance = endpoint_min_distance(&base.path, &candidate.path);
    if base.path.intersects(&candidate.path) && pair_distance > INTERSECT_GUARD {
        return StitchOutcome::Standalone;
    }

    if try_stitch_any_orientation(base, candidate, shortest) {
        return StitchOutcome::Merged;
    }

    if realizes_any_minimum(base, candidate, shortest) {
        return StitchOutcome::Standalone;
    }

    StitchOutcome::Keep
}
