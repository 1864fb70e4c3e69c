//! Final cross-group join under the base street name.

use crate::ClusterMap;
use crate::model::Street;

use super::{
    StitchOutcome, endpoint_min_distance, realizes_any_minimum, shortest_same_direction_to_group,
    shortest_to_group, sort_descending_length, try_stitch_any_orientation,
};

/// Intersection guard for the final join, in lon/lat degrees
/// (roughly 30 m).
pub(crate) const INTERSECT_GUARD: f64 = 0.0003;

/// Joins the surviving fragments of each proximity group and emits them
/// under the bare canonical name.
///
/// Closed loops (roundabouts) are removed up front. The longest fragment
/// acts as the fixed base; candidates may join through any of the four
/// endpoint orientations. Fragments that cross the base far from their
/// endpoints, or that can never realize the group minimum, survive as
/// separate records.
pub fn join_clusters(clusters: ClusterMap) -> ClusterMap {
    let mut joined = ClusterMap::new();

    for (key, mut fragments) in clusters {
        let base_key = key
            .split_once("__")
            .map_or(key.as_str(), |(base, _)| base)
            .to_string();

        sort_descending_length(&mut fragments);
        fragments.retain(|street| !street.path.is_closed());

        if fragments.is_empty() {
            continue;
        }
        let streets = if fragments.len() == 1 {
            fragments
        } else {
            join_group(fragments)
        };
        joined.entry(base_key).or_default().extend(streets);
    }

    joined
}

fn join_group(mut fragments: Vec<Street>) -> Vec<Street> {
    let mut base = fragments.remove(0);
    let mut standalone = Vec::new();

    let mut i = 0;
    while i < fragments.len() {
        let shortest = shortest_to_group(&base, &fragments);
        let shortest_same_direction = shortest_same_direction_to_group(&base, &fragments);

        // Touching endpoints with a mismatched heading: postpone the
        // candidate unless the scan is already at the tail, so a
        // better-aligned fragment gets the join first.
        let codirectional = base
            .path
            .chord()
            .same_direction(&fragments[i].path.chord());
        if shortest_same_direction == 0.0
            && shortest == 0.0
            && !codirectional
            && i + 1 < fragments.len()
        {
            i += 1;
            continue;
        }

        match join_candidate(&mut base, &mut fragments[i], shortest) {
            StitchOutcome::Merged => {
                // The base's endpoints moved; rescan from the top.
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

fn join_candidate(base: &mut Street, candidate: &mut Street, shortest: f64) -> StitchOutcome {
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
