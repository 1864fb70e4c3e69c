//! End-to-end stitching of aligned fragments.

use crate::ClusterMap;
use crate::model::Street;

use super::{
    DISTANCE_TOLERANCE, StitchOutcome, endpoint_min_distance, realizes_any_minimum,
    realizes_same_direction_minimum, same_direction_distance, shortest_same_direction_to_group,
    shortest_to_group, sort_descending_length, try_stitch_any_orientation,
    try_stitch_same_direction,
};

/// Crossing fragments whose closest endpoints lie further apart than this
/// are refused outright: most likely distinct streets sharing a name
/// (roughly 65 m).
pub(crate) const INTERSECT_GUARD: f64 = 0.00065;

/// Chains fragments end-to-end within each cluster.
///
/// The head of the descending-length worklist acts as the base; every
/// successful merge restarts the candidate scan because the base's
/// endpoints moved. When a scan completes without merging, the base is
/// emitted and the next head takes over. One-way candidates may only
/// join through the two heading-preserving orientations; two-way
/// candidates through any of the four.
pub fn merge_same_direction(clusters: ClusterMap) -> ClusterMap {
    let mut merged = ClusterMap::new();

    for (key, fragments) in clusters {
        let stitched = stitch_cluster(fragments);
        merged.entry(key).or_default().extend(stitched);
    }

    merged
}

fn stitch_cluster(mut fragments: Vec<Street>) -> Vec<Street> {
    sort_descending_length(&mut fragments);

    let mut emitted = Vec::with_capacity(fragments.len());
    while !fragments.is_empty() {
        let mut base = fragments.remove(0);

        let mut i = 0;
        while i < fragments.len() {
            let shortest = shortest_to_group(&base, &fragments);
            let shortest_same_direction = shortest_same_direction_to_group(&base, &fragments);

            let outcome = if fragments[i].is_oneway() {
                stitch_oneway(&mut base, &mut fragments[i], shortest_same_direction)
            } else {
                stitch_twoway(&mut base, &mut fragments[i], shortest)
            };

            match outcome {
                StitchOutcome::Merged => {
                    fragments.remove(i);
                    i = 0;
                }
                StitchOutcome::Standalone => {
                    emitted.push(fragments.remove(i));
                }
                StitchOutcome::Keep => {
                    i += 1;
                }
            }
        }

        emitted.push(base);
    }

    emitted
}

fn stitch_oneway(base: &mut Street, candidate: &mut Street, shortest: f64) -> StitchOutcome {
    let pair_distance = same_direction_distance(&base.path, &candidate.path);
    if base.path.intersects(&candidate.path) && pair_distance > INTERSECT_GUARD {
        // Crossing far from the endpoints: leave the pair apart.
        return StitchOutcome::Keep;
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

fn stitch_twoway(base: &mut Street, candidate: &mut Street, shortest: f64) -> StitchOutcome {
    let pair_distance = endpoint_min_distance(&base.path, &candidate.path);
    if base.path.intersects(&candidate.path) && pair_distance > INTERSECT_GUARD {
        return StitchOutcome::Keep;
    }

    if try_stitch_any_orientation(base, candidate, shortest) {
        return StitchOutcome::Merged;
    }

    if realizes_any_minimum(base, candidate, shortest) {
        return StitchOutcome::Standalone;
    }

    StitchOutcome::Keep
}
