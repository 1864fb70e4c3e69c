//! Multi-pass geometric joining of named street fragments
//!
//! Fragments sharing a canonical name are grouped by spatial proximity,
//! split by travel direction, stitched end-to-end, collapsed across
//! parallel lanes and finally joined across groups. Cluster keys carry
//! the partitioning history as suffixes (`name__G` for proximity groups,
//! `name__G--D` for direction groups) so later passes can recover the
//! base name.

mod direction;
mod join;
mod lanes;
mod proximity;
mod stitch;

pub use direction::partition_by_direction;
pub use join::join_clusters;
pub use lanes::collapse_lanes;
pub use proximity::partition_by_proximity;
pub use stitch::merge_same_direction;

use std::cmp::Ordering;

use geo::Coord;

use crate::ClusterMap;
use crate::model::{Path, Street, planar_distance};

/// Endpoint tolerance shared by every joining pass, in lon/lat degrees
/// (roughly 300 m at Vietnamese latitudes).
pub(crate) const DISTANCE_TOLERANCE: f64 = 0.003;

/// Runs the geometric passes over name-clustered fragments and returns
/// the final clusters keyed by canonical name.
pub fn merge_streets(clusters: ClusterMap) -> ClusterMap {
    let clusters = partition_by_proximity(clusters);
    let clusters = partition_by_direction(clusters);
    let clusters = merge_same_direction(clusters);
    let clusters = collapse_lanes(clusters);
    join_clusters(clusters)
}

pub(crate) fn sort_descending_length(streets: &mut [Street]) {
    streets.sort_by(|a, b| {
        b.path
            .length()
            .partial_cmp(&a.path.length())
            .unwrap_or(Ordering::Equal)
    });
}

/// Minimum of the four endpoint pairings between two paths.
pub(crate) fn endpoint_min_distance(a: &Path, b: &Path) -> f64 {
    let mut shortest = planar_distance(a.first(), b.first());
    for candidate in [
        planar_distance(a.first(), b.last()),
        planar_distance(a.last(), b.first()),
        planar_distance(a.last(), b.last()),
    ] {
        if candidate < shortest {
            shortest = candidate;
        }
    }
    shortest
}

/// Minimum of the two heading-preserving pairings
/// (`a.last ↔ b.first`, `a.first ↔ b.last`).
pub(crate) fn same_direction_distance(a: &Path, b: &Path) -> f64 {
    let head_to_tail = planar_distance(a.last(), b.first());
    let tail_to_head = planar_distance(a.first(), b.last());
    if tail_to_head < head_to_tail {
        tail_to_head
    } else {
        head_to_tail
    }
}

pub(crate) fn shortest_to_group(street: &Street, group: &[Street]) -> f64 {
    let Some(first) = group.first() else {
        return 0.0;
    };
    let mut shortest = endpoint_min_distance(&street.path, &first.path);
    for other in &group[1..] {
        let distance = endpoint_min_distance(&street.path, &other.path);
        if distance < shortest {
            shortest = distance;
        }
    }
    shortest
}

pub(crate) fn shortest_same_direction_to_group(street: &Street, group: &[Street]) -> f64 {
    let Some(first) = group.first() else {
        return 0.0;
    };
    let mut shortest = same_direction_distance(&street.path, &first.path);
    for other in &group[1..] {
        let distance = same_direction_distance(&street.path, &other.path);
        if distance < shortest {
            shortest = distance;
        }
    }
    shortest
}

/// How a candidate's endpoints line up with the base fragment.
#[derive(Debug, Clone, Copy)]
pub(crate) enum JoinOrientation {
    /// base.last ↔ candidate.first
    Append,
    /// base.first ↔ candidate.last
    Prepend,
    /// base.last ↔ candidate.last
    TailToTail,
    /// base.first ↔ candidate.first
    HeadToHead,
}

/// Per-candidate outcome of one joining step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StitchOutcome {
    /// Candidate absorbed into the base.
    Merged,
    /// Candidate survives on its own under the current key.
    Standalone,
    /// Candidate stays in the worklist for a later look.
    Keep,
}

/// Moves the candidate's points into the base for the given orientation.
/// The join point appears exactly once in the result and the base keeps
/// its original heading.
pub(crate) fn merge_into(base: &mut Path, candidate: &mut Path, orientation: JoinOrientation) {
    match orientation {
        JoinOrientation::Append => {
            let join = base.last();
            absorb(base, candidate, join);
        }
        JoinOrientation::Prepend => {
            let join = base.first();
            base.reverse();
            candidate.reverse();
            absorb(base, candidate, join);
            base.reverse();
        }
        JoinOrientation::TailToTail => {
            let join = base.last();
            candidate.reverse();
            absorb(base, candidate, join);
        }
        JoinOrientation::HeadToHead => {
            let join = base.first();
            base.reverse();
            absorb(base, candidate, join);
            base.reverse();
        }
    }
}

fn absorb(base: &mut Path, candidate: &Path, join: Coord<f64>) {
    for &point in candidate.coords() {
        if point == join {
            continue;
        }
        base.push(point);
    }
}

/// Stitches the candidate onto the base when one of the two
/// heading-preserving pairings realizes the cluster-wide minimum and lies
/// under the tolerance. Requires co-directional chords.
///
/// The equality against `shortest` is deliberate: the minimum was computed
/// from the same `planar_distance` expressions, so only the endpoint pair
/// that actually realized it can merge.
pub(crate) fn try_stitch_same_direction(
    base: &mut Street,
    candidate: &mut Street,
    shortest: f64,
) -> bool {
    if !base.path.chord().same_direction(&candidate.path.chord()) {
        return false;
    }
    if planar_distance(base.path.last(), candidate.path.first()) == shortest
        && shortest < DISTANCE_TOLERANCE
    {
        merge_into(&mut base.path, &mut candidate.path, JoinOrientation::Append);
        return true;
    }
    if planar_distance(base.path.first(), candidate.path.last()) == shortest
        && shortest < DISTANCE_TOLERANCE
    {
        merge_into(&mut base.path, &mut candidate.path, JoinOrientation::Prepend);
        return true;
    }
    false
}

/// Stitches in whichever of the four endpoint orientations realizes the
/// cluster-wide minimum under the tolerance.
pub(crate) fn try_stitch_any_orientation(
    base: &mut Street,
    candidate: &mut Street,
    shortest: f64,
) -> bool {
    let orientations = [
        (
            planar_distance(base.path.last(), candidate.path.first()),
            JoinOrientation::Append,
        ),
        (
            planar_distance(base.path.first(), candidate.path.last()),
            JoinOrientation::Prepend,
        ),
        (
            planar_distance(base.path.last(), candidate.path.last()),
            JoinOrientation::TailToTail,
        ),
        (
            planar_distance(base.path.first(), candidate.path.first()),
            JoinOrientation::HeadToHead,
        ),
    ];
    for (distance, orientation) in orientations {
        if distance == shortest && shortest < DISTANCE_TOLERANCE {
            merge_into(&mut base.path, &mut candidate.path, orientation);
            return true;
        }
    }
    false
}

/// Whether the candidate realizes the heading-preserving minimum.
pub(crate) fn realizes_same_direction_minimum(
    base: &Street,
    candidate: &Street,
    shortest: f64,
) -> bool {
    planar_distance(base.path.last(), candidate.path.first()) == shortest
        || planar_distance(base.path.first(), candidate.path.last()) == shortest
}

/// Whether the candidate realizes the four-orientation minimum.
pub(crate) fn realizes_any_minimum(base: &Street, candidate: &Street, shortest: f64) -> bool {
    planar_distance(base.path.last(), candidate.path.first()) == shortest
        || planar_distance(base.path.first(), candidate.path.last()) == shortest
        || planar_distance(base.path.last(), candidate.path.last()) == shortest
        || planar_distance(base.path.first(), candidate.path.first()) == shortest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Oneway;

    fn frag(name: &str, oneway: Oneway, points: &[(f64, f64)]) -> Street {
        Street {
            path: Path::new(points.iter().map(|&(x, y)| Coord { x, y }).collect()),
            name: name.to_string(),
            oneway,
            way_id: 0,
        }
    }

    #[test]
    fn endpoint_min_picks_closest_pairing() {
        let a = frag("a", Oneway::No, &[(0.0, 0.0), (1.0, 0.0)]);
        let b = frag("a", Oneway::No, &[(1.1, 0.0), (5.0, 0.0)]);
        let shortest = endpoint_min_distance(&a.path, &b.path);
        assert!((shortest - 0.1).abs() < 1e-12);
    }

    #[test]
    fn same_direction_distance_ignores_tail_to_tail() {
        // Tail-to-tail endpoints coincide, but the heading-preserving
        // pairings are both far: the minimum must not see the coincidence.
        let a = frag("a", Oneway::No, &[(0.0, 0.0), (1.0, 0.0)]);
        let b = frag("a", Oneway::No, &[(5.0, 0.0), (1.0, 0.0)]);
        assert_eq!(endpoint_min_distance(&a.path, &b.path), 0.0);
        assert_eq!(same_direction_distance(&a.path, &b.path), 4.0);
    }

    #[test]
    fn group_minimum_of_empty_group_is_zero() {
        let a = frag("a", Oneway::No, &[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(shortest_to_group(&a, &[]), 0.0);
        assert_eq!(shortest_same_direction_to_group(&a, &[]), 0.0);
    }

    #[test]
    fn merge_append_skips_join_point() {
        let mut base = frag("a", Oneway::No, &[(0.0, 0.0), (1.0, 0.0)]);
        let mut cand = frag("a", Oneway::No, &[(1.0, 0.0), (2.0, 0.0)]);
        merge_into(&mut base.path, &mut cand.path, JoinOrientation::Append);
        assert_eq!(
            base.path.coords(),
            &[
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 2.0, y: 0.0 }
            ]
        );
    }

    #[test]
    fn merge_prepend_preserves_base_heading() {
        let mut base = frag("a", Oneway::No, &[(1.0, 0.0), (0.0, 0.0)]);
        let mut cand = frag("a", Oneway::No, &[(2.0, 0.0), (1.0, 0.0)]);
        merge_into(&mut base.path, &mut cand.path, JoinOrientation::Prepend);
        assert_eq!(
            base.path.coords(),
            &[
                Coord { x: 2.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 0.0, y: 0.0 }
            ]
        );
    }

    #[test]
    fn merge_tail_to_tail_reverses_candidate() {
        let mut base = frag("a", Oneway::No, &[(0.0, 0.0), (1.0, 0.0)]);
        let mut cand = frag("a", Oneway::No, &[(2.0, 0.0), (1.0, 0.0)]);
        merge_into(&mut base.path, &mut cand.path, JoinOrientation::TailToTail);
        assert_eq!(
            base.path.coords(),
            &[
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 2.0, y: 0.0 }
            ]
        );
    }

    #[test]
    fn merge_head_to_head_reverses_base_and_back() {
        let mut base = frag("a", Oneway::No, &[(1.0, 0.0), (2.0, 0.0)]);
        let mut cand = frag("a", Oneway::No, &[(1.0, 0.0), (0.0, 0.0)]);
        merge_into(&mut base.path, &mut cand.path, JoinOrientation::HeadToHead);
        assert_eq!(
            base.path.coords(),
            &[
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 2.0, y: 0.0 }
            ]
        );
    }

    #[test]
    fn stitch_same_direction_refuses_opposed_chords() {
        let mut base = frag("a", Oneway::Yes, &[(0.0, 0.0), (1.0, 0.0)]);
        let mut cand = frag("a", Oneway::Yes, &[(2.0, 0.0), (1.0, 0.0)]);
        let shortest = same_direction_distance(&base.path, &cand.path);
        assert!(!try_stitch_same_direction(&mut base, &mut cand, shortest));
    }
}
