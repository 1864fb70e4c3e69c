//! Grouping of same-name fragments by spatial proximity.

use crate::ClusterMap;

use super::{shortest_to_group, sort_descending_length};

/// Admission tolerance for proximity groups, in lon/lat degrees
/// (roughly 300 m).
pub(crate) const PROXIMITY_TOLERANCE: f64 = 0.003;

/// Splits each name cluster into spatially contiguous groups.
///
/// The longest remaining fragment seeds a group; a fragment is admitted
/// when any of its endpoints lies within the tolerance of any group
/// member's endpoint. Every admission restarts the scan, so fragments
/// reachable only through a newly admitted member are still picked up.
/// Group keys get an ordinal suffix: `name__1`, `name__2`, …
pub fn partition_by_proximity(clusters: ClusterMap) -> ClusterMap {
    let mut partitioned = ClusterMap::new();

    for (key, mut fragments) in clusters {
        sort_descending_length(&mut fragments);

        let mut remaining = fragments;
        let mut group = 1;
        while !remaining.is_empty() {
            let seed = remaining.remove(0);
            let mut members = vec![seed];

            let mut i = 0;
            while i < remaining.len() {
                if shortest_to_group(&remaining[i], &members) < PROXIMITY_TOLERANCE {
                    members.push(remaining.remove(i));
                    i = 0;
                } else {
                    i += 1;
                }
            }

            partitioned.insert(format!("{key}__{group}"), members);
            group += 1;
        }
    }

    partitioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Oneway, Path, Street};
    use geo::Coord;

    fn frag(points: &[(f64, f64)]) -> Street {
        Street {
            path: Path::new(points.iter().map(|&(x, y)| Coord { x, y }).collect()),
            name: "B".to_string(),
            oneway: Oneway::No,
            way_id: 0,
        }
    }

    fn cluster(fragments: Vec<Street>) -> ClusterMap {
        let mut clusters = ClusterMap::new();
        clusters.insert("B".to_string(), fragments);
        clusters
    }

    #[test]
    fn distant_fragments_split_into_two_groups() {
        // Closest endpoints are 0.01 degrees apart, well over the tolerance.
        let near = frag(&[(0.0, 0.0), (0.002, 0.0)]);
        let far = frag(&[(0.012, 0.0), (0.013, 0.0)]);

        let partitioned = partition_by_proximity(cluster(vec![near, far]));

        let keys: Vec<&str> = partitioned.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["B__1", "B__2"]);
        assert_eq!(partitioned["B__1"].len(), 1);
        assert_eq!(partitioned["B__2"].len(), 1);
    }

    #[test]
    fn close_fragments_share_a_group() {
        let a = frag(&[(0.0, 0.0), (0.002, 0.0)]);
        let b = frag(&[(0.0021, 0.0), (0.004, 0.0)]);

        let partitioned = partition_by_proximity(cluster(vec![a, b]));

        assert_eq!(partitioned.len(), 1);
        assert_eq!(partitioned["B__1"].len(), 2);
    }

    #[test]
    fn admission_is_transitive_through_new_members() {
        // `hop` is too far from the seed but within tolerance of `bridge`;
        // admitting `bridge` must pull `hop` in on the restarted scan.
        let seed = frag(&[(0.0, 0.0), (0.01, 0.0)]);
        let hop = frag(&[(0.0145, 0.0), (0.015, 0.0)]);
        let bridge = frag(&[(0.012, 0.0), (0.0125, 0.0)]);

        let partitioned = partition_by_proximity(cluster(vec![seed, hop, bridge]));

        assert_eq!(partitioned.len(), 1);
        assert_eq!(partitioned["B__1"].len(), 3);
    }

    #[test]
    fn longest_fragment_seeds_the_first_group() {
        let short = frag(&[(1.0, 0.0), (1.001, 0.0)]);
        let long = frag(&[(0.0, 0.0), (0.1, 0.0)]);

        let partitioned = partition_by_proximity(cluster(vec![short, long]));

        // The long fragment seeds group 1; the short one is out of range
        // and lands in group 2.
        assert_eq!(partitioned["B__1"][0].path.first(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(partitioned["B__2"][0].path.first(), Coord { x: 1.0, y: 0.0 });
    }
}
