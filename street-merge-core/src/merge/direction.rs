//! Grouping of one-way fragments by heading.

use crate::ClusterMap;
use crate::model::Street;

use super::sort_descending_length;

/// Splits each proximity group into sub-groups of co-directional one-way
/// fragments.
///
/// Groups made up entirely of two-way fragments pass through unchanged.
/// In mixed groups the longest one-way fragment seeds direction group
/// `--0` and fixes the reference chord; a one-way fragment joins the
/// current sub-group when the cosine against the reference lies in
/// `(0, 1]`. Leftovers seed `--1`, `--2`, … Two-way fragments stay under
/// the proximity key so the final join can run them against the oriented
/// sub-streets.
pub fn partition_by_direction(clusters: ClusterMap) -> ClusterMap {
    let mut partitioned = ClusterMap::new();

    for (key, mut fragments) in clusters {
        sort_descending_length(&mut fragments);

        if fragments.iter().all(|street| !street.is_oneway()) {
            partitioned.entry(key).or_default().extend(fragments);
            continue;
        }

        let (oneway, twoway): (Vec<Street>, Vec<Street>) =
            fragments.into_iter().partition(Street::is_oneway);
        if !twoway.is_empty() {
            partitioned.entry(key.clone()).or_default().extend(twoway);
        }

        let mut remaining = oneway;
        let mut group = 0;
        while !remaining.is_empty() {
            let seed = remaining.remove(0);
            let reference = seed.path.chord();

            let (admitted, rest): (Vec<Street>, Vec<Street>) = remaining
                .into_iter()
                .partition(|street| reference.same_direction(&street.path.chord()));
            remaining = rest;

            let mut members = vec![seed];
            members.extend(admitted);
            partitioned.insert(format!("{key}--{group}"), members);
            group += 1;
        }
    }

    partitioned
}
