//! Extraction of street fragments from staged ways.

use geo::Coord;
use log::warn;

use super::staging::{StagedWay, StagingStore};
use crate::Error;
use crate::model::{Oneway, Path, Street};

/// Reads every staged way back as a street fragment.
///
/// Broken ways are recoverable at fragment granularity: a way whose
/// nodes were stripped from the extract, that kept fewer than two
/// points, or whose staged coordinates fail to parse is logged and
/// skipped.
pub fn generate_streets(store: &StagingStore) -> Result<Vec<Street>, Error> {
    let mut streets = Vec::new();

    store.for_each_way(|way| {
        if let Some(street) = street_from_staged(way) {
            streets.push(street);
        }
    })?;

    Ok(streets)
}

fn street_from_staged(way: StagedWay) -> Option<Street> {
    let Some(points) = way.points else {
        // Another tool stripped the nodes but left the ways referencing them.
        warn!("invalid way, nodes not included in file: {}", way.way_id);
        return None;
    };

    let pairs: Vec<&str> = points.split(',').collect();
    if pairs.len() <= 1 {
        warn!("way {} kept fewer than two nodes", way.way_id);
        return None;
    }

    let mut coords = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some((lon, lat)) = pair.split_once('#') else {
            warn!("way {}: malformed coordinate {pair:?}", way.way_id);
            return None;
        };
        match (lon.parse::<f64>(), lat.parse::<f64>()) {
            (Ok(x), Ok(y)) => coords.push(Coord { x, y }),
            _ => {
                warn!("way {}: error parsing coordinate {pair:?}", way.way_id);
                return None;
            }
        }
    }

    Some(Street {
        path: Path::new(coords),
        name: way.name,
        oneway: Oneway::from_tag(way.oneway.as_deref()),
        way_id: way.way_id,
    })
}
