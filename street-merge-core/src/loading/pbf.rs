//! Streaming PBF parse into the staging store.

use std::fs::File;
use std::path::Path;

use hashbrown::HashSet;
use log::info;
use osmpbfreader::{OsmObj, OsmPbfReader};

use super::staging::StagingStore;
use crate::Error;

/// Streams the extract twice: named highways first, then exactly the
/// nodes those ways reference.
pub fn stage_pbf(path: &Path, store: &StagingStore) -> Result<(), Error> {
    let file = File::open(path)?;
    let mut reader = OsmPbfReader::new(file);

    info!("staging ways from {}", path.display());
    let mut node_mask: HashSet<i64> = HashSet::new();
    let mut way_count = 0u64;

    store.begin()?;
    for obj in reader.iter() {
        let OsmObj::Way(way) = obj? else {
            continue;
        };
        if !way.tags.contains_key("highway") {
            continue;
        }
        let Some(name) = way.tags.get("name").filter(|name| !name.is_empty()) else {
            continue;
        };
        let oneway = way.tags.get("oneway").map(|value| value.as_str());

        store.insert_way(way.id.0, name, oneway)?;
        for (num, node) in way.nodes.iter().enumerate() {
            store.insert_way_node(way.id.0, num, node.0)?;
            node_mask.insert(node.0);
        }
        way_count += 1;
    }

    info!("staging nodes for {way_count} ways");
    reader.rewind()?;
    for obj in reader.iter() {
        let OsmObj::Node(node) = obj? else {
            continue;
        };
        if node_mask.contains(&node.id.0) {
            store.insert_node(node.id.0, node.lon(), node.lat())?;
        }
    }
    store.commit()?;

    Ok(())
}
