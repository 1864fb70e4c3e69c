//! Street name normalization
//!
//! Turns raw OSM `name` tags into canonical cluster keys: lowercase,
//! fold Vietnamese accents, drop non-street entries, then ask the
//! external parser which token is the street name.

pub mod accents;
pub mod parser;

pub use accents::{fold_accents, fold_char};
pub use parser::{
    Classification, DEFAULT_PARSER_URL, HttpNameParser, ParseResponse, ParseStreetName, Solution,
};

use hashbrown::HashMap;
use log::debug;

use crate::model::Street;
use crate::{ClusterMap, Error};

/// Folded prefixes that mark non-street entries: alleys (kiệt, hẻm),
/// bridges (cầu) and roundabouts (vòng xuyến).
const NOISE_PREFIXES: [&str; 4] = ["kiet", "hem", "cau", "vong xuyen"];

/// The alley "Ngõ Chu Huy Mân" merges wrongly into the "Chu Huy Mân"
/// street, so it is dropped outright.
const NOISE_EXACT: &str = "ngo chu huy man";

fn is_noise(folded: &str) -> bool {
    NOISE_PREFIXES
        .iter()
        .any(|prefix| folded.starts_with(prefix))
        || folded == NOISE_EXACT
}

/// Memoizing normalizer: one parser round-trip per distinct raw name.
pub struct NameNormalizer<P> {
    parser: P,
    cache: HashMap<String, Option<String>>,
}

impl<P: ParseStreetName> NameNormalizer<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            cache: HashMap::new(),
        }
    }

    /// Canonical key for a raw OSM name, or `None` when the name is not
    /// a street (noise prefixes, house numbers, unclassifiable input).
    ///
    /// # Errors
    ///
    /// Fails when the parser service cannot be reached or answers with a
    /// malformed body. Unreviewed raw names are worse than no output, so
    /// callers treat this as fatal.
    pub fn canonical_key(&mut self, raw: &str) -> Result<Option<String>, Error> {
        if let Some(cached) = self.cache.get(raw) {
            return Ok(cached.clone());
        }
        let key = self.resolve(raw)?;
        self.cache.insert(raw.to_string(), key.clone());
        Ok(key)
    }

    fn resolve(&self, raw: &str) -> Result<Option<String>, Error> {
        let lowered = raw.to_lowercase();
        let folded = fold_accents(&lowered);

        if is_noise(&folded) {
            debug!("non-street name dropped: {raw:?}");
            return Ok(None);
        }

        // The parser expects the generic "đường" prefix; prepend its
        // folded form when the original name lacks it.
        let query = if lowered.starts_with("đường") {
            folded
        } else {
            format!("duong {folded}")
        };

        let response = self.parser.parse(&query)?;
        Ok(extract_street_name(&response))
    }
}

/// Street value from the first solution's classifications. Any
/// `housenumber` label rejects the whole name: addresses are not streets.
fn extract_street_name(response: &ParseResponse) -> Option<String> {
    let solution = response.solutions.first()?;

    let mut street = None;
    for classification in &solution.classifications {
        match classification.label.as_str() {
            "housenumber" => return None,
            "street" => street = Some(classification.value.clone()),
            _ => {}
        }
    }
    street.filter(|name| !name.is_empty())
}

/// Clusters fragments by canonical name. Fragments whose names normalize
/// to nothing are dropped; survivors carry the canonical name from here
/// on.
pub fn cluster_by_name<P: ParseStreetName>(
    streets: Vec<Street>,
    normalizer: &mut NameNormalizer<P>,
) -> Result<ClusterMap, Error> {
    let mut clusters = ClusterMap::new();

    for mut street in streets {
        let Some(key) = normalizer.canonical_key(&street.name)? else {
            debug!("way {} skipped ({:?})", street.way_id, street.name);
            continue;
        };
        street.name = key.clone();
        clusters.entry(key).or_default().push(street);
    }

    Ok(clusters)
}
