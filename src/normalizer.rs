//! Lookup tables for directionals, street types and states.

use std::collections::HashMap;

const DIRECTIONALS: &[(&str, &str)] = &[
    ("north", "N"),
    ("south", "S"),
    ("east", "E"),
    ("west", "W"),
    ("northeast", "NE"),
    ("northwest", "NW"),
    ("southeast", "SE"),
    ("southwest", "SW"),
    ("n", "N"),
    ("s", "S"),
    ("e", "E"),
    ("w", "W"),
    ("ne", "NE"),
    ("nw", "NW"),
    ("se", "SE"),
    ("sw", "SW"),
];

// Synonym -> canonical USPS suffix abbreviation. Every canonical form maps to itself.
const STREET_TYPES: &[(&str, &str)] = &[
    ("alley", "aly"),
    ("aly", "aly"),
    ("avenue", "ave"),
    ("av", "ave"),
    ("ave", "ave"),
    ("aven", "ave"),
    ("bend", "bnd"),
    ("bnd", "bnd"),
    ("boulevard", "blvd"),
    ("boul", "blvd"),
    ("blvd", "blvd"),
    ("bypass", "byp"),
    ("byp", "byp"),
    ("causeway", "cswy"),
    ("cswy", "cswy"),
    ("center", "ctr"),
    ("centre", "ctr"),
    ("ctr", "ctr"),
    ("circle", "cir"),
    ("circ", "cir"),
    ("cir", "cir"),
    ("court", "ct"),
    ("ct", "ct"),
    ("cove", "cv"),
    ("cv", "cv"),
    ("creek", "crk"),
    ("crk", "crk"),
    ("crescent", "cres"),
    ("cres", "cres"),
    ("crossing", "xing"),
    ("xing", "xing"),
    ("drive", "dr"),
    ("drv", "dr"),
    ("dr", "dr"),
    ("expressway", "expy"),
    ("expy", "expy"),
    ("freeway", "fwy"),
    ("fwy", "fwy"),
    ("glen", "gln"),
    ("gln", "gln"),
    ("grove", "grv"),
    ("grv", "grv"),
    ("heights", "hts"),
    ("hts", "hts"),
    ("highway", "hwy"),
    ("hiway", "hwy"),
    ("hwy", "hwy"),
    ("hill", "hl"),
    ("hl", "hl"),
    ("junction", "jct"),
    ("jct", "jct"),
    ("lane", "ln"),
    ("ln", "ln"),
    ("loop", "loop"),
    ("mall", "mall"),
    ("manor", "mnr"),
    ("mnr", "mnr"),
    ("meadows", "mdws"),
    ("mdws", "mdws"),
    ("park", "park"),
    ("parkway", "pkwy"),
    ("pkway", "pkwy"),
    ("pkwy", "pkwy"),
    ("pass", "pass"),
    ("path", "path"),
    ("pike", "pike"),
    ("place", "pl"),
    ("pl", "pl"),
    ("plaza", "plz"),
    ("plz", "plz"),
    ("point", "pt"),
    ("pt", "pt"),
    ("ridge", "rdg"),
    ("rdg", "rdg"),
    ("road", "rd"),
    ("rd", "rd"),
    ("route", "rte"),
    ("rte", "rte"),
    ("row", "row"),
    ("run", "run"),
    ("square", "sq"),
    ("sq", "sq"),
    ("station", "sta"),
    ("sta", "sta"),
    ("street", "st"),
    ("str", "st"),
    ("st", "st"),
    ("terrace", "ter"),
    ("terr", "ter"),
    ("ter", "ter"),
    ("trail", "trl"),
    ("trl", "trl"),
    ("turnpike", "tpke"),
    ("tpke", "tpke"),
    ("view", "vw"),
    ("vw", "vw"),
    ("walk", "walk"),
    ("way", "way"),
    ("wy", "way"),
];

const STATES: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("district of columbia", "DC"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
    ("american samoa", "AS"),
    ("guam", "GU"),
    ("northern mariana islands", "MP"),
    ("puerto rico", "PR"),
    ("virgin islands", "VI"),
];

/// Read-only normalization tables, built once per engine.
///
/// Lookups are case-insensitive and ignore punctuation around the token, so
/// `"Highway,"` and `"N."` resolve the same way as `"highway"` and `"n"`.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    directionals: HashMap<&'static str, &'static str>,
    street_types: HashMap<&'static str, &'static str>,
    states: HashMap<String, &'static str>,
}

impl AddressNormalizer {
    /// Build the lookup tables.
    pub fn new() -> Self {
        let mut states: HashMap<String, &'static str> = STATES
            .iter()
            .map(|&(name, code)| (name.to_string(), code))
            .collect();
        for &(_, code) in STATES {
            states.insert(code.to_ascii_lowercase(), code);
        }

        Self {
            directionals: DIRECTIONALS.iter().copied().collect(),
            street_types: STREET_TYPES.iter().copied().collect(),
            states,
        }
    }

    /// Canonical directional abbreviation (`"northeast"` -> `"NE"`).
    pub fn directional(&self, token: &str) -> Option<&'static str> {
        self.directionals.get(lookup_key(token).as_str()).copied()
    }

    /// Canonical street type abbreviation (`"Avenue"` -> `"ave"`).
    pub fn street_type(&self, token: &str) -> Option<&'static str> {
        self.street_types.get(lookup_key(token).as_str()).copied()
    }

    /// Whether the token names a street type.
    pub fn is_street_type(&self, token: &str) -> bool {
        self.street_type(token).is_some()
    }

    /// Two-letter code for a state name or abbreviation.
    ///
    /// Multi-word names are matched with their words separated by single
    /// spaces: `"new  YORK"` resolves to `"NY"`.
    pub fn state(&self, name: &str) -> Option<&'static str> {
        let key = name
            .split_whitespace()
            .map(lookup_key)
            .collect::<Vec<_>>()
            .join(" ");
        self.states.get(&key).copied()
    }

    /// Whether the token is a bare two-letter state code.
    pub fn is_state_code(&self, token: &str) -> bool {
        let key = lookup_key(token);
        key.len() == 2 && key.bytes().all(|b| b.is_ascii_alphabetic()) && self.states.contains_key(&key)
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup_key(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_ascii_lowercase()
}
