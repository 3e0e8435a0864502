//! Upstream SPARQL endpoint selection

use std::fmt;

use serde::Serialize;

/// Predicate for geographic coordinates (Wikidata P625)
const COORDINATE_PREDICATE: &str = "wdt:P625";

/// Markers showing that a query binds Wikidata entities directly
const WIKIDATA_ENTITY_MARKERS: [&str; 3] = [
    "<http://www.wikidata.org/entity/",
    "VALUES ?wdItem",
    "VALUES ?residenceWdItem",
];

/// Upstream SPARQL service a query is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointId {
    /// The charters Wikibase's own query service
    Wikibase,
    /// The public Wikidata query service
    Wikidata,
}

impl EndpointId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wikibase => "wikibase",
            Self::Wikidata => "wikidata",
        }
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the endpoint for a raw query text.
///
/// Coordinate lookups against explicitly bound Wikidata entities go to
/// Wikidata; everything else goes to the Wikibase. This is a substring
/// heuristic: case-sensitive, order-insensitive, and blind to SPARQL syntax
/// (a marker inside a comment or string literal still counts).
pub fn select_endpoint(query: &str) -> EndpointId {
    let wants_coordinates = query.contains(COORDINATE_PREDICATE);
    let binds_wikidata_entities = WIKIDATA_ENTITY_MARKERS
        .iter()
        .any(|marker| query.contains(marker));

    if wants_coordinates && binds_wikidata_entities {
        EndpointId::Wikidata
    } else {
        EndpointId::Wikibase
    }
}

/// URLs of the two upstream SPARQL services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlEndpoints {
    pub wikibase: String,
    pub wikidata: String,
}

impl SparqlEndpoints {
    pub fn new(wikibase: impl Into<String>, wikidata: impl Into<String>) -> Self {
        Self {
            wikibase: wikibase.into(),
            wikidata: wikidata.into(),
        }
    }

    pub fn url_for(&self, endpoint: EndpointId) -> &str {
        match endpoint {
            EndpointId::Wikibase => &self.wikibase,
            EndpointId::Wikidata => &self.wikidata,
        }
    }
}
