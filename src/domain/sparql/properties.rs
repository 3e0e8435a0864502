//! Entity properties query, with coordinates resolved through Wikidata

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Wikidata's public query service, used for the federated coordinate lookup
pub const WIKIDATA_SERVICE: &str = "https://query.wikidata.org/sparql";

/// Item (Q) or property (P) IDs with no leading zero
static ENTITY_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[QP][1-9][0-9]*$").unwrap());

/// Validated Wikibase entity ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityId(String);

impl EntityId {
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        if ENTITY_ID_PATTERN.is_match(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(DomainError::invalid_id(format!(
                "'{}' is not a Wikibase entity ID (expected e.g. Q42 or P31)",
                id
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wikibase property IDs the properties query depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyIds {
    /// Person -> place of residence
    pub residence: String,
    /// Activity -> place where it happened
    pub place: String,
    /// Local item -> matching Wikidata QID
    pub wikidata_item: String,
}

/// Builds the query listing every statement of `entity` with labels, plus
/// the Wikidata coordinates of its residence and place, when known.
///
/// The coordinate lookups run as `SERVICE` sub-queries on Wikidata from the
/// Wikibase endpoint. The text must not select the Wikidata endpoint, so it
/// binds `?residenceWdItem` and `?placeWdItem` with `BIND` rather than a
/// `VALUES` block and never writes a Wikidata entity IRI in angle brackets.
pub fn build_properties_query(entity: &EntityId, properties: &PropertyIds) -> String {
    format!(
        r#"SELECT ?property ?propertyLabel ?value ?valueLabel ?residenceCoordinates ?placeCoordinates WHERE {{
  wd:{entity} ?claim ?value .
  ?property wikibase:directClaim ?claim .
  OPTIONAL {{
    wd:{entity} wdt:{residence} ?residence .
    ?residence wdt:{wikidata_item} ?residenceWdId .
    BIND(IRI(CONCAT("http://www.wikidata.org/entity/", ?residenceWdId)) AS ?residenceWdItem)
    SERVICE <{service}> {{
      ?residenceWdItem wdt:P625 ?residenceCoordinates .
    }}
  }}
  OPTIONAL {{
    wd:{entity} wdt:{place} ?place .
    ?place wdt:{wikidata_item} ?placeWdId .
    BIND(IRI(CONCAT("http://www.wikidata.org/entity/", ?placeWdId)) AS ?placeWdItem)
    SERVICE <{service}> {{
      ?placeWdItem wdt:P625 ?placeCoordinates .
    }}
  }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}
ORDER BY ?propertyLabel"#,
        entity = entity,
        residence = properties.residence,
        place = properties.place,
        wikidata_item = properties.wikidata_item,
        service = WIKIDATA_SERVICE,
    )
}
