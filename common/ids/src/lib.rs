use error_stack::{IntoReport, Report};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Lengths of the hyphen separated hex groups, e.g. `9636919c-838d-11e8-8f42-da24cd01f044`.
const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

#[derive(Debug, thiserror::Error)]
#[error("'{0}' is not a valid concept uuid")]
pub struct InvalidConceptUuid(String);

impl InvalidConceptUuid {
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// The bare identifier of a concept, as stored by the concordance graph.
///
/// Only the hyphenated `8-4-4-4-12` form is accepted. Upper and lower case hex
/// digits are both fine, and the identifier is always rendered lowercase.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct ConceptUuid(Uuid);

impl ConceptUuid {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Pulls the identifier out of the last path segment of a URI such as
    /// `http://api.ft.com/things/{uuid}`. A bare identifier is accepted as well.
    pub fn from_uri(uri: &str) -> Result<Self, Report<InvalidConceptUuid>> {
        let segment = uri
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        segment.parse()
    }
}

fn is_hyphenated_uuid(s: &str) -> bool {
    let groups = s.split('-').collect::<Vec<_>>();
    groups.len() == GROUP_LENGTHS.len()
        && groups
            .iter()
            .zip(GROUP_LENGTHS)
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()))
}

impl FromStr for ConceptUuid {
    type Err = Report<InvalidConceptUuid>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_hyphenated_uuid(s) {
            return Err(InvalidConceptUuid(s.to_owned()).into_report());
        }

        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidConceptUuid(s.to_owned()).into_report())
    }
}

impl Display for ConceptUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for ConceptUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Serialize for ConceptUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConceptUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e: Report<InvalidConceptUuid>| serde::de::Error::custom(e.current_context()))
    }
}
