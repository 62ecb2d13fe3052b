//! The shape every concept store translates its own records into before the
//! resolver, traversal and transformer get to see them.

use ids::ConceptUuid;
use std::fmt::{Display, Formatter};

/// The system a source representation originated from, e.g. `Smartlogic` or `TME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority(String);

impl Authority {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Authority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The attributes of the canonical (concorded) concept itself.
///
/// `types` holds whatever the store labels the node with: bare ontology names
/// (`Brand`), type URIs, or unrelated labels, in no particular order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConcept {
    pub id: ConceptUuid,
    pub pref_label: String,
    pub types: Vec<String>,
    pub description_xml: Option<String>,
    pub strapline: Option<String>,
    pub image_url: Option<String>,
}

impl RawConcept {
    pub fn new<L, T>(id: ConceptUuid, pref_label: L, types: T) -> Self
    where
        L: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            id,
            pref_label: pref_label.into(),
            types: types.into_iter().map(Into::into).collect(),
            description_xml: None,
            strapline: None,
            image_url: None,
        }
    }
}

/// A concept one hop away from the canonical concept, already mapped to its own
/// canonical id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelated {
    pub id: ConceptUuid,
    pub pref_label: String,
    pub types: Vec<String>,
}

impl RawRelated {
    pub fn new<L, T>(id: ConceptUuid, pref_label: L, types: T) -> Self
    where
        L: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            id,
            pref_label: pref_label.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// The relations a single source representation contributes.
///
/// `authority` is `None` when the store does not expose where the data came from,
/// e.g. an upstream API that has already merged its sources.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRelations {
    pub authority: Option<Authority>,
    pub parents: Vec<RawRelated>,
    pub children: Vec<RawRelated>,
}

impl SourceRelations {
    pub fn from_authority(authority: impl Into<String>) -> Self {
        Self {
            authority: Some(Authority::new(authority)),
            ..Default::default()
        }
    }

    pub fn unattributed() -> Self {
        Self::default()
    }

    pub fn with_parents(mut self, parents: Vec<RawRelated>) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_children(mut self, children: Vec<RawRelated>) -> Self {
        self.children = children;
        self
    }
}

/// A canonical concept together with every source representation concorded to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcordedRecord {
    pub concept: RawConcept,
    pub sources: Vec<SourceRelations>,
}

/// A canonical concept with the relations that survived authority selection and
/// deduplication. Type labels are still unfiltered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBrandBundle {
    pub concept: RawConcept,
    pub parents: Vec<RawRelated>,
    pub children: Vec<RawRelated>,
}
