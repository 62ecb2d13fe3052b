//! The slice of the FT ontology the public brands api needs to know about:
//! which types exist, how they nest, and which api collection serves each.

use const_format::concatcp;
use error_stack::{IntoReport, Report};
use std::fmt::{Display, Formatter};

const ONTOLOGY: &str = "http://www.ft.com/ontology/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConceptType {
    Thing,
    Concept,
    Classification,
    Brand,
    Genre,
    Subject,
    Section,
    SpecialReport,
    AlphavilleSeries,
    Topic,
    Location,
    Person,
    Organisation,
    Company,
    PublicCompany,
    PrivateCompany,
    Membership,
    FinancialInstrument,
}

impl ConceptType {
    pub const ALL: [ConceptType; 18] = [
        ConceptType::Thing,
        ConceptType::Concept,
        ConceptType::Classification,
        ConceptType::Brand,
        ConceptType::Genre,
        ConceptType::Subject,
        ConceptType::Section,
        ConceptType::SpecialReport,
        ConceptType::AlphavilleSeries,
        ConceptType::Topic,
        ConceptType::Location,
        ConceptType::Person,
        ConceptType::Organisation,
        ConceptType::Company,
        ConceptType::PublicCompany,
        ConceptType::PrivateCompany,
        ConceptType::Membership,
        ConceptType::FinancialInstrument,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ConceptType::Thing => "Thing",
            ConceptType::Concept => "Concept",
            ConceptType::Classification => "Classification",
            ConceptType::Brand => "Brand",
            ConceptType::Genre => "Genre",
            ConceptType::Subject => "Subject",
            ConceptType::Section => "Section",
            ConceptType::SpecialReport => "SpecialReport",
            ConceptType::AlphavilleSeries => "AlphavilleSeries",
            ConceptType::Topic => "Topic",
            ConceptType::Location => "Location",
            ConceptType::Person => "Person",
            ConceptType::Organisation => "Organisation",
            ConceptType::Company => "Company",
            ConceptType::PublicCompany => "PublicCompany",
            ConceptType::PrivateCompany => "PrivateCompany",
            ConceptType::Membership => "Membership",
            ConceptType::FinancialInstrument => "FinancialInstrument",
        }
    }

    pub const fn uri(self) -> &'static str {
        match self {
            ConceptType::Thing => concatcp!(ONTOLOGY, "core/Thing"),
            ConceptType::Concept => concatcp!(ONTOLOGY, "concept/Concept"),
            ConceptType::Classification => concatcp!(ONTOLOGY, "classification/Classification"),
            ConceptType::Brand => concatcp!(ONTOLOGY, "product/Brand"),
            ConceptType::Genre => concatcp!(ONTOLOGY, "Genre"),
            ConceptType::Subject => concatcp!(ONTOLOGY, "Subject"),
            ConceptType::Section => concatcp!(ONTOLOGY, "Section"),
            ConceptType::SpecialReport => concatcp!(ONTOLOGY, "SpecialReport"),
            ConceptType::AlphavilleSeries => concatcp!(ONTOLOGY, "AlphavilleSeries"),
            ConceptType::Topic => concatcp!(ONTOLOGY, "Topic"),
            ConceptType::Location => concatcp!(ONTOLOGY, "Location"),
            ConceptType::Person => concatcp!(ONTOLOGY, "person/Person"),
            ConceptType::Organisation => concatcp!(ONTOLOGY, "organisation/Organisation"),
            ConceptType::Company => concatcp!(ONTOLOGY, "company/Company"),
            ConceptType::PublicCompany => concatcp!(ONTOLOGY, "company/PublicCompany"),
            ConceptType::PrivateCompany => concatcp!(ONTOLOGY, "company/PrivateCompany"),
            ConceptType::Membership => concatcp!(ONTOLOGY, "organisation/Membership"),
            ConceptType::FinancialInstrument => concatcp!(ONTOLOGY, "FinancialInstrument"),
        }
    }

    pub const fn parent(self) -> Option<ConceptType> {
        match self {
            ConceptType::Thing => None,
            ConceptType::Concept => Some(ConceptType::Thing),
            ConceptType::Classification
            | ConceptType::Topic
            | ConceptType::Location
            | ConceptType::Person
            | ConceptType::Organisation
            | ConceptType::Membership
            | ConceptType::FinancialInstrument => Some(ConceptType::Concept),
            ConceptType::Brand
            | ConceptType::Genre
            | ConceptType::Subject
            | ConceptType::Section
            | ConceptType::SpecialReport
            | ConceptType::AlphavilleSeries => Some(ConceptType::Classification),
            ConceptType::Company => Some(ConceptType::Organisation),
            ConceptType::PublicCompany | ConceptType::PrivateCompany => Some(ConceptType::Company),
        }
    }

    /// The public api collection that serves this type, if it has a dedicated one.
    const fn own_collection(self) -> Option<&'static str> {
        match self {
            ConceptType::Brand => Some("brands"),
            ConceptType::Person => Some("people"),
            ConceptType::Organisation => Some("organisations"),
            ConceptType::Membership => Some("memberships"),
            _ => None,
        }
    }

    /// The collection used to build api urls: the nearest dedicated collection up
    /// the hierarchy, falling back to `things`.
    pub fn api_collection(self) -> &'static str {
        self.ancestors()
            .find_map(ConceptType::own_collection)
            .unwrap_or("things")
    }

    /// This type followed by each of its ancestors, narrow to broad.
    fn ancestors(self) -> impl Iterator<Item = ConceptType> {
        std::iter::successors(Some(self), |t| t.parent())
    }

    pub fn depth(self) -> usize {
        self.ancestors().count() - 1
    }

    /// `true` when `self` is `other` or one of its descendants.
    pub fn is_a(self, other: ConceptType) -> bool {
        self.ancestors().any(|t| t == other)
    }

    /// The full hierarchy of this type, broad to narrow, ending with `self`.
    pub fn hierarchy(self) -> Vec<ConceptType> {
        let mut hierarchy = self.ancestors().collect::<Vec<_>>();
        hierarchy.reverse();
        hierarchy
    }

    /// Accepts either a bare type name (`Brand`, as graph labels are) or a full type uri.
    pub fn from_label(label: &str) -> Option<ConceptType> {
        ConceptType::ALL
            .into_iter()
            .find(|t| t.name() == label || t.uri() == label)
    }
}

impl Display for ConceptType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OntologyError {
    #[error("none of the labels are known ontology types")]
    NoKnownType,
    #[error("labels describe more than one type hierarchy ({0} and {1})")]
    DivergentHierarchy(ConceptType, ConceptType),
}

/// Finds the single narrowest type among `labels`.
///
/// Unknown labels are ignored. Every known label must lie on the hierarchy of the
/// narrowest one, otherwise the labels do not describe a single type.
pub fn most_specific_type<I, S>(labels: I) -> Result<ConceptType, Report<OntologyError>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut known = labels
        .into_iter()
        .filter_map(|l| ConceptType::from_label(l.as_ref()))
        .collect::<Vec<_>>();
    known.sort_by_key(|t| (t.depth(), *t));
    known.dedup();

    let Some(&narrowest) = known.last() else {
        return Err(OntologyError::NoKnownType.into_report());
    };

    match known.iter().find(|t| !narrowest.is_a(**t)) {
        Some(&divergent) => {
            Err(OntologyError::DivergentHierarchy(divergent, narrowest).into_report())
        }
        None => Ok(narrowest),
    }
}
