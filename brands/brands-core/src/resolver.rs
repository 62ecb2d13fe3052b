use crate::raw::ConcordedRecord;
use crate::store::{Equivalence, Lookup};
use error_stack::{IntoReport, Report};
use ids::ConceptUuid;
use itertools::Itertools;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("multiple concorded records share the canonical id {0}")]
    DuplicateCanonical(ConceptUuid),
    #[error("{0} is equivalent to more than one canonical concept")]
    AmbiguousEquivalence(ConceptUuid),
}

/// How a requested id relates to the canonical concepts in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The id is canonical; the full record came back with the answer.
    Canonical(Box<ConcordedRecord>),
    /// The id belongs to a source representation of another canonical concept.
    Alias(ConceptUuid),
    NotFound,
}

impl Resolution {
    pub fn canonical_id(&self) -> Option<ConceptUuid> {
        match self {
            Resolution::Canonical(record) => Some(record.concept.id),
            Resolution::Alias(id) => Some(*id),
            Resolution::NotFound => None,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Resolution::Alias(_))
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Canonical(_))
    }
}

/// Decides what `requested` resolves to, given what the store knows about it.
///
/// Duplicate canonical records and equivalences to several canonical concepts are
/// data integrity faults and are reported, never settled by picking one. Aliases are
/// followed exactly one hop: an equivalence that points back at `requested`, or at
/// something that is not canonical itself, resolves to [`Resolution::NotFound`].
pub fn resolve(
    requested: ConceptUuid,
    lookup: Lookup,
) -> Result<Resolution, Report<ResolveError>> {
    match lookup {
        Lookup::Canonical(mut records) => match records.len() {
            0 => Ok(Resolution::NotFound),
            1 => Ok(Resolution::Canonical(Box::new(records.remove(0)))),
            count => {
                error!("found {count} concorded records for canonical id {requested}");
                Err(ResolveError::DuplicateCanonical(requested).into_report())
            }
        },
        Lookup::Equivalent(equivalences) => resolve_alias(requested, equivalences),
        Lookup::Missing => Ok(Resolution::NotFound),
    }
}

fn resolve_alias(
    requested: ConceptUuid,
    equivalences: Vec<Equivalence>,
) -> Result<Resolution, Report<ResolveError>> {
    let mut targets = equivalences
        .into_iter()
        .unique_by(|e| e.canonical_id)
        .collect::<Vec<_>>();

    let target = match targets.len() {
        0 => return Ok(Resolution::NotFound),
        1 => targets.remove(0),
        count => {
            error!("{requested} is equivalent to {count} different canonical concepts");
            return Err(ResolveError::AmbiguousEquivalence(requested).into_report());
        }
    };

    if target.canonical_id == requested {
        warn!("{requested} is recorded as an alias of itself, treating it as not found");
        return Ok(Resolution::NotFound);
    }

    if !target.target_is_canonical {
        warn!(
            "{requested} is an alias of {}, which is not canonical, treating it as not found",
            target.canonical_id
        );
        return Ok(Resolution::NotFound);
    }

    Ok(Resolution::Alias(target.canonical_id))
}
