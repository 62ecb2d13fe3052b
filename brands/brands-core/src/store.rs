use crate::raw::ConcordedRecord;
use error_stack::Report;
use ids::ConceptUuid;
use std::sync::Arc;

pub type StoreResult<T> = Result<T, Report<StoreError>>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read from the concept store")]
    Read,
    #[error("the concept store returned data that could not be understood")]
    Decode,
    #[error("the concept store is not reachable")]
    Connectivity,
}

/// The canonical concept an id was found to be equivalent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equivalence {
    pub canonical_id: ConceptUuid,
    /// Whether the target is a canonical concept in its own right, rather than
    /// another source representation.
    pub target_is_canonical: bool,
}

impl Equivalence {
    pub fn canonical(canonical_id: ConceptUuid) -> Self {
        Self {
            canonical_id,
            target_is_canonical: true,
        }
    }
}

/// What a store knows about a requested id. Nothing here is interpreted yet;
/// duplicate and malformed data is left for the resolver to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Every concorded record stored under the id as its canonical id.
    Canonical(Vec<ConcordedRecord>),
    /// The id is not canonical, but identifies source representations equivalent to these.
    Equivalent(Vec<Equivalence>),
    Missing,
}

/// Read access to wherever concorded concepts live.
///
/// Implementations translate their own record shapes into [`ConcordedRecord`] and
/// report access failures as errors, never as [`Lookup::Missing`].
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ConceptStore {
    fn lookup(&self, id: ConceptUuid) -> impl Future<Output = StoreResult<Lookup>> + Send;

    fn check_connectivity(&self) -> impl Future<Output = StoreResult<()>> + Send;
}

impl<T> ConceptStore for Arc<T>
where
    T: ConceptStore + Send + Sync,
{
    async fn lookup(&self, id: ConceptUuid) -> StoreResult<Lookup> {
        (**self).lookup(id).await
    }

    async fn check_connectivity(&self) -> StoreResult<()> {
        (**self).check_connectivity().await
    }
}
