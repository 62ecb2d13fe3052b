use crate::model::Brand;
use crate::resolver::{self, Resolution};
use crate::store::ConceptStore;
use crate::transform::Transformer;
use crate::traversal::{self, AuthorityPrecedence};
use crate::{BrandError, BrandResult};
use error_stack::ResultExt;
use ids::ConceptUuid;
use tracing::{debug, instrument};

/// The outcome of asking for a brand by any of its ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandLookup {
    Found(Box<Brand>),
    /// The requested id is an alias; the brand lives under this canonical id.
    Redirect(ConceptUuid),
    NotFound,
}

/// Resolves ids against a [`ConceptStore`] and assembles public brands from what it finds.
#[derive(Debug, Clone)]
pub struct BrandReader<S> {
    store: S,
    precedence: AuthorityPrecedence,
    transformer: Transformer,
}

impl<S> BrandReader<S>
where
    S: ConceptStore + Send + Sync,
{
    pub fn new(store: S, precedence: AuthorityPrecedence, transformer: Transformer) -> Self {
        Self {
            store,
            precedence,
            transformer,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self), name = "reader#resolve")]
    pub async fn resolve(&self, id: ConceptUuid) -> BrandResult<Resolution> {
        let lookup = self
            .store
            .lookup(id)
            .await
            .change_context(BrandError::Store)?;

        resolver::resolve(id, lookup).change_context(BrandError::DataIntegrity)
    }

    /// Reads the brand stored under `canonical_id`. An alias, an unknown id and a
    /// concept that is not a brand all come back as `None`.
    #[instrument(skip(self), name = "reader#fetch_and_transform")]
    pub async fn fetch_and_transform(&self, canonical_id: ConceptUuid) -> BrandResult<Option<Brand>> {
        match self.resolve(canonical_id).await? {
            Resolution::Canonical(record) => Ok(self.shape(*record)),
            Resolution::Alias(target) => {
                debug!("{canonical_id} is not canonical, it is an alias of {target}");
                Ok(None)
            }
            Resolution::NotFound => Ok(None),
        }
    }

    #[instrument(skip(self), name = "reader#get_brand")]
    pub async fn get_brand(&self, id: ConceptUuid) -> BrandResult<BrandLookup> {
        let lookup = match self.resolve(id).await? {
            Resolution::Canonical(record) => self
                .shape(*record)
                .map(|b| BrandLookup::Found(Box::new(b)))
                .unwrap_or(BrandLookup::NotFound),
            Resolution::Alias(canonical_id) => BrandLookup::Redirect(canonical_id),
            Resolution::NotFound => BrandLookup::NotFound,
        };
        Ok(lookup)
    }

    fn shape(&self, record: crate::raw::ConcordedRecord) -> Option<Brand> {
        self.transformer
            .transform(traversal::assemble(record, &self.precedence))
    }
}
