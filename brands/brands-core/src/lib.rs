use error_stack::Report;
use std::fmt::Debug;

pub mod model;
pub mod ontology;
pub mod raw;
pub mod reader;
pub mod resolver;
pub mod store;
pub mod transform;
pub mod traversal;

pub use model::{Brand, Thing};
pub use reader::{BrandLookup, BrandReader};
pub use resolver::Resolution;
pub use store::{ConceptStore, Equivalence, Lookup, StoreError, StoreResult};
pub use transform::{ApiUrls, Transformer};
pub use traversal::AuthorityPrecedence;

pub type BrandResult<T> = Result<T, Report<BrandError>>;

#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("failed to access the concept store")]
    Store,
    #[error("the concept store holds inconsistent concordance data")]
    DataIntegrity,
}

pub trait BrandEngine: Clone + Send + Sync + 'static {
    type Store: ConceptStore + Clone + Debug + Send + Sync + 'static;

    fn reader(&self) -> &BrandReader<Self::Store>;
}
