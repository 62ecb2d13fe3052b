use crate::ServiceResult;
use crate::error::BrandServiceError;
use brands_core::{BrandEngine, BrandLookup, ConceptStore};
use error_stack::ResultExt;
use ids::ConceptUuid;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct BrandService<T> {
    engine: T,
}

impl<T> BrandService<T>
where
    T: BrandEngine,
{
    pub fn new(engine: T) -> Self {
        BrandService { engine }
    }

    #[instrument(skip_all, name = "service#get", fields(brand.id = %id))]
    pub async fn get(&self, id: ConceptUuid) -> ServiceResult<BrandLookup> {
        self.engine
            .reader()
            .get_brand(id)
            .await
            .change_context(BrandServiceError)
    }

    #[instrument(skip_all, name = "service#check_connectivity")]
    pub async fn check_connectivity(&self) -> ServiceResult<()> {
        self.engine
            .reader()
            .store()
            .check_connectivity()
            .await
            .change_context(BrandServiceError)
    }
}
