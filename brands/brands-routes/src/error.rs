/// The display message is what callers see in the body of a `500`.
#[derive(Debug, thiserror::Error)]
#[error("failed to return brand")]
pub struct BrandServiceError;
