use crate::error::BrandServiceError;
use error_stack::Report;

pub type ServiceResult<T> = Result<T, Report<BrandServiceError>>;

pub mod cache;
pub mod error;
mod health;
mod metrics;
pub mod routes;
pub mod service;
pub mod state;
