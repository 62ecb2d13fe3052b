pub mod error;
pub mod metrics;
pub mod router;

pub use error::{EndpointError, ErrorBody};
