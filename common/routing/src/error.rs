use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_stack::Report;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;
use tracing::error;
use utoipa::ToSchema;

/// The body of every non-2xx response that carries a message.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl ErrorBody {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn into_response_with(self, status_code: StatusCode) -> Response {
        (status_code, Json(self)).into_response()
    }
}

/// Turns a failed endpoint into a `500`.
///
/// Only the display message of the report's current context reaches the caller.
/// The full report, attachments included, goes to the error log.
#[derive(thiserror::Error)]
#[error("there was an error running the endpoint")]
pub struct EndpointError<T: Error + Send + Sync + 'static>(Report<T>);

impl<T: Error + Send + Sync + 'static> EndpointError<T> {
    pub fn report(&self) -> &Report<T> {
        &self.0
    }
}

impl<T: Error + Send + Sync + 'static> std::fmt::Debug for EndpointError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> From<Report<T>> for EndpointError<T>
where
    T: Error + Send + Sync + 'static,
{
    fn from(value: Report<T>) -> Self {
        Self(value)
    }
}

impl<T: Error + Send + Sync + 'static> IntoResponse for EndpointError<T> {
    fn into_response(self) -> Response {
        error!("endpoint failed: {:?}", self.0);
        ErrorBody::new(self.0.current_context().to_string())
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;
    use error_stack::{IntoReport, ResultExt};

    #[derive(Debug, thiserror::Error)]
    #[error("failed to return widget")]
    struct WidgetError;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused by db-host-1:7474")]
    struct ConnectionError;

    async fn failing() -> Result<Response, EndpointError<WidgetError>> {
        let response: Response =
            Err(ConnectionError.into_report()).change_context(WidgetError)?;
        Ok(response)
    }

    #[tokio::test]
    async fn only_the_current_context_reaches_the_body() {
        let server = TestServer::new(Router::new().route("/", get(failing))).unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&ErrorBody::new("failed to return widget"));
        assert!(!response.text().contains("db-host-1"));
    }
}
