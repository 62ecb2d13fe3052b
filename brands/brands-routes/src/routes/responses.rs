use crate::cache::CacheControl;
use crate::metrics;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use brands_core::Brand;
use ids::ConceptUuid;
use routing::ErrorBody;
use tracing::error;

pub struct BrandResponse {
    brand: Brand,
    cache_control: CacheControl,
}

impl BrandResponse {
    pub fn ok(brand: Brand, cache_control: CacheControl) -> Self {
        Self {
            brand,
            cache_control,
        }
    }
}

impl IntoResponse for BrandResponse {
    fn into_response(self) -> Response {
        // encoded up front so a failure here is told apart from a failed read
        match serde_json::to_vec(&self.brand) {
            Ok(body) => {
                metrics::increment_brands_retrieved();
                (
                    StatusCode::OK,
                    [
                        (header::CONTENT_TYPE, "application/json"),
                        (header::CACHE_CONTROL, self.cache_control.header_value()),
                    ],
                    body,
                )
                    .into_response()
            }
            Err(e) => {
                error!(brand.id = %self.brand.thing.id, "failed to encode brand: {e}");
                BrandError::internal().into_response()
            }
        }
    }
}

pub struct BrandError {
    status_code: StatusCode,
    body: ErrorBody,
}

impl BrandError {
    pub fn invalid_uuid(raw: &str) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            body: ErrorBody::new(format!("uuid '{raw}' is either missing or invalid")),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            body: ErrorBody::new("brand not found"),
        }
    }

    pub fn internal() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::new("failed to return brand"),
        }
    }
}

impl IntoResponse for BrandError {
    fn into_response(self) -> Response {
        self.body.into_response_with(self.status_code)
    }
}

/// A `301` to the same request with the alias swapped for the canonical id.
pub struct BrandRedirect {
    location: String,
}

impl BrandRedirect {
    /// `path` is the full request path as sent, its last segment being the requested id.
    pub fn to_canonical(path: &str, query: Option<&str>, canonical_id: ConceptUuid) -> Self {
        let parent = path
            .trim_end_matches('/')
            .rsplit_once('/')
            .map_or("", |(parent, _)| parent);
        let mut location = format!("{parent}/{canonical_id}");
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            location.push('?');
            location.push_str(query);
        }
        Self { location }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for BrandRedirect {
    fn into_response(self) -> Response {
        (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, self.location)],
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CANONICAL: &str = "2d3e16e0-61cb-4322-8aff-3b01c59f4daa";

    #[rstest]
    #[case("/brands/FFC5E8E1-0F2D-4A3A-B1A4-5E5B30D8F9C2", None, "/brands/2d3e16e0-61cb-4322-8aff-3b01c59f4daa")]
    #[case(
        "/brands/ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c2",
        Some("apiKey=abc"),
        "/brands/2d3e16e0-61cb-4322-8aff-3b01c59f4daa?apiKey=abc"
    )]
    #[case("/brands/ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c2", Some(""), "/brands/2d3e16e0-61cb-4322-8aff-3b01c59f4daa")]
    #[case("/brands/ffc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c%32", None, "/brands/2d3e16e0-61cb-4322-8aff-3b01c59f4daa")]
    #[case("/brands/%66fc5e8e1-0f2d-4a3a-b1a4-5e5b30d8f9c2", None, "/brands/2d3e16e0-61cb-4322-8aff-3b01c59f4daa")]
    fn redirect_swaps_only_the_id_segment(
        #[case] path: &str,
        #[case] query: Option<&str>,
        #[case] expected: &str,
    ) {
        let redirect = BrandRedirect::to_canonical(path, query, CANONICAL.parse().unwrap());
        assert_eq!(expected, redirect.location());
    }
}
