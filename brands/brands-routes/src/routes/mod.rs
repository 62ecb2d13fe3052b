use crate::cache::CacheControl;
use crate::error::BrandServiceError;
use crate::health;
use crate::routes::responses::{BrandError, BrandRedirect, BrandResponse};
use crate::service::BrandService;
use crate::state::BrandAppState;
use axum::Router;
use axum::extract::{OriginalUri, Path, State};
use axum::response::{IntoResponse, Response};
use brands_core::{Brand, BrandEngine, BrandLookup, Thing};
use error_stack::{Report, ResultExt};
use ids::ConceptUuid;
use routing::router::RouterBuilder;
use routing::{EndpointError, ErrorBody};
use tracing::{debug, info, instrument};
use utoipa::OpenApi;

mod responses;

const BRANDS_ROOT_PATH: &str = "/brands";
const BRAND_GET_PATH: &str = "/{uuid}";

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = BRANDS_ROOT_PATH, api = BrandDocs),
    )
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_brand), components(schemas(Brand, Thing, ErrorBody)))]
struct BrandDocs;

#[derive(Debug, thiserror::Error)]
#[error("failed to build the brand routes")]
pub struct RouteBuildError;

/// Builds the brand routes along with the health, metrics and swagger endpoints.
///
/// Installs the process wide prometheus recorder when metrics are enabled, so this
/// is expected to be called once.
pub fn build<T: BrandEngine>(app_state: BrandAppState<T>) -> Result<Router, Report<RouteBuildError>> {
    let builder = RouterBuilder::new(BRANDS_ROOT_PATH)
        .get(BRAND_GET_PATH, get_brand::<T>)
        .unnested_get(health::HEALTH_PATH, health::health::<T>)
        .unnested_get(health::GTG_PATH, health::good_to_go::<T>)
        .unnested_get(health::PING_PATH, health::ping)
        .unnested_get(health::BUILD_INFO_PATH, health::build_info);

    let router = if app_state.metrics_enabled {
        info!("metrics enabled, setting up metrics handler");
        let handle = routing::metrics::setup_recorder()
            .change_context(RouteBuildError)
            .attach("metrics can be disabled with BRANDS_METRICS=false")?;
        builder.build_with_metrics(app_state, ApiDoc::openapi(), handle)
    } else {
        info!("metrics not enabled, setting up service unavailable metrics handler");
        builder.build_no_metrics(app_state, ApiDoc::openapi())
    };
    Ok(router)
}

/// Get the brand identified by the given uuid.
///
/// A uuid that identifies a source representation of a brand rather than the brand
/// itself is answered with a redirect to the canonical brand.
#[utoipa::path(
    get,
    path = BRAND_GET_PATH,
    responses(
        (status = OK, description = "The brand with its parent and child brands", body = Brand),
        (status = MOVED_PERMANENTLY, description = "The uuid is an alias, `Location` holds the canonical brand"),
        (status = BAD_REQUEST, description = "The uuid is not a valid UUID", body = ErrorBody),
        (status = NOT_FOUND, description = "No brand is known by the uuid, or it is not a brand", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "The concept store could not be read", body = ErrorBody),
    ),
    params(
        ("uuid" = String, Path, description = "The uuid of the brand, canonical or alias"),
    )
)]
#[instrument(skip(service, cache_control, uri), err(Debug))]
pub async fn get_brand<T>(
    State(service): State<BrandService<T>>,
    State(cache_control): State<CacheControl>,
    OriginalUri(uri): OriginalUri,
    Path(uuid): Path<String>,
) -> Result<Response, EndpointError<BrandServiceError>>
where
    T: BrandEngine,
{
    let id = match uuid.parse::<ConceptUuid>() {
        Ok(id) => id,
        Err(e) => {
            debug!("rejecting request: {e:?}");
            return Ok(BrandError::invalid_uuid(&uuid).into_response());
        }
    };

    let res = match service.get(id).await? {
        BrandLookup::Found(brand) => BrandResponse::ok(*brand, cache_control).into_response(),
        BrandLookup::Redirect(canonical_id) => {
            BrandRedirect::to_canonical(uri.path(), uri.query(), canonical_id)
                .into_response()
        }
        BrandLookup::NotFound => BrandError::not_found().into_response(),
    };
    Ok(res)
}
