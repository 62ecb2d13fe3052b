use std::fmt::Display;

use axum::{Router, handler::Handler, http::StatusCode, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;
use utoipa::openapi::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::metrics;

struct Route {
    method: &'static str,
    root_path: &'static str,
    relative_path: &'static str,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}{}",
            self.method, self.root_path, self.relative_path
        )
    }
}

/// Collects the read-only routes of a resource, nested under `root_path`, and
/// builds them alongside the swagger ui and the metrics endpoint.
///
/// Routes registered with [`RouterBuilder::unnested_get`] live outside of `root_path`;
/// they are for operational endpoints such as health checks.
pub struct RouterBuilder<S> {
    inner: OpenApiRouter<S>,
    unnested: Router<S>,
    root_path: &'static str,
    routes: Vec<Route>,
}

impl<S> RouterBuilder<S>
where
    S: Send + Sync + Clone + 'static,
{
    pub fn new(root_path: &'static str) -> Self {
        Self {
            inner: OpenApiRouter::new(),
            unnested: Router::new(),
            root_path,
            routes: Vec::new(),
        }
    }

    pub fn get<T, F>(mut self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.inner = self.inner.route(path, get(handler));
        self.routes.push(Route {
            method: "GET",
            root_path: self.root_path,
            relative_path: path,
        });
        self
    }

    pub fn unnested_get<T, F>(mut self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.unnested = self.unnested.route(path, get(handler));
        self.routes.push(Route {
            method: "GET",
            root_path: "",
            relative_path: path,
        });
        self
    }

    pub fn build_no_metrics(self, app_state: S, api_doc: OpenApi) -> Router {
        self.log_routes();
        let main_router = self.inner;
        let unnested = self.unnested.route(
            "/metrics",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Metrics endpoint is disabled. Metrics must be enabled and the service restarted",
                )
            }),
        );
        build(self.root_path, main_router, unnested, app_state, api_doc)
    }

    pub fn build_with_metrics(
        self,
        app_state: S,
        api_doc: OpenApi,
        metrics_handle: PrometheusHandle,
    ) -> Router {
        self.log_routes();

        let main_router = self
            .inner
            .route_layer(middleware::from_fn(metrics::track_http));
        let unnested = self
            .unnested
            .route("/metrics", get(|| async move { metrics_handle.render() }));

        build(self.root_path, main_router, unnested, app_state, api_doc)
    }

    fn log_routes(&self) {
        for route in &self.routes {
            debug!("Building route - {route}")
        }
    }
}

fn build<S>(
    root_path: &'static str,
    main_router: OpenApiRouter<S>,
    unnested: Router<S>,
    app_state: S,
    api_doc: OpenApi,
) -> Router
where
    S: Send + Sync + Clone + 'static,
{
    let main_routes = OpenApiRouter::new()
        .nest(root_path, main_router)
        .with_state(app_state.clone());
    let (router, api) = OpenApiRouter::with_openapi(api_doc)
        .merge(main_routes)
        .split_for_parts();

    router
        .merge(unnested.with_state(app_state))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(format!("{}/api-docs/openapi.json", root_path), api),
        )
}
