//! HTTP surface for the site registry.
//!
//! Exposes health, list/get/create, and the check-now trigger as an `axum`
//! router over the catalog and check services.

mod error;
mod extract;
mod models;

pub use error::ApiError;
pub use models::{
    CreateSiteBody, DEFAULT_LIST_LIMIT, HealthResponse, ListQuery, MAX_LIST_LIMIT, SiteResponse,
};

use crate::site::{
    domain::SiteId,
    ports::{SiteProber, SiteRepository},
    services::{SiteCatalogService, SiteCheckService},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use extract::{ApiJson, ApiPath, ApiQuery};
use mockable::Clock;
use tower_http::trace::TraceLayer;

/// Shared handler state.
pub struct AppState<R, P, C>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    catalog: SiteCatalogService<R, C>,
    checks: SiteCheckService<R, P, C>,
}

impl<R, P, C> Clone for AppState<R, P, C>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            checks: self.checks.clone(),
        }
    }
}

impl<R, P, C> AppState<R, P, C>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    /// Bundles the services used by the handlers.
    #[must_use]
    pub const fn new(catalog: SiteCatalogService<R, C>, checks: SiteCheckService<R, P, C>) -> Self {
        Self { catalog, checks }
    }
}

/// Builds the application router.
pub fn router<R, P, C>(state: AppState<R, P, C>) -> Router
where
    R: SiteRepository + 'static,
    P: SiteProber + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route(
            "/sites",
            get(list_sites::<R, P, C>).post(create_site::<R, P, C>),
        )
        .route(
            "/sites/",
            get(list_sites::<R, P, C>).post(create_site::<R, P, C>),
        )
        .route("/sites/{id}", get(get_site::<R, P, C>))
        .route("/sites-check", get(check_sites::<R, P, C>))
        .route("/sites-check/", get(check_sites::<R, P, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".to_owned(),
    })
}

async fn list_sites<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<SiteResponse>>, ApiError>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    let sites = state.catalog.list(query.page()).await?;
    Ok(Json(sites.iter().map(SiteResponse::from).collect()))
}

async fn get_site<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<SiteResponse>, ApiError>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    let site = state.catalog.get(SiteId::new(id)).await?;
    Ok(Json(SiteResponse::from(&site)))
}

async fn create_site<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    ApiJson(body): ApiJson<CreateSiteBody>,
) -> Result<(StatusCode, Json<SiteResponse>), ApiError>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    let site = state.catalog.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(SiteResponse::from(&site))))
}

async fn check_sites<R, P, C>(
    State(state): State<AppState<R, P, C>>,
) -> Result<Json<Vec<SiteResponse>>, ApiError>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    let pass = state.checks.run_pass().await?;
    Ok(Json(pass.sites.iter().map(SiteResponse::from).collect()))
}
