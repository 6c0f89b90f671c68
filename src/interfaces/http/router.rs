//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::{fuel_logs, health, metrics, request_id, vehicles};
use crate::application::FleetService;
use crate::config::PaginationSettings;
use crate::shared::pagination::{
    Normalizer, PageNumbers, Pagination, PaginationMeta, SortOrder,
};

/// Everything the HTTP layer needs from the running service.
pub struct ApiContext {
    pub fleet: Arc<FleetService>,
    pub pagination: PaginationSettings,
    /// `None` when serving from the in-memory store
    pub db: Option<DatabaseConnection>,
    /// Exposes `/metrics` when set
    pub prometheus: Option<PrometheusHandle>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        vehicles::list_vehicles,
        fuel_logs::list_fuel_logs,
    ),
    components(
        schemas(
            ApiResponse<String>,
            Pagination<vehicles::VehicleDto>,
            Pagination<fuel_logs::FuelLogDto>,
            PaginationMeta,
            PageNumbers,
            SortOrder,
            vehicles::VehicleDto,
            fuel_logs::FuelLogDto,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health"),
        (name = "Vehicles", description = "Tenant fleet listing with offset pagination"),
        (name = "Fuel Logs", description = "Per-vehicle refuelling history"),
    ),
    info(
        title = "Fleet Service API",
        version = "1.0.0",
        description = "Read API for tenant fleets. Every list endpoint accepts \
            `page`, `limit`, `q`, `sort` and `order`; malformed values fall back \
            to defaults instead of failing the request.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let vehicle_state = vehicles::VehicleHandlerState {
        fleet: ctx.fleet.clone(),
        normalizer: Normalizer::new(ctx.pagination.vehicles.clone()),
    };
    let fuel_log_state = fuel_logs::FuelLogHandlerState {
        fleet: ctx.fleet.clone(),
        normalizer: Normalizer::new(ctx.pagination.fuel_logs.clone()),
    };

    let tenant_routes = Router::new()
        .route("/vehicles", get(vehicles::list_vehicles))
        .with_state(vehicle_state)
        .merge(
            Router::new()
                .route(
                    "/vehicles/{vehicle_id}/fuel-logs",
                    get(fuel_logs::list_fuel_logs),
                )
                .with_state(fuel_log_state),
        );

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .nest("/api/v1/tenants/{tenant_id}", tenant_routes);

    if let Some(handle) = ctx.prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;

    use crate::infrastructure::InMemoryFleetStore;

    fn app_with(store: InMemoryFleetStore, pagination: PaginationSettings) -> Router {
        create_api_router(ApiContext {
            fleet: Arc::new(FleetService::new(Arc::new(store))),
            pagination,
            db: None,
            prometheus: None,
        })
    }

    fn fleet_app() -> (Router, String) {
        let store = InMemoryFleetStore::new();
        let vehicles = store.seed_vehicles("acme", 25);
        store.seed_fuel_logs(&vehicles[0], 4);
        store.seed_vehicles("globex", 3);
        (
            app_with(store, PaginationSettings::default()),
            vehicles[0].id.clone(),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
        use tower::Service;
        let mut svc = app.into_service();
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = svc.call(req).await.unwrap();

        let status = resp.status();
        let link = resp
            .headers()
            .get(header::LINK)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, link, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn list_body_is_data_and_meta() {
        let (app, _) = fleet_app();
        let (status, _, body) = get_json(app, "/api/v1/tenants/acme/vehicles?page=2&limit=10").await;

        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["data", "meta"]);
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
        assert_eq!(
            body["meta"],
            serde_json::json!({
                "limit": 10,
                "count": 25,
                "pages": {
                    "first": 1,
                    "previous": 1,
                    "hasPrevious": true,
                    "current": 2,
                    "next": 3,
                    "hasNext": true,
                    "last": 3,
                    "total": 3
                }
            })
        );
    }

    #[tokio::test]
    async fn malformed_params_fall_back_to_defaults() {
        let (app, _) = fleet_app();
        let (status, _, body) = get_json(
            app,
            "/api/v1/tenants/acme/vehicles?page=abc&limit=-5&order=sideways&sort=password",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["limit"], 10);
        assert_eq!(body["meta"]["pages"]["current"], 1);
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let (app, _) = fleet_app();
        let (_, _, body) = get_json(app, "/api/v1/tenants/acme/vehicles?limit=1000").await;

        assert_eq!(body["meta"]["limit"], 100);
        assert_eq!(body["data"].as_array().unwrap().len(), 25);
        assert_eq!(body["meta"]["pages"]["total"], 1);
    }

    #[tokio::test]
    async fn page_past_end_is_empty_200() {
        let (app, _) = fleet_app();
        let (status, _, body) = get_json(app, "/api/v1/tenants/acme/vehicles?page=99").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!([]));
        assert_eq!(body["meta"]["pages"]["current"], 99);
        assert_eq!(body["meta"]["pages"]["hasNext"], false);
    }

    #[tokio::test]
    async fn other_tenants_rows_are_invisible() {
        let (app, _) = fleet_app();
        let (_, _, body) = get_json(app, "/api/v1/tenants/globex/vehicles").await;

        assert_eq!(body["meta"]["count"], 3);
        for row in body["data"].as_array().unwrap() {
            assert!(row["id"].as_str().unwrap().starts_with("globex-"));
        }
    }

    #[tokio::test]
    async fn link_header_points_at_neighbours() {
        let (app, _) = fleet_app();
        let (_, link, _) = get_json(app, "/api/v1/tenants/acme/vehicles?page=2&q=van").await;

        let link = link.unwrap();
        assert!(link.contains(
            "</api/v1/tenants/acme/vehicles?page=1&limit=10&q=van&order=DESC>; rel=\"prev\""
        ));
        assert!(link.contains("rel=\"first\""));
        assert!(link.contains("rel=\"last\""));
    }

    #[tokio::test]
    async fn fuel_logs_use_their_own_config() {
        let (app, vehicle_id) = fleet_app();
        let (status, _, body) = get_json(
            app,
            &format!("/api/v1/tenants/acme/vehicles/{vehicle_id}/fuel-logs"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["limit"], 25);
        assert_eq!(body["meta"]["count"], 4);
    }

    #[tokio::test]
    async fn fuel_logs_of_foreign_vehicle_is_404() {
        let (app, vehicle_id) = fleet_app();
        let (status, _, body) = get_json(
            app,
            &format!("/api/v1/tenants/globex/vehicles/{vehicle_id}/fuel-logs"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn fallback_policy_ignores_oversized_limit() {
        let store = InMemoryFleetStore::new();
        store.seed_vehicles("acme", 30);
        let mut pagination = PaginationSettings::default();
        pagination.vehicles = pagination
            .vehicles
            .with_max_limit(20)
            .with_over_limit(crate::shared::pagination::OverLimitPolicy::Fallback);

        let (_, _, body) =
            get_json(app_with(store, pagination), "/api/v1/tenants/acme/vehicles?limit=50").await;
        assert_eq!(body["meta"]["limit"], 10);
    }

    #[tokio::test]
    async fn metrics_are_labelled_by_route_template() {
        use tower::Service;

        let store = InMemoryFleetStore::new();
        store.seed_vehicles("acme", 2);
        let handle = crate::server::prometheus_handle().expect("recorder installed");
        let mut svc = create_api_router(ApiContext {
            fleet: Arc::new(FleetService::new(Arc::new(store))),
            pagination: PaginationSettings::default(),
            db: None,
            prometheus: Some(handle),
        })
        .into_service();

        for uri in ["/api/v1/tenants/acme/vehicles?page=2", "/no-such-route"] {
            let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
            svc.call(req).await.unwrap();
        }

        let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let resp = svc.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains("http_requests_total"));
        assert!(text.contains(r#"route="/api/v1/tenants/{tenant_id}/vehicles""#));
        assert!(text.contains(r#"route="unmatched""#));
        assert!(!text.contains("/tenants/acme"));
    }

    #[tokio::test]
    async fn health_reports_disabled_database_in_memory_mode() {
        let (app, _) = fleet_app();
        let (status, _, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "disabled");
    }

    #[tokio::test]
    async fn openapi_document_lists_list_endpoints() {
        let (app, _) = fleet_app();
        let (status, _, body) = get_json(app, "/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/tenants/{tenant_id}/vehicles"].is_object());
        assert!(body["paths"]["/api/v1/tenants/{tenant_id}/vehicles/{vehicle_id}/fuel-logs"].is_object());
    }

    #[tokio::test]
    async fn serves_pages_from_sqlite() {
        use crate::infrastructure::database::repositories::{
            test_support::memory_db, SeaOrmRepositoryProvider, SeaOrmVehicleRepository,
        };

        let db = memory_db().await;
        let vehicles = SeaOrmVehicleRepository::new(db.clone());
        for v in InMemoryFleetStore::new().seed_vehicles("acme", 12) {
            vehicles.insert(&v).await.unwrap();
        }

        let app = create_api_router(ApiContext {
            fleet: Arc::new(FleetService::new(Arc::new(SeaOrmRepositoryProvider::new(
                db.clone(),
            )))),
            pagination: PaginationSettings::default(),
            db: Some(db),
            prometheus: None,
        });

        let (status, _, body) = get_json(
            app.clone(),
            "/api/v1/tenants/acme/vehicles?page=2&sort=year&order=ASC",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["pages"]["last"], 2);

        let (_, _, health) = get_json(app, "/health").await;
        assert_eq!(health["database"]["status"], "ok");
    }
}
