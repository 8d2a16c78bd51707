use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use sqlx::PgPool;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{check_db_health, AppState, HealthStatus},
    handlers::{kandang, products, stok},
};

// Security scheme untuk Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

// OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pitek Balap - Farm Service API",
        version = "0.1.0",
        description = "Katalog kandang dan stok ayam broiler. Endpoint baca terbuka untuk publik, endpoint tulis khusus admin.",
    ),
    paths(
        kandang::get_kandang,
        kandang::create_kandang,
        kandang::update_kandang,
        kandang::delete_kandang,
        stok::get_stok,
        stok::get_stok_by_id,
        stok::create_stok,
        stok::update_stok,
        stok::delete_stok,
        products::get_products,
    ),
    modifiers(&SecurityAddon),
    components(schemas(
        crate::domain::kandang::Kandang,
        crate::domain::kandang::CreateKandangRequest,
        crate::domain::kandang::UpdateKandangRequest,
        crate::domain::stok::Stok,
        crate::domain::stok::CreateStokRequest,
        crate::domain::stok::UpdateStokRequest,
        crate::handlers::MessageResponse,
    )),
    tags(
        (name = "Kandang", description = "Kelola kandang pemasok"),
        (name = "Stok", description = "Katalog stok ayam broiler")
    )
)]
struct ApiDoc;

// Health check handler
async fn health_check(State(pool): State<PgPool>) -> Json<HealthStatus> {
    let db_healthy = check_db_health(&pool).await;

    Json(HealthStatus {
        database: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        overall: if db_healthy { "healthy" } else { "degraded" }.to_string(),
    })
}

// Buat router lengkap farm-service
pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();

    let api_routes = Router::new()
        .route(
            "/kandang",
            get(kandang::get_kandang).post(kandang::create_kandang),
        )
        .route(
            "/kandang/{id}",
            patch(kandang::update_kandang).delete(kandang::delete_kandang),
        )
        .route("/stok", get(stok::get_stok).post(stok::create_stok))
        .route(
            "/stok/{id}",
            get(stok::get_stok_by_id)
                .patch(stok::update_stok)
                .delete(stok::delete_stok),
        )
        // Alias lama, POST diarahkan ke pembuatan stok
        .route(
            "/products",
            get(products::get_products).post(stok::create_stok),
        )
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check).with_state(state.db.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        .nest("/api", api_routes)
}
