use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, patch, post},
    Json, Router,
};
use sqlx::PgPool;
use tower_http::services::ServeDir;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{check_db_health, AppState, HealthStatus},
    handlers::{auth, users, verification},
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
        title = "Pitek Balap - Auth Service API",
        version = "0.1.0",
        description = "Registrasi, login, kelola user, dan verifikasi dokumen KTP.\n\nToken dikirim lewat header `Authorization: Bearer {token}` dan berlaku 1 hari.",
    ),
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::get_my_profile,
        users::get_users,
        users::update_user,
        users::delete_user,
        verification::upload_ktp,
        verification::get_pending_verifications,
        verification::approve_verification,
        verification::reject_verification,
    ),
    modifiers(&SecurityAddon),
    components(schemas(
        crate::domain::user::RegisterRequest,
        crate::domain::user::LoginRequest,
        crate::domain::user::LoginResponse,
        crate::domain::user::UpdateUserRequest,
        crate::domain::user::RejectVerificationRequest,
        crate::domain::user::UserResponse,
        auth::MessageResponse,
        verification::UploadKtpResponse,
    )),
    tags(
        (name = "Authentication", description = "Registrasi, login, dan profil"),
        (name = "Users", description = "Kelola user (admin)"),
        (name = "Verification", description = "Verifikasi dokumen KTP")
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

// Buat router lengkap auth-service
pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();

    let api_routes = Router::new()
        .route("/users", post(auth::register_handler).get(users::get_users))
        .route("/users/login", post(auth::login_handler))
        .route("/users/me", get(auth::get_my_profile))
        .route("/users/me/ktp", post(verification::upload_ktp))
        .route(
            "/users/{id}",
            patch(users::update_user).delete(users::delete_user),
        )
        .route(
            "/verifications/pending",
            get(verification::get_pending_verifications),
        )
        .route(
            "/verifications/{user_id}/approve",
            post(verification::approve_verification),
        )
        .route(
            "/verifications/{user_id}/reject",
            post(verification::reject_verification),
        )
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check).with_state(state.db.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        // File KTP yang sudah diunggah
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .nest("/api", api_routes)
        // Upload KTP bisa sampai 5MB, default body limit axum terlalu kecil
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
}
