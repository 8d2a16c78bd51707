use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
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
    handlers::{admin_chat, messages, upload},
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
        title = "Pitek Balap - Chat Service API",
        version = "0.1.0",
        description = "Percakapan user dengan tim support: satu thread per user, admin melayani semua thread.",
    ),
    paths(
        messages::get_my_messages,
        messages::send_message,
        messages::mark_my_thread_read,
        admin_chat::list_conversations,
        admin_chat::get_user_messages,
        admin_chat::reply_to_user,
        admin_chat::mark_thread_read,
        upload::upload_attachment,
    ),
    modifiers(&SecurityAddon),
    components(schemas(
        crate::domain::conversation::Conversation,
        crate::domain::conversation::ConversationSummary,
        crate::domain::message::Message,
        crate::domain::message::SendMessageRequest,
        crate::domain::message::UploadAttachmentResponse,
        crate::handlers::MessageResponse,
    )),
    tags(
        (name = "Messages", description = "Thread percakapan milik user"),
        (name = "Admin Chat", description = "Inbox support (admin)")
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

// Buat router lengkap chat-service
pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();

    let api_routes = Router::new()
        .route(
            "/messages",
            get(messages::get_my_messages).post(messages::send_message),
        )
        .route("/messages/read", post(messages::mark_my_thread_read))
        .route("/conversations", get(admin_chat::list_conversations))
        .route(
            "/conversations/{user_id}/messages",
            get(admin_chat::get_user_messages).post(admin_chat::reply_to_user),
        )
        .route(
            "/conversations/{user_id}/read",
            post(admin_chat::mark_thread_read),
        )
        .route("/upload", post(upload::upload_attachment))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check).with_state(state.db.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        // Lampiran chat yang sudah diunggah
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .nest("/api", api_routes)
        // Lampiran bisa sampai 5MB, default body limit axum terlalu kecil
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
}
