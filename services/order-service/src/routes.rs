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
    handlers::{admin_orders, cart, orders},
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
        title = "Pitek Balap - Order Service API",
        version = "0.1.0",
        description = "Keranjang server-side dan order SPPA dengan reservasi stok transaksional. Semua perpindahan status order dijaga tabel transisi.",
    ),
    paths(
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,
        orders::checkout,
        orders::get_my_orders,
        orders::get_order,
        orders::upload_payment_proof,
        orders::rate_order,
        admin_orders::list_orders,
        admin_orders::approve_order,
        admin_orders::reject_order,
        admin_orders::confirm_payment,
        admin_orders::start_weighing,
        admin_orders::submit_weighing,
        admin_orders::hold_order,
        admin_orders::release_order,
        admin_orders::complete_order,
    ),
    modifiers(&SecurityAddon),
    components(schemas(
        crate::domain::cart::CartItem,
        crate::domain::cart::CartItemView,
        crate::domain::cart::CartResponse,
        crate::domain::cart::AddToCartRequest,
        crate::domain::cart::UpdateCartItemRequest,
        crate::domain::order::Order,
        crate::domain::order::OrderItem,
        crate::domain::order::OrderResponse,
        crate::domain::order::OrderListResponse,
        crate::domain::order::CheckoutRequest,
        crate::domain::order::WeighingRequest,
        crate::domain::order::RejectOrderRequest,
        crate::domain::order::PaymentConfirmRequest,
        crate::domain::order::ReleaseRequest,
        crate::domain::order::RatingRequest,
        crate::handlers::MessageResponse,
    )),
    tags(
        (name = "Cart", description = "Keranjang belanja server-side"),
        (name = "Orders", description = "Order SPPA milik pembeli"),
        (name = "Admin Orders", description = "Kelola order (admin)")
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

// Buat router lengkap order-service
pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();

    let api_routes = Router::new()
        .route(
            "/cart",
            get(cart::get_cart)
                .post(cart::add_to_cart)
                .delete(cart::clear_cart),
        )
        .route(
            "/cart/{stok_id}",
            patch(cart::update_cart_item).delete(cart::remove_cart_item),
        )
        .route(
            "/orders",
            post(orders::checkout).get(admin_orders::list_orders),
        )
        .route("/orders/my", get(orders::get_my_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route(
            "/orders/{id}/payment-proof",
            post(orders::upload_payment_proof),
        )
        .route("/orders/{id}/rating", post(orders::rate_order))
        .route("/orders/{id}/approve", post(admin_orders::approve_order))
        .route("/orders/{id}/reject", post(admin_orders::reject_order))
        .route(
            "/orders/{id}/payment-confirm",
            post(admin_orders::confirm_payment),
        )
        .route(
            "/orders/{id}/start-weighing",
            post(admin_orders::start_weighing),
        )
        .route("/orders/{id}/weighing", post(admin_orders::submit_weighing))
        .route("/orders/{id}/hold", post(admin_orders::hold_order))
        .route("/orders/{id}/release", post(admin_orders::release_order))
        .route("/orders/{id}/complete", post(admin_orders::complete_order))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check).with_state(state.db.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        // Bukti pembayaran yang sudah diunggah
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .nest("/api", api_routes)
        // Upload bukti bisa sampai 5MB, default body limit axum terlalu kecil
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
}
