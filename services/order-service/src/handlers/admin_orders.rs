use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    config::AppState,
    domain::{
        order::{
            Order, OrderListQuery, OrderListResponse, OrderResponse, PaymentConfirmRequest,
            RejectOrderRequest, ReleaseRequest, WeighingRequest,
        },
        status::OrderStatus,
    },
    error::{AppError, AppResult},
    handlers::orders::parse_status,
    middleware::auth::AuthAdmin,
    repositories::order_repo,
};

async fn load_order(state: &AppState, id: i32) -> AppResult<Order> {
    order_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Order Tidak Ditemukan"))
}

// Transisi sederhana yang tidak menyentuh stok: cek tabel transisi lalu
// update compare-and-swap. Request bersamaan yang kalah CAS dapat 409.
async fn transition(state: &AppState, id: i32, next: OrderStatus) -> AppResult<OrderResponse> {
    let order = load_order(state, id).await?;
    let current = parse_status(&order)?;

    if !current.can_transition(next) {
        return Err(AppError::conflict("Transisi status tidak valid"));
    }

    let order = order_repo::transition_status(&state.db, id, current, next)
        .await?
        .ok_or_else(|| AppError::conflict("Transisi status tidak valid"))?;
    let items = order_repo::find_items(&state.db, order.id).await?;

    tracing::info!(
        order_id = id,
        dari = current.as_str(),
        ke = next.as_str(),
        "Status order berubah"
    );

    Ok(OrderResponse { order, items })
}

/// Daftar semua order: filter status, cari nomor SPPA atau nama pembeli, paging
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(OrderListQuery),
    responses(
        (status = 200, description = "Daftar order", body = OrderListResponse),
        (status = 403, description = "Bukan admin")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<OrderListResponse>> {
    if let Some(status) = &query.status {
        if OrderStatus::from_str(status).is_none() {
            return Err(AppError::validation(format!(
                "Status filter tidak dikenal: {}",
                status
            )));
        }
    }

    let (orders, total) = order_repo::list_admin(&state.db, &query).await?;

    Ok(Json(OrderListResponse {
        orders,
        total,
        page: query.page(),
        limit: query.limit(),
    }))
}

/// Setujui order: pending_approval → approved
#[utoipa::path(
    post,
    path = "/api/orders/{id}/approve",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    responses(
        (status = 200, description = "Order disetujui", body = OrderResponse),
        (status = 409, description = "Transisi status tidak valid")
    )
)]
pub async fn approve_order(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    transition(&state, id, OrderStatus::Approved).await.map(Json)
}

/// Tolak order dengan alasan wajib. Stok yang direservasi dikembalikan
/// dalam transaksi yang sama dengan perubahan status.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/reject",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    request_body = RejectOrderRequest,
    responses(
        (status = 200, description = "Order ditolak, stok dikembalikan", body = OrderResponse),
        (status = 400, description = "Alasan penolakan tidak diisi"),
        (status = 409, description = "Transisi status tidak valid")
    )
)]
pub async fn reject_order(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<RejectOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    let alasan = req
        .alasan
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("Alasan penolakan wajib diisi"))?;

    let order = load_order(&state, id).await?;
    let current = parse_status(&order)?;

    if !current.can_transition(OrderStatus::Rejected) {
        return Err(AppError::conflict("Transisi status tidak valid"));
    }

    let order = order_repo::reject_with_restore(&state.db, id, current, alasan)
        .await?
        .ok_or_else(|| AppError::conflict("Transisi status tidak valid"))?;
    let items = order_repo::find_items(&state.db, order.id).await?;

    tracing::info!(order_id = id, admin_id = admin.user_id, "Order ditolak");

    Ok(Json(OrderResponse { order, items }))
}

/// Putuskan hasil cek bukti pembayaran.
/// payment_review: confirm → pending_approval, tolak → rejected_payment.
/// payment_pending (pelunasan): confirm → completed, tolak → hold.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment-confirm",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    request_body = PaymentConfirmRequest,
    responses(
        (status = 200, description = "Status pembayaran diputuskan", body = OrderResponse),
        (status = 409, description = "Order tidak sedang menunggu cek pembayaran")
    )
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<PaymentConfirmRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = load_order(&state, id).await?;

    let next = match (parse_status(&order)?, req.confirm) {
        (OrderStatus::PaymentReview, true) => OrderStatus::PendingApproval,
        (OrderStatus::PaymentReview, false) => OrderStatus::RejectedPayment,
        (OrderStatus::PaymentPending, true) => OrderStatus::Completed,
        (OrderStatus::PaymentPending, false) => OrderStatus::Hold,
        _ => return Err(AppError::conflict("Transisi status tidak valid")),
    };

    transition(&state, id, next).await.map(Json)
}

/// Mulai penimbangan: approved → weighing
#[utoipa::path(
    post,
    path = "/api/orders/{id}/start-weighing",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    responses(
        (status = 200, description = "Penimbangan dimulai", body = OrderResponse),
        (status = 409, description = "Transisi status tidak valid")
    )
)]
pub async fn start_weighing(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    transition(&state, id, OrderStatus::Weighing).await.map(Json)
}

/// Input hasil timbang. Total aktual dihitung server: tonase × harga per kg,
/// lalu order masuk payment_pending.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/weighing",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    request_body = WeighingRequest,
    responses(
        (status = 200, description = "Hasil timbang tersimpan", body = OrderResponse),
        (status = 400, description = "Payload tidak valid"),
        (status = 409, description = "Order tidak dalam penimbangan")
    )
)]
pub async fn submit_weighing(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<WeighingRequest>,
) -> AppResult<Json<OrderResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let order = load_order(&state, id).await?;

    if parse_status(&order)? != OrderStatus::Weighing {
        return Err(AppError::conflict("Transisi status tidak valid"));
    }

    let order = order_repo::set_weighing(
        &state.db,
        id,
        req.actual_tonnage,
        req.actual_price,
        req.actual_total(),
    )
    .await?
    .ok_or_else(|| AppError::conflict("Transisi status tidak valid"))?;
    let items = order_repo::find_items(&state.db, order.id).await?;

    tracing::info!(
        order_id = id,
        actual_total = req.actual_total(),
        "Hasil timbang tersimpan"
    );

    Ok(Json(OrderResponse { order, items }))
}

/// Tahan order sementara: approved / weighing / payment_pending → hold
#[utoipa::path(
    post,
    path = "/api/orders/{id}/hold",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    responses(
        (status = 200, description = "Order ditahan", body = OrderResponse),
        (status = 409, description = "Transisi status tidak valid")
    )
)]
pub async fn hold_order(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    transition(&state, id, OrderStatus::Hold).await.map(Json)
}

/// Lepas order dari hold, kembali ke weighing atau payment_pending
#[utoipa::path(
    post,
    path = "/api/orders/{id}/release",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    request_body = ReleaseRequest,
    responses(
        (status = 200, description = "Order dilepas dari hold", body = OrderResponse),
        (status = 400, description = "Target status tidak dikenal"),
        (status = 409, description = "Transisi status tidak valid")
    )
)]
pub async fn release_order(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
    Json(req): Json<ReleaseRequest>,
) -> AppResult<Json<OrderResponse>> {
    let target = OrderStatus::from_str(&req.to)
        .ok_or_else(|| AppError::validation(format!("Status tujuan tidak dikenal: {}", req.to)))?;

    transition(&state, id, target).await.map(Json)
}

/// Tandai order selesai: payment_pending → completed
#[utoipa::path(
    post,
    path = "/api/orders/{id}/complete",
    tag = "Admin Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    responses(
        (status = 200, description = "Order selesai", body = OrderResponse),
        (status = 409, description = "Transisi status tidak valid")
    )
)]
pub async fn complete_order(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    transition(&state, id, OrderStatus::Completed)
        .await
        .map(Json)
}
