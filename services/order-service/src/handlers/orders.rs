use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use shared::utils::upload;

use crate::{
    config::AppState,
    domain::{
        order::{CheckoutRequest, Order, OrderResponse, RatingRequest},
        status::OrderStatus,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    repositories::order_repo,
};

pub(crate) fn parse_status(order: &Order) -> AppResult<OrderStatus> {
    OrderStatus::from_str(&order.status)
        .ok_or_else(|| AppError::internal(format!("Status order tidak dikenal: {}", order.status)))
}

/// Checkout keranjang jadi order SPPA.
/// Stok direservasi atomik: satu baris kurang, seluruh order batal.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order SPPA dibuat", body = OrderResponse),
        (status = 400, description = "Payload tidak valid atau keranjang kosong"),
        (status = 403, description = "Akun belum terverifikasi untuk pembayaran di muka"),
        (status = 409, description = "Stok tidak mencukupi")
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let metode = req.metode().map_err(AppError::Validation)?;

    let buyer = order_repo::find_buyer_profile(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User Tidak Ditemukan"))?;

    // Pembayaran di muka hanya untuk akun yang KTP-nya sudah diverifikasi
    if metode.is_prepaid() && buyer.verification_status != "approved" {
        return Err(AppError::forbidden(
            "Akun belum terverifikasi untuk pembayaran di muka",
        ));
    }

    let response = order_repo::create_order(
        &state.db,
        auth.user_id,
        &buyer.nama_lengkap,
        &req,
        metode.initial_status(),
    )
    .await?;

    tracing::info!(
        order_id = response.order.id,
        nomor_sppa = %response.order.nomor_sppa,
        "Order SPPA dibuat"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Daftar order milik user yang login
#[utoipa::path(
    get,
    path = "/api/orders/my",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daftar order", body = [OrderResponse])
    )
)]
pub async fn get_my_orders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = order_repo::find_by_buyer(&state.db, auth.user_id).await?;

    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let items = order_repo::find_items(&state.db, order.id).await?;
        responses.push(OrderResponse { order, items });
    }

    Ok(Json(responses))
}

/// Detail order by ID, hanya untuk pemilik order atau admin
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    responses(
        (status = 200, description = "Detail order", body = OrderResponse),
        (status = 403, description = "Bukan pemilik order"),
        (status = 404, description = "Order tidak ditemukan")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderResponse>> {
    let order = order_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Order Tidak Ditemukan"))?;

    if order.buyer_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::forbidden("Akses Ditolak"));
    }

    let items = order_repo::find_items(&state.db, order.id).await?;

    Ok(Json(OrderResponse { order, items }))
}

// Baca field file "bukti" dari multipart form, validasi sebelum tulis disk
async fn read_proof_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("bukti") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::validation("Content-Type file tidak ditemukan"))?
            .to_string();
        upload::validate_image_type(&content_type).map_err(AppError::Validation)?;

        let original_name = field.file_name().unwrap_or("bukti.jpg").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Gagal membaca file: {}", e)))?;
        upload::validate_file_size(data.len()).map_err(AppError::Validation)?;

        return Ok((original_name, data.to_vec()));
    }

    Err(AppError::validation("Field file 'bukti' tidak ditemukan"))
}

/// Upload bukti pembayaran (JPEG/PNG/JPG, maksimal 5MB).
/// Dari pending_payment / rejected_payment masuk payment_review,
/// untuk pelunasan hasil timbang status tetap payment_pending.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment-proof",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    request_body(content = String, description = "Multipart form dengan field file 'bukti'", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Bukti pembayaran tersimpan", body = OrderResponse),
        (status = 403, description = "Bukan pemilik order"),
        (status = 409, description = "Order tidak sedang menunggu pembayaran")
    )
)]
pub async fn upload_payment_proof(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<Json<OrderResponse>> {
    let order = order_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Order Tidak Ditemukan"))?;

    if order.buyer_id != auth.user_id {
        return Err(AppError::forbidden("Akses Ditolak"));
    }

    let status = parse_status(&order)?;
    let next = match status {
        OrderStatus::PendingPayment | OrderStatus::RejectedPayment => OrderStatus::PaymentReview,
        // Pelunasan setelah timbang: bukti diganti, status tidak berpindah
        OrderStatus::PaymentPending => OrderStatus::PaymentPending,
        _ => return Err(AppError::conflict("Transisi status tidak valid")),
    };

    let (original_name, data) = read_proof_field(&mut multipart).await?;

    let filename = upload::generate_filename("bukti", &original_name);
    let url = upload::save_to_disk(&state.config.upload_dir, "payment", &filename, &data)
        .await
        .map_err(|e| AppError::internal(format!("Gagal menyimpan bukti pembayaran: {}", e)))?;

    // CAS: kalah balapan dengan keputusan admin berarti 409
    let order = order_repo::set_payment_proof(&state.db, id, &url, status, next)
        .await?
        .ok_or_else(|| AppError::conflict("Transisi status tidak valid"))?;
    let items = order_repo::find_items(&state.db, order.id).await?;

    tracing::info!(order_id = id, "Bukti pembayaran diunggah");

    Ok(Json(OrderResponse { order, items }))
}

/// Beri rating order yang sudah selesai, sekali saja
#[utoipa::path(
    post,
    path = "/api/orders/{id}/rating",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID order")),
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating tersimpan", body = OrderResponse),
        (status = 400, description = "Order belum selesai"),
        (status = 409, description = "Order sudah diberi rating")
    )
)]
pub async fn rate_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(req): Json<RatingRequest>,
) -> AppResult<Json<OrderResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let order = order_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Order Tidak Ditemukan"))?;

    if order.buyer_id != auth.user_id {
        return Err(AppError::forbidden("Akses Ditolak"));
    }

    if parse_status(&order)? != OrderStatus::Completed {
        return Err(AppError::bad_request("Order belum selesai"));
    }

    if order.rating.is_some() {
        return Err(AppError::conflict("Order sudah diberi rating"));
    }

    // Guard di SQL juga, dua request rating bersamaan hanya satu yang menang
    let order = order_repo::set_rating(&state.db, id, req.rating)
        .await?
        .ok_or_else(|| AppError::conflict("Order sudah diberi rating"))?;
    let items = order_repo::find_items(&state.db, order.id).await?;

    Ok(Json(OrderResponse { order, items }))
}
