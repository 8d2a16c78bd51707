use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    config::AppState,
    domain::cart::{AddToCartRequest, CartItem, CartResponse, UpdateCartItemRequest},
    error::{AppError, AppResult},
    handlers::MessageResponse,
    middleware::auth::AuthUser,
    repositories::cart_repo,
};

/// Isi keranjang user, di-join dengan stok live.
/// Baris dengan stok yang sudah tidak mencukupi ditandai tersedia = false.
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Isi keranjang", body = CartResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<CartResponse>> {
    let items = cart_repo::find_views(&state.db, auth.user_id).await?;

    Ok(Json(CartResponse::from_items(items)))
}

/// Tambah stok ke keranjang. Stok yang sama ditambah jumlahnya.
#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Item masuk keranjang", body = CartItem),
        (status = 400, description = "Payload tidak valid"),
        (status = 404, description = "Stok tidak ditemukan")
    )
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !cart_repo::stok_exists(&state.db, req.stok_id).await? {
        return Err(AppError::not_found("Stok Tidak Ditemukan"));
    }

    let item = cart_repo::add(&state.db, auth.user_id, req.stok_id, req.jumlah).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Ubah jumlah satu baris keranjang
#[utoipa::path(
    patch,
    path = "/api/cart/{stok_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("stok_id" = i32, Path, description = "ID stok di keranjang")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Jumlah berhasil diubah", body = CartItem),
        (status = 404, description = "Item tidak ada di keranjang")
    )
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(stok_id): Path<i32>,
    Json(req): Json<UpdateCartItemRequest>,
) -> AppResult<Json<CartItem>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = cart_repo::set_jumlah(&state.db, auth.user_id, stok_id, req.jumlah)
        .await?
        .ok_or_else(|| AppError::not_found("Item Tidak Ada Di Keranjang"))?;

    Ok(Json(item))
}

/// Hapus satu baris keranjang
#[utoipa::path(
    delete,
    path = "/api/cart/{stok_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("stok_id" = i32, Path, description = "ID stok di keranjang")),
    responses(
        (status = 200, description = "Item dihapus", body = MessageResponse),
        (status = 404, description = "Item tidak ada di keranjang")
    )
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(stok_id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let removed = cart_repo::remove(&state.db, auth.user_id, stok_id).await?;

    if !removed {
        return Err(AppError::not_found("Item Tidak Ada Di Keranjang"));
    }

    Ok(Json(MessageResponse {
        message: "Item berhasil dihapus dari keranjang".to_string(),
    }))
}

/// Kosongkan keranjang
#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Keranjang dikosongkan", body = MessageResponse)
    )
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    cart_repo::clear(&state.db, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Keranjang berhasil dikosongkan".to_string(),
    }))
}
