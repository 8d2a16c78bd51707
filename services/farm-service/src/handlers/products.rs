use axum::{extract::State, Json};

use crate::{config::AppState, domain::stok::Stok, error::AppResult, repositories::stok_repo};

/// Alias lama untuk katalog stok. Dipertahankan supaya client
/// yang masih memanggil /api/products tidak putus.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Stok",
    responses(
        (status = 200, description = "Daftar produk (alias dari stok)", body = [Stok])
    )
)]
pub async fn get_products(State(state): State<AppState>) -> AppResult<Json<Vec<Stok>>> {
    let stok = stok_repo::find_all(&state.db).await?;

    Ok(Json(stok))
}
