use chrono::Utc;
use rand::Rng;
use sqlx::{PgPool, QueryBuilder};

use crate::{
    domain::{
        cart::CartItemView,
        order::{CheckoutRequest, Order, OrderItem, OrderListQuery, OrderResponse},
        status::OrderStatus,
    },
    error::AppError,
};

// Proyeksi user yang dibutuhkan saat checkout
#[derive(Debug, sqlx::FromRow)]
pub struct BuyerProfile {
    pub nama_lengkap: String,
    pub verification_status: String,
}

pub async fn find_buyer_profile(
    pool: &PgPool,
    user_id: i32,
) -> Result<Option<BuyerProfile>, AppError> {
    let profile = sqlx::query_as(
        "SELECT nama_lengkap, verification_status FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

// Nomor SPPA unik, format SPPA-YYYYMMDD-NNNNNN.
// Collision hampir mustahil, tapi tetap dicek ke database.
pub async fn generate_nomor_sppa(pool: &PgPool) -> Result<String, AppError> {
    for _ in 0..5 {
        let nomor = format!(
            "SPPA-{}-{:06}",
            Utc::now().format("%Y%m%d"),
            rand::rng().random_range(0..1_000_000)
        );

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE nomor_sppa = $1)")
                .bind(&nomor)
                .fetch_one(pool)
                .await?;

        if !exists {
            return Ok(nomor);
        }
    }

    Err(AppError::Internal(
        "Gagal membuat nomor SPPA unik".to_string(),
    ))
}

// Nomor SPPA tabrakan dengan insert lain di antara cek dan commit
pub(crate) fn is_nomor_sppa_collision(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db| {
        db.is_unique_violation() && db.constraint() == Some("orders_nomor_sppa_key")
    })
}

// Checkout: reservasi stok + insert order + item + kosongkan keranjang,
// semuanya dalam satu transaksi. Stok kurang = seluruh order batal (409).
// Tabrakan nomor SPPA di-retry dengan nomor baru, bukan jadi 500.
pub async fn create_order(
    pool: &PgPool,
    buyer_id: i32,
    nama_pembeli: &str,
    payload: &CheckoutRequest,
    initial_status: OrderStatus,
) -> Result<OrderResponse, AppError> {
    for _ in 0..3 {
        let nomor_sppa = generate_nomor_sppa(pool).await?;

        match insert_order_tx(pool, buyer_id, nama_pembeli, payload, initial_status, &nomor_sppa)
            .await
        {
            Err(AppError::Database(ref e)) if is_nomor_sppa_collision(e) => continue,
            result => return result,
        }
    }

    Err(AppError::Internal(
        "Gagal membuat nomor SPPA unik".to_string(),
    ))
}

async fn insert_order_tx(
    pool: &PgPool,
    buyer_id: i32,
    nama_pembeli: &str,
    payload: &CheckoutRequest,
    initial_status: OrderStatus,
    nomor_sppa: &str,
) -> Result<OrderResponse, AppError> {
    let mut tx = pool.begin().await?;

    let cart_items: Vec<CartItemView> = sqlx::query_as(
        "SELECT ci.id, ci.stok_id, ci.jumlah,
                s.nama_kandang, s.ukuran, s.metode_jual, s.harga_satuan, s.stok_tersisa,
                (s.stok_tersisa >= ci.jumlah) AS tersedia,
                (s.harga_satuan * ci.jumlah) AS subtotal
         FROM cart_items ci
         JOIN stok s ON s.id = ci.stok_id
         WHERE ci.user_id = $1
         ORDER BY ci.created_at ASC",
    )
    .bind(buyer_id)
    .fetch_all(&mut *tx)
    .await?;

    if cart_items.is_empty() {
        return Err(AppError::bad_request("Keranjang masih kosong"));
    }

    // Guarded update: gagal kalau stok tersisa kurang dari jumlah dipesan
    for item in &cart_items {
        let result = sqlx::query(
            "UPDATE stok SET stok_tersisa = stok_tersisa - $2, updated_at = NOW()
             WHERE id = $1 AND stok_tersisa >= $2",
        )
        .bind(item.stok_id)
        .bind(item.jumlah)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Stok {} tidak mencukupi",
                item.nama_kandang
            )));
        }
    }

    let estimasi_total: f64 = cart_items.iter().map(|item| item.subtotal).sum();

    let order: Order = sqlx::query_as(
        "INSERT INTO orders (nomor_sppa, buyer_id, nama_pembeli, no_polisi, nama_supir,
                             telepon_supir, sim_supir, metode_pembayaran, status, estimasi_total)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(nomor_sppa)
    .bind(buyer_id)
    .bind(nama_pembeli)
    .bind(payload.no_polisi.trim())
    .bind(payload.nama_supir.trim())
    .bind(payload.telepon_supir.trim())
    .bind(payload.sim_supir.trim())
    .bind(&payload.metode_pembayaran)
    .bind(initial_status.as_str())
    .bind(estimasi_total)
    .fetch_one(&mut *tx)
    .await?;

    let mut items = Vec::with_capacity(cart_items.len());
    for item in &cart_items {
        let order_item: OrderItem = sqlx::query_as(
            "INSERT INTO order_items (order_id, stok_id, nama_kandang, ukuran,
                                      metode_jual, harga_satuan, jumlah, subtotal)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(order.id)
        .bind(item.stok_id)
        .bind(&item.nama_kandang)
        .bind(&item.ukuran)
        .bind(&item.metode_jual)
        .bind(item.harga_satuan)
        .bind(item.jumlah)
        .bind(item.subtotal)
        .fetch_one(&mut *tx)
        .await?;

        items.push(order_item);
    }

    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(buyer_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(OrderResponse { order, items })
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Order>, AppError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn find_items(pool: &PgPool, order_id: i32) -> Result<Vec<OrderItem>, AppError> {
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC")
        .bind(order_id)
        .fetch_all(pool)
        .await?;

    Ok(items)
}

pub async fn find_by_buyer(pool: &PgPool, buyer_id: i32) -> Result<Vec<Order>, AppError> {
    let orders =
        sqlx::query_as("SELECT * FROM orders WHERE buyer_id = $1 ORDER BY created_at DESC")
            .bind(buyer_id)
            .fetch_all(pool)
            .await?;

    Ok(orders)
}

// Daftar order untuk admin: filter status, cari nomor SPPA / nama pembeli, paging
pub async fn list_admin(
    pool: &PgPool,
    query: &OrderListQuery,
) -> Result<(Vec<Order>, i64), AppError> {
    let mut builder = QueryBuilder::new("SELECT * FROM orders WHERE TRUE");
    let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM orders WHERE TRUE");

    if let Some(status) = &query.status {
        builder.push(" AND status = ").push_bind(status);
        count_builder.push(" AND status = ").push_bind(status);
    }

    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search.trim());
        builder
            .push(" AND (nomor_sppa ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR nama_pembeli ILIKE ")
            .push_bind(pattern.clone())
            .push(")");
        count_builder
            .push(" AND (nomor_sppa ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR nama_pembeli ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    builder
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(query.limit())
        .push(" OFFSET ")
        .push_bind(query.offset());

    let orders = builder.build_query_as::<Order>().fetch_all(pool).await?;
    let total: i64 = count_builder
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    Ok((orders, total))
}

// Compare-and-swap: status hanya berpindah kalau masih di status asal.
// None berarti order sudah digeser request lain (atau tidak ada).
pub async fn transition_status(
    pool: &PgPool,
    id: i32,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<Option<Order>, AppError> {
    let order = sqlx::query_as(
        "UPDATE orders SET status = $3, updated_at = NOW()
         WHERE id = $1 AND status = $2
         RETURNING *",
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn set_payment_proof(
    pool: &PgPool,
    id: i32,
    proof_url: &str,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<Option<Order>, AppError> {
    let order = sqlx::query_as(
        "UPDATE orders SET payment_proof_url = $3, status = $4, updated_at = NOW()
         WHERE id = $1 AND status = $2
         RETURNING *",
    )
    .bind(id)
    .bind(from.as_str())
    .bind(proof_url)
    .bind(to.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn set_weighing(
    pool: &PgPool,
    id: i32,
    actual_tonnage: f64,
    actual_price: f64,
    actual_total: f64,
) -> Result<Option<Order>, AppError> {
    let order = sqlx::query_as(
        "UPDATE orders SET actual_tonnage = $3, actual_price = $4, actual_total = $5,
                status = $6, updated_at = NOW()
         WHERE id = $1 AND status = $2
         RETURNING *",
    )
    .bind(id)
    .bind(OrderStatus::Weighing.as_str())
    .bind(actual_tonnage)
    .bind(actual_price)
    .bind(actual_total)
    .bind(OrderStatus::PaymentPending.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

// Tolak order dan kembalikan stok yang sudah direservasi, dalam satu
// transaksi dengan perubahan status. Perubahan status di-guard status asal
// supaya dua reject bersamaan tidak mengembalikan stok dua kali.
pub async fn reject_with_restore(
    pool: &PgPool,
    id: i32,
    from: OrderStatus,
    alasan: &str,
) -> Result<Option<Order>, AppError> {
    let mut tx = pool.begin().await?;

    let order: Option<Order> = sqlx::query_as(
        "UPDATE orders SET status = $3, rejection_reason = $4, updated_at = NOW()
         WHERE id = $1 AND status = $2
         RETURNING *",
    )
    .bind(id)
    .bind(from.as_str())
    .bind(OrderStatus::Rejected.as_str())
    .bind(alasan)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(order) = order else {
        // Status sudah digeser request lain, tidak ada yang dikembalikan
        return Ok(None);
    };

    sqlx::query(
        "UPDATE stok s SET stok_tersisa = s.stok_tersisa + oi.jumlah, updated_at = NOW()
         FROM order_items oi
         WHERE oi.order_id = $1 AND oi.stok_id = s.id",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(order))
}

// Rating sekali saja dan hanya untuk order selesai, di-guard di SQL
pub async fn set_rating(
    pool: &PgPool,
    id: i32,
    rating: i16,
) -> Result<Option<Order>, AppError> {
    let order = sqlx::query_as(
        "UPDATE orders SET rating = $3, updated_at = NOW()
         WHERE id = $1 AND status = $2 AND rating IS NULL
         RETURNING *",
    )
    .bind(id)
    .bind(OrderStatus::Completed.as_str())
    .bind(rating)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[derive(Debug)]
    struct FakeDbError {
        kind: sqlx::error::ErrorKind,
        constraint: Option<&'static str>,
    }

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "fake database error")
        }
    }

    impl std::error::Error for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            use sqlx::error::ErrorKind;
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }
    }

    fn db_error(kind: sqlx::error::ErrorKind, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { kind, constraint }))
    }

    #[test]
    fn test_nomor_sppa_collision_detected() {
        let err = db_error(
            sqlx::error::ErrorKind::UniqueViolation,
            Some("orders_nomor_sppa_key"),
        );
        assert!(is_nomor_sppa_collision(&err));
    }

    #[test]
    fn test_other_unique_violations_not_retried() {
        let err = db_error(
            sqlx::error::ErrorKind::UniqueViolation,
            Some("users_email_key"),
        );
        assert!(!is_nomor_sppa_collision(&err));

        let err = db_error(sqlx::error::ErrorKind::ForeignKeyViolation, None);
        assert!(!is_nomor_sppa_collision(&err));

        assert!(!is_nomor_sppa_collision(&sqlx::Error::RowNotFound));
    }

    // Test di bawah butuh PostgreSQL dengan skema migrations/ ter-apply:
    //   DATABASE_URL=... cargo test -p order-service -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL untuk test database");
        sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("Gagal konek ke test database")
    }

    async fn seed_order(pool: &PgPool, stok_awal: i32, jumlah: i32) -> (i32, i32, i32) {
        let tag: u32 = rand::rng().random_range(0..1_000_000_000);

        let user_id: i32 = sqlx::query_scalar(
            "INSERT INTO users (jenis_akun, nama_lengkap, email, password_hash, nomor_telepon,
                                alamat, nama_bank, nomor_rekening, nama_pemilik_rekening)
             VALUES ('Pembeli', 'Tester', $1, 'x', '081234567890', 'Blitar', 'BCA', '1', 'Tester')
             RETURNING id",
        )
        .bind(format!("tester-{}@example.com", tag))
        .fetch_one(pool)
        .await
        .expect("Gagal seed user");

        let stok_id: i32 = sqlx::query_scalar(
            "INSERT INTO stok (nama_kandang, deskripsi, alamat_lengkap, ukuran,
                               stok_awal, stok_tersisa, metode_jual, harga_satuan, kondisi)
             VALUES ('Kandang Tes', 'tes', 'Blitar', '2 kg', $1, $2, 'Per Ekor', 50000, 'Sehat')
             RETURNING id",
        )
        .bind(stok_awal)
        .bind(stok_awal - jumlah)
        .fetch_one(pool)
        .await
        .expect("Gagal seed stok");

        let order_id: i32 = sqlx::query_scalar(
            "INSERT INTO orders (nomor_sppa, buyer_id, nama_pembeli, no_polisi, nama_supir,
                                 telepon_supir, sim_supir, metode_pembayaran, status, estimasi_total)
             VALUES ($1, $2, 'Tester', 'AG 1 B', 'Budi', '081234567890', '1234',
                     'pay_later', 'pending_approval', 1500000)
             RETURNING id",
        )
        .bind(format!("SPPA-TEST-{:09}", tag))
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("Gagal seed order");

        sqlx::query(
            "INSERT INTO order_items (order_id, stok_id, nama_kandang, ukuran, metode_jual,
                                      harga_satuan, jumlah, subtotal)
             VALUES ($1, $2, 'Kandang Tes', '2 kg', 'Per Ekor', 50000, $3, $4)",
        )
        .bind(order_id)
        .bind(stok_id)
        .bind(jumlah)
        .bind(50000.0 * jumlah as f64)
        .execute(pool)
        .await
        .expect("Gagal seed order item");

        (user_id, stok_id, order_id)
    }

    async fn stok_tersisa(pool: &PgPool, stok_id: i32) -> i32 {
        sqlx::query_scalar("SELECT stok_tersisa FROM stok WHERE id = $1")
            .bind(stok_id)
            .fetch_one(pool)
            .await
            .expect("Gagal baca stok")
    }

    async fn cleanup(pool: &PgPool, user_id: i32, stok_id: i32, order_id: i32) {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM stok WHERE id = $1")
            .bind(stok_id)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .ok();
    }

    #[tokio::test]
    #[ignore = "butuh PostgreSQL"]
    async fn test_double_reject_restores_stock_once() {
        let pool = test_pool().await;
        let (user_id, stok_id, order_id) = seed_order(&pool, 100, 30).await;
        assert_eq!(stok_tersisa(&pool, stok_id).await, 70);

        let first =
            reject_with_restore(&pool, order_id, OrderStatus::PendingApproval, "tes").await;
        let order = first.expect("Reject pertama gagal").expect("Harus berhasil");
        assert_eq!(order.status, "rejected");
        assert_eq!(stok_tersisa(&pool, stok_id).await, 100);

        // Reject kedua kalah CAS: tidak ada perubahan, stok tidak naik lagi
        let second =
            reject_with_restore(&pool, order_id, OrderStatus::PendingApproval, "tes").await;
        assert!(second.expect("Reject kedua error").is_none());
        assert_eq!(stok_tersisa(&pool, stok_id).await, 100);

        cleanup(&pool, user_id, stok_id, order_id).await;
    }

    #[tokio::test]
    #[ignore = "butuh PostgreSQL"]
    async fn test_transition_status_is_compare_and_swap() {
        let pool = test_pool().await;
        let (user_id, stok_id, order_id) = seed_order(&pool, 50, 10).await;

        let moved = transition_status(
            &pool,
            order_id,
            OrderStatus::PendingApproval,
            OrderStatus::Approved,
        )
        .await
        .expect("Transisi pertama error");
        assert_eq!(moved.expect("Harus berhasil").status, "approved");

        // Pemenang sudah menggeser status, pengulangan dari status lama gagal
        let lost = transition_status(
            &pool,
            order_id,
            OrderStatus::PendingApproval,
            OrderStatus::Approved,
        )
        .await
        .expect("Transisi kedua error");
        assert!(lost.is_none());

        cleanup(&pool, user_id, stok_id, order_id).await;
    }
}
