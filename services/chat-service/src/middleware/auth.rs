use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use shared::utils::jwt;

use crate::config::AppConfig;
use crate::error::AppError;

// User yang sudah terautentikasi lewat bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "Admin"
    }
}

// Admin back-office, melayani semua thread percakapan
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub user_id: i32,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthorized("Tidak Ada Token"))?;

        let claims = jwt::validate_token(bearer.token(), &config.jwt_secret)
            .map_err(|_| AppError::unauthorized("Token Tidak Valid"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl<S> FromRequestParts<S> for AuthAdmin
where
    AppConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AppError::forbidden("Akses Ditolak!, Hanya Admin"));
        }

        Ok(AuthAdmin {
            user_id: user.user_id,
        })
    }
}
