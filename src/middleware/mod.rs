use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use base64::{Engine as _, engine::general_purpose};
use std::sync::Arc;

use crate::models::{User, UserId};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
}

/// Splits a `Basic` authorization header into `(email, password)`.
pub fn basic_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (email, password) = credentials.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

// Basic Auth extractor
impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let (email, password) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(basic_credentials)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let user = User::find_active_by_email(&email, &state.db)
            .await
            .map_err(|e| {
                tracing::error!("user lookup failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // bcrypt::verify blocks
        let verified = tokio::task::spawn_blocking(move || {
            let ok = user.verify_password(&password);
            (ok, user)
        })
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        match verified {
            (true, user) => Ok(AuthUser {
                user_id: user.id,
                email: user.email,
            }),
            (false, _) => {
                tracing::debug!("rejected credentials for {}", email);
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
