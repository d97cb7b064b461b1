//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs carrying the username, an `is_staff` flag, and a
//! `token_type` discriminator so refresh tokens cannot be replayed as
//! access tokens. The staff account is provisioned through configuration;
//! token issuance and refresh are the only endpoints that touch it.
//!
//! Two extractors express the access policy: [`StaffUser`] rejects anything
//! but a valid staff access token (mutating endpoints), while [`Caller`]
//! downgrades gracefully to [`Role::Public`] when no credentials are
//! presented (read endpoints, where staff see inactive rows).

use crate::api::AppState;
use crate::core::Role;
use crate::errors::{Error, Result};
use axum::Json;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Access token lifetime, matching the original deployment's JWT settings.
const ACCESS_TOKEN_MINUTES: i64 = 60;
/// Refresh token lifetime.
const REFRESH_TOKEN_DAYS: i64 = 1;

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claim set for both access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Whether the principal may mutate catalog data
    pub is_staff: bool,
    /// `"access"` or `"refresh"`
    pub token_type: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Credentials for `POST /api/token/`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
}

/// Response of `POST /api/token/`.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    /// Long-lived refresh token
    pub refresh: String,
    /// Short-lived access token
    pub access: String,
}

/// Request body for `POST /api/token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// A refresh token from a previous `POST /api/token/`
    pub refresh: String,
}

/// Response of `POST /api/token/refresh/`.
#[derive(Debug, Serialize)]
pub struct AccessToken {
    /// Fresh access token
    pub access: String,
}

/// Signs a token for the given principal.
pub fn issue_token(
    secret: &str,
    username: &str,
    is_staff: bool,
    token_type: &str,
    lifetime: chrono::Duration,
) -> Result<String> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        is_staff,
        token_type: token_type.to_string(),
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(Into::into)
}

/// Verifies a token's signature and expiry and returns its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Signs an access token for a staff principal (also used by tests).
pub fn issue_access_token(secret: &str, username: &str, is_staff: bool) -> Result<String> {
    issue_token(
        secret,
        username,
        is_staff,
        TOKEN_TYPE_ACCESS,
        chrono::Duration::minutes(ACCESS_TOKEN_MINUTES),
    )
}

/// `POST /api/token/` - exchanges the staff credentials for a token pair.
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenPair>> {
    let config = &state.config;
    if payload.username != config.admin_username || payload.password != config.admin_password {
        return Err(Error::Unauthorized);
    }

    let access = issue_access_token(&config.jwt_secret, &payload.username, true)?;
    let refresh = issue_token(
        &config.jwt_secret,
        &payload.username,
        true,
        TOKEN_TYPE_REFRESH,
        chrono::Duration::days(REFRESH_TOKEN_DAYS),
    )?;

    Ok(Json(TokenPair { refresh, access }))
}

/// `POST /api/token/refresh/` - exchanges a refresh token for a new access
/// token.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AccessToken>> {
    let claims = verify_token(&state.config.jwt_secret, &payload.refresh)?;
    if claims.token_type != TOKEN_TYPE_REFRESH {
        return Err(Error::Unauthorized);
    }

    let access = issue_access_token(&state.config.jwt_secret, &claims.sub, claims.is_staff)?;
    Ok(Json(AccessToken { access }))
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| Error::Unauthorized)?;
    let token = value.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;
    Ok(Some(token))
}

/// Extractor for mutating endpoints: requires a valid staff access token.
/// Missing or undecodable credentials are 401; a valid token that is not a
/// staff access token is 403 - existence of the resource is never hidden
/// behind a 404.
#[derive(Debug, Clone)]
pub struct StaffUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for StaffUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(Error::Unauthorized)?;
        let claims = verify_token(&state.config.jwt_secret, token)?;

        if claims.token_type != TOKEN_TYPE_ACCESS || !claims.is_staff {
            return Err(Error::Forbidden);
        }

        Ok(Self(claims))
    }
}

/// Extractor for read endpoints: resolves the caller's [`Role`].
/// Anonymous requests read as [`Role::Public`]; a presented-but-invalid
/// token is still rejected rather than silently downgraded.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Role);

#[axum::async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(Self(Role::Public));
        };

        let claims = verify_token(&state.config.jwt_secret, token)?;
        let role = if claims.token_type == TOKEN_TYPE_ACCESS && claims.is_staff {
            Role::Staff
        } else {
            Role::Public
        };
        Ok(Self(role))
    }
}
