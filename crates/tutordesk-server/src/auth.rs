//! HTTP Basic-auth verification for admin routes.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// Credentials accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
  #[error("unauthorized")]
  Unauthorized,
}

impl IntoResponse for AuthError {
  fn into_response(self) -> Response {
    (
      StatusCode::UNAUTHORIZED,
      [(header::WWW_AUTHENTICATE, "Basic realm=\"tutordesk\"")],
      "unauthorized",
    )
      .into_response()
  }
}

/// Verify credentials directly from headers.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<(), AuthError> {
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;

  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(AuthError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(AuthError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| AuthError::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| AuthError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(AuthError::Unauthorized)?;

  if username != config.username {
    return Err(AuthError::Unauthorized);
  }

  let parsed_hash =
    PasswordHash::new(&config.password_hash).map_err(|_| AuthError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| AuthError::Unauthorized)?;

  Ok(())
}
