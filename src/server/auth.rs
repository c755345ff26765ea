//! HTTP basic authentication for the book listing.
//!
//! Feeds and media are not guarded: podcast clients rarely send credentials
//! for enclosure URLs.

use crate::config::AuthConfig;
use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use shelfcast_common::{Error, Result};

/// Decode a `Basic` authorization header into `(username, password)`.
fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Check request headers against the configured credentials.
///
/// With no credentials configured every request passes.
pub fn check_basic_auth(auth: &AuthConfig, headers: &HeaderMap) -> Result<()> {
    let Some((username, password)) = auth.credentials() else {
        return Ok(());
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Unauthorized("credentials required".into()))?;

    let (user, pass) = parse_basic(provided)
        .ok_or_else(|| Error::Unauthorized("malformed authorization header".into()))?;

    let user_ok = constant_time_eq(user.as_bytes(), username.as_bytes());
    let pass_ok = constant_time_eq(pass.as_bytes(), password.as_bytes());
    if user_ok && pass_ok {
        Ok(())
    } else {
        tracing::debug!(user = %user, "Rejected listing credentials");
        Err(Error::Unauthorized("invalid credentials".into()))
    }
}
