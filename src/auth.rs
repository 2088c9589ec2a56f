//! Token-based caller identity. Callers are resolved explicitly per request
//! and threaded into operations; there is no ambient authenticated user.

use anyhow::{Result, anyhow};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{auth_token, social_profile};

pub const TOKEN_KEY_LEN: usize = 32;
pub const TOKEN_SCHEME: &str = "Token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid or missing authentication token")]
    Unauthorized,
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Freshly issued credential key: 32 lowercase hex characters.
pub fn issue_token_key() -> String {
    let key = Uuid::new_v4().simple().to_string();
    assert_eq!(key.len(), TOKEN_KEY_LEN, "Token key length invariant");
    key
}

/// Parses an `Authorization: Token <key>` header value.
pub fn parse_token_header(header: Option<&str>) -> Result<&str> {
    let value = header.ok_or_else(|| anyhow!("Missing Authorization header"))?;
    let mut parts = value.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case(TOKEN_SCHEME) {
        return Err(anyhow!("Unsupported authorization scheme"));
    }
    let key = parts.next().map(str::trim).unwrap_or_default();
    if key.is_empty() || key.len() > 64 {
        return Err(anyhow!("Malformed token key"));
    }
    Ok(key)
}

/// Resolves a token key to the caller's profile, or Unauthorized if either
/// the token or the profile it should own is missing.
pub async fn resolve_caller(
    database: &DatabaseConnection,
    token_key: &str,
) -> Result<social_profile::Model, AuthError> {
    let token = auth_token::Entity::find_by_id(token_key.to_string())
        .one(database)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    let profile = social_profile::Entity::find()
        .filter(social_profile::Column::AccountId.eq(token.account_id))
        .one(database)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_keys_are_hex_and_unique() {
        let first = issue_token_key();
        let second = issue_token_key();
        assert_eq!(first.len(), TOKEN_KEY_LEN);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn token_header_parses_scheme_and_key() {
        assert_eq!(
            parse_token_header(Some("Token abc123")).expect("valid header"),
            "abc123"
        );
        assert_eq!(
            parse_token_header(Some("token abc123")).expect("scheme is case-insensitive"),
            "abc123"
        );
    }

    #[test]
    fn token_header_rejects_bad_input() {
        assert!(parse_token_header(None).is_err());
        assert!(parse_token_header(Some("Bearer abc123")).is_err());
        assert!(parse_token_header(Some("Token")).is_err());
        assert!(parse_token_header(Some("Token ")).is_err());
        let oversized = format!("Token {}", "a".repeat(65));
        assert!(parse_token_header(Some(&oversized)).is_err());
    }
}
