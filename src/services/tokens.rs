//! JWT access and refresh tokens.
//!
//! Tokens are HS256-signed and carry the account id as `sub`. Access tokens
//! authenticate API requests; refresh tokens can only be exchanged for a new
//! access token.

use crate::models::Account;
use crate::services::auth;
use crate::services::error::{ServiceError, ServiceResult};
use crate::Database;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ISSUER: &str = "media-vault";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Lifetimes for issued tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    pub fn new(access_minutes: i64, refresh_days: i64) -> Self {
        Self {
            access: Duration::minutes(access_minutes),
            refresh: Duration::days(refresh_days),
        }
    }

    fn for_type(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access,
            TokenType::Refresh => self.refresh,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self::new(60, 7)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    /// Unique per token so two tokens issued in the same second still differ.
    pub jti: Uuid,
    pub token_type: TokenType,
}

impl Claims {
    pub fn new(account_id: Uuid, token_type: TokenType, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        }
    }
}

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    pub admin: bool,
}

pub fn create_token(claims: &Claims, secret: &str) -> ServiceResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("Failed to create token: {}", e)))
}

pub fn validate_token(token: &str, secret: &str, expected: TokenType) -> ServiceResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            ServiceError::Authentication("Token has expired".to_string())
        }
        _ => ServiceError::Authentication("Token is invalid".to_string()),
    })?;

    if data.claims.token_type != expected {
        return Err(ServiceError::Authentication(format!(
            "Expected an {} token",
            expected.as_str()
        )));
    }

    Ok(data.claims)
}

pub fn issue_pair(
    account: &Account,
    secret: &str,
    lifetimes: TokenLifetimes,
) -> ServiceResult<TokenPair> {
    let access = Claims::new(account.id, TokenType::Access, lifetimes.for_type(TokenType::Access));
    let refresh = Claims::new(account.id, TokenType::Refresh, lifetimes.for_type(TokenType::Refresh));

    Ok(TokenPair {
        access: create_token(&access, secret)?,
        refresh: create_token(&refresh, secret)?,
        admin: account.is_admin(),
    })
}

/// Exchanges a refresh token for a fresh access token.
///
/// The account must still exist and be active.
pub fn refresh(
    db: &Database,
    refresh_token: &str,
    secret: &str,
    lifetimes: TokenLifetimes,
) -> ServiceResult<String> {
    let claims = validate_token(refresh_token, secret, TokenType::Refresh)?;
    let account = match auth::get_account(db, claims.sub) {
        Ok(account) if account.is_active => account,
        Ok(_) | Err(ServiceError::NotFound(_)) => {
            return Err(ServiceError::Authentication(
                "Account is no longer active".to_string(),
            ))
        }
        Err(e) => return Err(e),
    };

    let access = Claims::new(account.id, TokenType::Access, lifetimes.access);
    create_token(&access, secret)
}

/// Resolves an access token to the active account it was issued for.
pub fn authenticate(db: &Database, access_token: &str, secret: &str) -> ServiceResult<Account> {
    let claims = validate_token(access_token, secret, TokenType::Access)?;
    match auth::get_account(db, claims.sub) {
        Ok(account) if account.is_active => Ok(account),
        Ok(_) | Err(ServiceError::NotFound(_)) => Err(ServiceError::Authentication(
            "Account is no longer active".to_string(),
        )),
        Err(e) => Err(e),
    }
}
