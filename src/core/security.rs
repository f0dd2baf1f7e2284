use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use poem::Request;
use poem_openapi::{auth::Bearer, SecurityScheme};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{settings::Config, AppState};

/// password hashing
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    // Argon2 with default params (Argon2id v19)
    let argon2 = Argon2::default();

    // Hash password to PHC string ($argon2id$v=19$...)
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// password hash verification
pub fn verify_hash_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let verify = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(verify)
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(String),
}

pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// username
    pub sub: String,
    /// credential id
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, credential_id: Uuid, profile_id: Uuid, config: &Config) -> Self {
        let exp = (Utc::now() + Duration::minutes(config.jwt_exp as i64)).timestamp();

        Self {
            sub: username.to_string(),
            user_id: credential_id,
            profile_id,
            exp,
        }
    }
}

/// Sign claims with HS256
pub fn encode_token(claims: &Claims, jwt_secret: &str) -> Result<String, TokenError> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)?;
    Ok(token)
}

/// Verify signature then expiry. A token is rejected from the second its `exp` is reached.
pub fn decode_token(token: &str, jwt_secret: &str) -> Result<Claims, TokenError> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    let token_data = decode::<Claims>(token, &keys.decoding, &validation)
        .map_err(|err| TokenError::Invalid(err.to_string()))?;
    if token_data.claims.exp <= Utc::now().timestamp() {
        return Err(TokenError::Invalid("token expired".to_string()));
    }
    Ok(token_data.claims)
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

pub fn issue_token(
    username: &str,
    credential_id: Uuid,
    profile_id: Uuid,
    config: &Config,
) -> Result<IssuedToken, TokenError> {
    let claims = Claims::new(username, credential_id, profile_id, config);
    let token = encode_token(&claims, &config.jwt_secret)?;
    Ok(IssuedToken { token, claims })
}

/// Bearer authorization, resolves to the verified token claims
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "bearer_checker")]
pub struct BearerAuthorization(pub Claims);

pub async fn bearer_checker(req: &Request, bearer: Bearer) -> Option<Claims> {
    let state = req.data::<Arc<AppState>>()?;
    match decode_token(&bearer.token, &state.config.jwt_secret) {
        Ok(claims) => Some(claims),
        Err(err) => {
            tracing::debug!("reject bearer token: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod test_hash_password {
    use super::*;

    #[test]
    fn test_hashing_password() {
        let password = "secretpassword";
        let hash = hash_password(&password);
        assert!(hash.is_ok());
        let hash = hash.unwrap();
        assert_ne!(hash, password);
        let verify = verify_hash_password(&password, &hash);
        assert!(verify.is_ok());
        assert!(verify.unwrap());
        let verify_false = verify_hash_password("wrongpassword", &hash);
        assert!(verify_false.is_ok());
        assert_eq!(verify_false.unwrap(), false);
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_hash_password("pw", "not-a-phc-string").is_err());
    }
}
