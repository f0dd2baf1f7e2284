//! Registration and login against the credential table.
//!
//! Both operations run inside the caller's transaction; the caller commits.

use anyhow::anyhow;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        security::{hash_password, issue_token, verify_hash_password, IssuedToken, TokenError},
        sqlx_utils::is_unique_violation,
    },
    model::{
        credential::Credential,
        profile::{NewProfile, Profile},
    },
    repository::{
        credential::{create_credential, get_credential_by_username, link_credential_profile},
        profile::{create_profile, get_profile_by_email},
    },
    settings::Config,
};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid username or password")]
    Unauthorized,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub struct Registered {
    pub credential: Credential,
    pub profile: Profile,
    pub token: IssuedToken,
}

pub struct LoggedIn {
    pub credential: Credential,
    pub token: IssuedToken,
}

fn conflict_or_internal(err: anyhow::Error, message: &str) -> CredentialError {
    if is_unique_violation(&err) {
        CredentialError::Conflict(message.to_string())
    } else {
        CredentialError::Internal(err)
    }
}

fn validate_input(username: &str, password: &str) -> Result<(), CredentialError> {
    if username.trim().is_empty() {
        return Err(CredentialError::BadRequest(
            "username must not be empty".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(CredentialError::BadRequest(
            "password must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Profile named after `username`, with a per-id email when `<username>@example.com` is taken.
async fn placeholder_profile(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    id: &Uuid,
) -> anyhow::Result<NewProfile> {
    let mut new_profile = NewProfile::for_username(username);
    if get_profile_by_email(tx, &new_profile.email).await?.is_some() {
        new_profile.email = format!("{}+{}@example.com", username, id.simple());
    }
    Ok(new_profile)
}

/// Create a credential together with its own empty profile, then mint a token for it.
pub async fn register(
    tx: &mut Transaction<'_, Postgres>,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<Registered, CredentialError> {
    validate_input(username, password)?;
    if get_credential_by_username(tx, username).await?.is_some() {
        return Err(CredentialError::Conflict(
            "Username already registered".to_string(),
        ));
    }
    let profile_id = Uuid::now_v7();
    let new_profile = placeholder_profile(tx, username, &profile_id).await?;

    let password_hash =
        hash_password(password).map_err(|err| anyhow!("hash password: {}", err))?;
    let profile = create_profile(tx, Some(profile_id), new_profile).await?;
    let credential = create_credential(tx, username, password_hash, Some(profile.id))
        .await
        .map_err(|err| conflict_or_internal(err, "Username already registered"))?;

    let token = issue_token(&credential.username, credential.id, profile.id, config)?;
    tracing::info!(
        "registered {} with profile {}",
        credential.username,
        profile.id
    );
    Ok(Registered {
        credential,
        profile,
        token,
    })
}

/// Check the password and mint a token for the credential's linked profile.
pub async fn login(
    tx: &mut Transaction<'_, Postgres>,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<LoggedIn, CredentialError> {
    let mut credential = match get_credential_by_username(tx, username).await? {
        Some(val) => val,
        None => return Err(CredentialError::Unauthorized),
    };
    let is_valid = verify_hash_password(password, &credential.password_hash)
        .map_err(|err| anyhow!("verify password: {}", err))?;
    if !is_valid {
        return Err(CredentialError::Unauthorized);
    }

    let profile_id = resolve_profile_id(tx, config, &mut credential).await?;
    let token = issue_token(&credential.username, credential.id, profile_id, config)?;
    tracing::info!("login {} for profile {}", credential.username, profile_id);
    Ok(LoggedIn { credential, token })
}

/// Linked profile, else the configured default profile, else a freshly provisioned one.
async fn resolve_profile_id(
    tx: &mut Transaction<'_, Postgres>,
    config: &Config,
    credential: &mut Credential,
) -> anyhow::Result<Uuid> {
    if let Some(val) = credential.profile_id {
        return Ok(val);
    }
    if let Some(val) = config.default_profile_id {
        tracing::warn!(
            "credential {} has no profile, using default profile {}",
            credential.username,
            val
        );
        return Ok(val);
    }

    let id = Uuid::now_v7();
    let new_profile = placeholder_profile(tx, &credential.username, &id).await?;
    let profile = create_profile(tx, Some(id), new_profile).await?;
    link_credential_profile(tx, credential, profile.id).await?;
    tracing::info!(
        "provisioned profile {} for {}",
        profile.id,
        credential.username
    );
    Ok(profile.id)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::{
        core::{security::decode_token, test_utils::test_config},
        repository::{credential::create_credential, profile::get_profile_by_id},
    };

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_register_then_login(pool: PgPool) -> anyhow::Result<()> {
        let config = test_config();
        let mut tx = pool.begin().await?;
        let registered = register(&mut tx, &config, "alice", "pw1").await?;
        tx.commit().await?;
        assert_eq!(registered.credential.profile_id, Some(registered.profile.id));
        assert_eq!(registered.profile.full_name, "alice");
        let claims = decode_token(&registered.token.token, &config.jwt_secret)?;
        assert_eq!(claims.profile_id, registered.profile.id);
        assert_eq!(claims.user_id, registered.credential.id);

        let mut tx = pool.begin().await?;
        let logged_in = login(&mut tx, &config, "alice", "pw1").await?;
        assert_eq!(logged_in.token.claims.profile_id, registered.profile.id);
        assert!(matches!(
            login(&mut tx, &config, "alice", "wrong").await,
            Err(CredentialError::Unauthorized)
        ));
        assert!(matches!(
            login(&mut tx, &config, "nobody", "pw1").await,
            Err(CredentialError::Unauthorized)
        ));
        Ok(())
    }

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_register_twice_conflicts(pool: PgPool) -> anyhow::Result<()> {
        let config = test_config();
        let mut tx = pool.begin().await?;
        register(&mut tx, &config, "alice", "pw1").await?;
        tx.commit().await?;

        let mut tx = pool.begin().await?;
        let res = register(&mut tx, &config, "alice", "another").await;
        assert!(matches!(res, Err(CredentialError::Conflict(_))));
        Ok(())
    }

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_register_with_taken_email(pool: PgPool) -> anyhow::Result<()> {
        let config = test_config();
        let mut tx = pool.begin().await?;
        let other = create_profile(&mut tx, None, NewProfile::for_username("carol")).await?;
        let registered = register(&mut tx, &config, "carol", "pw").await?;
        assert_ne!(registered.profile.id, other.id);
        assert_eq!(
            registered.profile.email,
            format!("carol+{}@example.com", registered.profile.id.simple())
        );
        assert_eq!(registered.credential.profile_id, Some(registered.profile.id));
        Ok(())
    }

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_login_unlinked_credential(pool: PgPool) -> anyhow::Result<()> {
        let mut config = test_config();
        let mut tx = pool.begin().await?;
        create_credential(&mut tx, "legacy", hash_password("pw").unwrap(), None).await?;
        tx.commit().await?;

        // configured default wins
        let default_profile_id = Uuid::now_v7();
        config.default_profile_id = Some(default_profile_id);
        let mut tx = pool.begin().await?;
        let logged_in = login(&mut tx, &config, "legacy", "pw").await?;
        assert_eq!(logged_in.token.claims.profile_id, default_profile_id);
        tx.rollback().await?;

        // otherwise a profile is provisioned and linked
        config.default_profile_id = None;
        let mut tx = pool.begin().await?;
        let logged_in = login(&mut tx, &config, "legacy", "pw").await?;
        let profile_id = logged_in.token.claims.profile_id;
        assert_eq!(logged_in.credential.profile_id, Some(profile_id));
        assert!(get_profile_by_id(&mut tx, &profile_id).await?.is_some());
        Ok(())
    }

    #[test]
    fn test_validate_input() {
        assert!(validate_input("alice", "pw").is_ok());
        assert!(matches!(
            validate_input("  ", "pw"),
            Err(CredentialError::BadRequest(_))
        ));
        assert!(matches!(
            validate_input("alice", ""),
            Err(CredentialError::BadRequest(_))
        ));
    }
}
