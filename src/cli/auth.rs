use anyhow::anyhow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::{
        credential_store::{register, Registered},
        security::hash_password,
    },
    model::{credential::Credential, profile::NewProfile},
    repository::{
        credential::{
            create_credential, get_credential_by_username, link_credential_profile,
            update_credential_password,
        },
        profile::{create_profile, get_profile_by_email, get_profile_by_id},
    },
    settings::Config,
};

/// Register a credential with its own profile, same as `POST /auth/register`
pub async fn create_user(
    pool: &PgPool,
    config: &Config,
    username: &str,
    password: &str,
) -> anyhow::Result<Registered> {
    let mut tx = pool.begin().await?;
    let registered = register(&mut tx, config, username, password).await?;
    tx.commit().await?;
    Ok(registered)
}

/// Make sure `username` exists with `password` and is linked to the default profile.
///
/// The default profile is `DEFAULT_PROFILE_ID` when configured, otherwise the
/// profile already linked to the credential. A missing profile is created.
/// Running it again only refreshes the password hash.
pub async fn ensure_admin(
    pool: &PgPool,
    config: &Config,
    username: &str,
    password: &str,
) -> anyhow::Result<Credential> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(anyhow!("username and password must not be empty"));
    }
    let mut tx = pool.begin().await?;
    let password_hash = hash_password(password).map_err(|err| anyhow!("hash password: {}", err))?;
    let existing = get_credential_by_username(&mut tx, username).await?;

    let profile_id = match config
        .default_profile_id
        .or(existing.as_ref().and_then(|x| x.profile_id))
    {
        Some(val) => val,
        None => Uuid::now_v7(),
    };
    if get_profile_by_id(&mut tx, &profile_id).await?.is_none() {
        let mut new_profile = NewProfile::for_username(username);
        if get_profile_by_email(&mut tx, &new_profile.email).await?.is_some() {
            new_profile.email = format!("{}+{}@example.com", username, profile_id.simple());
        }
        create_profile(&mut tx, Some(profile_id), new_profile).await?;
        tracing::info!("created profile {} for {}", profile_id, username);
    }

    let credential = match existing {
        Some(mut credential) => {
            update_credential_password(&mut tx, &mut credential, password_hash).await?;
            if credential.profile_id != Some(profile_id) {
                link_credential_profile(&mut tx, &mut credential, profile_id).await?;
            }
            credential
        }
        None => create_credential(&mut tx, username, password_hash, Some(profile_id)).await?,
    };
    tx.commit().await?;
    tracing::info!("{} is linked to profile {}", credential.username, profile_id);
    Ok(credential)
}
