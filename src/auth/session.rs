//! Token issuance and refresh rotation

use crate::auth::jwt::{create_token, validate_token};
use crate::auth::models::User;
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::store::UserStore;

/// A freshly issued access/refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Outcome of a refresh attempt
#[derive(Debug)]
pub enum RefreshOutcome {
    /// A new pair was issued and the stored session replaced
    Rotated(TokenPair),
    /// No refresh token was presented - the caller is simply logged out
    NoSession,
    /// The presented token failed verification, ownership or session match
    Rejected,
}

/// Sign an access/refresh pair for a user without touching the store
fn sign_pair(auth: &AuthConfig, user: &User) -> Result<TokenPair> {
    let access = create_token(&user.id, user.role, &auth.access_secret, auth.access_ttl())?;
    let refresh = create_token(&user.id, user.role, &auth.refresh_secret, auth.refresh_ttl())?;
    Ok(TokenPair { access, refresh })
}

/// Issue a new token pair for a user and record the refresh token as the
/// user's current session.
///
/// This overwrites any previously stored refresh token: the old one stops
/// rotating even though its signature would still verify.
pub async fn issue_pair(auth: &AuthConfig, users: &UserStore, user: &User) -> Result<TokenPair> {
    let pair = sign_pair(auth, user)?;
    users.set_refresh_token(&user.id, &pair.refresh).await?;
    Ok(pair)
}

/// Rotate a presented refresh token into a new pair.
///
/// The caller only learns whether rotation happened; the specific reason for
/// a rejection is logged but never exposed, so a client cannot probe which
/// check failed.
pub async fn rotate(
    auth: &AuthConfig,
    users: &UserStore,
    presented: Option<&str>,
) -> RefreshOutcome {
    let Some(token) = presented else {
        return RefreshOutcome::NoSession;
    };

    match try_rotate(auth, users, token).await {
        Ok(pair) => RefreshOutcome::Rotated(pair),
        Err(err) => {
            tracing::debug!(error = %err, "refresh rotation rejected");
            RefreshOutcome::Rejected
        }
    }
}

async fn try_rotate(auth: &AuthConfig, users: &UserStore, token: &str) -> Result<TokenPair> {
    let claims = validate_token(token, &auth.refresh_secret)?;
    let user = users
        .find_by_id(&claims.sub)
        .await
        .ok_or(Error::UnknownIdentity)?;

    // Sign the replacement from the stored record: the store, not the
    // client's claims, is authoritative for the role.
    let pair = sign_pair(auth, &user)?;

    // Compare-and-swap on the stored token. Of two rotations racing on the
    // same session, exactly one wins the swap.
    if users.swap_refresh_token(&user.id, token, &pair.refresh).await {
        Ok(pair)
    } else {
        Err(Error::RefreshRejected)
    }
}

/// Drop the stored session for the holder of a refresh token.
///
/// Used by logout. A token that does not verify is ignored; logout still
/// succeeds from the client's point of view either way.
pub async fn invalidate(auth: &AuthConfig, users: &UserStore, presented: Option<&str>) {
    let Some(token) = presented else {
        return;
    };
    match validate_token(token, &auth.refresh_secret) {
        Ok(claims) => users.clear_refresh_token(&claims.sub).await,
        Err(err) => tracing::debug!(error = %err, "logout presented an unverifiable token"),
    }
}
