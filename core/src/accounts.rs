//! User accounts: sign-up and login.
//!
//! Passwords are stored and compared in plaintext. This is a catalog demo
//! account model, not an authentication system.

use crate::error::{CatalogError, Result};
use crate::metrics::{LOGINS, USERS_CREATED};
use crate::storage::Storage;
use crate::types::{NewUser, PublicUser};
use crate::validation::{Credentials, SignUpInput};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sign-up and login.
///
/// Username uniqueness is checked and the user inserted under one lock, so
/// two concurrent sign-ups cannot claim the same name.
pub struct Accounts {
    storage: Arc<dyn Storage>,
    gate: Mutex<()>,
}

impl Accounts {
    /// Create the account service over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            gate: Mutex::new(()),
        }
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] for an empty username or password or
    ///   an implausible email
    /// - [`CatalogError::DuplicateUsername`] if the name is taken
    /// - [`CatalogError::Storage`] if the backend fails
    pub async fn sign_up(&self, input: SignUpInput) -> Result<PublicUser> {
        let user = NewUser::try_from(input)?;

        let _guard = self.gate.lock().await;
        if self
            .storage
            .find_user_by_username(&user.username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %user.username, "Sign-up rejected: username taken");
            return Err(CatalogError::DuplicateUsername);
        }
        let user = self.storage.insert_user(user).await?;

        metrics::counter!(USERS_CREATED).increment(1);
        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user.public())
    }

    /// Check credentials and return the matching account.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if username or password is missing
    /// - [`CatalogError::Unauthorized`] for an unknown user or wrong password
    /// - [`CatalogError::Storage`] if the backend fails
    pub async fn login(&self, credentials: Credentials) -> Result<PublicUser> {
        credentials.validate()?;

        let user = self
            .storage
            .find_user_by_username(&credentials.username)
            .await?
            .filter(|user| user.password == credentials.password);

        let Some(user) = user else {
            metrics::counter!(LOGINS, "outcome" => "rejected").increment(1);
            tracing::debug!(username = %credentials.username, "Login rejected");
            return Err(CatalogError::Unauthorized);
        };

        metrics::counter!(LOGINS, "outcome" => "accepted").increment(1);
        Ok(user.public())
    }
}

impl std::fmt::Debug for Accounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accounts").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStorage;

    fn accounts() -> Accounts {
        Accounts::new(Arc::new(InMemoryStorage::default()))
    }

    fn sign_up(username: &str) -> SignUpInput {
        SignUpInput {
            username: username.to_string(),
            password: "password123".to_string(),
            email: format!("{username}@university.edu"),
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_returns_public_view() {
        let accounts = accounts();
        let user = accounts.sign_up(sign_up("ada")).await.unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.email, "ada@university.edu");
        assert_eq!(user.id.get(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let accounts = accounts();
        accounts.sign_up(sign_up("ada")).await.unwrap();
        assert_eq!(
            accounts.sign_up(sign_up("ada")).await.unwrap_err(),
            CatalogError::DuplicateUsername
        );
    }

    #[tokio::test]
    async fn login_checks_password() {
        let accounts = accounts();
        let user = accounts.sign_up(sign_up("ada")).await.unwrap();

        assert_eq!(
            accounts
                .login(credentials("ada", "password123"))
                .await
                .unwrap(),
            user
        );
        assert_eq!(
            accounts.login(credentials("ada", "wrong")).await.unwrap_err(),
            CatalogError::Unauthorized
        );
        assert_eq!(
            accounts
                .login(credentials("nobody", "password123"))
                .await
                .unwrap_err(),
            CatalogError::Unauthorized
        );
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let accounts = accounts();
        assert!(matches!(
            accounts.login(credentials("ada", "")).await,
            Err(CatalogError::Validation { .. })
        ));
    }
}
