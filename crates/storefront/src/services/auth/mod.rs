//! Authentication service.
//!
//! Mock sign-in and sign-up: any well-formed email with a non-empty password
//! is accepted after a short delay, and the resulting user record becomes the
//! persisted session.

mod error;

pub use error::AuthError;

use quickmart_core::{Email, User, UserId};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::Latency;
use crate::stores::SessionStore;

/// Id given to every signed-in user.
pub const MOCK_USER_ID: &str = "123456";

/// Name given to users who sign in without registering.
pub const MOCK_USER_NAME: &str = "John Doe";

const AUTH_DELAY_MS: u64 = 1000;

/// Authentication service.
///
/// Validates credentials and writes the session user through the
/// [`SessionStore`].
pub struct AuthService<'a> {
    session: &'a SessionStore,
    latency: Latency,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(session: &'a SessionStore, latency: Latency) -> Self {
        Self { session, latency }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingPassword` if the password is empty.
    /// Returns `AuthError::Storage` if the session cannot be persisted.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        self.latency.wait(AUTH_DELAY_MS).await;

        let user = self
            .session
            .set(User {
                id: UserId::new(MOCK_USER_ID),
                name: MOCK_USER_NAME.to_string(),
                email,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            email_domain = user.email.domain(),
            "User signed in"
        );
        Ok(user)
    }

    /// Register and sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` if the name is blank, plus the
    /// errors of [`AuthService::sign_in`].
    #[instrument(skip_all)]
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(email)?;
        validate_password(password)?;

        self.latency.wait(AUTH_DELAY_MS).await;

        let user = self
            .session
            .set(User {
                id: UserId::new(MOCK_USER_ID),
                name: name.to_string(),
                email,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            email_domain = user.email.domain(),
            "User signed up"
        );
        Ok(user)
    }

    /// Sign out and forget the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the stored session cannot be removed.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.session.clear().await?;
        tracing::info!("User signed out");
        Ok(())
    }
}

fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::storage::DeviceStorage;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    /// Log output written to a shared buffer.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_sign_in_uses_mock_identity() {
        let session = SessionStore::load(DeviceStorage::memory()).await;
        let auth = AuthService::new(&session, Latency::none());

        let user = auth
            .sign_in(" shopper@quickmart.example ", &secret("hunter2"))
            .await
            .unwrap();
        assert_eq!(user.id.as_str(), MOCK_USER_ID);
        assert_eq!(user.name, MOCK_USER_NAME);
        assert_eq!(user.email.as_str(), "shopper@quickmart.example");
        assert_eq!(session.current().await, Some(user));
    }

    #[tokio::test]
    async fn test_sign_up_keeps_name() {
        let session = SessionStore::load(DeviceStorage::memory()).await;
        let auth = AuthService::new(&session, Latency::none());

        let user = auth
            .sign_up("Ada", "ada@example.com", &secret("pw"))
            .await
            .unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn test_logs_carry_email_domain_only() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let session = SessionStore::load(DeviceStorage::memory()).await;
        let auth = AuthService::new(&session, Latency::none());
        auth.sign_up("Ada Lovelace", "ada@example.com", &secret("pw"))
            .await
            .unwrap();
        auth.sign_in("grace@example.org", &secret("pw")).await.unwrap();

        let text = logs.text();
        assert!(text.contains("example.com"));
        assert!(text.contains("example.org"));
        assert!(!text.contains("ada@"));
        assert!(!text.contains("grace@"));
        assert!(!text.contains("Lovelace"));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let session = SessionStore::load(DeviceStorage::memory()).await;
        let auth = AuthService::new(&session, Latency::none());

        assert!(matches!(
            auth.sign_in("not-an-email", &secret("pw")).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.sign_in("a@b.c", &secret("")).await,
            Err(AuthError::MissingPassword)
        ));
        assert!(matches!(
            auth.sign_up("  ", "a@b.c", &secret("pw")).await,
            Err(AuthError::MissingName)
        ));
        assert!(session.current().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let storage = DeviceStorage::memory();
        let session = SessionStore::load(storage.clone()).await;
        let auth = AuthService::new(&session, Latency::none());
        auth.sign_in("a@b.c", &secret("pw")).await.unwrap();

        auth.sign_out().await.unwrap();
        assert!(session.current().await.is_none());
        assert!(SessionStore::load(storage).await.current().await.is_none());
    }
}
