//! Fixed-credential session for desktop tools and scripts.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    session::SessionProvider,
};

/// Environment variable holding a `drive.file`-scoped access token
pub const ACCESS_TOKEN_ENV: &str = "REDRIVE_ACCESS_TOKEN";

/// Environment variable holding the e-mail address of the token's user
pub const USER_EMAIL_ENV: &str = "REDRIVE_USER_EMAIL";

/// Session backed by an already-acquired token.
///
/// Token refresh is out of scope; hosts needing it implement
/// [`SessionProvider`] over their own OAuth flow.
#[derive(Clone)]
pub struct StaticSession {
    access_token: String,
    user_email: String,
}

impl StaticSession {
    pub fn new(access_token: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_email: user_email.into(),
        }
    }

    /// Read the token and e-mail from `REDRIVE_ACCESS_TOKEN` / `REDRIVE_USER_EMAIL`
    pub fn from_env() -> Result<Self> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or_else(|| BridgeError::Unauthenticated(format!("{} is not set", key)))
        };

        Ok(Self::new(read(ACCESS_TOKEN_ENV)?, read(USER_EMAIL_ENV)?))
    }
}

impl std::fmt::Debug for StaticSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSession")
            .field("access_token", &"[REDACTED]")
            .field("user_email", &self.user_email)
            .finish()
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> Result<String> {
        Ok(self.access_token.clone())
    }

    async fn effective_user_email(&self) -> Result<String> {
        Ok(self.user_email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_session_returns_credentials() {
        let session = StaticSession::new("ya29.token", "dave@example.org");

        assert_eq!(session.access_token().await.unwrap(), "ya29.token");
        assert_eq!(
            session.effective_user_email().await.unwrap(),
            "dave@example.org"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let session = StaticSession::new("ya29.token", "dave@example.org");
        let rendered = format!("{:?}", session);

        assert!(!rendered.contains("ya29"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
