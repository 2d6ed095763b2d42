//! Session Abstraction
//!
//! The host owns credential acquisition. The core only asks for two things:
//! a bearer token carrying the reduced (`drive.file`) scope, and the e-mail
//! address of the user the calls are made on behalf of.

use async_trait::async_trait;

use crate::error::Result;

/// Source of the effective user's identity and access token.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::session::SessionProvider;
///
/// async fn whoami(session: &dyn SessionProvider) -> Result<String> {
///     session.effective_user_email().await
/// }
/// ```
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// OAuth 2.0 access token sent as `Authorization: Bearer <token>`
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Unauthenticated`](crate::BridgeError::Unauthenticated)
    /// when no valid token can be produced.
    async fn access_token(&self) -> Result<String>;

    /// E-mail address of the user the session acts as
    async fn effective_user_email(&self) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        Session {}

        #[async_trait]
        impl SessionProvider for Session {
            async fn access_token(&self) -> Result<String>;
            async fn effective_user_email(&self) -> Result<String>;
        }
    }

    #[tokio::test]
    async fn test_session_is_object_safe() {
        let mut session = MockSession::new();
        session
            .expect_effective_user_email()
            .returning(|| Ok("owner@example.com".to_string()));

        let session: Box<dyn SessionProvider> = Box::new(session);
        assert_eq!(
            session.effective_user_email().await.unwrap(),
            "owner@example.com"
        );
    }
}
