//! Authentication endpoints and session lifecycle

use maqraa_api::dto::auth::{
    LoginData, LoginRequest, RefreshRequest, SessionUser, VerifyCodeRequest,
};

use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::session::Session;

/// Result of the first login step.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Credentials were enough; the session is installed.
    SignedIn(Session),
    /// Backend sent a one-time code; call `verify_code` next.
    CodeRequired { phone: String },
}

fn session_from(data: LoginData, fallback_user: Option<SessionUser>) -> Result<Session> {
    let tokens = data
        .tokens
        .ok_or_else(|| ClientError::Decode("login response without tokens".to_string()))?;
    let user = data
        .user
        .or(fallback_user)
        .ok_or_else(|| ClientError::Decode("login response without a user".to_string()))?;
    Ok(Session { user, tokens })
}

impl HttpClient {
    /// First login step: submit credentials.
    ///
    /// On a direct grant the session is installed and persisted; when the
    /// backend requires code verification nothing is installed yet.
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects the
    /// credentials.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome> {
        let data: LoginData = self.post("/api/auth/login", request).await?;
        if data.requires_verification {
            return Ok(LoginOutcome::CodeRequired {
                phone: request.phone.clone(),
            });
        }
        let session = session_from(data, None)?;
        self.install_session(session.clone())?;
        Ok(LoginOutcome::SignedIn(session))
    }

    /// Second login step: submit the one-time code.
    ///
    /// # Errors
    /// Returns an error if the request fails or the code is rejected.
    pub async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<Session> {
        let data: LoginData = self.post("/api/auth/verify-code", request).await?;
        let session = session_from(data, None)?;
        self.install_session(session.clone())?;
        Ok(session)
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// # Errors
    /// Returns [`ClientError::NotAuthenticated`] without a session, or
    /// the backend's rejection of the refresh token.
    pub async fn refresh_session(&self) -> Result<Session> {
        let current = self.session().ok_or(ClientError::NotAuthenticated)?;
        let request = RefreshRequest {
            refresh_token: current.tokens.refresh_token.clone(),
        };
        let data: LoginData = self.post("/api/auth/refresh", &request).await?;
        // refresh responses often omit the user; keep the one we have
        let session = session_from(data, Some(current.user))?;
        self.install_session(session.clone())?;
        Ok(session)
    }

    /// Drop the session locally and clear the persisted copy.
    ///
    /// # Errors
    /// Returns an error if the persisted session cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.drop_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maqraa_api::dto::auth::TokenPair;

    #[test]
    fn session_requires_tokens() {
        let data = LoginData {
            requires_verification: false,
            tokens: None,
            user: Some(SessionUser::default()),
        };
        assert!(matches!(session_from(data, None), Err(ClientError::Decode(_))));
    }

    #[test]
    fn fallback_user_fills_a_token_only_response() {
        let data = LoginData {
            requires_verification: false,
            tokens: Some(TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
                expires_at: None,
            }),
            user: None,
        };
        let previous = SessionUser {
            id: 9,
            ..SessionUser::default()
        };
        let session = session_from(data, Some(previous)).unwrap();
        assert_eq!(session.user.id, 9);
        assert_eq!(session.tokens.access_token, "a");
    }
}
