//! Authentication service.
//!
//! Login, logout, and profile retrieval. Login persists the issued token
//! into the cookie jar; everything downstream (bearer injection, expiry
//! monitoring) reads it from there.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

use partsgrid_core::Email;

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::cookies::{self, CookieOptions, SharedJar};
use crate::models::{Profile, Session};
use crate::token::{self, DecodeError};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API call itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend issued a token this client cannot decode.
    #[error("login response carried an undecodable token: {0}")]
    MalformedToken(#[from] DecodeError),
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
}

/// Authentication operations over the shared client and jar.
pub struct AuthService<'a> {
    client: &'a ApiClient,
    jar: &'a SharedJar,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(client: &'a ApiClient, jar: &'a SharedJar) -> Self {
        Self { client, jar }
    }

    /// Log in and persist the issued token as a session cookie.
    ///
    /// A dealer-bound token also caches its dealer id for the resolver
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Api`] on transport/status failures and
    /// [`AuthError::MalformedToken`] when the issued token cannot be
    /// decoded (nothing is persisted in that case).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Session, AuthError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let data: LoginData = self.client.post("/auth/login", &body).await?.into_data()?;

        // Decode before persisting so a malformed token never lands in
        // the jar.
        let claims = token::decode(&data.token)?;

        self.jar
            .set(cookies::TOKEN, &data.token, CookieOptions::default());
        if let Some(dealer_id) = claims.dealer_id {
            self.jar.set(
                cookies::DEALER_ID,
                &dealer_id.to_string(),
                CookieOptions::default(),
            );
        }

        Ok(Session {
            token: data.token,
            user_id: claims.id,
            role: claims.role,
            dealer_id: claims.dealer_id,
            expires_at: claims.expires_at(),
        })
    }

    /// Log out: best-effort server notification, then jar cleanup.
    ///
    /// The server call failing does not keep the session alive locally -
    /// the cookies are deleted regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(err) = self
            .client
            .post_empty::<serde_json::Value>("/auth/logout")
            .await
        {
            warn!(error = %err, "server logout failed, clearing local session anyway");
        }
        self.jar.delete(cookies::TOKEN);
        self.jar.delete(cookies::DEALER_ID);
    }

    /// Fetch the logged-in account's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure, including `401` when the session
    /// is gone.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.client.get("/auth/profile").await?.into_data()
    }

    /// Derive the current session from the jar, if any.
    ///
    /// An undecodable token reads as no session, exactly like an absent
    /// one.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        let raw = self.jar.get(cookies::TOKEN)?;
        let claims = token::decode(&raw).ok()?;
        Some(Session {
            token: raw,
            user_id: claims.id,
            role: claims.role,
            dealer_id: claims.dealer_id,
            expires_at: claims.expires_at(),
        })
    }
}
