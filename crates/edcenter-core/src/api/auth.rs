//! Account endpoints: login, registration, logout, refresh, current user.

use tracing::{info, warn};

use crate::auth::{SessionEvent, StoredSession};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};

use super::{ApiClient, ApiError, ApiRequest};

impl ApiClient {
    /// Exchange email and password for tokens and start a session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let mut request = ApiRequest::post("/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        // A 401 here means bad credentials, not an expired session
        request.mark_retried();
        let auth: AuthResponse = self.send_json(request).await?;
        self.establish_session(&auth);
        info!(email = email, "Signed in");
        Ok(auth)
    }

    /// Create an account and start a session with the returned tokens
    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let mut request = ApiRequest::post("/auth/register").json(data)?;
        request.mark_retried();
        let auth: AuthResponse = self.send_json(request).await?;
        self.establish_session(&auth);
        info!(email = %data.email, "Registered and signed in");
        Ok(auth)
    }

    /// Invalidate the server-side session and clear local credentials.
    ///
    /// Local credentials are cleared even when the server call fails;
    /// the server error is still returned.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.send_empty(ApiRequest::post("/auth/logout")).await;
        if let Err(ref e) = result {
            warn!(error = %e, "Server logout failed, clearing local session anyway");
        }
        self.end_session();
        result
    }

    /// Exchange a refresh token for new tokens without touching the store
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        self.request_refresh(refresh_token).await
    }

    /// Fetch the signed-in user's profile and cache it in the store
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let user: User = self.send_json(ApiRequest::get("/auth/user")).await?;
        self.cache_user(&user);
        Ok(user)
    }

    /// User record cached by the last login or profile fetch
    pub fn cached_user(&self) -> Option<User> {
        self.session().user
    }

    fn establish_session(&self, auth: &AuthResponse) {
        self.store_session(&StoredSession {
            access_token: Some(auth.access_token.clone()),
            refresh_token: auth.refresh_token.clone(),
            user: auth.user.clone(),
        });
        self.emit(SessionEvent::SignedIn);
    }
}
