//! Authenticated API client for the educational center backend.
//!
//! Every call goes through `ApiClient::send`, which attaches the bearer
//! token held by the session store and, when the backend answers 401,
//! runs the refresh protocol exactly once for that request:
//!
//! 1. the request is marked retried;
//! 2. with a refresh token, `POST /auth/refresh` is issued. On success the
//!    new token is stored and the request resent; on failure the session
//!    is terminated and the refresh error returned;
//! 3. without a refresh token the session is terminated and the original
//!    401 returned.
//!
//! Termination clears the store and broadcasts `SessionEvent::Terminated`.
//! Requests rejected together under the same credentials produce one
//! termination between them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::auth::{token, SessionEvent, SessionStore, StoredSession, TerminationReason};
use crate::models::{AuthResponse, RefreshRequest, User};

use super::{ApiError, ApiRequest};

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when neither the environment nor the config file sets one
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Buffer size for the session event channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

const REFRESH_PATH: &str = "/auth/refresh";

/// How concurrent 401s share the refresh step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// Refreshes are serialized; a request that waited while another one
    /// refreshed or ended the session reuses that outcome.
    #[default]
    Coalesced,
    /// Every rejected request issues its own refresh call.
    PerRequest,
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub refresh_mode: RefreshMode,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            refresh_mode: RefreshMode::default(),
        }
    }
}

/// Credential generation tracking.
///
/// `epoch` moves whenever this client saves or clears credentials. Store
/// writes happen while the state lock is held, so a load-modify-save is
/// never interleaved with another write from the same client.
#[derive(Debug, Default)]
struct SessionState {
    epoch: u64,
}

/// API client for the backend.
/// Clone is cheap - the connection pool, store, refresh lock and event
/// channel are all shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<Url>,
    store: Arc<dyn SessionStore>,
    refresh_mode: RefreshMode,
    refresh_lock: Arc<Mutex<()>>,
    state: Arc<StdMutex<SessionState>>,
    requests_sent: Arc<AtomicU64>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a new API client over the given session store
    pub fn new(settings: ClientSettings, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url));
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            store,
            refresh_mode: settings.refresh_mode,
            refresh_lock: Arc::new(Mutex::new(())),
            state: Arc::new(StdMutex::new(SessionState::default())),
            requests_sent: Arc::new(AtomicU64::new(0)),
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.refresh_mode
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Number of HTTP requests put on the wire, refresh calls included
    pub fn requests_sent(&self) -> u64 {
        self.requests_sent.load(Ordering::Relaxed)
    }

    /// Current session entries. A failing store reads as an empty session.
    pub fn session(&self) -> StoredSession {
        match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to load session");
                StoredSession::default()
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.session().access_token
    }

    /// True when an access token is held and its JWT `exp` is in the future.
    /// Tokens without a readable `exp` do not count.
    pub fn is_authenticated(&self) -> bool {
        self.access_token()
            .is_some_and(|t| !token::is_expired(&t))
    }

    // ===== Session bookkeeping =====

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn epoch(&self) -> u64 {
        self.lock_state().epoch
    }

    pub(super) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn persist(&self, session: &StoredSession) {
        if let Err(e) = self.store.save(session) {
            warn!(error = %e, "Failed to save session");
        }
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear session");
        }
    }

    /// Persist new credentials and open a new session generation.
    pub(super) fn store_session(&self, session: &StoredSession) {
        let mut state = self.lock_state();
        self.persist(session);
        state.epoch += 1;
    }

    /// Cache the user's profile next to the current tokens.
    ///
    /// Does not open a new generation; skipped when signed out.
    pub(super) fn cache_user(&self, user: &User) {
        let _state = self.lock_state();
        let mut session = self.session();
        if session.access_token.is_none() || session.user.as_ref() == Some(user) {
            return;
        }
        session.user = Some(user.clone());
        self.persist(&session);
    }

    /// Clear credentials after an explicit sign-out.
    pub(super) fn end_session(&self) {
        {
            let mut state = self.lock_state();
            self.clear_store();
            state.epoch += 1;
        }
        self.emit(SessionEvent::SignedOut);
    }

    /// Clear credentials and announce the termination.
    ///
    /// `epoch` is the generation the failing request was sent under. If
    /// credentials changed since, another request already refreshed or
    /// ended the session and nothing is cleared or announced.
    fn terminate(&self, epoch: u64, reason: TerminationReason) {
        {
            let mut state = self.lock_state();
            if state.epoch != epoch {
                debug!(reason = %reason, "Credentials changed since the request, not terminating");
                return;
            }
            self.clear_store();
            state.epoch += 1;
        }
        warn!(reason = %reason, "Session terminated");
        self.emit(SessionEvent::Terminated(reason));
    }

    // ===== Transport =====

    /// Base URL with the request's segments appended, each percent-encoded.
    fn url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = Url::clone(&self.base_url);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(request.segments());
        Ok(url)
    }

    fn auth_headers(request: &ApiRequest, token: Option<&str>) -> Result<header::HeaderMap, ApiError> {
        let mut headers = request.headers.clone();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Put one request on the wire with the given token.
    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Response, ApiError> {
        debug!(
            method = %request.method,
            path = %request.path(),
            retried = request.is_retried(),
            authorized = token.is_some(),
            "Sending request"
        );

        let mut builder = self
            .client
            .request(request.method.clone(), self.url(request)?)
            .headers(Self::auth_headers(request, token)?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        Ok(builder.send().await?)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn error_for(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::from_status(status, &body)
    }

    pub(super) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let url = response.url().path().to_string();
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{} from {}", e, url)))
    }

    // ===== Gateway =====

    /// Send a request, refreshing credentials at most once on 401.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response, ApiError> {
        let epoch = self.epoch();
        let token = self.access_token();
        let response = self.dispatch(&request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || request.is_retried() {
            return Self::check_response(response).await;
        }

        let rejected = Self::error_for(response).await;
        request.mark_retried();
        debug!(path = %request.path(), "Request unauthorized, attempting credential refresh");

        let token = self.recover(epoch, rejected).await?;
        let response = self.dispatch(&request, Some(&token)).await?;
        Self::check_response(response).await
    }

    /// Send a request and decode the JSON success body
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Send a request and discard the success body
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await?;
        Ok(())
    }

    /// Obtain a usable access token after a 401, or end the session.
    ///
    /// `epoch` is the credential generation the rejected request was sent under.
    async fn recover(&self, epoch: u64, rejected: ApiError) -> Result<String, ApiError> {
        let _guard = match self.refresh_mode {
            RefreshMode::Coalesced => Some(self.refresh_lock.lock().await),
            RefreshMode::PerRequest => None,
        };

        if self.refresh_mode == RefreshMode::Coalesced && self.epoch() != epoch {
            // Credentials changed while this request was in flight
            return match self.access_token() {
                Some(token) => {
                    debug!("Reusing credentials refreshed by a concurrent request");
                    Ok(token)
                }
                None => Err(rejected),
            };
        }

        let Some(refresh_token) = self.session().refresh_token else {
            self.terminate(epoch, TerminationReason::MissingRefreshToken);
            return Err(rejected);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(auth) => {
                let token = auth.access_token.clone();
                self.store_refreshed(auth);
                Ok(token)
            }
            Err(e) => {
                self.terminate(epoch, TerminationReason::RefreshFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The call is sent pre-marked as retried and bypasses recovery, so a
    /// 401 from the refresh endpoint is final.
    pub(super) async fn request_refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        let mut request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        request.mark_retried();

        let token = self.access_token();
        let response = self.dispatch(&request, token.as_deref()).await?;
        let response = Self::check_response(response).await?;
        Self::decode(response).await
    }

    /// Merge a refresh response into the stored session.
    ///
    /// A rotated refresh token or a returned user replaces the stored one.
    pub(super) fn store_refreshed(&self, auth: AuthResponse) {
        {
            let mut state = self.lock_state();
            let mut session = self.session();
            session.access_token = Some(auth.access_token);
            if auth.refresh_token.is_some() {
                session.refresh_token = auth.refresh_token;
            }
            if auth.user.is_some() {
                session.user = auth.user;
            }
            self.persist(&session);
            state.epoch += 1;
        }
        info!("Access token refreshed");
        self.emit(SessionEvent::Refreshed);
    }
}
