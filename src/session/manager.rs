//! Session lifecycle management
//!
//! The manager owns the only writable copies of the session: the in-memory
//! record, the stored record under [`SESSION_KEY`] and the client's
//! Authorization header (through its [`CredentialSlot`]). Every mutation
//! happens with the state lock held, so the three never disagree after an
//! operation completes. Concurrent operations are last-writer-wins.

use crate::api::{ApiClient, ApiRequest, CredentialSlot, InterceptorId};
use crate::audit::{AuditEvent, AuditLog};
use crate::config::schema::{Config, NavigationConfig};
use crate::error::{DeskError, DeskResult};
use crate::navigation::{Navigator, Router};
use crate::notify::{Notification, NotificationLog, Notifier};
use crate::session::state::{Credentials, LoginResponse, Session, SessionPatch, SESSION_KEY};
use crate::session::watcher::AuthFailureWatcher;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

const LOGIN_FAILED: &str = "Login failed. Check your credentials and try again.";

/// Point-in-time view of the session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub is_initializing: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Why a logout happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogoutReason {
    Requested,
    Rejected,
}

struct SessionState {
    current: Option<Session>,
    initializing: bool,
}

pub(crate) struct Inner {
    client: ApiClient,
    credentials: CredentialSlot,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    audit: AuditLog,
    login_path: String,
    navigation: NavigationConfig,
    state: Mutex<SessionState>,
}

/// Owns the authenticated operator session
pub struct SessionManager {
    inner: Arc<Inner>,
    watcher: InterceptorId,
}

/// Builder for [`SessionManager`]
pub struct SessionManagerBuilder {
    client: ApiClient,
    credentials: CredentialSlot,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    audit: AuditLog,
    login_path: String,
    navigation: NavigationConfig,
}

impl SessionManagerBuilder {
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn audit(mut self, audit: AuditLog) -> Self {
        self.audit = audit;
        self
    }

    /// Authentication endpoint, relative to the API base URL
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn navigation(mut self, navigation: NavigationConfig) -> Self {
        self.navigation = navigation;
        self
    }

    /// Apply the `[api]` and `[navigation]` settings
    pub fn config(self, config: &Config) -> Self {
        self.login_path(config.api.login_path.clone())
            .navigation(config.navigation.clone())
    }

    /// Build the manager and register its authentication-failure watcher
    pub fn build(self) -> SessionManager {
        let inner = Arc::new(Inner {
            client: self.client,
            credentials: self.credentials,
            store: self.store,
            notifier: self.notifier,
            navigator: self.navigator,
            audit: self.audit,
            login_path: self.login_path,
            navigation: self.navigation,
            state: Mutex::new(SessionState {
                current: None,
                initializing: true,
            }),
        });

        let watcher = inner
            .client
            .add_response_interceptor(Arc::new(AuthFailureWatcher::new(Arc::downgrade(&inner))));

        SessionManager { inner, watcher }
    }
}

impl SessionManager {
    /// Start building a manager around a client, its credential slot and a store
    pub fn builder(
        client: ApiClient,
        credentials: CredentialSlot,
        store: Arc<dyn KeyValueStore>,
    ) -> SessionManagerBuilder {
        let config = Config::default();
        SessionManagerBuilder {
            client,
            credentials,
            store,
            notifier: Arc::new(NotificationLog::new()),
            navigator: Arc::new(Router::new()),
            audit: AuditLog::disabled(),
            login_path: config.api.login_path,
            navigation: config.navigation,
        }
    }

    /// Client whose Authorization header this manager controls
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Restore a stored session. Runs once; later calls are ignored.
    ///
    /// A stored record that fails to parse is discarded and logged, never
    /// reported to the operator.
    pub async fn initialize(&self) {
        let inner = &self.inner;
        let mut state = inner.state.lock().await;
        if !state.initializing {
            debug!("Session already initialized");
            return;
        }

        match inner.store.get(SESSION_KEY).await {
            Ok(None) => debug!("No stored session"),
            Ok(Some(record)) => match Session::from_record(&record) {
                Ok(session) => {
                    inner.credentials.set_bearer(&session.auth_token);
                    debug!("Restored session for {}", session.username);
                    state.current = Some(session);
                }
                Err(e) => inner.discard_stored(&e).await,
            },
            Err(e @ DeskError::StoreEntryCorrupt { .. }) => inner.discard_stored(&e).await,
            Err(e) => warn!("Failed to read stored session: {}", e),
        }

        state.initializing = false;
    }

    /// Authenticate and, on success, make the result the current session.
    ///
    /// Returns false after notifying the operator on any failure; the previous
    /// session (if any) is left exactly as it was.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        self.login_with_redirect(username, password, None).await
    }

    /// Like [`login`](Self::login), but lands on `redirect` instead of the
    /// configured landing location
    pub async fn login_with_redirect(
        &self,
        username: &str,
        password: &str,
        redirect: Option<&str>,
    ) -> bool {
        let inner = &self.inner;

        let session = match inner.authenticate(username, password).await {
            Ok(session) => session,
            Err(e) => {
                warn!("Login failed for {}: {}", username, e);
                let message = match e.server_message() {
                    Some(message) => message.to_string(),
                    None => LOGIN_FAILED.to_string(),
                };
                inner.notifier.notify(Notification::error(message));
                inner
                    .audit
                    .record(AuditEvent::LoginFailed {
                        username: username.to_string(),
                        status: e.status(),
                    })
                    .await;
                return false;
            }
        };

        {
            let mut state = inner.state.lock().await;
            if let Err(e) = inner.persist(&session).await {
                error!("Failed to store session: {}", e);
                inner
                    .notifier
                    .notify(Notification::error(format!("Could not save session: {}", e)));
                return false;
            }
            inner.credentials.set_bearer(&session.auth_token);
            state.current = Some(session.clone());
        }

        info!("Logged in as {} ({})", session.username, session.role);
        inner
            .notifier
            .notify(Notification::success(format!("Logged in as {}", session.username)));
        inner
            .audit
            .record(AuditEvent::Login {
                username: session.username.clone(),
                role: session.role.clone(),
            })
            .await;

        let target = redirect
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(inner.navigation.landing.as_str());
        inner.navigator.navigate(target);
        true
    }

    /// End the session: stored record, in-memory copy and header all go
    pub async fn logout(&self) {
        self.inner.logout(LogoutReason::Requested).await;
    }

    /// Merge a partial update into the current session and persist it.
    ///
    /// Returns false when there is no session or persisting failed. A failed
    /// write leaves the previous session in place.
    pub async fn update_session(&self, patch: SessionPatch) -> bool {
        let inner = &self.inner;
        let mut state = inner.state.lock().await;

        let merged = match state.current.as_ref() {
            Some(current) => current.merged(&patch),
            None => {
                debug!("No active session, ignoring update");
                return false;
            }
        };
        if patch.is_empty() {
            return true;
        }

        if let Err(e) = inner.persist(&merged).await {
            error!("Failed to store updated session: {}", e);
            inner
                .notifier
                .notify(Notification::error(format!("Could not update session: {}", e)));
            return false;
        }

        if patch.auth_token.is_some() {
            inner.credentials.set_bearer(&merged.auth_token);
        }
        let username = merged.username.clone();
        state.current = Some(merged);
        drop(state);

        debug!("Updated session for {}", username);
        inner
            .audit
            .record(AuditEvent::Updated {
                username,
                fields: patch_fields(&patch),
            })
            .await;
        true
    }

    /// Current session, if authenticated
    pub async fn current_session(&self) -> Option<Session> {
        self.inner.state.lock().await.current.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.state.lock().await.current.is_some()
    }

    pub async fn is_initializing(&self) -> bool {
        self.inner.state.lock().await.initializing
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.state.lock().await;
        SessionSnapshot {
            session: state.current.clone(),
            is_initializing: state.initializing,
        }
    }

    /// Guard for protected views
    pub async fn require_session(&self) -> DeskResult<Session> {
        let state = self.inner.state.lock().await;
        if state.initializing {
            return Err(DeskError::Initializing);
        }
        state.current.clone().ok_or(DeskError::NotAuthenticated)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.inner.client.remove_response_interceptor(self.watcher);
    }
}

impl Inner {
    async fn authenticate(&self, username: &str, password: &str) -> DeskResult<Session> {
        // A rejected login must not tear down an existing session
        let request = ApiRequest::post(self.login_path.clone())
            .json(&Credentials { username, password })?
            .without_interceptors();

        let response: LoginResponse = self.client.send_json(request).await?;
        response.into_session()
    }

    async fn discard_stored(&self, reason: &DeskError) {
        warn!("Discarding malformed stored session: {}", reason);
        if let Err(e) = self.store.remove(SESSION_KEY).await {
            warn!("Failed to remove malformed session: {}", e);
        }
    }

    async fn persist(&self, session: &Session) -> DeskResult<()> {
        let record = session.to_record()?;
        self.store
            .set(SESSION_KEY, &record)
            .await
            .map_err(|e| DeskError::SessionPersist(e.to_string()))
    }

    pub(crate) async fn logout(&self, reason: LogoutReason) {
        let (previous, removal) = {
            let mut state = self.state.lock().await;
            // Concurrent requests rejected together end the session once
            if reason == LogoutReason::Rejected && state.current.is_none() {
                debug!("Credentials rejected with no active session");
                return;
            }
            let removal = self.store.remove(SESSION_KEY).await;
            let previous = state.current.take();
            self.credentials.clear();
            (previous, removal)
        };

        let username = previous.as_ref().map(|s| s.username.clone());
        match &removal {
            Ok(()) => {
                info!("Logged out {}", username.as_deref().unwrap_or("(no session)"));
                let notification = match reason {
                    LogoutReason::Requested => Notification::success("Logged out"),
                    LogoutReason::Rejected => {
                        Notification::info("Session expired. Please log in again.")
                    }
                };
                self.notifier.notify(notification);
            }
            Err(e) => {
                error!("Failed to remove stored session: {}", e);
                self.notifier.notify(Notification::error(format!(
                    "Logged out, but the stored session could not be removed: {}",
                    e
                )));
            }
        }

        let storage_cleared = removal.is_ok();
        let event = match reason {
            LogoutReason::Requested => AuditEvent::Logout {
                username,
                storage_cleared,
            },
            LogoutReason::Rejected => AuditEvent::Expired {
                username,
                storage_cleared,
            },
        };
        self.audit.record(event).await;

        self.navigator.navigate(&self.navigation.login);
    }
}

fn patch_fields(patch: &SessionPatch) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if patch.user_id.is_some() {
        fields.push("id");
    }
    if patch.username.is_some() {
        fields.push("username");
    }
    if patch.auth_token.is_some() {
        fields.push("token");
    }
    if patch.role.is_some() {
        fields.push("role");
    }
    fields
}
