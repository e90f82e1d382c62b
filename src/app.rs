//! Console wiring
//!
//! One `Console` per process: it opens the on-disk store, builds the API
//! client and hands the client's credential slot to the session manager,
//! then restores any stored session before a command runs.

use crate::api::{AccountsApi, ApiClient, CampaignsApi, CredentialSlot, TemplatesApi, UreqTransport};
use crate::audit::AuditLog;
use crate::config::{Config, ConfigManager};
use crate::error::{DeskError, DeskResult};
use crate::navigation::{Router, View};
use crate::notify::{ConsoleNotifier, Notification, Notifier};
use crate::session::{Session, SessionManager};
use crate::store::{FileStore, KeyValueStore};
use crate::ui::{self, UiContext};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The running console
pub struct Console {
    config: Config,
    ui: UiContext,
    notifier: Arc<dyn Notifier>,
    router: Arc<Router>,
    session: SessionManager,
}

impl Console {
    /// Open the console against the configured backend and state directory
    pub async fn open(config: Config, ui: UiContext) -> DeskResult<Self> {
        ConfigManager::ensure_state_dirs().await?;
        let store = FileStore::open().await?;

        let transport = UreqTransport::new(Duration::from_secs(config.api.timeout_secs));
        let (client, credentials) = ApiClient::new(&config.api, Arc::new(transport))?;

        Ok(Self::assemble(config, ui, client, credentials, Arc::new(store)).await)
    }

    /// Build a console from already constructed parts and initialize its session
    pub async fn assemble(
        config: Config,
        ui: UiContext,
        client: ApiClient,
        credentials: CredentialSlot,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new(ui.clone()));
        let router = Arc::new(Router::new());

        let session = SessionManager::builder(client, credentials, store)
            .config(&config)
            .notifier(Arc::clone(&notifier))
            .navigator(router.clone())
            .audit(AuditLog::new(&config))
            .build();
        session.initialize().await;

        Self {
            config,
            ui,
            notifier,
            router,
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        self.session.client()
    }

    pub fn accounts(&self) -> AccountsApi {
        AccountsApi::new(self.client().clone())
    }

    pub fn templates(&self) -> TemplatesApi {
        TemplatesApi::new(self.client().clone())
    }

    pub fn campaigns(&self) -> CampaignsApi {
        CampaignsApi::new(self.client().clone())
    }

    /// Guard for a protected location.
    ///
    /// Without a session the visitor is redirected to the login location. In
    /// a terminal the operator is asked to log in on the spot and, once
    /// authenticated, the command carries on; otherwise the guard fails.
    pub async fn require(&self, location: &str) -> DeskResult<Session> {
        match self.session.require_session().await {
            Err(DeskError::NotAuthenticated) => {}
            other => return other,
        }

        debug!("No session for {}, redirecting to login", location);
        self.router
            .redirect_to_login(location, &self.config.navigation.login);

        if !self.ui.is_interactive() {
            ui::remark(
                &self.ui,
                &format!("Log in and continue with: dmdesk login --redirect {}", location),
            );
            return Err(DeskError::NotAuthenticated);
        }

        ui::step_info(&self.ui, "Log in to continue");
        let username = ui::input(&self.ui, "Username", "--username").await?;
        let password = ui::password(&self.ui, "Password").await?;
        let origin = self.router.take_origin();

        if !self
            .session
            .login_with_redirect(&username, &password, origin.as_deref())
            .await
        {
            return Err(DeskError::Reported);
        }
        self.session.require_session().await
    }

    /// Show an operation failure as a notification.
    ///
    /// 401 responses already ended the session and notified the operator, so
    /// they are only marked as reported.
    pub fn report(&self, error: DeskError) -> DeskError {
        if error.is_reported() || error.is_auth_rejection() {
            return DeskError::Reported;
        }

        self.notifier
            .notify(Notification::error(error.user_message()));
        if let Some(hint) = error.hint() {
            ui::remark(&self.ui, hint);
        }
        DeskError::Reported
    }

    /// Point the operator at the command for wherever the last operation
    /// navigated
    pub fn show_next_step(&self) {
        let next = self
            .router
            .current()
            .and_then(|location| View::from_location(&location));
        if let Some(view) = next {
            ui::remark(&self.ui, &format!("Next: {}", view.command()));
        }
    }
}
