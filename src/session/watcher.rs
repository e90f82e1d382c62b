//! Forced logout on rejected credentials

use crate::api::ResponseInterceptor;
use crate::error::DeskError;
use crate::session::manager::{Inner, LogoutReason};
use async_trait::async_trait;
use std::sync::Weak;
use tracing::{debug, info};

/// Ends the session when the backend answers 401
///
/// Holds a weak reference since the client keeps its interceptors alive. The
/// manager deregisters this watcher when it is dropped.
pub(crate) struct AuthFailureWatcher {
    session: Weak<Inner>,
}

impl AuthFailureWatcher {
    pub(crate) fn new(session: Weak<Inner>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl ResponseInterceptor for AuthFailureWatcher {
    async fn on_error(&self, error: &DeskError) {
        if !error.is_auth_rejection() {
            return;
        }

        match self.session.upgrade() {
            Some(inner) => {
                info!("Backend rejected credentials, ending session");
                inner.logout(LogoutReason::Rejected).await;
            }
            None => debug!("Credentials rejected after session manager was dropped"),
        }
    }
}
