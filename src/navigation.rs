//! Console locations and navigation
//!
//! The console has no pages, but it still has places: after login the
//! operator is sent to a landing view, after logout to the login prompt. A
//! `Router` records where the last operation sent us so the CLI can point the
//! operator at the matching command.

use std::sync::Mutex;
use tracing::info;

/// Receives navigation requests
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Views the console knows how to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Accounts,
    Templates,
    Campaigns,
}

impl View {
    /// Match a location like `/accounts` or `/accounts/alice`
    pub fn from_location(location: &str) -> Option<Self> {
        let first = location
            .trim_start_matches('/')
            .split(['/', '?', '#'])
            .next()
            .unwrap_or("");
        match first {
            "login" => Some(Self::Login),
            "" | "dashboard" => Some(Self::Dashboard),
            "accounts" => Some(Self::Accounts),
            "templates" => Some(Self::Templates),
            "campaigns" => Some(Self::Campaigns),
            _ => None,
        }
    }

    /// Command that renders this view
    pub fn command(&self) -> &'static str {
        match self {
            Self::Login => "dmdesk login",
            Self::Dashboard => "dmdesk dashboard",
            Self::Accounts => "dmdesk accounts list",
            Self::Templates => "dmdesk templates list",
            Self::Campaigns => "dmdesk campaigns list",
        }
    }
}

#[derive(Debug, Default)]
struct RouterState {
    history: Vec<String>,
    origin: Option<String>,
}

/// Records navigation, and the protected location a guard turned away
#[derive(Debug, Default)]
pub struct Router {
    state: Mutex<RouterState>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent location, if any navigation happened
    pub fn current(&self) -> Option<String> {
        self.lock().history.last().cloned()
    }

    /// Every location visited, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Send an unauthenticated visitor of `from` to the login location,
    /// remembering where they were headed
    pub fn redirect_to_login(&self, from: &str, login: &str) {
        self.lock().origin = Some(from.to_string());
        self.navigate(login);
    }

    /// Location the last guard redirect came from, cleared on read
    pub fn take_origin(&self) -> Option<String> {
        self.lock().origin.take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Navigator for Router {
    fn navigate(&self, location: &str) {
        info!("Navigating to {}", location);
        self.lock().history.push(location.to_string());
    }
}
