//! Operator session: state, lifecycle and the 401 watcher

pub mod manager;
pub mod state;
mod watcher;

pub use manager::{SessionManager, SessionManagerBuilder, SessionSnapshot};
pub use state::{Credentials, LoginResponse, Session, SessionPatch, UserProfile, SESSION_KEY};
