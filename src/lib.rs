//! dmdesk - admin console for an Instagram DM automation backend
//!
//! Keeps an authenticated operator session on disk, attaches its bearer
//! token to every backend request and ends the session as soon as the
//! backend rejects the token.

pub mod api;
pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod session;
pub mod store;
pub mod ui;

pub use error::{DeskError, DeskResult};
