//! Core of the E-Cell organizational site and its admin back-office.
//!
//! Everything durable lives in a hosted record store reached through the
//! [`store::RecordStore`] contract; this crate holds the typed entities,
//! the per-entity edit-state controllers the admin panel drives, the
//! dashboard aggregates, and the visitor-facing join-redirect and popup
//! policies. The HTTP surface and page templates belong to the host
//! application.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::store::RecordStore;

/// Session-scoped dependencies, constructed once by the host and passed
/// down. Nothing in this crate reaches for ambient global state.
pub struct SiteSession {
    pub config: SiteConfig,
    pub store: Arc<dyn RecordStore>,
}

impl SiteSession {
    pub fn new(config: SiteConfig, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }
}

pub mod admin;
pub mod config;
pub mod helper;
pub mod models;
pub mod public;
pub mod store;
