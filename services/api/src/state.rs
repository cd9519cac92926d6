//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the ledger, the sentiment analyzer, and the
//! rate limiter.

use crate::config::Config;
use crate::db::Ledger;
use crate::provider::ProviderClient;
use palaver_core::ratelimit::RateLimiterStore;
use palaver_core::sentiment::SentimentAnalyzer;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub analyzer: SentimentAnalyzer,
    pub rate_limiter: Arc<dyn RateLimiterStore>,
    pub provider: Arc<ProviderClient>,
    pub config: Arc<Config>,
}
