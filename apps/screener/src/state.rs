use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::config::Config;
use crate::screening::FitScorer;
use crate::usage::UsageCounter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable fit scorer. Default: LexicalFitScorer over the built-in vocabulary.
    pub fit_scorer: Arc<dyn FitScorer>,
    /// Free-tier counter; the only mutable state in the process.
    pub usage: Arc<Mutex<UsageCounter>>,
}

impl AppState {
    pub fn new(config: Config, fit_scorer: Arc<dyn FitScorer>, today: NaiveDate) -> Self {
        let usage = UsageCounter::new(config.free_limit_per_day, today);
        Self {
            config,
            fit_scorer,
            usage: Arc::new(Mutex::new(usage)),
        }
    }
}
