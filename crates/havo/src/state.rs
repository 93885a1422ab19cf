//! Shared application state.
//!
//! This module defines the state passed to all request handlers: the
//! weather engine, the API key gate and the process shutdown token.

use tokio_util::sync::CancellationToken;

use crate::engine::{ApiKeyGate, WeatherEngine};

/// Shared application state.
///
/// This is cloned for each request handler; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub engine: WeatherEngine,
    pub gate: ApiKeyGate,
    /// Cancelled once the server starts shutting down.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(engine: WeatherEngine, gate: ApiKeyGate) -> Self {
        Self {
            engine,
            gate,
            shutdown: CancellationToken::new(),
        }
    }

    /// Signal background work to stop.
    pub fn signal_shutdown(&self) {
        self.shutdown.cancel();
    }
}
