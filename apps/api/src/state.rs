use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::client::DiagnosticClient;
use crate::submissions::Submitter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub diagnostics: DiagnosticClient,
    /// Pluggable submission backend. Default: LoggingSubmitter.
    pub submitter: Arc<dyn Submitter>,
    pub config: Config,
}
