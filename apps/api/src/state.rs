use std::sync::Arc;

use crate::generation::generator::Generator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
}
