use std::sync::Arc;
use triage::router::Router;

/// Shared application state. Holds no credentials; every request brings its own.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
}

impl AppState {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
