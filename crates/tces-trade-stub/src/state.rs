use std::sync::Arc;

use crate::config::StubConfig;

/// Shared, read-only state for every handler.
pub struct StubState {
    pub config: StubConfig,
}

impl StubState {
    pub fn new(config: StubConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }
}
