use std::sync::Arc;

use gambit_core::{Sequence, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: public_base_url.into(),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL that redirects to the target of `sequence`.
    pub fn short_url(&self, sequence: &Sequence) -> String {
        sequence.to_url(&self.base_url)
    }
}
