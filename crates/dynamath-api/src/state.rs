//! Shared application state.

use std::sync::Arc;

use dynamath_core::seed::ReviewSeedResolver;
use dynamath_templates::{CardRenderer, TemplateRegistry};

use crate::error::AppError;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Template registry plus the review-seed resolver.
    pub renderer: Arc<CardRenderer>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(renderer: CardRenderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }

    /// Create state serving every built-in template.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Registry` if a built-in template fails to register.
    pub fn with_builtin_templates(resolver: ReviewSeedResolver) -> Result<Self, AppError> {
        let registry = TemplateRegistry::with_builtin_templates()?;
        tracing::info!(templates = registry.len(), "registered built-in templates");
        Ok(Self::new(CardRenderer::new(registry, resolver)))
    }
}
