//! The generator contract every template implements.

use std::fmt;
use std::sync::Arc;

use dynamath_core::error::GenerationError;
pub use dynamath_core::seed::Side;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::TemplateConfig;

/// Input to one generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub seed: u32,
    #[serde(default)]
    pub config: TemplateConfig,
    #[serde(default)]
    pub side: Side,
}

impl GenerationRequest {
    /// Creates a front-side request with an empty config.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            config: TemplateConfig::default(),
            side: Side::Front,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// Rendered HTML for the requested side plus the structured payload it was
/// built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub html: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// Outcome of a generator's self-check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Builds a report from invariant violations and advisory warnings.
    /// The report is ok exactly when `errors` is empty.
    #[must_use]
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A failed report carrying a single error, typically a generation
    /// error raised while regenerating.
    #[must_use]
    pub fn failure(error: impl fmt::Display) -> Self {
        Self::from_findings(vec![error.to_string()], Vec::new())
    }
}

/// Maps a host substitution field onto a config key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub field: String,
    pub config_key: String,
}

impl FieldBinding {
    #[must_use]
    pub fn new(field: &str, config_key: &str) -> Self {
        Self {
            field: field.to_owned(),
            config_key: config_key.to_owned(),
        }
    }
}

/// Descriptive metadata published alongside a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMeta {
    pub title: String,
    pub skills: Vec<String>,
    pub grade_bands: Vec<String>,
    pub defaults: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_bindings: Vec<FieldBinding>,
}

impl TemplateMeta {
    #[must_use]
    pub fn new(title: &str, skills: &[&str], grade_bands: &[&str], defaults: Value) -> Self {
        Self {
            title: title.to_owned(),
            skills: skills.iter().map(|s| (*s).to_owned()).collect(),
            grade_bands: grade_bands.iter().map(|s| (*s).to_owned()).collect(),
            defaults,
            field_bindings: Vec::new(),
        }
    }

    /// Adds host field bindings, as `(field, config_key)` pairs.
    #[must_use]
    pub fn with_field_bindings(mut self, bindings: &[(&str, &str)]) -> Self {
        self.field_bindings = bindings
            .iter()
            .map(|(field, key)| FieldBinding::new(field, key))
            .collect();
        self
    }
}

/// A problem family that turns a seed and config into card content.
///
/// Implementations must be pure functions of the request: every random
/// draw comes from the stream created from `request.seed`, and the front
/// and back sides replay the same draws.
pub trait Generator: Send + Sync {
    /// Renders the requested side.
    ///
    /// # Errors
    ///
    /// Returns a `GenerationError` only for structurally invalid internal
    /// state. Malformed config falls back to defaults.
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError>;

    /// Regenerates the values `generate` would draw and checks their
    /// domain invariants. `None` when the template has no self-check.
    fn validate(&self, _request: &GenerationRequest) -> Option<ValidationReport> {
        None
    }
}

/// A registrable template: metadata plus its generator.
///
/// `id` is the id the template declares for itself; registration rejects a
/// descriptor whose declared id differs from the registration key, or one
/// without a generator.
#[derive(Clone)]
pub struct TemplateDescriptor {
    pub id: Option<String>,
    pub meta: TemplateMeta,
    pub generator: Option<Arc<dyn Generator>>,
}

impl fmt::Debug for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}

impl TemplateDescriptor {
    /// Creates a descriptor that declares `id` and wraps `generator`.
    pub fn new(id: &str, meta: TemplateMeta, generator: impl Generator + 'static) -> Self {
        Self {
            id: Some(id.to_owned()),
            meta,
            generator: Some(Arc::new(generator)),
        }
    }

    fn generator(&self) -> Result<&dyn Generator, GenerationError> {
        self.generator.as_deref().ok_or_else(|| {
            GenerationError::InvalidDescriptor(format!(
                "{} has no generator",
                self.id.as_deref().unwrap_or("<anonymous>")
            ))
        })
    }

    /// Runs the wrapped generator.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidDescriptor` if the descriptor has no
    /// generator, otherwise whatever the generator returns.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        self.generator()?.generate(request)
    }

    /// Runs the wrapped generator's self-check.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidDescriptor` if the descriptor has no
    /// generator.
    pub fn validate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<ValidationReport>, GenerationError> {
        Ok(self.generator()?.validate(request))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Constant;

    impl Generator for Constant {
        fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
            Ok(GenerationResult {
                html: format!("{}:{}", request.seed, request.side),
                data: Value::Null,
            })
        }
    }

    #[test]
    fn test_descriptor_delegates_to_generator() {
        let descriptor = TemplateDescriptor::new(
            "test/constant",
            TemplateMeta::new("Constant", &[], &[], json!({})),
            Constant,
        );
        let result = descriptor
            .generate(&GenerationRequest::new(9).with_side(Side::Back))
            .unwrap();
        assert_eq!(result.html, "9:back");
        assert_eq!(descriptor.validate(&GenerationRequest::new(9)), Ok(None));
    }

    #[test]
    fn test_descriptor_without_generator_is_invalid() {
        let descriptor = TemplateDescriptor {
            id: None,
            meta: TemplateMeta::new("Empty", &[], &[], json!({})),
            generator: None,
        };
        assert!(matches!(
            descriptor.generate(&GenerationRequest::new(1)),
            Err(GenerationError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_validation_report_ok_tracks_errors() {
        assert!(ValidationReport::from_findings(vec![], vec!["w".into()]).ok);
        let failed = ValidationReport::failure("boom");
        assert!(!failed.ok);
        assert_eq!(failed.errors, vec!["boom".to_owned()]);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: GenerationRequest = serde_json::from_value(json!({ "seed": 5 })).unwrap();
        assert_eq!(request, GenerationRequest::new(5));
    }

    #[test]
    fn test_result_omits_null_data() {
        let result = GenerationResult {
            html: "<p></p>".into(),
            data: Value::Null,
        };
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "html": "<p></p>" }));
    }
}
