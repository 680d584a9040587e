//! Card rendering: resolve the review seed, look up the template, merge
//! host fields into config, generate the requested side.

use dynamath_core::error::GenerationError;
use dynamath_core::seed::{ReviewSeedResolver, SeedField, SeedRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{CardFields, TemplateConfig};
use crate::registry::TemplateRegistry;
use crate::template::{GenerationRequest, Side};

fn default_per_review() -> bool {
    true
}

/// One render pass of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub template_id: String,
    /// Per-card identifier scoping the persisted review seed. Falls back to
    /// the `UniqueID` host field.
    #[serde(default)]
    pub card_id: Option<String>,
    /// Static seed, as text or a number. Falls back to the `Seed` host field.
    #[serde(default)]
    pub seed_field: Option<Value>,
    #[serde(default = "default_per_review")]
    pub per_review: bool,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub fields: CardFields,
    #[serde(default)]
    pub config: TemplateConfig,
}

impl CardRequest {
    /// Creates a per-review request with no fields or config.
    #[must_use]
    pub fn new(template_id: &str, side: Side) -> Self {
        Self {
            template_id: template_id.to_owned(),
            card_id: None,
            seed_field: None,
            per_review: true,
            side,
            fields: CardFields::default(),
            config: TemplateConfig::default(),
        }
    }

    #[must_use]
    pub fn with_card_id(mut self, card_id: &str) -> Self {
        self.card_id = Some(card_id.to_owned());
        self
    }

    #[must_use]
    pub fn with_seed_field(mut self, seed_field: impl Into<Value>) -> Self {
        self.seed_field = Some(seed_field.into());
        self
    }

    #[must_use]
    pub fn with_per_review(mut self, per_review: bool) -> Self {
        self.per_review = per_review;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: CardFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    fn card_id(&self) -> Option<&str> {
        self.card_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or_else(|| self.fields.card_id())
    }

    fn seed_field(&self) -> SeedField<'_> {
        match &self.seed_field {
            Some(Value::String(text)) => SeedField::Text(text),
            Some(Value::Number(n)) => n.as_f64().map_or(SeedField::Missing, SeedField::Number),
            _ => self.fields.seed().map_or(SeedField::Missing, SeedField::Text),
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCard {
    pub template_id: String,
    pub seed: u32,
    pub side: Side,
    pub html: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// Key under which a card's review seed is persisted. Cards sharing a
/// template only share a key when they carry no card id.
#[must_use]
pub fn review_scope(template_id: &str, card_id: Option<&str>) -> String {
    match card_id {
        Some(card_id) => format!("{template_id}#{card_id}"),
        None => template_id.to_owned(),
    }
}

#[derive(Debug)]
pub struct CardRenderer {
    registry: TemplateRegistry,
    resolver: ReviewSeedResolver,
}

impl CardRenderer {
    #[must_use]
    pub fn new(registry: TemplateRegistry, resolver: ReviewSeedResolver) -> Self {
        Self { registry, resolver }
    }

    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Renders one side of a card.
    ///
    /// The template is looked up before any seed is resolved, so an unknown
    /// id never touches the seed store.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTemplate` for an unregistered id, `InvalidId` for a
    /// blank one, and any structural error raised by the generator.
    #[instrument(skip_all, fields(template_id = %request.template_id, side = %request.side))]
    pub fn render(&self, request: &CardRequest) -> Result<RenderedCard, GenerationError> {
        let descriptor = self.registry.get(&request.template_id)?;
        let scope = review_scope(&request.template_id, request.card_id());
        let seed = self.resolver.resolve(
            &SeedRequest::new(&scope, request.side)
                .with_seed_field(request.seed_field())
                .with_per_review(request.per_review),
        )?;

        let config = request
            .config
            .with_fields(&request.fields, &descriptor.meta.field_bindings);
        let result = descriptor.generate(&GenerationRequest {
            seed,
            config,
            side: request.side,
        })?;
        debug!(seed, %scope, "rendered card");

        Ok(RenderedCard {
            template_id: request.template_id.clone(),
            seed,
            side: request.side,
            html: result.html,
            data: result.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dynamath_core::clock::SystemClock;
    use dynamath_core::seed::OsSalt;
    use dynamath_core::storage::select_store;
    use serde_json::json;

    use super::*;

    fn renderer() -> CardRenderer {
        CardRenderer::new(
            TemplateRegistry::with_builtin_templates().unwrap(),
            ReviewSeedResolver::new(
                select_store(None, None),
                Arc::new(SystemClock::new()),
                Arc::new(OsSalt),
            ),
        )
    }

    #[test]
    fn test_review_scope() {
        assert_eq!(review_scope("a/b", None), "a/b");
        assert_eq!(review_scope("a/b", Some("17")), "a/b#17");
    }

    #[test]
    fn test_card_id_prefers_request_then_field() {
        let fields = CardFields::new().with("UniqueID", "field-id");
        let request = CardRequest::new("a/b", Side::Front).with_fields(fields.clone());
        assert_eq!(request.card_id(), Some("field-id"));

        let request = request.with_card_id("explicit");
        assert_eq!(request.card_id(), Some("explicit"));

        let blank = CardRequest::new("a/b", Side::Front)
            .with_card_id("  ")
            .with_fields(fields);
        assert_eq!(blank.card_id(), Some("field-id"));
    }

    #[test]
    fn test_seed_field_sources() {
        let request = CardRequest::new("a/b", Side::Front);
        assert_eq!(request.seed_field(), SeedField::Missing);

        let from_field = request
            .clone()
            .with_fields(CardFields::new().with("Seed", "42"));
        assert_eq!(from_field.seed_field(), SeedField::Text("42"));

        let number = request.with_seed_field(7);
        assert_eq!(number.seed_field(), SeedField::Number(7.0));
    }

    #[test]
    fn test_front_then_back_share_seed() {
        let renderer = renderer();
        let front = renderer
            .render(&CardRequest::new("topic/add_two_numbers", Side::Front))
            .unwrap();
        let back = renderer
            .render(&CardRequest::new("topic/add_two_numbers", Side::Back))
            .unwrap();
        assert_eq!(front.seed, back.seed);
        assert_eq!(front.data["a"], back.data["a"]);
        assert_eq!(front.data["b"], back.data["b"]);
    }

    #[test]
    fn test_static_seed_is_used_verbatim() {
        let renderer = renderer();
        let card = renderer
            .render(&CardRequest::new("number_theory/gcf_basic", Side::Back).with_seed_field("7"))
            .unwrap();
        assert_eq!(card.seed, 7);
        assert_eq!(card.data["a"], json!(77));
        assert_eq!(card.data["b"], json!(56));
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let err = renderer()
            .render(&CardRequest::new("nope", Side::Front))
            .unwrap_err();
        assert_eq!(err, GenerationError::UnknownTemplate("nope".to_owned()));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: CardRequest =
            serde_json::from_value(json!({ "templateId": "a/b" })).unwrap();
        assert!(request.per_review);
        assert_eq!(request.side, Side::Front);
        assert_eq!(request.seed_field, None);
    }
}
