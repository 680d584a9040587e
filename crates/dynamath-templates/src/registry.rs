//! Template registry: an explicit, owned map from id to descriptor.
//!
//! There is no process-wide registry. Hosts build one at startup, usually
//! with [`TemplateRegistry::with_builtin_templates`], and share it
//! read-only afterwards.

use std::collections::HashMap;

use dynamath_core::error::GenerationError;
use tracing::debug;

use crate::arithmetic::{
    addition, decimal_multiplication, division, exponents, multiplication, rounding,
};
use crate::expressions;
use crate::number_theory::{gcf, lcm};
use crate::template::TemplateDescriptor;

/// Descriptors for every built-in template.
#[must_use]
pub fn builtin_descriptors() -> Vec<TemplateDescriptor> {
    vec![
        addition::descriptor(),
        multiplication::descriptor(),
        decimal_multiplication::descriptor(),
        gcf::descriptor(),
        lcm::descriptor(),
        division::descriptor(),
        exponents::descriptor(),
        expressions::descriptor(),
        rounding::descriptor(),
    ]
}

#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateDescriptor>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in template.
    ///
    /// # Errors
    ///
    /// Returns the registration error of the first malformed built-in
    /// descriptor.
    pub fn with_builtin_templates() -> Result<Self, GenerationError> {
        let mut registry = Self::new();
        for descriptor in builtin_descriptors() {
            let id = descriptor.id.clone().unwrap_or_default();
            registry.register(&id, descriptor)?;
        }
        Ok(registry)
    }

    /// Registers `descriptor` under `id`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// * `InvalidId` if `id` is blank.
    /// * `InvalidDescriptor` if the descriptor has no generator.
    /// * `IdMismatch` if the descriptor declares a different id.
    pub fn register(
        &mut self,
        id: &str,
        descriptor: TemplateDescriptor,
    ) -> Result<(), GenerationError> {
        if id.trim().is_empty() {
            return Err(GenerationError::InvalidId(id.to_owned()));
        }
        if descriptor.generator.is_none() {
            return Err(GenerationError::InvalidDescriptor(format!(
                "{id} has no generator"
            )));
        }
        if let Some(declared) = descriptor.id.as_deref() {
            if declared != id {
                return Err(GenerationError::IdMismatch {
                    registered: id.to_owned(),
                    declared: declared.to_owned(),
                });
            }
        }
        if self.templates.insert(id.to_owned(), descriptor).is_some() {
            debug!(id, "replaced template registration");
        } else {
            debug!(id, "registered template");
        }
        Ok(())
    }

    /// Looks up a template.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTemplate` if nothing is registered under `id`.
    pub fn get(&self, id: &str) -> Result<&TemplateDescriptor, GenerationError> {
        self.templates
            .get(id)
            .ok_or_else(|| GenerationError::UnknownTemplate(id.to_owned()))
    }

    /// Registered ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Registered `(id, descriptor)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateDescriptor)> {
        self.ids().into_iter().filter_map(move |id| {
            self.templates
                .get_key_value(id)
                .map(|(key, descriptor)| (key.as_str(), descriptor))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::arithmetic::addition::AddTwoNumbers;
    use crate::template::{GenerationRequest, TemplateMeta};

    fn meta() -> TemplateMeta {
        TemplateMeta::new("Test", &[], &[], json!({}))
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = TemplateRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TemplateRegistry::new();
        registry
            .register("a/b", TemplateDescriptor::new("a/b", meta(), AddTwoNumbers))
            .unwrap();
        let descriptor = registry.get("a/b").unwrap();
        assert!(descriptor.generate(&GenerationRequest::new(1)).is_ok());
    }

    #[test]
    fn test_register_rejects_blank_id() {
        let mut registry = TemplateRegistry::new();
        let result = registry.register("  ", TemplateDescriptor::new("x", meta(), AddTwoNumbers));
        assert!(matches!(result, Err(GenerationError::InvalidId(_))));
    }

    #[test]
    fn test_register_rejects_missing_generator() {
        let mut registry = TemplateRegistry::new();
        let descriptor = TemplateDescriptor {
            id: None,
            meta: meta(),
            generator: None,
        };
        assert!(matches!(
            registry.register("a/b", descriptor),
            Err(GenerationError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_register_rejects_id_mismatch() {
        let mut registry = TemplateRegistry::new();
        let result = registry.register("a/b", TemplateDescriptor::new("a/c", meta(), AddTwoNumbers));
        assert_eq!(
            result,
            Err(GenerationError::IdMismatch {
                registered: "a/b".to_owned(),
                declared: "a/c".to_owned(),
            })
        );
    }

    #[test]
    fn test_undeclared_id_is_accepted() {
        let mut registry = TemplateRegistry::new();
        let mut descriptor = TemplateDescriptor::new("ignored", meta(), AddTwoNumbers);
        descriptor.id = None;
        registry.register("a/b", descriptor).unwrap();
        assert_eq!(registry.ids(), vec!["a/b"]);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = TemplateRegistry::new();
        let mut first = TemplateDescriptor::new("a/b", meta(), AddTwoNumbers);
        first.meta.title = "First".to_owned();
        let mut second = TemplateDescriptor::new("a/b", meta(), AddTwoNumbers);
        second.meta.title = "Second".to_owned();
        registry.register("a/b", first).unwrap();
        registry.register("a/b", second).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a/b").unwrap().meta.title, "Second");
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::new();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            GenerationError::UnknownTemplate("nope".to_owned())
        );
    }

    #[test]
    fn test_builtin_registry_lists_every_template_sorted() {
        let registry = TemplateRegistry::with_builtin_templates().unwrap();
        assert_eq!(
            registry.ids(),
            vec![
                "arithmetic/exponent_to_factors",
                "arithmetic/long_division",
                "arithmetic/multiply_2d_by_1d",
                "arithmetic/multiply_decimals",
                "arithmetic/order_of_operations",
                "arithmetic/rounding",
                "number_theory/gcf_basic",
                "number_theory/lcm_basic",
                "topic/add_two_numbers",
            ]
        );
        assert_eq!(registry.iter().count(), registry.len());
    }

    #[test]
    fn test_builtin_registries_are_independent() {
        let mut first = TemplateRegistry::with_builtin_templates().unwrap();
        let second = TemplateRegistry::with_builtin_templates().unwrap();
        first
            .register("extra/one", TemplateDescriptor::new("extra/one", meta(), AddTwoNumbers))
            .unwrap();
        assert_eq!(first.len(), second.len() + 1);
    }
}
