//! `topic/add_two_numbers`: the starter template.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{create_stream, int_in_range};
use serde_json::json;

use crate::config::TemplateConfig;
use crate::html::inline_card;
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "topic/add_two_numbers";

const DEFAULT_RANGE: (i64, i64) = (2, 12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addition {
    pub a: i64,
    pub b: i64,
}

impl Addition {
    #[must_use]
    pub fn answer(&self) -> i64 {
        self.a.saturating_add(self.b)
    }
}

fn operand_range(config: &TemplateConfig) -> (i64, i64) {
    config.int_range("min", "max", DEFAULT_RANGE)
}

fn draw(request: &GenerationRequest) -> Result<Addition, GenerationError> {
    let (min, max) = operand_range(&request.config);
    let mut rng = create_stream(request.seed);
    let a = int_in_range(&mut rng, min, max)?;
    let b = int_in_range(&mut rng, min, max)?;
    Ok(Addition { a, b })
}

/// Adds two integers drawn from `[min, max]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddTwoNumbers;

impl Generator for AddTwoNumbers {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let problem = draw(request)?;
        let prompt = format!("{} + {}", problem.a, problem.b);
        let answer = problem.answer();
        let data = match request.side {
            Side::Front => json!({ "a": problem.a, "b": problem.b }),
            Side::Back => json!({ "a": problem.a, "b": problem.b, "answer": answer }),
        };
        Ok(GenerationResult {
            html: inline_card(request.side, &prompt, &answer.to_string()),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let problem = match draw(request) {
            Ok(problem) => problem,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let (min, max) = operand_range(&request.config);
        let answer = problem.answer();
        let mut errors = Vec::new();
        if answer < min.saturating_mul(2) || answer > max.saturating_mul(2) {
            errors.push(format!("answer {answer} out of expected range"));
        }
        Some(ValidationReport::from_findings(errors, Vec::new()))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Add Two Numbers",
            &["addition"],
            &["2", "3"],
            json!({ "min": DEFAULT_RANGE.0, "max": DEFAULT_RANGE.1 }),
        )
        .with_field_bindings(&[("Min", "min"), ("Max", "max")]),
        AddTwoNumbers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands_within_default_range() {
        for seed in 1..200 {
            let problem = draw(&GenerationRequest::new(seed)).unwrap();
            assert!((2..=12).contains(&problem.a));
            assert!((2..=12).contains(&problem.b));
        }
    }

    #[test]
    fn test_front_hides_answer_and_back_reveals_it() {
        let front = AddTwoNumbers.generate(&GenerationRequest::new(5)).unwrap();
        let back = AddTwoNumbers
            .generate(&GenerationRequest::new(5).with_side(Side::Back))
            .unwrap();
        assert!(front.html.ends_with("= ?</div>"));
        assert!(back.html.contains("= <b>"));
        assert_eq!(front.data["a"], back.data["a"]);
        assert_eq!(front.data["b"], back.data["b"]);
        assert_eq!(
            back.data["answer"].as_i64().unwrap(),
            back.data["a"].as_i64().unwrap() + back.data["b"].as_i64().unwrap()
        );
    }

    #[test]
    fn test_inverted_config_uses_defaults() {
        let config = TemplateConfig::new().with("min", 50).with("max", 3);
        let problem = draw(&GenerationRequest::new(9).with_config(config)).unwrap();
        assert_eq!(problem, draw(&GenerationRequest::new(9)).unwrap());
    }

    #[test]
    fn test_validate_passes() {
        let report = AddTwoNumbers.validate(&GenerationRequest::new(10)).unwrap();
        assert!(report.ok, "{report:?}");
    }
}
