//! Cross-template properties of the built-in generators.

use dynamath_core::rng::gcd;
use dynamath_templates::arithmetic::division::Division;
use dynamath_templates::{GenerationRequest, Side, TemplateConfig, TemplateRegistry};
use serde_json::json;

const ORDER_OF_OPERATIONS: &str = "arithmetic/order_of_operations";

fn registry() -> TemplateRegistry {
    TemplateRegistry::with_builtin_templates().unwrap()
}

#[test]
fn test_front_data_is_preserved_on_back_for_every_template() {
    let registry = registry();
    for (id, descriptor) in registry.iter() {
        for seed in 0..100 {
            let front = descriptor.generate(&GenerationRequest::new(seed)).unwrap();
            let back = descriptor
                .generate(&GenerationRequest::new(seed).with_side(Side::Back))
                .unwrap();
            let front_data = front.data.as_object().unwrap();
            for (key, value) in front_data {
                assert_eq!(
                    back.data.get(key),
                    Some(value),
                    "{id} seed {seed}: back disagrees on {key}"
                );
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let registry = registry();
    for (id, descriptor) in registry.iter() {
        for seed in [0, 1, 7, 15, 4_294_967_295] {
            let request = GenerationRequest::new(seed).with_side(Side::Back);
            assert_eq!(
                descriptor.generate(&request).unwrap(),
                descriptor.generate(&request).unwrap(),
                "{id} seed {seed}"
            );
        }
    }
}

#[test]
fn test_front_html_never_shows_the_answer() {
    let registry = registry();
    for (id, descriptor) in registry.iter() {
        for seed in 0..20 {
            let front = descriptor.generate(&GenerationRequest::new(seed)).unwrap();
            assert!(!front.html.contains(r#"id="answer""#), "{id} seed {seed}");
            assert!(!front.html.contains("<b>"), "{id} seed {seed}");
        }
    }
}

#[test]
fn test_every_builtin_validates_its_own_output() {
    let registry = registry();
    for (id, descriptor) in registry.iter() {
        for seed in 0..50 {
            let report = descriptor
                .validate(&GenerationRequest::new(seed))
                .unwrap()
                .unwrap_or_else(|| panic!("{id} has no validator"));
            if id != ORDER_OF_OPERATIONS {
                assert!(report.ok, "{id} seed {seed}: {:?}", report.errors);
            }
        }
    }
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let registry = registry();
    let junk = TemplateConfig::from_value(json!({
        "min": "abc",
        "max": -4,
        "maxDivisor": "3",
        "maxBase": "",
        "numTerms": "zero",
        "digits": "9,9",
        "lcmCap": "x",
        "maxValue": null,
        "minRound": "bogus",
    }));
    for (id, descriptor) in registry.iter() {
        let plain = descriptor.generate(&GenerationRequest::new(21)).unwrap();
        let with_junk = descriptor
            .generate(&GenerationRequest::new(21).with_config(junk.clone()))
            .unwrap();
        assert_eq!(plain, with_junk, "{id}");
    }
}

#[test]
fn test_gcf_scenario_seed_7() {
    let back = registry()
        .get("number_theory/gcf_basic")
        .unwrap()
        .generate(&GenerationRequest::new(7).with_side(Side::Back))
        .unwrap();
    assert_eq!(back.data, json!({ "a": 77, "b": 56, "answer": 7 }));
    assert_eq!(back.html, r#"<div class="q">GCF(77, 56) = <b>7</b></div>"#);
}

#[test]
fn test_lcm_scenario_seed_15_small_cap() {
    let config = TemplateConfig::from_value(json!({ "count": 2, "digits": 1, "lcmCap": 72 }));
    let back = registry()
        .get("number_theory/lcm_basic")
        .unwrap()
        .generate(
            &GenerationRequest::new(15)
                .with_config(config)
                .with_side(Side::Back),
        )
        .unwrap();
    let operands: Vec<u64> = serde_json::from_value(back.data["operands"].clone()).unwrap();
    let answer = back.data["answer"].as_u64().unwrap();
    let [a, b] = operands[..] else {
        panic!("expected two operands, got {operands:?}");
    };
    assert_eq!(answer * gcd(a, b), a * b);
    assert!(answer <= 72);
    assert_eq!((a, b, answer), (6, 3, 6));
}

#[test]
fn test_long_division_scenario() {
    let division = Division {
        dividend: 7543,
        divisor: 23,
    };
    assert_eq!(division.quotient(), 327);
    assert_eq!(division.remainder(), 22);
    assert_eq!(division.answer_text(), "327 with remainder 22");
}
