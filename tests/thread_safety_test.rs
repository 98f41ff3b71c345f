//! Tests for thread-safe concurrent access to validator registries.

use serde_json::{json, Value};
use shiver::{execute, validator, Registry, Rule, Validator};
use std::sync::Arc;
use std::thread;

fn positive() -> Validator {
    validator(|assert, value, _| assert.that(value.and_then(Value::as_f64).is_some_and(|n| n > 0.0)))
}

fn no_privates() -> Vec<(String, Validator)> {
    Vec::new()
}

#[test]
fn test_concurrent_rule_building() {
    let registry = Registry::new();
    registry.register("positive", positive()).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                let mut rule = Rule::build_in("id", &registry, no_privates())
                    .and_then(|rule| rule.check("positive", Vec::new()))
                    .unwrap();
                assert!(rule.validate(&json!({ "id": i + 1 })).unwrap());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_rules_move_across_threads() {
    let mut rules = vec![
        Rule::new("name").existence().ascii(),
        Rule::new("age").int(false),
    ];

    let handle = thread::spawn(move || {
        let passed = execute(&mut rules, &json!({"name": "User", "age": 30})).unwrap();
        (passed, rules)
    });

    let (passed, rules) = handle.join().unwrap();
    assert!(passed);
    assert_eq!(rules[1].value(), Some(&json!(30)));
}

#[test]
fn test_shared_validator_across_threads() {
    let shared = Arc::new(positive());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut rule = Rule::build("n", [("positive", (*shared).clone())])
                    .and_then(|rule| rule.check("positive", Vec::new()))
                    .unwrap();
                assert_eq!(rule.validate(&json!({ "n": i - 5 })).unwrap(), i > 5);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_mixed_operations() {
    let registry = Registry::new();
    registry.register("positive", positive()).unwrap();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                if i % 2 == 0 {
                    // Even threads build and run rules
                    let mut rule = Rule::build_in("id", &registry, no_privates())
                        .and_then(|rule| rule.check("positive", Vec::new()))
                        .unwrap();
                    assert!(rule.validate(&json!({ "id": i + 1 })).unwrap());
                } else {
                    // Odd threads register new validators
                    registry
                        .register(format!("extra_{i}"), validator(|assert, _, _| assert.that(true)))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 11);
}

#[test]
fn test_global_registry_thread_safety() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let name = format!("thread_safety_global_{i}");
                Registry::global().register(name.clone(), positive()).unwrap();
                let mut rule = Rule::new("n").check(&name, Vec::new()).unwrap();
                assert!(rule.validate(&json!({"n": 1})).unwrap());
                Registry::global().unregister(&name).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
