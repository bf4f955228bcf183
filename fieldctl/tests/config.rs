//! Tests for configuration loading.

use std::time::Duration;

use fieldctl::input::{ChoiceOption, InputKind};
use fieldctl::{ControlConfig, InputEvent, InputPolicy};

#[test]
fn test_defaults() {
    let config = ControlConfig::default();
    assert_eq!(config.delay(), None);
    assert_eq!(config.triggers, vec![InputEvent::Blur]);
    assert_eq!(config.policy, InputPolicy::Strict);
}

#[test]
fn test_deserialize_full() {
    let config: ControlConfig = serde_json::from_str(
        r#"{ "delay_ms": 250, "triggers": ["blur", "click"], "policy": "lenient" }"#,
    )
    .unwrap();

    assert_eq!(config.delay(), Some(Duration::from_millis(250)));
    assert_eq!(config.triggers, vec![InputEvent::Blur, InputEvent::Click]);
    assert_eq!(config.policy, InputPolicy::Lenient);
}

#[test]
fn test_deserialize_empty_uses_defaults() {
    let config: ControlConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ControlConfig::default());
}

#[test]
fn test_zero_delay_is_no_delay() {
    let config: ControlConfig = serde_json::from_str(r#"{ "delay_ms": 0 }"#).unwrap();
    assert_eq!(config.delay(), None);
}

#[test]
fn test_delay_keeps_full_precision() {
    let config = ControlConfig::new().with_delay(Duration::from_micros(1_900));
    assert_eq!(config.delay(), Some(Duration::from_micros(1_900)));

    let config = ControlConfig::new().with_delay(Duration::from_micros(500));
    assert_eq!(config.delay(), Some(Duration::from_micros(500)));
}

#[test]
fn test_unknown_trigger_is_rejected() {
    let result: Result<ControlConfig, _> = serde_json::from_str(r#"{ "triggers": ["hover"] }"#);
    assert!(result.is_err());
}

#[test]
fn test_deserialize_choices() {
    let kind: InputKind = serde_json::from_str(r#""multi-option""#).unwrap();
    assert_eq!(kind, InputKind::MultiOption);

    let options: Vec<ChoiceOption> = serde_json::from_str(
        r#"[{ "value": "s", "label": "Small", "checked": true }, { "value": "m" }]"#,
    )
    .unwrap();
    assert_eq!(options[0], ChoiceOption::new("s").label("Small").checked());
    assert!(!options[1].checked);
    assert!(!options[1].disabled);
}
