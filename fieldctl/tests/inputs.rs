//! Tests for the built-in input adapters.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldctl::prelude::*;

use common::{init_logger, next_outcome};

fn record(input: &dyn InputAdapter) -> Arc<Mutex<Vec<InputEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    input.on_event(Arc::new(move |event: &InputEvent| {
        sink.lock().unwrap().push(*event);
    }));
    seen
}

fn colors() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("red").label("Red"),
        ChoiceOption::new("green").label("Green"),
        ChoiceOption::new("blue").label("Blue"),
    ]
}

// =============================================================================
// TextInput
// =============================================================================

#[test]
fn test_text_input_emits_change_only_on_new_value() {
    let input = TextInput::new();
    let seen = record(&input);

    input.input("a");
    input.input("a");
    input.blur();

    assert_eq!(*seen.lock().unwrap(), vec![InputEvent::Change, InputEvent::Blur]);
    assert_eq!(input.value(), "a");
}

#[test]
fn test_disabled_text_input_ignores_typing() {
    let input = TextInput::with_value("locked");
    let seen = record(&input);

    input.set_disabled(true);
    input.input("changed");
    input.click();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(input.text(), "locked");
}

#[test]
fn test_set_value_is_silent() {
    let input = TextInput::new();
    let seen = record(&input);

    input.set_value(Value::from("quiet"));
    input.clear();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(input.value(), "");
}

// =============================================================================
// OptionInput
// =============================================================================

#[test]
fn test_option_value_is_checked_option() {
    let timer = Arc::new(ManualTimer::new());
    let input = OptionInput::new(
        vec![
            ChoiceOption::new("red"),
            ChoiceOption::new("green").checked(),
            ChoiceOption::new("blue").checked(),
        ],
        timer,
    );

    assert_eq!(input.value(), "green");
    assert!(!input.is_selected("blue"));

    input.set_value(Value::from("blue"));
    assert_eq!(input.value(), "blue");

    input.clear();
    assert_eq!(input.value(), "");
}

#[test]
fn test_unknown_option_is_not_found() {
    let input = OptionInput::new(colors(), Arc::new(ManualTimer::new()));

    let err = input.is_option_disabled("purple").unwrap_err();
    assert_eq!(err.to_string(), "Option \"purple\" not found");
    assert!(matches!(
        input.set_option_disabled("purple", true),
        Err(ControlError::OptionNotFound { ref value }) if value == "purple"
    ));
    assert!(input.click("purple").is_err());
}

#[test]
fn test_option_disabled_state() {
    let input = OptionInput::new(colors(), Arc::new(ManualTimer::new()));

    input.set_option_disabled("green", true).unwrap();
    assert!(input.is_option_disabled("green").unwrap());
    assert!(!input.is_option_disabled("red").unwrap());
    assert!(!input.is_disabled());

    input.set_disabled(true);
    assert!(input.is_disabled());
}

#[test]
fn test_click_emits_change_only_when_selection_moves() {
    let input = OptionInput::new(colors(), Arc::new(ManualTimer::new()));
    let seen = record(&input);

    input.click("red").unwrap();
    input.click("red").unwrap();
    input.click("blue").unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            InputEvent::Click,
            InputEvent::Change,
            InputEvent::Click,
            InputEvent::Click,
            InputEvent::Change,
        ]
    );
    assert_eq!(input.value(), "blue");
    assert_eq!(input.focused_option().as_deref(), Some("blue"));
}

#[test]
fn test_set_value_updates_snapshot() {
    let input = OptionInput::new(colors(), Arc::new(ManualTimer::new()));
    let seen = record(&input);

    input.set_value(Value::from("green"));
    input.click("green").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![InputEvent::Click]);
}

#[test]
fn test_click_on_disabled_option_is_ignored() {
    let input = OptionInput::new(colors(), Arc::new(ManualTimer::new()));
    let seen = record(&input);

    input.set_option_disabled("red", true).unwrap();
    input.click("red").unwrap();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(input.value(), "");
}

#[test]
fn test_blur_is_emitted_after_grace_period() {
    let timer = ManualTimer::new();
    let input = OptionInput::new(colors(), Arc::new(timer.clone()));
    let seen = record(&input);

    input.blur();
    timer.advance(Duration::from_millis(199));
    assert!(seen.lock().unwrap().is_empty());

    timer.advance(Duration::from_millis(1));
    assert_eq!(*seen.lock().unwrap(), vec![InputEvent::Blur]);
}

#[test]
fn test_click_during_grace_period_suppresses_blur() {
    let timer = ManualTimer::new();
    let input = OptionInput::new(colors(), Arc::new(timer.clone()))
        .with_blur_grace(Duration::from_millis(50));
    let seen = record(&input);

    input.blur();
    timer.advance(Duration::from_millis(20));
    input.click("green").unwrap();
    timer.advance(Duration::from_millis(100));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![InputEvent::Click, InputEvent::Change]
    );
}

#[test]
fn test_blur_click_blur_emits_single_blur() {
    let timer = ManualTimer::new();
    let input = OptionInput::new(colors(), Arc::new(timer.clone()))
        .with_blur_grace(Duration::from_millis(50));
    let seen = record(&input);

    input.blur();
    timer.advance(Duration::from_millis(10));
    input.click("green").unwrap();
    assert_eq!(timer.pending(), 0);

    timer.advance(Duration::from_millis(10));
    input.blur();
    timer.advance(Duration::from_millis(100));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![InputEvent::Click, InputEvent::Change, InputEvent::Blur]
    );
}

#[test]
fn test_repeated_blur_replaces_pending_one() {
    let timer = ManualTimer::new();
    let input = OptionInput::new(colors(), Arc::new(timer.clone()));
    let seen = record(&input);

    input.blur();
    timer.advance(Duration::from_millis(100));
    input.blur();
    assert_eq!(timer.pending(), 1);

    timer.advance(Duration::from_millis(150));
    assert!(seen.lock().unwrap().is_empty());

    timer.advance(Duration::from_millis(50));
    assert_eq!(*seen.lock().unwrap(), vec![InputEvent::Blur]);
}

#[test]
fn test_option_focus_targets_checked_option() {
    let input = OptionInput::new(colors(), Arc::new(ManualTimer::new()));

    input.focus();
    assert_eq!(input.focused_option().as_deref(), Some("red"));

    input.set_value(Value::from("blue"));
    input.focus();
    assert_eq!(input.focused_option().as_deref(), Some("blue"));
    assert!(input.is_focused());
}

// =============================================================================
// MultiOptionInput
// =============================================================================

#[test]
fn test_toggle_builds_ordered_list() {
    let input = MultiOptionInput::new(colors());
    let seen = record(&input);

    input.toggle("blue").unwrap();
    input.toggle("red").unwrap();

    assert_eq!(input.value(), Value::from(vec!["red", "blue"]));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            InputEvent::Click,
            InputEvent::Change,
            InputEvent::Click,
            InputEvent::Change,
        ]
    );

    input.toggle("red").unwrap();
    assert_eq!(input.value(), Value::from(vec!["blue"]));
}

#[test]
fn test_multi_set_value_and_clear() {
    let input = MultiOptionInput::new(colors());

    input.set_value(Value::from(vec!["green", "blue", "purple"]));
    assert_eq!(input.value(), Value::from(vec!["green", "blue"]));

    input.set_value(Value::from("red"));
    assert_eq!(input.value(), Value::from(vec!["red"]));

    input.clear();
    assert_eq!(input.value(), Value::List(Vec::new()));
}

#[test]
fn test_multi_disabled_option_ignores_toggle() {
    let input = MultiOptionInput::new(colors());
    input.set_option_disabled("red", true).unwrap();

    input.toggle("red").unwrap();

    assert!(!input.is_selected("red"));
    assert!(input.is_option_disabled("red").unwrap());
    assert!(input.toggle("purple").is_err());
}

// =============================================================================
// Input
// =============================================================================

#[test]
fn test_input_from_kind() {
    let timer: Arc<dyn TimerService> = Arc::new(ManualTimer::new());

    let text = Input::new(InputKind::Text, colors(), Arc::clone(&timer));
    let single = Input::new(InputKind::Option, colors(), Arc::clone(&timer));
    let multi = Input::new(InputKind::MultiOption, colors(), timer);

    assert_eq!(text.kind(), InputKind::Text);
    assert_eq!(single.kind(), InputKind::Option);
    assert_eq!(multi.kind(), InputKind::MultiOption);

    assert_eq!(text.value(), "");
    assert_eq!(single.value(), "");
    assert_eq!(multi.value(), Value::List(Vec::new()));

    single.set_value(Value::from("green"));
    assert_eq!(single.value(), "green");
}

// =============================================================================
// Choice inputs driving controls
// =============================================================================

#[tokio::test]
async fn test_option_click_validates_selection() {
    init_logger();
    let timer = ManualTimer::new();
    let input = OptionInput::new(colors(), Arc::new(timer.clone()));
    let control = Control::builder("color")
        .input(input.clone())
        .validator(ValidatorChain::new().one_of(["red", "green"], "Pick red or green"))
        .triggers([InputEvent::Blur, InputEvent::Click])
        .build()
        .unwrap();
    let mut rx = control.subscribe();

    input.click("blue").unwrap();
    match next_outcome(&mut rx).await {
        ControlEvent::Validate { valid, value, .. } => {
            assert!(!valid);
            assert_eq!(value, "blue");
        }
        other => panic!("unexpected event: {:?}", other),
    }

    input.click("red").unwrap();
    match next_outcome(&mut rx).await {
        ControlEvent::Validate { valid, value, .. } => {
            assert!(valid);
            assert_eq!(value, "red");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_multi_option_control_validates_list() {
    init_logger();
    let input = MultiOptionInput::new(colors());
    let control = Control::builder("colors")
        .input(input.clone())
        .validator(
            ValidatorChain::new()
                .min_selected(1, "Pick at least one")
                .max_selected(2, "Pick at most two"),
        )
        .triggers([InputEvent::Click])
        .build()
        .unwrap();
    let mut rx = control.subscribe();

    input.toggle("red").unwrap();
    match next_outcome(&mut rx).await {
        ControlEvent::Validate { valid, value, .. } => {
            assert!(valid);
            assert_eq!(value, Value::from(vec!["red"]));
        }
        other => panic!("unexpected event: {:?}", other),
    }

    control.set_value(vec!["red", "green", "blue"]);
    let validation = control.validate().await.unwrap().unwrap();
    assert!(!validation.valid);
    assert_eq!(validation.message.as_deref(), Some("Pick at most two"));

    control.clear();
    assert_eq!(control.value(), Value::List(Vec::new()));
}
