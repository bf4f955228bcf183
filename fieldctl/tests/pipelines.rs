//! Tests for filter and validator pipelines.

use regex::Regex;

use fieldctl::prelude::*;

async fn check(chain: &ValidatorChain, value: impl Into<Value>) -> Verdict {
    chain.validate(&value.into()).await.unwrap()
}

// =============================================================================
// Filters
// =============================================================================

#[tokio::test]
async fn test_empty_filter_chain_is_identity() {
    let chain = FilterChain::new();
    assert!(chain.is_empty());
    assert_eq!(chain.filter(Value::from("  As Is ")).await, "  As Is ");
}

#[tokio::test]
async fn test_filters_run_in_order() {
    let chain = FilterChain::new()
        .with(Trim)
        .with(CollapseWhitespace)
        .with(Lowercase);

    assert_eq!(chain.len(), 3);
    assert_eq!(chain.filter(Value::from("  Jane   DOE ")).await, "jane doe");
}

#[tokio::test]
async fn test_replace_filter() {
    let chain = FilterChain::new()
        .with(Replace::new(Regex::new(r"[^0-9]").unwrap(), ""))
        .with(Uppercase);

    assert_eq!(chain.filter(Value::from("+1 (555) 010-9999")).await, "15550109999");
}

#[tokio::test]
async fn test_list_values_are_filtered_per_entry() {
    let chain = FilterChain::new().with(Trim).with(Uppercase);
    let filtered = chain.filter(Value::from(vec![" a", "b "])).await;
    assert_eq!(filtered, Value::from(vec!["A", "B"]));
}

#[tokio::test]
async fn test_closure_filter() {
    let chain = FilterChain::new().with(filter_fn(|value: Value| {
        value.map_text(|text| text.replace('-', ""))
    }));
    assert_eq!(chain.filter(Value::from("12-34")).await, "1234");
}

// =============================================================================
// Validators
// =============================================================================

#[tokio::test]
async fn test_empty_validator_chain_accepts_everything() {
    let chain = ValidatorChain::new();
    assert!(check(&chain, "").await.valid);
    assert!(check(&chain, vec!["a"]).await.valid);
}

#[tokio::test]
async fn test_first_failing_rule_wins() {
    let chain = ValidatorChain::new()
        .required("Required")
        .min_length(3, "Too short")
        .max_length(5, "Too long");

    assert_eq!(check(&chain, "").await.message(&Value::from("")), "Required");
    assert_eq!(check(&chain, "ab").await.message(&Value::from("ab")), "Too short");
    assert_eq!(check(&chain, "abcdef").await.message(&Value::from("abcdef")), "Too long");
    assert!(check(&chain, "abcd").await.valid);
}

#[tokio::test]
async fn test_optional_chain_skips_blank_values() {
    let chain = ValidatorChain::new()
        .optional(true)
        .email("Please enter a valid email");

    assert!(check(&chain, "   ").await.valid);
    assert!(!check(&chain, "not an email").await.valid);
    assert!(check(&chain, "someone@example.com").await.valid);
}

#[tokio::test]
async fn test_pattern_rule() {
    let chain = ValidatorChain::new().pattern(Regex::new(r"^\d{5}$").unwrap(), "Invalid zip");

    assert!(check(&chain, "12345").await.valid);
    assert!(!check(&chain, "1234a").await.valid);
    assert!(check(&chain, vec!["12345", "54321"]).await.valid);
}

#[tokio::test]
async fn test_equals_contains_one_of() {
    let confirm = ValidatorChain::new().equals("secret", "Passwords do not match");
    assert!(check(&confirm, "secret").await.valid);
    assert!(!check(&confirm, "Secret").await.valid);

    let contains = ValidatorChain::new().contains("@", "Missing @");
    assert!(check(&contains, "a@b").await.valid);
    assert!(!check(&contains, vec!["a", "b"]).await.valid);
    assert!(check(&contains, vec!["@", "b"]).await.valid);

    let one_of = ValidatorChain::new().one_of(["s", "m", "l"], "Unknown size");
    assert!(check(&one_of, "m").await.valid);
    assert!(!check(&one_of, "xl").await.valid);
    assert!(!check(&one_of, vec!["s", "xl"]).await.valid);
}

#[tokio::test]
async fn test_selection_rules() {
    let chain = ValidatorChain::new()
        .min_selected(1, "Pick at least one")
        .max_selected(2, "Pick at most two");

    assert!(!check(&chain, Value::List(Vec::new())).await.valid);
    assert!(!check(&chain, " ").await.valid);
    assert!(check(&chain, "single").await.valid);
    assert!(check(&chain, vec!["a", "b"]).await.valid);
    assert!(!check(&chain, vec!["a", "b", "c"]).await.valid);
}

#[tokio::test]
async fn test_async_rules() {
    let chain = ValidatorChain::new().rule_async(
        |value: Value| async move { value != "taken" },
        MessageContext::build(|raw| format!("\"{raw}\" is already taken")),
    );

    assert!(check(&chain, "free").await.valid);
    let verdict = check(&chain, "taken").await;
    assert!(!verdict.valid);
    assert_eq!(verdict.message(&Value::from(" taken ")), "\" taken \" is already taken");
}

#[tokio::test]
async fn test_fallible_rule_error_aborts_chain() {
    let chain = ValidatorChain::new()
        .try_rule_async(
            |_| async { Err::<bool, _>(PipelineError::new("service down")) },
            "unused",
        )
        .required("Required");

    let err = chain.validate(&Value::from("")).await.unwrap_err();
    assert_eq!(err.message, "service down");
    assert_eq!(err.to_string(), "validation pipeline failed: service down");
}

#[test]
fn test_verdict_messages() {
    let raw = Value::from("XY");
    assert_eq!(Verdict::pass().message(&raw), "");
    assert_eq!(Verdict::fail_silent().message(&raw), "");
    assert_eq!(Verdict::fail("Fixed").message(&raw), "Fixed");
    assert_eq!(
        Verdict::fail(MessageContext::build(|v| format!("Bad: {v}"))).message(&raw),
        "Bad: XY"
    );
}
