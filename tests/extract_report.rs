//! JSON extraction from noisy model output.

use moment_trace::llm::extract_json_object;
use serde_json::{json, Value};

#[test]
fn recovers_object_wrapped_in_prose_and_fences() {
    let report = json!({
        "profile": { "summary": "friendly" },
        "strategy": { "commonTopics": ["travel"] },
        "openers": [],
        "compatibility": { "strengths": [], "challenges": [] }
    });
    let response = format!(
        "Sure! Here is the analysis you asked for:\n```json\n{}\n```\nLet me know if you need more.",
        report
    );

    let extracted = extract_json_object(&response).expect("object found");
    let parsed: Value = serde_json::from_str(extracted).expect("valid JSON");
    assert_eq!(parsed, report);
}

#[test]
fn braces_inside_string_values_do_not_truncate() {
    let text = r#"noise {"text": "use { curly } braces", "n": 1} trailing"#;
    let extracted = extract_json_object(text).unwrap();
    assert_eq!(extracted, r#"{"text": "use { curly } braces", "n": 1}"#);
}

#[test]
fn escaped_quotes_inside_strings_are_handled() {
    let text = r#"{"quote": "she said \"hi {\" and left"}"#;
    let extracted = extract_json_object(text).unwrap();
    let parsed: Value = serde_json::from_str(extracted).unwrap();
    assert_eq!(parsed["quote"], "she said \"hi {\" and left");
}

#[test]
fn stray_opening_brace_before_the_object_is_skipped() {
    let text = "{ oops, not json\n{\"a\": 1}";
    assert_eq!(extract_json_object(text), Some("{\"a\": 1}"));
}

#[test]
fn first_complete_object_wins() {
    let text = r#"{"a": 1} {"b": 2}"#;
    assert_eq!(extract_json_object(text), Some(r#"{"a": 1}"#));
}

#[test]
fn no_object_yields_none() {
    assert_eq!(extract_json_object("no json here"), None);
    assert_eq!(extract_json_object(""), None);
    assert_eq!(extract_json_object("{ never closes"), None);
    assert_eq!(extract_json_object("} only closes {"), None);
}

#[test]
fn nested_objects_extract_whole() {
    let text = r#"prefix {"outer": {"inner": {"deep": true}}} suffix"#;
    let extracted = extract_json_object(text).unwrap();
    let parsed: Value = serde_json::from_str(extracted).unwrap();
    assert_eq!(parsed["outer"]["inner"]["deep"], true);
}
