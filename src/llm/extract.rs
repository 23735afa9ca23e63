//! JSON recovery from noisy model output.
//!
//! Models wrap their JSON in prose, markdown fences, or apologies. The
//! extractor locates the first complete top-level JSON object with a
//! bracket-depth scan that respects quoted strings and escapes, so braces
//! inside string values can't truncate the object. Parsing is left to the
//! caller.

/// Locate the first complete top-level JSON object in `text`.
///
/// Returns the exact `{...}` substring, or `None` if no balanced object
/// exists. A stray `{` in surrounding prose is skipped — the scan retries
/// from each subsequent opening brace.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find('{') {
        let start = search_from + rel;
        if let Some(len) = balanced_object_len(&text[start..]) {
            return Some(&text[start..start + len]);
        }
        search_from = start + 1;
    }
    None
}

/// Byte length of the balanced object starting at `s` (which must begin
/// with `{`), or `None` if it never closes.
fn balanced_object_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Char-safe truncation for diagnostics; long raw output is never logged
/// or returned in full.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
