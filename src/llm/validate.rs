//! Report validation — the last line of defense between model output and
//! presentation.
//!
//! Strict on the four top-level sections, permissive on everything below
//! them: optional fields default, trait scores are clamped into [0,100]
//! instead of rejected, and an empty `openers` list is accepted as a soft
//! case the consuming layer must handle.

use serde_json::Value;

use super::extract::excerpt;
use super::types::AnalysisReport;
use crate::error::AnalysisError;

const REQUIRED_SECTIONS: [&str; 3] = ["profile", "strategy", "compatibility"];

/// Validate a parsed model payload and produce a typed report.
///
/// Fails with `MissingField` if a required section is absent, or
/// `MalformedJson` if the payload can't deserialize into the report shape.
/// `openers` is the one section that may be empty or absent (soft case).
pub fn validate_report(mut parsed: Value) -> Result<AnalysisReport, AnalysisError> {
    for section in REQUIRED_SECTIONS {
        if parsed.get(section).is_none() {
            return Err(AnalysisError::MissingField {
                path: section.to_string(),
            });
        }
    }

    clamp_scores(&mut parsed);

    let report: AnalysisReport = serde_json::from_value(parsed.clone()).map_err(|e| {
        AnalysisError::MalformedJson {
            detail: e.to_string(),
            excerpt: excerpt(&parsed.to_string(), 200),
        }
    })?;

    if report.openers.is_empty() {
        log::warn!("[VALIDATE] Report has no openers — presentation must handle the empty case");
    }

    Ok(report)
}

/// Force every personality score into [0,100]. Non-numeric values become 0 —
/// same permissive posture as the rest of the non-structural fields.
fn clamp_scores(parsed: &mut Value) {
    let Some(scores) = parsed
        .pointer_mut("/profile/personality/scores")
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    for (key, value) in scores.iter_mut() {
        let n = value.as_f64().unwrap_or(0.0);
        let clamped = n.clamp(0.0, 100.0);
        if clamped != n || !value.is_number() {
            log::warn!("[VALIDATE] Score {key} out of range ({value}) — clamped to {clamped}");
        }
        *value = clamped.into();
    }
}
