//! Strict decoding of the classifier answer.

use serde::Deserialize;

use crate::errors::SchemaError;

/// Verdict for one input of the batch (1-based `index`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassificationResult {
    pub index: usize,
    pub eligible: bool,
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize)]
struct Envelope {
    results: Vec<ClassificationResult>,
}

/// Parses `raw` and checks it holds exactly `expected` results indexed `1..=expected` in order.
pub fn parse_results(raw: &str, expected: usize) -> Result<Vec<ClassificationResult>, SchemaError> {
    let clean = strip_code_fence(raw);
    let envelope: Envelope =
        serde_json::from_str(clean).map_err(|e| SchemaError::Unparseable(e.to_string()))?;

    let results = envelope.results;
    if results.len() != expected {
        return Err(SchemaError::CountMismatch {
            expected,
            got: results.len(),
        });
    }
    for (position, r) in results.iter().enumerate() {
        if r.index != position + 1 {
            return Err(SchemaError::IndexMismatch {
                position,
                expected: position + 1,
                found: r.index,
            });
        }
    }
    Ok(results)
}

/// Removes a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(s: &str) -> &str {
    let t = s.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"{"results":[
        {"index":1,"eligible":true,"reason":"scene with detail"},
        {"index":2,"eligible":false,"reason":"compliment"}]}"#;

    #[test]
    fn accepts_well_formed_batch() {
        let r = parse_results(TWO, 2).expect("valid");
        assert!(r[0].eligible);
        assert!(!r[1].eligible);
        assert_eq!(r[1].reason, "compliment");
    }

    #[test]
    fn one_result_short_is_a_schema_error() {
        assert_eq!(
            parse_results(TWO, 3),
            Err(SchemaError::CountMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn out_of_order_indices_are_rejected() {
        let raw = r#"{"results":[{"index":2,"eligible":true,"reason":""},{"index":1,"eligible":true,"reason":""}]}"#;
        assert!(matches!(
            parse_results(raw, 2),
            Err(SchemaError::IndexMismatch { position: 0, .. })
        ));
    }

    #[test]
    fn prose_and_wrong_types_are_unparseable() {
        assert!(matches!(
            parse_results("Sure! Here are the results.", 1),
            Err(SchemaError::Unparseable(_))
        ));
        assert!(matches!(
            parse_results(r#"{"results":[{"index":1,"eligible":"yes"}]}"#, 1),
            Err(SchemaError::Unparseable(_))
        ));
    }

    #[test]
    fn code_fence_is_tolerated() {
        let fenced = format!("```json\n{TWO}\n```");
        assert_eq!(parse_results(&fenced, 2).expect("valid").len(), 2);
        let bare_fence = format!("```\n{TWO}\n```");
        assert_eq!(parse_results(&bare_fence, 2).expect("valid").len(), 2);
    }

    #[test]
    fn missing_reason_defaults_to_empty() {
        let r = parse_results(r#"{"results":[{"index":1,"eligible":true}]}"#, 1).expect("valid");
        assert_eq!(r[0].reason, "");
    }
}
