//! Decoding model text into typed results.

use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// Remove a surrounding Markdown code fence (optionally tagged `json`).
///
/// Text without a leading fence is returned trimmed but otherwise untouched.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.trim()
}

/// Parse model text as JSON into `T` after stripping code fences.
///
/// # Errors
///
/// Returns [`GatewayError::Deserialize`] when the text is not valid JSON for
/// `T`. No partial result is recovered.
pub fn parse_json<T: DeserializeOwned>(raw: &str, context: &str) -> Result<T, GatewayError> {
    serde_json::from_str(strip_code_fences(raw)).map_err(|e| GatewayError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Probe {
        ok: bool,
    }

    #[test]
    fn plain_json_passes_through() {
        assert_eq!(strip_code_fences("  {\"ok\":true}\n"), "{\"ok\":true}");
    }

    #[test]
    fn tagged_fence_is_removed() {
        let raw = "```json\n{\"ok\": true}\n```";
        assert_eq!(strip_code_fences(raw), "{\"ok\": true}");
    }

    #[test]
    fn untagged_fence_is_removed() {
        let raw = "```\n[1, 2]\n```\n";
        assert_eq!(strip_code_fences(raw), "[1, 2]");
    }

    #[test]
    fn single_line_fence_is_removed() {
        assert_eq!(strip_code_fences("```json {\"ok\":false}```"), "{\"ok\":false}");
    }

    #[test]
    fn parse_json_decodes_fenced_payload() {
        let probe: Probe = parse_json("```json\n{\"ok\": true}\n```", "probe").unwrap();
        assert_eq!(probe, Probe { ok: true });
    }

    #[test]
    fn parse_json_fails_on_prose() {
        let err = parse_json::<Probe>("Sure! Here is the JSON you asked for.", "probe").unwrap_err();
        assert!(matches!(err, GatewayError::Deserialize { ref context, .. } if context == "probe"));
    }
}
