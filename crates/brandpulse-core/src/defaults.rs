//! Serde helpers that substitute defaults for fields a model omits or nulls.
//!
//! `#[serde(default)]` only covers missing keys; these also map an explicit
//! `null` to the field's default so downstream code never sees a hole.

use serde::{Deserialize, Deserializer};

/// Placeholder for textual fields the model left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Deserialize `T`, treating `null` as `T::default()`.
///
/// # Errors
///
/// Propagates the inner deserializer error for values of the wrong shape.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a string, treating `null` or blank as [`NOT_AVAILABLE`].
///
/// # Errors
///
/// Propagates the inner deserializer error for non-string values.
pub fn text_or_na<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(not_available))
}

#[must_use]
pub fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default = "not_available", deserialize_with = "text_or_na")]
        summary: String,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        flag: bool,
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(s.summary, "N/A");
        assert!(s.tags.is_empty());
        assert!(!s.flag);
    }

    #[test]
    fn null_fields_take_defaults() {
        let s: Sample =
            serde_json::from_str(r#"{"summary": null, "tags": null, "flag": null}"#).unwrap();
        assert_eq!(s.summary, "N/A");
        assert!(s.tags.is_empty());
        assert!(!s.flag);
    }

    #[test]
    fn blank_summary_becomes_na() {
        let s: Sample = serde_json::from_str(r#"{"summary": "  "}"#).unwrap();
        assert_eq!(s.summary, "N/A");
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let result = serde_json::from_str::<Sample>(r#"{"tags": "not-a-list"}"#);
        assert!(result.is_err());
    }
}
