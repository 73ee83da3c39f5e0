//! Byte decoding with a GBK-family fallback for garbled UTF-8.

use encoding_rs::{Encoding, GB18030, GBK, UTF_8};

/// Share of replacement characters above which UTF-8 output is treated as garbled.
pub const GARBLED_THRESHOLD: f64 = 0.01;

/// Alternate codecs tried in order when UTF-8 output looks garbled.
fn fallback_encodings() -> [&'static Encoding; 2] {
    [GBK, GB18030]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static str,
    /// Replacement-character share of the UTF-8 attempt.
    pub garbled_ratio: f64,
}

/// Decode report bytes, preferring UTF-8.
///
/// When more than [`GARBLED_THRESHOLD`] of the UTF-8 output is U+FFFD, the
/// same bytes are re-decoded with GBK and then GB18030. The first codec that
/// decodes cleanly wins. If every codec hits malformed sequences, the one with
/// the fewest replacement characters is used, provided it beats UTF-8.
#[must_use]
pub fn decode_report(bytes: &[u8]) -> Decoded {
    let (utf8, _, _) = UTF_8.decode(bytes);
    let garbled_ratio = replacement_ratio(&utf8);

    if garbled_ratio > GARBLED_THRESHOLD {
        let mut best: Option<(&'static Encoding, String, f64)> = None;
        for encoding in fallback_encodings() {
            let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
            if !had_errors {
                tracing::debug!(
                    encoding = encoding.name(),
                    garbled_ratio,
                    "re-decoded report with fallback codec"
                );
                return Decoded {
                    text: text.into_owned(),
                    encoding: encoding.name(),
                    garbled_ratio,
                };
            }
            let ratio = replacement_ratio(&text);
            tracing::debug!(
                encoding = encoding.name(),
                ratio,
                "fallback codec hit malformed sequences"
            );
            if best.as_ref().is_none_or(|(_, _, r)| ratio < *r) {
                best = Some((encoding, text.into_owned(), ratio));
            }
        }

        if let Some((encoding, text, ratio)) = best {
            if ratio < garbled_ratio {
                tracing::debug!(
                    encoding = encoding.name(),
                    garbled_ratio,
                    ratio,
                    "re-decoded report with replacement characters"
                );
                return Decoded {
                    text,
                    encoding: encoding.name(),
                    garbled_ratio,
                };
            }
        }
    }

    Decoded {
        text: utf8.into_owned(),
        encoding: UTF_8.name(),
        garbled_ratio,
    }
}

#[allow(clippy::cast_precision_loss)]
fn replacement_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let garbled = text.chars().filter(|&c| c == char::REPLACEMENT_CHARACTER).count();
    garbled as f64 / total as f64
}
