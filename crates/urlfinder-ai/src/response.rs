//! Structured response parsing: strict JSON first, one repair attempt second.

use serde_json::Value;
use tracing::debug;

use crate::ParseFailure;
use crate::repair::repair_json;

/// A successfully parsed model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub value: Value,
    /// `true` when strict parsing failed and the repaired text was used.
    pub repaired: bool,
}

/// Parse a raw model response into a JSON value.
///
/// Tries a strict parse of the trimmed text, then exactly one repair-and-reparse.
/// On failure the returned [`ParseFailure`] carries the original text.
pub fn parse_response(raw: &str) -> Result<ParsedResponse, ParseFailure> {
    let trimmed = raw.trim();

    let strict_err = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => {
            return Ok(ParsedResponse {
                value,
                repaired: false,
            });
        }
        Err(e) => e,
    };
    debug!(error = %strict_err, "strict JSON parse failed, attempting repair");

    let Some(fixed) = repair_json(trimmed) else {
        return Err(ParseFailure {
            raw: raw.to_string(),
            reason: format!("{strict_err}; no JSON object or array to repair"),
        });
    };

    match serde_json::from_str::<Value>(&fixed) {
        Ok(value) => Ok(ParsedResponse {
            value,
            repaired: true,
        }),
        Err(repair_err) => Err(ParseFailure {
            raw: raw.to_string(),
            reason: format!("{strict_err}; after repair: {repair_err}"),
        }),
    }
}
