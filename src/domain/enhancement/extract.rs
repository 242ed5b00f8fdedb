//! Recovery of the enhancement payload from raw model output
//!
//! Models wrap their JSON in prose, markdown fences, or both, no matter how
//! firmly the prompt asks otherwise. `recover` digs the payload out.

use thiserror::Error;

use super::payload::EnhancementPayload;

/// Why recovery failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("The response contained no JSON object")]
    NoJsonFound,

    #[error("The response JSON could not be decoded: {0}")]
    InvalidJson(String),

    #[error("The response JSON is missing required field \"{0}\"")]
    MissingField(&'static str),
}

/// Recover a validated payload from raw model text.
///
/// Strategy order: body of the first fenced code block if one exists, then
/// balanced-brace candidate spans left to right, then the widest `{`..`}`
/// span. Once a span parses as JSON it is committed; if it then fails schema
/// validation the error is reported as-is, later candidates are not retried.
pub fn recover(raw: &str) -> Result<EnhancementPayload, ExtractError> {
    let trimmed = raw.trim();
    let working = fenced_body(trimmed).unwrap_or(trimmed);

    let span = match first_parsable_candidate(working) {
        Some(span) => span,
        None => widest_span(working).ok_or_else(|| no_span_error(working))?,
    };

    decode(span)
}

/// Body of the first fenced code block, language tag stripped. Returns None
/// for unterminated fences and empty bodies, so the caller falls back to the
/// original text.
fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let rest = &text[open + 3..];
    let close = rest.find("```")?;
    let block = &rest[..close];
    let body = match block.split_once('\n') {
        Some((_tag, body)) => body,
        None => block,
    };
    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// First span that closes back to brace depth zero and parses as JSON.
/// The depth scan is not string-aware; `widest_span` exists to catch objects
/// this scan cuts short at a `}` inside a string value.
fn first_parsable_candidate(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in text.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(s) = start.take() {
                            let candidate = &text[s..i + 1];
                            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                                return Some(candidate);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Span from the first `{` through the last `}`
fn widest_span(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    if first < last {
        Some(&text[first..=last])
    } else {
        None
    }
}

fn no_span_error(text: &str) -> ExtractError {
    if text.contains('{') {
        ExtractError::InvalidJson("unbalanced braces".to_string())
    } else {
        ExtractError::NoJsonFound
    }
}

fn decode(span: &str) -> Result<EnhancementPayload, ExtractError> {
    let payload: EnhancementPayload =
        serde_json::from_str(span).map_err(|e| ExtractError::InvalidJson(e.to_string()))?;
    if payload.enhanced_text.is_empty() {
        return Err(ExtractError::MissingField("enhancedText"));
    }
    Ok(payload)
}
