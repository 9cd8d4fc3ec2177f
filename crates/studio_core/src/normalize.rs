use serde_json::Value;

use crate::GenerationResult;

/// Raw provider response body. The shape is not controlled by this system;
/// it is consumed here and nowhere else.
pub type RawResponse = Value;

/// Normalize any known provider response shape into the canonical result.
///
/// Extraction precedence, first match wins: `result_url`, `result_urls`,
/// `result` (a list of `{urls: [...]}` objects or bare URL lists), top-level
/// `urls`. At most `requested_count` URLs are collected. An unrecognized
/// shape yields an empty result, never an error.
///
/// `synchronous` callers get every URL in `ready` (the provider materialized
/// them before answering); everyone else gets them in `pending`.
pub fn normalize(raw: &RawResponse, requested_count: usize, synchronous: bool) -> GenerationResult {
    let urls = extract_urls(raw, requested_count);
    if synchronous {
        GenerationResult::new(urls, Vec::new())
    } else {
        GenerationResult::new(Vec::new(), urls)
    }
}

fn extract_urls(raw: &Value, limit: usize) -> Vec<String> {
    let mut urls = Vec::new();

    if let Some(url) = raw.get("result_url").and_then(Value::as_str) {
        urls.push(url.to_string());
        return urls;
    }

    if let Some(list) = raw.get("result_urls").and_then(Value::as_array) {
        push_strings(&mut urls, list, limit);
        return urls;
    }

    if let Some(items) = raw.get("result").and_then(Value::as_array) {
        for item in items {
            if let Some(nested) = item.get("urls").and_then(Value::as_array) {
                push_strings(&mut urls, nested, limit);
            } else if let Some(bare) = item.as_array() {
                push_strings(&mut urls, bare, limit);
            }
            if urls.len() >= limit {
                break;
            }
        }
        return urls;
    }

    if let Some(list) = raw.get("urls").and_then(Value::as_array) {
        push_strings(&mut urls, list, limit);
    }

    urls
}

/// Append string entries from `values` until `dst` holds `limit` URLs.
/// Non-string entries are skipped.
fn push_strings(dst: &mut Vec<String>, values: &[Value], limit: usize) {
    for value in values {
        if dst.len() >= limit {
            return;
        }
        if let Some(url) = value.as_str() {
            dst.push(url.to_string());
        }
    }
}
