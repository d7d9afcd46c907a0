//! JSON payload extraction from free-form model output

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// "```json" + newline, then anything (non-greedy) up to the next "```"
static FENCED_JSON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```json\n(.*?)```").unwrap());

/// Return the JSON source contained in a model response
///
/// The interior of the first fenced ```` ```json ```` block wins; without one,
/// the whole text is returned unchanged.
pub fn extract_json_payload(raw: &str) -> &str {
    match FENCED_JSON_RE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(m) => {
            debug!(start = m.start(), len = m.len(), "extract_json_payload: fenced block found");
            m.as_str()
        }
        None => {
            debug!("extract_json_payload: no fenced block, using whole text");
            raw
        }
    }
}
