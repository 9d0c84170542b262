//! `data-id` scanning for folder pages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Matches `data-id="..."` and `data-id='...'` attributes, tolerating spaces around `=`.
#[allow(clippy::expect_used)]
static DATA_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-id\s*=\s*["']([^"']+)["']"#).expect("data-id regex is valid") // Static pattern, safe to panic
});

/// Values shorter than this are layout ids, not files.
pub const MIN_DATA_ID_LEN: usize = 5;

/// Extracts the unique `data-id` values from a folder page body.
///
/// Order of first appearance is preserved; duplicates and values shorter
/// than [`MIN_DATA_ID_LEN`] characters are dropped.
#[must_use]
pub fn extract_data_ids(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for caps in DATA_ID_PATTERN.captures_iter(body) {
        let Some(value) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if value.chars().count() < MIN_DATA_ID_LEN {
            trace!(value, "skipping short data-id");
            continue;
        }
        if seen.insert(value) {
            ids.push(value.to_string());
        }
    }

    ids
}
