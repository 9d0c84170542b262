//! File identifier extraction from share links.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Matches the `/file/d/<id>` segment of a Drive share link.
#[allow(clippy::expect_used)]
static FILE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("file id regex is valid") // Static pattern, safe to panic
});

/// Path marker that identifies a folder link.
const FOLDER_MARKER: &str = "/folders/";

/// Extracts the file identifier from a share link.
///
/// Inputs without a `/file/d/<id>` segment are assumed to already be an
/// identifier and are returned unchanged.
///
/// # Examples
///
/// ```
/// use videoloader_core::parser::extract_identifier;
///
/// let id = extract_identifier("https://drive.google.com/file/d/abc-Qt12_x/view?usp=sharing");
/// assert_eq!(id, "abc-Qt12_x");
/// assert_eq!(extract_identifier("abc-Qt12_x"), "abc-Qt12_x");
/// ```
#[must_use]
pub fn extract_identifier(input: &str) -> String {
    match FILE_ID_PATTERN.captures(input).and_then(|caps| caps.get(1)) {
        Some(id) => {
            trace!(id = id.as_str(), "matched file id in link");
            id.as_str().to_string()
        }
        None => input.to_string(),
    }
}

/// Returns true when the input points at a folder rather than a single file.
#[must_use]
pub fn is_folder_url(input: &str) -> bool {
    input.contains(FOLDER_MARKER)
}
