//! Stream URL and title recovery from `get_video_info` responses.
//!
//! The response body is an `&`-delimited run of tokens. It is not a
//! well-formed query string: the stream map token carries its own
//! percent-encoded, `|`-separated fields, so the body is split on literal
//! `&` and each token is inspected on its own.

use tracing::{debug, trace};

/// Token prefix carrying the percent-encoded title.
const TITLE_PREFIX: &str = "title=";

/// Substring identifying the token that carries a stream URL.
const STREAM_MARKER: &str = "videoplayback";

/// Separator between fields inside a decoded stream token.
const STREAM_FIELD_SEPARATOR: char = '|';

/// Direct media URL and title recovered from an info response.
///
/// Either field may be `None` when the response did not contain it; callers
/// decide how to handle a missing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Direct `videoplayback` URL.
    pub url: Option<String>,
    /// Decoded human-readable title.
    pub title: Option<String>,
}

/// Scans an info response body for the first stream URL and the first title.
///
/// # Examples
///
/// ```
/// use videoloader_core::parser::locate_stream;
///
/// let stream = locate_stream("a=1&title=My%20Video&xyz|https://host/videoplayback?id=2");
/// assert_eq!(stream.title.as_deref(), Some("My Video"));
/// assert_eq!(stream.url.as_deref(), Some("https://host/videoplayback?id=2"));
/// ```
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
#[must_use]
pub fn locate_stream(text: &str) -> StreamDescriptor {
    let mut stream = StreamDescriptor::default();

    for token in text.split('&') {
        if stream.title.is_none()
            && let Some(raw_title) = token.strip_prefix(TITLE_PREFIX)
        {
            trace!(raw_title, "found title token");
            stream.title = Some(percent_decode_lossy(raw_title));
            continue;
        }
        if stream.url.is_none() && token.contains(STREAM_MARKER) {
            let decoded = percent_decode_lossy(token);
            let url = decoded
                .rsplit(STREAM_FIELD_SEPARATOR)
                .next()
                .unwrap_or_default();
            trace!(url, "found stream token");
            stream.url = Some(url.to_string());
        }
        if stream.url.is_some() && stream.title.is_some() {
            break;
        }
    }

    debug!(
        url = stream.url.as_deref().unwrap_or("<none>"),
        title = stream.title.as_deref().unwrap_or("<none>"),
        "parsed info response"
    );
    stream
}

/// Percent-decodes `input`, replacing invalid UTF-8 sequences instead of failing.
pub(crate) fn percent_decode_lossy(input: &str) -> String {
    let bytes = urlencoding::decode_binary(input.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
