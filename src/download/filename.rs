//! Output filename derivation and sanitization.

/// Characters rejected by at least one common filesystem.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replaces filesystem-invalid characters with `_` and trims surrounding whitespace.
///
/// # Examples
///
/// ```
/// use videoloader_core::download::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My:Video/Name?"), "My_Video_Name_");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Picks the file name for a download.
///
/// Order: explicit override, then the sanitized title, then the raw id when
/// the title is missing or sanitizes to nothing.
#[must_use]
pub fn derive_filename(override_name: Option<&str>, title: Option<&str>, id: &str) -> String {
    if let Some(name) = override_name {
        return name.to_string();
    }
    title
        .map(sanitize_filename)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_replaces_invalid_chars() {
        assert_eq!(sanitize_filename("My:Video/Name?"), "My_Video_Name_");
        assert_eq!(sanitize_filename(r#"a<b>c"d\e|f*g"#), "a_b_c_d_e_f_g");
    }

    #[test]
    fn test_sanitize_filename_trims_whitespace_after_substitution() {
        assert_eq!(sanitize_filename("  clip.mp4 \n"), "clip.mp4");
        assert_eq!(sanitize_filename(" ? "), "_");
    }

    #[test]
    fn test_sanitize_filename_keeps_unicode() {
        assert_eq!(sanitize_filename("Vidéo été.mp4"), "Vidéo été.mp4");
    }

    #[test]
    fn test_derive_filename_prefers_override() {
        assert_eq!(
            derive_filename(Some("out.mp4"), Some("Title"), "id12345"),
            "out.mp4"
        );
    }

    #[test]
    fn test_derive_filename_uses_sanitized_title() {
        assert_eq!(
            derive_filename(None, Some("My:Video.mp4"), "id12345"),
            "My_Video.mp4"
        );
    }

    #[test]
    fn test_derive_filename_falls_back_to_id() {
        assert_eq!(derive_filename(None, None, "id12345"), "id12345");
        assert_eq!(derive_filename(None, Some("   "), "id12345"), "id12345");
    }
}
