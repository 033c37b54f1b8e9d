use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

// Whitespace is spelled out instead of `\s`: U+FEFF ends a URL, U+0085 does not.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?i:https?)://"#,
        r#"[^\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}"#,
        r#"\x{202F}\x{205F}\x{3000}\x{FEFF}<>"{}|\\^`\[\]]+"#,
    ))
    .unwrap()
});

/// Finds every `http://` / `https://` URL in `text`, in order of appearance.
///
/// Matches are returned verbatim and duplicates are kept. Nothing beyond the textual
/// shape is validated here.
pub fn extract_urls(text: &str) -> Vec<String> {
    let urls: Vec<String> = URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    debug!(
        action = "complete",
        component = "url_extraction",
        url_count = urls.len(),
        "Extracted URLs"
    );
    urls
}

/// Length in UTF-16 code units, the unit the classifier's training data was measured in.
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Number of non-empty `/`-separated path segments; 0 when the URL does not parse.
pub fn path_depth(url: &str) -> usize {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().split('/').filter(|s| !s.is_empty()).count(),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_whitespace_and_delimiters() {
        let text = "a http://x.com/a<b https://y.org/p\"q [http://z.net/]  HTTPS://W.COM/Up|down";
        assert_eq!(
            extract_urls(text),
            vec![
                "http://x.com/a",
                "https://y.org/p",
                "http://z.net/",
                "HTTPS://W.COM/Up",
            ]
        );
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let text = "http://b.com http://a.com http://b.com";
        assert_eq!(
            extract_urls(text),
            vec!["http://b.com", "http://a.com", "http://b.com"]
        );
    }

    #[test]
    fn no_urls_yields_empty_list() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("ftp://files.example.com and http:/broken").is_empty());
    }

    #[test]
    fn bare_scheme_is_not_a_url() {
        assert!(extract_urls("http:// nothing").is_empty());
    }

    #[test]
    fn backtick_and_caret_terminate_urls() {
        assert_eq!(
            extract_urls("`http://a.com/x`^http://b.com/y^"),
            vec!["http://a.com/x", "http://b.com/y"]
        );
    }

    #[test]
    fn byte_order_mark_ends_a_url() {
        assert_eq!(extract_urls("http://a.com/x\u{FEFF}y"), vec!["http://a.com/x"]);
        assert_eq!(
            extract_urls("http://a.com/x\u{3000}http://b.com\u{A0}z"),
            vec!["http://a.com/x", "http://b.com"]
        );
    }

    #[test]
    fn next_line_does_not_end_a_url() {
        assert_eq!(
            extract_urls("http://a.com/x\u{85}y z"),
            vec!["http://a.com/x\u{85}y"]
        );
    }

    #[test]
    fn depth_counts_non_empty_segments() {
        assert_eq!(path_depth("http://a.com"), 0);
        assert_eq!(path_depth("http://a.com/"), 0);
        assert_eq!(path_depth("http://a.com/x//y/"), 2);
        assert_eq!(path_depth("http://a.com/x/y/z?q=/1/2"), 3);
        assert_eq!(path_depth("http://[::1/x"), 0);
    }

    #[test]
    fn length_counts_utf16_units() {
        assert_eq!(text_length("abc"), 3);
        assert_eq!(text_length("é"), 1);
        assert_eq!(text_length("😀"), 2);
    }
}
