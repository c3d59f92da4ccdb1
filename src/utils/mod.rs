//! Utility functions and helpers.

pub mod http;

use std::borrow::Cow;

/// Resolve a cover path from the feed into a full image URL.
///
/// Paths already carrying a scheme are returned as-is; relative paths lose
/// `prefix` and are appended to `cdn_base`.
pub fn resolve_cover_url(path: &str, cdn_base: &str, prefix: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    let relative = path.strip_prefix(prefix).unwrap_or(path);
    Some(format!("{cdn_base}{relative}"))
}

/// Percent-encode a title for use in a query string.
pub fn encode_component(text: &str) -> Cow<'_, str> {
    urlencoding::encode(text)
}

/// Decode a percent-encoded query value, keeping the raw text if it is not valid UTF-8.
pub fn decode_component(text: &str) -> Cow<'_, str> {
    urlencoding::decode(text).unwrap_or(Cow::Borrowed(text))
}

/// Reader link for a series, optionally pointing at one chapter.
pub fn series_link(base_url: &str, encoded_title: &str, chapter: Option<u32>) -> String {
    let base = base_url.trim_end_matches('/');
    match chapter {
        Some(chapter) => format!("{base}/?seri={encoded_title}&bolum={chapter}"),
        None => format!("{base}/?seri={encoded_title}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://cdn.example.com/kapaklar/";

    #[test]
    fn test_resolve_relative_cover() {
        assert_eq!(
            resolve_cover_url("kapaklar/x.png", CDN, "kapaklar/"),
            Some("https://cdn.example.com/kapaklar/x.png".to_string())
        );
        assert_eq!(
            resolve_cover_url("y.png", CDN, "kapaklar/"),
            Some("https://cdn.example.com/kapaklar/y.png".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_cover() {
        assert_eq!(
            resolve_cover_url("http://elsewhere/x.png", CDN, "kapaklar/"),
            Some("http://elsewhere/x.png".to_string())
        );
        assert_eq!(
            resolve_cover_url("https://elsewhere/x.png", CDN, "kapaklar/"),
            Some("https://elsewhere/x.png".to_string())
        );
    }

    #[test]
    fn test_resolve_empty_cover() {
        assert_eq!(resolve_cover_url("", CDN, "kapaklar/"), None);
        assert_eq!(resolve_cover_url("   ", CDN, "kapaklar/"), None);
    }

    #[test]
    fn test_encode_decode_component() {
        assert_eq!(encode_component("Ölüm Paktı"), "%C3%96l%C3%BCm%20Pakt%C4%B1");
        assert_eq!(decode_component("%C3%96l%C3%BCm%20Pakt%C4%B1"), "Ölüm Paktı");
        assert_eq!(decode_component("Moon%20Knight"), "Moon Knight");
        assert_eq!(decode_component("bad%FF"), "bad%FF");
    }

    #[test]
    fn test_series_link() {
        assert_eq!(
            series_link("https://site.example/", "Moon%20Knight", None),
            "https://site.example/?seri=Moon%20Knight"
        );
        assert_eq!(
            series_link("https://site.example", "Moon%20Knight", Some(9)),
            "https://site.example/?seri=Moon%20Knight&bolum=9"
        );
    }
}
