// src/services/links.rs

//! Recognition of reader links pasted in chat.

use regex::Regex;
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::decode_component;

/// A reader link found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Title exactly as written in the link
    pub encoded_title: String,
    /// Percent-decoded title
    pub title: String,
    /// Chapter number, when the link points at one
    pub chapter: Option<u32>,
}

/// Matcher for `<base>/?seri=<title>[&bolum=<n>]` links.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    regex: Regex,
}

impl LinkPattern {
    /// Build the matcher for links into `base_url` (scheme is ignored).
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        let host = url
            .host_str()
            .ok_or_else(|| AppError::config(format!("base URL has no host: {base_url}")))?;
        let mut location = host.to_string();
        if let Some(port) = url.port() {
            location.push_str(&format!(":{port}"));
        }
        location.push_str(url.path().trim_end_matches('/'));

        let pattern = format!(
            r"https?://{}/\?seri=([^&\s]+)(?:&bolum=(\d+))?",
            regex::escape(&location)
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| AppError::config(format!("invalid link pattern {pattern}: {e}")))?;
        Ok(Self { regex })
    }

    /// All reader links in `text`, in order of appearance.
    ///
    /// Links whose chapter number does not fit a `u32` are skipped.
    pub fn find_links(&self, text: &str) -> Vec<LinkMatch> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let encoded = caps.get(1)?.as_str();
                let chapter = match caps.get(2) {
                    Some(digits) => match digits.as_str().parse() {
                        Ok(chapter) => Some(chapter),
                        Err(_) => {
                            log::debug!("Ignoring link with chapter {}", digits.as_str());
                            return None;
                        }
                    },
                    None => None,
                };
                Some(LinkMatch {
                    encoded_title: encoded.to_string(),
                    title: decode_component(encoded).into_owned(),
                    chapter,
                })
            })
            .collect()
    }
}
