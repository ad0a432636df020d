//! Parsed navigation target.
//!
//! # Design Decisions
//! - Pathname is normalized once: leading slash, no empty segments, no
//!   trailing slash (except for `/` itself)
//! - Segments are percent-decoded individually, so an encoded `%2F` stays
//!   inside its segment instead of splitting it
//! - Query string and fragment are kept for display but never matched

use std::fmt;

use percent_encoding::percent_decode_str;

/// A normalized location (pathname, search, hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pathname: String,
    segments: Vec<String>,
    search: String,
    hash: String,
}

impl Location {
    /// Parse an href such as `/about/?tab=1#top`.
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(i) => (&href[..i], &href[i..]),
            None => (href, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();

        let mut pathname = String::with_capacity(path.len() + 1);
        for segment in &segments {
            pathname.push('/');
            pathname.push_str(segment);
        }
        if pathname.is_empty() {
            pathname.push('/');
        }

        Self {
            pathname,
            segments,
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Non-empty, decoded path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    /// Whether a link to `to` counts as active at this location.
    ///
    /// `/` is only active on an exact match; other targets are also active
    /// for descendant paths (`/settings` is active at `/settings/profile`).
    pub fn is_active(&self, to: &str, case_sensitive: bool) -> bool {
        let target = Location::parse(to);
        let eq = |a: &str, b: &str| {
            if case_sensitive {
                a == b
            } else {
                a.eq_ignore_ascii_case(b)
            }
        };

        if target.segments.is_empty() {
            return self.segments.is_empty();
        }

        let ours = self.segments();
        let theirs = target.segments();
        ours.len() >= theirs.len() && theirs.iter().zip(ours.iter()).all(|(a, b)| eq(a, b))
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::parse("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}
