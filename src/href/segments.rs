//! Segment-level href manipulation

use crate::error::{HrefError, Result};
use serde_json::Value;

/// An href split into its `/`-separated segments.
///
/// Trailing empty segments are dropped, so `a/b/` and `a/b` both have the
/// segments `["a", "b"]`. Leading and interior empty segments (as in
/// `http://host`) are kept so that re-joining reproduces the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrefSegments<'a> {
    href: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> HrefSegments<'a> {
    pub fn parse(href: &'a str) -> Self {
        if href.is_empty() {
            return Self {
                href,
                segments: vec![""],
            };
        }

        let mut segments: Vec<&str> = href.split('/').collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        Self { href, segments }
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.segments
    }

    /// Index of the first segment exactly equal to `marker`
    pub fn position(&self, marker: &str) -> Option<usize> {
        self.segments.iter().position(|s| *s == marker)
    }

    /// Prefix up to and including the segment that follows the first
    /// `marker`, every segment terminated by `/`.
    ///
    /// For `http://h/api/clusters/c1/tasks` and marker `clusters` this is
    /// `http://h/api/clusters/c1/`. Returns `Ok(None)` when the marker is
    /// absent and [`HrefError::MalformedHref`] when nothing follows it.
    pub fn scoped_prefix(&self, marker: &str) -> Result<Option<String>> {
        let Some(index) = self.position(marker) else {
            return Ok(None);
        };

        if index + 1 >= self.segments.len() {
            return Err(HrefError::MalformedHref {
                href: self.href.to_string(),
                marker: marker.to_string(),
            });
        }

        Ok(Some(emit(&self.segments[..=index + 1])))
    }

    /// All segments, each followed by `/`
    pub fn rejoin(&self) -> String {
        emit(&self.segments)
    }
}

fn emit(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment);
        out.push('/');
    }
    out
}

/// Render a scalar property value as a percent-encoded path segment.
///
/// Null, arrays and objects have no segment form.
pub fn path_segment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(urlencoding::encode(s).into_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Strip the query string and fragment from an href
pub fn strip_query(href: &str) -> &str {
    match href.find(|c: char| c == '?' || c == '#') {
        Some(i) => &href[..i],
        None => href,
    }
}

/// Append one segment to an href, removing a single trailing slash first
pub fn join(href: &str, segment: &str) -> String {
    let base = href.strip_suffix('/').unwrap_or(href);
    format!("{}/{}", base, segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_scheme_separator() {
        let segs = HrefSegments::parse("http://host/api/v1");
        assert_eq!(segs.as_slice(), &["http:", "", "host", "api", "v1"]);
        assert_eq!(segs.rejoin(), "http://host/api/v1/");
    }

    #[test]
    fn test_parse_drops_trailing_empty_segments() {
        let segs = HrefSegments::parse("a/b//");
        assert_eq!(segs.as_slice(), &["a", "b"]);
    }

    #[test]
    fn test_parse_edge_inputs() {
        assert_eq!(HrefSegments::parse("").as_slice(), &[""]);
        assert!(HrefSegments::parse("/").as_slice().is_empty());
        assert_eq!(HrefSegments::parse("/api").as_slice(), &["", "api"]);
    }

    #[test]
    fn test_scoped_prefix_found() {
        let segs = HrefSegments::parse("http://h/api/v1/clusters/c1/tasks/9");
        assert_eq!(
            segs.scoped_prefix("clusters").unwrap().as_deref(),
            Some("http://h/api/v1/clusters/c1/")
        );
    }

    #[test]
    fn test_scoped_prefix_uses_first_marker() {
        let segs = HrefSegments::parse("clusters/a/clusters/b");
        assert_eq!(
            segs.scoped_prefix("clusters").unwrap().as_deref(),
            Some("clusters/a/")
        );
    }

    #[test]
    fn test_scoped_prefix_absent() {
        let segs = HrefSegments::parse("foo/bar");
        assert_eq!(segs.scoped_prefix("clusters").unwrap(), None);
    }

    #[test]
    fn test_scoped_prefix_marker_last_is_malformed() {
        let segs = HrefSegments::parse("http://h/api/v1/clusters/");
        assert_eq!(
            segs.scoped_prefix("clusters"),
            Err(HrefError::MalformedHref {
                href: "http://h/api/v1/clusters/".to_string(),
                marker: "clusters".to_string(),
            })
        );
    }

    #[test]
    fn test_path_segment_values() {
        assert_eq!(path_segment(&json!(7)).as_deref(), Some("7"));
        assert_eq!(path_segment(&json!("c1")).as_deref(), Some("c1"));
        assert_eq!(path_segment(&json!("a b")).as_deref(), Some("a%20b"));
        assert_eq!(path_segment(&json!(true)).as_deref(), Some("true"));
        assert_eq!(path_segment(&Value::Null), None);
        assert_eq!(path_segment(&json!([1, 2])), None);
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("http://h/a?fields=*"), "http://h/a");
        assert_eq!(strip_query("http://h/a#top"), "http://h/a");
        assert_eq!(strip_query("http://h/a"), "http://h/a");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("http://h/a", "b"), "http://h/a/b");
        assert_eq!(join("http://h/a/", "b"), "http://h/a/b");
    }
}
