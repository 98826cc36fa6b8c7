//! The inbound API request whose result tree is being annotated.

use url::Url;

/// One API call, identified by the URI the client requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    uri: String,
}

impl ApiRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Resolve a resource path (e.g. `clusters/c1/requests`) against the
    /// API base URI. The base is treated as a directory even without a
    /// trailing slash.
    pub fn resolve(base: &Url, path: &str) -> Result<Self, url::ParseError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }

        let url = base.join(path.trim_start_matches('/'))?;
        Ok(Self::new(url.as_str()))
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_base_without_trailing_slash() {
        let base = Url::parse("http://localhost:8080/api/v1").unwrap();
        let request = ApiRequest::resolve(&base, "clusters/c1/requests").unwrap();
        assert_eq!(
            request.uri(),
            "http://localhost:8080/api/v1/clusters/c1/requests"
        );
    }

    #[test]
    fn test_resolve_keeps_query() {
        let base = Url::parse("http://localhost:8080/api/v1/").unwrap();
        let request = ApiRequest::resolve(&base, "/clusters/c1?fields=Clusters/*").unwrap();
        assert_eq!(
            request.uri(),
            "http://localhost:8080/api/v1/clusters/c1?fields=Clusters/*"
        );
    }
}
