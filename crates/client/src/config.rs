//! Client configuration.

/// Connection settings for the collaborating menu API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: String,
}

impl ClientConfig {
    /// `api_url` is the base of the versioned API, e.g.
    /// `http://127.0.0.1:8000/api/v1`. A trailing slash is tolerated.
    pub fn new(api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self { api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for an API-relative path such as `public/menu/cafe`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}
