//! Minification through a web service.
//!
//! The service takes the source as form field `input` and answers with the
//! minified text as the whole response body:
//!
//! ```text
//! POST https://www.toptal.com/developers/cssminifier/raw
//! Content-Type: application/x-www-form-urlencoded
//!
//! input=a+%7B+color%3A+red%3B+%7D
//! ```

use std::time::Duration;

use super::{MinifyError, Minifier};
use crate::asset::AssetKind;
use crate::config::section::MinifyConfig;

/// Minifier that delegates to a remote endpoint per asset kind.
#[derive(Debug, Clone)]
pub struct RemoteMinifier {
    css_endpoint: String,
    js_endpoint: String,
    timeout: Duration,
}

impl RemoteMinifier {
    pub fn new(
        css_endpoint: impl Into<String>,
        js_endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            css_endpoint: css_endpoint.into(),
            js_endpoint: js_endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &MinifyConfig) -> Self {
        Self::new(
            &config.css_endpoint,
            &config.js_endpoint,
            Duration::from_secs(config.timeout),
        )
    }

    pub fn endpoint(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Style => &self.css_endpoint,
            AssetKind::Script => &self.js_endpoint,
        }
    }

    fn agent(&self) -> ureq::Agent {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        config.into()
    }
}

impl Minifier for RemoteMinifier {
    fn minify(&self, source: &str, kind: AssetKind) -> Result<String, MinifyError> {
        let url = self.endpoint(kind);
        let to_error = |e: ureq::Error| match e {
            ureq::Error::Timeout(_) => MinifyError::Timeout {
                url: url.to_string(),
            },
            other => MinifyError::Request {
                url: url.to_string(),
                message: other.to_string(),
            },
        };

        let mut response = self
            .agent()
            .post(url)
            .send_form([("input", source)])
            .map_err(to_error)?;

        response.body_mut().read_to_string().map_err(to_error)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_per_kind() {
        let minifier = RemoteMinifier::new(
            "https://css.example/raw",
            "https://js.example/raw",
            Duration::from_secs(1),
        );
        assert_eq!(minifier.endpoint(AssetKind::Style), "https://css.example/raw");
        assert_eq!(minifier.endpoint(AssetKind::Script), "https://js.example/raw");
    }

    #[test]
    fn test_unreachable_endpoint_is_error() {
        // Port 9 (discard) on localhost: connection refused, no network needed
        let minifier = RemoteMinifier::new(
            "http://127.0.0.1:9/raw",
            "http://127.0.0.1:9/raw",
            Duration::from_secs(2),
        );
        let err = minifier.minify("a{}", AssetKind::Style).unwrap_err();
        assert!(matches!(
            err,
            MinifyError::Request { .. } | MinifyError::Timeout { .. }
        ));
    }
}
