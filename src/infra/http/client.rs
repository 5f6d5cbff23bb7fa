//! Thin JSON client over `reqwest` shared by the HTTP adapters.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, Response};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::core::NotifyError;

// Everything that would end or split a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode `raw` for use as a single path segment.
pub fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Substitute `{id}` in `template` with the encoded `id`.
pub fn fill_path(template: &str, id: &str) -> String {
    template.replace("{id}", &path_segment(id))
}

/// JSON client bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client honoring the configured timeout.
    pub fn new(config: &ApiConfig) -> Result<Self, NotifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| NotifyError::Config(format!("http client: {e}")))?;
        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST` a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Option<Value>, NotifyError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    /// `PUT` without a body.
    pub async fn put(&self, path: &str) -> Result<Option<Value>, NotifyError> {
        self.send::<()>(Method::PUT, path, None).await
    }

    /// `GET` and decode the JSON body.
    pub async fn get(&self, path: &str) -> Result<Option<Value>, NotifyError> {
        self.send::<()>(Method::GET, path, None).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Value>, NotifyError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(%method, %url, "calling notification api");
        let mut request = self.inner.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        read_json(response).await
    }
}

/// Fold status and body into one result. An empty 2xx body is `Ok(None)`; a
/// non-empty body that is not JSON is a failure.
async fn read_json(response: Response) -> Result<Option<Value>, NotifyError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(NotifyError::Remote {
            status: status.as_u16(),
            body,
        });
    }
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| NotifyError::Delivery(format!("malformed response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment_escapes_reserved_characters() {
        assert_eq!(path_segment("R/7?x"), "R%2F7%3Fx");
        assert_eq!(path_segment("a#b c%"), "a%23b%20c%25");
        assert_eq!(path_segment("plain-42_ok"), "plain-42_ok");
    }

    #[test]
    fn test_fill_path_substitutes_encoded_id() {
        assert_eq!(
            fill_path("/api/notifications/{id}/read", "n/1"),
            "/api/notifications/n%2F1/read"
        );
        assert_eq!(fill_path("/api/email/new-reservation", "x"), "/api/email/new-reservation");
    }
}
