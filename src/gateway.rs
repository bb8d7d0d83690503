//! Authenticated request gateway: one configured entry point for the backend
//! base URL that attaches the current bearer token to every outbound call.
//! The token is read fresh from the shared [`TokenCell`] at call time, never
//! cached here, so logout takes effect on the very next request.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LOCATION};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::session::TokenCell;

#[derive(Clone)]
pub struct Gateway {
    base: Url,
    client: reqwest::Client,
    // Separate client that does not follow redirects; used to resolve
    // download endpoints, which answer with a redirect to the actual file.
    bare_client: reqwest::Client,
    tokens: TokenCell,
}

impl Gateway {
    pub fn new(base: Url, tokens: TokenCell) -> AppResult<Self> {
        let client = reqwest::Client::builder().build()?;
        let bare_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { base, client, bare_client, tokens })
    }

    pub fn base(&self) -> &Url { &self.base }

    fn join(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path)
            .map_err(|e| AppError::internal("bad_path".to_string(), format!("invalid request path '{}': {}", path, e)))
    }

    // Bearer header only when a token is present; unauthenticated calls
    // (login, registration) go out bare.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.tokens.get() {
            if let Ok(v) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, v);
            }
        }
        headers
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> AppResult<T> {
        let url = self.join(path)?;
        let mut req = self.client.request(method, url).headers(self.headers());
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::from_status(status.as_u16(), &text));
        }
        // DELETE-style calls answer 204/empty; unit deserializes from null
        let payload = if text.is_empty() || status == StatusCode::NO_CONTENT { "null" } else { text.as_str() };
        serde_json::from_str(payload)
            .map_err(|e| AppError::internal("bad_body".to_string(), format!("malformed response: {}", e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(Method::GET, path, None::<&serde_json::Value>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(Method::DELETE, path, None::<&serde_json::Value>).await
    }

    /// Resolve a download endpoint to the actual file location. The backend
    /// answers these with a redirect; the caller opens the resolved URL
    /// instead of treating the first response body as the file.
    pub async fn resolve_download(&self, path: &str) -> AppResult<Url> {
        let url = self.join(path)?;
        let resp = self.bare_client.get(url).headers(self.headers()).send().await?;
        let status = resp.status();
        if status.is_redirection() {
            let loc = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| AppError::internal("no_location".to_string(), "redirect without Location header".to_string()))?;
            // Location may be relative to the API origin
            return Url::parse(loc)
                .or_else(|_| self.base.join(loc))
                .map_err(|e| AppError::internal("bad_location".to_string(), format!("unusable Location '{}': {}", loc, e)));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::from_status(status.as_u16(), &text));
        }
        Err(AppError::internal("no_redirect".to_string(), "download endpoint did not redirect".to_string()))
    }
}

/// Build a list path carrying the standard `page`/`limit` parameters and an
/// optional search term.
pub fn paged_path(path: &str, page: u32, limit: u32, search: Option<&str>) -> String {
    let mut out = format!("{}?page={}&limit={}", path, page, limit);
    if let Some(q) = search {
        if !q.is_empty() {
            out.push_str("&search=");
            out.push_str(&urlencoding::encode(q));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_path_encodes_search() {
        assert_eq!(paged_path("/service", 2, 10, None), "/service?page=2&limit=10");
        assert_eq!(
            paged_path("/users", 1, 25, Some("budi santoso")),
            "/users?page=1&limit=25&search=budi%20santoso"
        );
        assert_eq!(paged_path("/users", 1, 25, Some("")), "/users?page=1&limit=25");
    }
}
