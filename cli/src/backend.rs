//! REST client for the shortener backend over `reqwest`.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use serde::Serialize;
use session::endpoints;
use session::response;
use session::{
    ApiError, AuthBackend, AuthError, AuthInfo, CheckRequest, CreateRequest, CreateResponse,
    EntryPublic, IdRequest, RecentEntries, Token, UserProfile, Visitor,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoints::url(&self.base_url, path)
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), String> {
        let response = request.send().await.map_err(|err| err.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| err.to_string())?;
        tracing::debug!(status, bytes = body.len(), "response");
        Ok((status, body))
    }

    fn get(&self, url: &str, token: Option<&Token>) -> reqwest::RequestBuilder {
        authorized(self.http.get(url), token)
    }

    fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        token: Option<&Token>,
        body: &T,
    ) -> reqwest::RequestBuilder {
        authorized(self.http.post(url), token).json(body)
    }

    // =========================================================================
    // PUBLIC ENDPOINTS
    // =========================================================================

    pub async fn info(&self) -> Result<AuthInfo, ApiError> {
        let (status, body) = self
            .send(self.get(&self.url(endpoints::INFO), None))
            .await
            .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }

    pub async fn check(&self, token: &Token) -> Result<UserProfile, AuthError> {
        let body = CheckRequest {
            token: token.as_str(),
        };
        let (status, text) = self
            .send(self.post(&self.url(endpoints::AUTH_CHECK), None, &body))
            .await
            .map_err(AuthError::Network)?;
        response::decode_check(status, &text)
    }

    /// Public origin of short links; the base URL when the server has none.
    pub async fn display_url(&self) -> String {
        let fetched = match self.send(self.get(&self.url(endpoints::DISPLAY_URL), None)).await {
            Ok((status, body)) => response::decode_json::<String>(status, &body),
            Err(err) => Err(ApiError::Network(err)),
        };
        match fetched {
            Ok(url) if !url.trim().is_empty() => url,
            Ok(_) => self.base_url.clone(),
            Err(err) => {
                tracing::debug!("no display url: {err}");
                self.base_url.clone()
            }
        }
    }

    // =========================================================================
    // PROTECTED ENDPOINTS
    // =========================================================================

    pub async fn create(
        &self,
        token: &Token,
        request: &CreateRequest,
    ) -> Result<CreateResponse, ApiError> {
        let (status, body) = self
            .send(self.post(&self.url(endpoints::CREATE), Some(token), request))
            .await
            .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }

    pub async fn lookup(&self, token: &Token, id: &str) -> Result<Option<EntryPublic>, ApiError> {
        let (status, body) = self
            .send(self.post(&self.url(endpoints::LOOKUP), Some(token), &IdRequest { id }))
            .await
            .map_err(ApiError::Network)?;
        response::decode_lookup(status, &body)
    }

    pub async fn recent(&self, token: &Token) -> Result<RecentEntries, ApiError> {
        let (status, body) = self
            .send(self.get(&self.url(endpoints::RECENT), Some(token)))
            .await
            .map_err(ApiError::Network)?;
        response::decode_json(status, &body)
    }

    pub async fn visitors(&self, token: &Token, id: &str) -> Result<Vec<Visitor>, ApiError> {
        let (status, body) = self
            .send(self.post(&self.url(endpoints::VISITORS), Some(token), &IdRequest { id }))
            .await
            .map_err(ApiError::Network)?;
        response::decode_json::<Option<Vec<Visitor>>>(status, &body).map(Option::unwrap_or_default)
    }

    pub async fn delete(&self, token: &Token, deletion_url: &str) -> Result<(), ApiError> {
        let (status, body) = self
            .send(self.get(deletion_url, Some(token)))
            .await
            .map_err(ApiError::Network)?;
        response::expect_success(status, &body)
    }
}

fn authorized(builder: reqwest::RequestBuilder, token: Option<&Token>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => builder.header(endpoints::AUTHORIZATION, token.as_str()),
        None => builder,
    }
}

impl AuthBackend for ApiClient {
    async fn fetch_info(&self) -> Result<AuthInfo, ApiError> {
        self.info().await
    }

    async fn check_token(&self, token: &Token) -> Result<UserProfile, AuthError> {
        self.check(token).await
    }
}
