//! HTTP implementation of [`DocumentApi`]

use crate::{ApiResponse, AuthSession};
use potatopay_editor::{ApiError, BlockCollection, DocumentApi, SurfacePayload};
use potatopay_schema::Surface;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("potatopay/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client; `None` leaves reqwest's default (no timeout)
pub fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Remote document API over HTTP.
///
/// `GET {base}/{surface}` answers `{ success, data: { blocks } }`;
/// `PUT {base}/{surface}` takes `{ blocks }`.
#[derive(Debug, Clone)]
pub struct HttpDocumentApi {
    client: Client,
    base_url: String,
    session: AuthSession,
}

impl HttpDocumentApi {
    pub fn new(base_url: impl Into<String>, session: AuthSession) -> Result<Self, ApiError> {
        let client = build_client(None).map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url, session))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, session: AuthSession) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn url(&self, surface: Surface) -> String {
        format!("{}/{}", self.base_url, surface.path())
    }
}

impl DocumentApi for HttpDocumentApi {
    async fn fetch(&self, surface: Surface) -> Result<BlockCollection, ApiError> {
        let url = self.url(surface);
        tracing::debug!(%url, creator = self.session.username().unwrap_or("-"), "GET");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.session.bearer())
            .send()
            .await
            .map_err(transport)?;

        let payload: SurfacePayload = decode(response).await?.into_result()?;
        Ok(payload.blocks)
    }

    async fn store(&self, surface: Surface, blocks: &BlockCollection) -> Result<(), ApiError> {
        let url = self.url(surface);
        tracing::debug!(%url, creator = self.session.username().unwrap_or("-"), blocks = blocks.len(), "PUT");

        let body = SurfacePayload { blocks: blocks.clone() };
        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, self.session.bearer())
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        decode::<serde_json::Value>(response).await?.into_unit()
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Parse the envelope; error statuses without one become bare rejections
async fn decode<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    match serde_json::from_str::<ApiResponse<T>>(&body) {
        Ok(envelope) if status.is_success() => Ok(envelope),
        Ok(envelope) => Err(ApiError::Rejected {
            message: envelope.message,
        }),
        Err(_) if !status.is_success() => {
            tracing::warn!(%status, "Error response without envelope");
            Err(ApiError::Rejected { message: None })
        }
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_surface_path() {
        let api = HttpDocumentApi::new("https://api.potatopay.co/v1/", AuthSession::new("t")).unwrap();
        assert_eq!(api.base_url(), "https://api.potatopay.co/v1");
        assert_eq!(api.url(Surface::TipPage), "https://api.potatopay.co/v1/tip-page");
        assert_eq!(api.url(Surface::LinkTree), "https://api.potatopay.co/v1/link-tree");
    }

    #[test]
    fn test_build_client_with_timeout() {
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
    }
}
