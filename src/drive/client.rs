//! Client for Drive folder pages and the `get_video_info` endpoint.

use std::collections::BTreeMap;

use reqwest::Client;
use tracing::{debug, error, info, instrument};
use url::Url;

use super::error::DriveError;
use crate::http_client::{ClientPolicy, build_http_client};
use crate::parser::extract_data_ids;
use crate::user_agent;

/// Production host serving folder pages and the info endpoint.
pub const DEFAULT_BASE_URL: &str = "https://drive.google.com";

/// Fixed `drive_originator_app` value expected by the info endpoint.
pub const ORIGINATOR_APP: &str = "303";

/// Raw body and cookies from one info endpoint exchange.
///
/// The cookies must accompany the stream request; the stream host rejects
/// requests without them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoResponse {
    /// Decoded response body.
    pub text: String,
    /// Cookie name to value, from the response's `Set-Cookie` headers.
    pub cookies: BTreeMap<String, String>,
}

/// HTTP client for Drive page requests.
///
/// Created once per run and reused for every identifier.
#[derive(Debug, Clone)]
pub struct DriveClient {
    client: Client,
    base_url: String,
}

impl DriveClient {
    /// Creates a client targeting [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DriveError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DriveError> {
        let policy = ClientPolicy {
            name: "drive",
            gzip: true,
        };
        let client = build_http_client(policy, &user_agent::default_user_agent())
            .map_err(DriveError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Builds the info endpoint URL for `id`.
    #[must_use]
    pub fn info_url(&self, id: &str) -> String {
        format!(
            "{}/u/0/get_video_info?docid={}&drive_originator_app={ORIGINATOR_APP}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    /// Fetches the info endpoint for `id`, returning its body and cookies.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError`] on a transport failure or a non-2xx status.
    #[instrument(skip(self))]
    pub async fn fetch_info(&self, id: &str) -> Result<InfoResponse, DriveError> {
        let url = self.info_url(id);
        debug!(url = %url, "accessing info endpoint");

        let response = self.get_success(&url).await?;
        let cookies: BTreeMap<String, String> = response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();
        let text = response
            .text()
            .await
            .map_err(|e| DriveError::body(&url, e))?;

        debug!(
            bytes = text.len(),
            cookies = cookies.len(),
            "received info response"
        );
        Ok(InfoResponse { text, cookies })
    }

    /// Lists the file ids on a folder page.
    ///
    /// Failures are logged and yield an empty list; the caller decides
    /// what an empty folder means.
    #[instrument(skip(self))]
    pub async fn list_folder(&self, url: &str) -> Vec<String> {
        match self.try_list_folder(url).await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "error fetching folder URL");
                Vec::new()
            }
        }
    }

    /// Lists the file ids on a folder page, surfacing request failures.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError`] when the URL is invalid, the request fails, or
    /// the server answers with a non-2xx status.
    pub async fn try_list_folder(&self, url: &str) -> Result<Vec<String>, DriveError> {
        Url::parse(url).map_err(|_| DriveError::invalid_url(url))?;
        info!(url, "fetching folder URL");

        let body = self
            .get_success(url)
            .await?
            .text()
            .await
            .map_err(|e| DriveError::body(url, e))?;

        let ids = extract_data_ids(&body);
        for id in &ids {
            debug!(id = %id, "found data-id");
        }
        info!(count = ids.len(), "total unique data-ids found");
        Ok(ids)
    }

    async fn get_success(&self, url: &str) -> Result<reqwest::Response, DriveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DriveError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "request returned error status");
            return Err(DriveError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}
