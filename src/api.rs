//! Music server REST client.
//!
//! Every listing endpoint takes the page filter merged with a row
//! window (`limit`, `start_index`) and answers with the items plus the
//! total size of the result set. The credential context (base URL,
//! token, user id) travels with the client.

use crate::settings::ServerProfile;
use crate::types::{ItemPage, ListQuery};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("request cancelled")]
    Cancelled,
}

pub struct ApiClient {
    http: reqwest::Client,
    profile: ServerProfile,
}

impl ApiClient {
    pub fn new(profile: ServerProfile) -> Self {
        Self {
            http: reqwest::Client::new(),
            profile,
        }
    }

    /// Server id used for cache key scoping; empty when not yet known
    pub fn server_id(&self) -> &str {
        &self.profile.server_id
    }

    pub async fn list_albums(&self, query: ListQuery) -> Result<Option<ItemPage>, ApiError> {
        self.get_page("library/albums", &query).await
    }

    pub async fn list_album_artists(&self, query: ListQuery) -> Result<Option<ItemPage>, ApiError> {
        self.get_page("library/album-artists", &query).await
    }

    pub async fn list_artists(&self, query: ListQuery) -> Result<Option<ItemPage>, ApiError> {
        self.get_page("library/artists", &query).await
    }

    pub async fn list_playlists(&self, query: ListQuery) -> Result<Option<ItemPage>, ApiError> {
        self.get_page("library/playlists", &query).await
    }

    pub async fn list_songs(&self, query: ListQuery) -> Result<Option<ItemPage>, ApiError> {
        self.get_page("library/songs", &query).await
    }

    async fn get_page(&self, path: &str, query: &ListQuery) -> Result<Option<ItemPage>, ApiError> {
        let url = format!("{}/{}", self.profile.base_url.trim_end_matches('/'), path);
        let mut pairs = query.to_pairs();
        if !self.profile.user_id.is_empty() {
            pairs.push(("user_id", self.profile.user_id.clone()));
        }

        let response = self
            .http
            .get(&url)
            .header("X-Api-Token", &self.profile.access_token)
            .header("X-Device-Id", &self.profile.device_id)
            .query(&pairs)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT || status == reqwest::StatusCode::NOT_FOUND {
            debug!(path, %status, "Listing absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let page: ItemPage = response.json().await?;
        debug!(
            path,
            start_index = query.start_index,
            limit = query.limit,
            returned = page.items.len(),
            total = page.total_record_count,
            "Listing fetched"
        );
        Ok(Some(page))
    }
}
