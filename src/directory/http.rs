use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use crate::config::ApiConfig;
use crate::roles::{PageResult, Role, RoleId, RolePageBody};

use super::{DirectoryError, ListRequest, RoleDirectory};

/// REST client for the role directory.
pub struct HttpRoleDirectory {
    client: Client,
    base_url: String,
    list_path: String,
    item_path: String,
    delete_path: String,
}

impl HttpRoleDirectory {
    /// Build a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(DirectoryError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            list_path: config.list_path.clone(),
            item_path: config.item_path.clone(),
            delete_path: config.delete_path().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, DirectoryError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| DirectoryError::InvalidUrl {
            url: raw,
            message: e.to_string(),
        })
    }

    fn role_url(&self, template: &str, role_id: RoleId) -> Result<Url, DirectoryError> {
        self.url(&template.replace("{id}", &role_id.to_string()))
    }

    async fn send(&self, builder: RequestBuilder, url: &Url) -> Result<Response, DirectoryError> {
        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|source| DirectoryError::Transport {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Directory response"
        );
        Ok(response)
    }
}

/// Turn a non-success response into a status error, keeping the body text.
async fn status_error(response: Response) -> DirectoryError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    DirectoryError::Status { status, message }
}

#[async_trait]
impl RoleDirectory for HttpRoleDirectory {
    async fn list(&self, request: &ListRequest) -> Result<PageResult, DirectoryError> {
        let mut url = self.url(&self.list_path)?;
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("limit", &request.limit.to_string())
            .append_pair("search", &request.search);

        let response = self.send(self.client.get(url.clone()), &url).await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: RolePageBody = response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;
        Ok(body.into())
    }

    async fn get(&self, role_id: RoleId) -> Result<Role, DirectoryError> {
        let url = self.role_url(&self.item_path, role_id)?;
        let response = self.send(self.client.get(url.clone()), &url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound { role_id });
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    async fn delete(&self, role_id: RoleId) -> Result<(), DirectoryError> {
        let url = self.role_url(&self.delete_path, role_id)?;
        let response = self.send(self.client.delete(url.clone()), &url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound { role_id });
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}
