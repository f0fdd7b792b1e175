mod builder;

use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use rquest::Client as RquestClient;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub content: String,
}

pub struct Client {
    inner: RquestClient,
    base_url: Url,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` resolved against the base URL. An absolute URL replaces
    /// the base entirely.
    pub async fn get(&self, path: &str) -> Result<ClientResponse> {
        let url = self.build_url(path)?;
        self.request(url).await
    }

    /// GET the base URL with the given query parameters appended.
    pub async fn get_with_query(&self, query: &[(&str, &str)]) -> Result<ClientResponse> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(query);
        self.request(url).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        let response = self.get_with_query(query).await?;
        Ok(serde_json::from_str(&response.content)?)
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid path {}: {}", path, e)).into())
    }

    async fn request(&self, url: Url) -> Result<ClientResponse> {
        let response = self
            .inner
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(format!("{}: {}", url, e)))?;

        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let content = response.text().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response text: {}", e))
        })?;

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                url: url.to_string(),
            }
            .into());
        }

        Ok(ClientResponse { status, content })
    }
}
