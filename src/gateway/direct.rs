use super::{build_client, Gateway};
use crate::client::Client;
use crate::config::PortalConfig;
use crate::error::Result;
use crate::{log_debug, log_info, log_warn};
use futures::future::join_all;
use std::collections::HashMap;

/// Fetches straight from the portal, doing what the proxy worker does on
/// its side: one request per detail id, all in flight together.
pub struct DirectGateway {
    client: Client,
    details_url: String,
}

impl DirectGateway {
    pub fn new(portal: &PortalConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&portal.listing_url, portal)?,
            details_url: portal.details_url.clone(),
        })
    }

    fn details_url(&self, id: &str) -> String {
        format!("{}{}", self.details_url, id)
    }
}

impl Gateway for DirectGateway {
    async fn fetch_listing(&self) -> Result<String> {
        log_info!("[gateway] Fetching listing from {}", self.client.base_url());
        let response = self.client.get("").await?;
        Ok(response.content)
    }

    async fn fetch_details(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        let requests = ids.iter().map(|id| async move {
            let url = self.details_url(id);
            (id, self.client.get(&url).await)
        });

        let mut pages = HashMap::with_capacity(ids.len());
        for (id, result) in join_all(requests).await {
            match result {
                Ok(response) => {
                    pages.insert(id.clone(), response.content);
                }
                Err(e) => {
                    log_warn!("[gateway] Failed to fetch details for {}: {}", id, e);
                }
            }
        }

        log_debug!("[gateway] Fetched {}/{} detail pages", pages.len(), ids.len());
        Ok(pages)
    }
}
