use super::{build_client, Gateway};
use crate::client::Client;
use crate::config::PortalConfig;
use crate::error::Result;
use crate::{log_debug, log_info};
use std::collections::HashMap;

const JOB_IDS_PARAM: &str = "jobIds";

/// Client side of the CORS proxy worker: `GET /` returns the listing HTML and
/// `GET /?jobIds=a,b,c` returns a JSON object mapping each id to its detail
/// page HTML.
pub struct ProxyGateway {
    client: Client,
}

impl ProxyGateway {
    pub fn new(proxy_url: &str, portal: &PortalConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(proxy_url, portal)?,
        })
    }
}

impl Gateway for ProxyGateway {
    async fn fetch_listing(&self) -> Result<String> {
        log_info!("[gateway] Fetching listing from {}", self.client.base_url());
        let response = self.client.get("").await?;
        log_debug!(
            "[gateway] Listing response: status {}, {} bytes",
            response.status,
            response.content.len()
        );
        Ok(response.content)
    }

    async fn fetch_details(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        let joined = ids.join(",");
        log_debug!("[gateway] Fetching {} detail pages via proxy", ids.len());
        let pages: HashMap<String, String> =
            self.client.get_json(&[(JOB_IDS_PARAM, joined.as_str())]).await?;
        log_debug!("[gateway] Proxy returned {} detail pages", pages.len());
        Ok(pages)
    }
}
