//! Where the raw HTML comes from.
//!
//! The portal only serves HTML and its detail pages are addressed one id at
//! a time. A gateway hides whether those pages come through the CORS proxy
//! worker or straight from the portal.

mod direct;
mod proxy;

pub use direct::DirectGateway;
pub use proxy::ProxyGateway;

use crate::client::Client;
use crate::config::{Config, GatewayKind, PortalConfig};
use crate::error::Result;
use std::collections::HashMap;

#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Raw HTML of the listing page.
    async fn fetch_listing(&self) -> Result<String>;

    /// Raw detail HTML for each id. Ids the gateway could not fetch may be
    /// missing from the map.
    async fn fetch_details(&self, ids: &[String]) -> Result<HashMap<String, String>>;
}

/// The gateway selected by configuration.
pub enum ConfiguredGateway {
    Proxy(ProxyGateway),
    Direct(DirectGateway),
}

impl ConfiguredGateway {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(match config.gateway {
            GatewayKind::Proxy => Self::Proxy(ProxyGateway::new(&config.proxy_url, &config.portal)?),
            GatewayKind::Direct => Self::Direct(DirectGateway::new(&config.portal)?),
        })
    }
}

impl Gateway for ConfiguredGateway {
    async fn fetch_listing(&self) -> Result<String> {
        match self {
            Self::Proxy(gateway) => gateway.fetch_listing().await,
            Self::Direct(gateway) => gateway.fetch_listing().await,
        }
    }

    async fn fetch_details(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        match self {
            Self::Proxy(gateway) => gateway.fetch_details(ids).await,
            Self::Direct(gateway) => gateway.fetch_details(ids).await,
        }
    }
}

fn build_client(base_url: &str, portal: &PortalConfig) -> Result<Client> {
    Client::builder()
        .base_url(base_url)
        .header("user-agent", &portal.user_agent)?
        .header("accept", "text/html,application/json;q=0.9,*/*;q=0.8")?
        .chrome_impersonation(portal.impersonate)
        .build()
}
