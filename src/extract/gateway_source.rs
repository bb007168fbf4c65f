use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::extract::{DateRange, DealSource, ExtractionError};
use crate::models::RawDeal;

/// Pulls deal history from the trading terminal's HTTP gateway.
pub struct GatewaySource {
    client: Client,
    endpoint: String,
    login: String,
    server: String,
    password: SecretString
}

impl GatewaySource {
    /// Builds a client for the configured terminal account. No request is made yet.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ExtractionError> {
        if config.endpoint.is_empty() {
            return Err(ExtractionError::ConnectionFailed("no gateway endpoint configured".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            login: config.login.clone(),
            server: config.server.clone(),
            password: SecretString::from(config.password.expose_secret().to_string())
        })
    }

    pub fn deals_url(&self) -> String {
        format!("{}/history/deals", self.endpoint)
    }
}

#[async_trait]
impl DealSource for GatewaySource {
    async fn history_deals(&self, range: DateRange) -> Result<Vec<RawDeal>, ExtractionError> {
        debug!("Requesting deals for login [{}] on [{}]", self.login, self.server);

        let response = self.client
            .get(self.deals_url())
            .basic_auth(&self.login, Some(self.password.expose_secret()))
            .header("X-Terminal-Server", &self.server)
            .query(&[("from", range.start().and_utc().timestamp()), ("to", range.end().and_utc().timestamp())])
            .send()
            .await
            .map_err(|error| ExtractionError::ConnectionFailed(error.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ExtractionError::Unavailable(format!("login [{}] was rejected", self.login)));
            }
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
                warn!("No deals found between {} and {}", range.from, range.to);
                return Ok(Vec::new());
            }
            status if !status.is_success() => {
                return Err(ExtractionError::Unavailable(format!("gateway answered {status}")));
            }
            _ => {}
        }

        let deals: Vec<RawDeal> = response.json().await?;

        if deals.is_empty() {
            warn!("No deals found between {} and {}", range.from, range.to);
        } else {
            info!("history_deals({}, {}) = {}", range.from, range.to, deals.len());
        }

        Ok(deals)
    }
}
