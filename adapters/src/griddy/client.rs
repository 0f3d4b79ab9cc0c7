use std::time::Duration;

use async_trait::async_trait;
use market::{PriceFeed, PriceSnapshot};
use reqwest::Client;
use tracing::{debug, instrument};

use super::errors::GriddyError;
use super::types::{GetNowRequest, GetNowResponse};

pub const DEFAULT_GETNOW_URL: &str = "https://app.gogriddy.com/api/v1/insights/getnow";

#[derive(Clone)]
pub struct GriddyClient {
    http: Client,
    url: String,
}

impl GriddyClient {
    pub fn new(url: String) -> Result<Self, GriddyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(zone = %zone), level = "debug")]
    pub async fn fetch_now(&self, zone: &str) -> Result<GetNowResponse, GriddyError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&GetNowRequest {
                settlement_point: zone,
            })
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        let parsed: GetNowResponse = serde_json::from_str(&body)?;

        debug!(
            price_ckwh = parsed.now.price_ckwh,
            forecast_hours = parsed.forecast.len(),
            refresh_s = parsed.seconds_until_refresh,
            "griddy prices fetched"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl PriceFeed for GriddyClient {
    async fn fetch_snapshot(&self, zone: &str) -> anyhow::Result<PriceSnapshot> {
        let snapshot = self.fetch_now(zone).await?.into_snapshot()?;
        Ok(snapshot)
    }
}
