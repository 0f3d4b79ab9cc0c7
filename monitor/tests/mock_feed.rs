use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone};
use tokio::sync::Mutex;
use tokio::time::Instant;

use market::{ForecastPoint, PriceFeed, PricePoint, PriceSnapshot};

pub enum Step {
    Ok(PriceSnapshot),
    Err(&'static str),
}

#[derive(Default)]
pub struct FeedLog {
    pub calls: Vec<(String, Instant)>,
    pub in_flight: usize,
    pub max_in_flight: usize,
}

/// Feed that replays a fixed script. Once the script runs out every call fails.
#[derive(Clone, Default)]
pub struct ScriptedFeed {
    steps: Arc<Mutex<VecDeque<Step>>>,
    pub log: Arc<Mutex<FeedLog>>,
    latency: Duration,
}

impl ScriptedFeed {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into())),
            ..Self::default()
        }
    }

    /// Every call takes `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn call_count(&self) -> usize {
        self.log.lock().await.calls.len()
    }
}

#[async_trait]
impl PriceFeed for ScriptedFeed {
    async fn fetch_snapshot(&self, zone: &str) -> anyhow::Result<PriceSnapshot> {
        {
            let mut log = self.log.lock().await;
            log.calls.push((zone.to_string(), Instant::now()));
            log.in_flight += 1;
            log.max_in_flight = log.max_in_flight.max(log.in_flight);
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.log.lock().await.in_flight -= 1;

        match self.steps.lock().await.pop_front() {
            Some(Step::Ok(snapshot)) => Ok(snapshot),
            Some(Step::Err(msg)) => Err(anyhow::anyhow!(msg)),
            None => Err(anyhow::anyhow!("feed unavailable")),
        }
    }
}

pub fn central() -> FixedOffset {
    FixedOffset::west_opt(6 * 3600).unwrap()
}

/// Snapshot on 2024-03-`day` at `hour`:00 central time.
pub fn snapshot_at(
    day: u32,
    hour: u32,
    now: f64,
    day_low: f64,
    forecast: &[f64],
    refresh_after_secs: u64,
) -> PriceSnapshot {
    let ts = central()
        .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
        .unwrap();

    PriceSnapshot {
        current: PricePoint::new(now, ts),
        day_low_so_far: day_low,
        forecast: forecast.iter().copied().map(ForecastPoint::new).collect(),
        refresh_after_secs,
    }
}

pub fn scenario_forecast() -> Vec<f64> {
    vec![
        1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0,
    ]
}
