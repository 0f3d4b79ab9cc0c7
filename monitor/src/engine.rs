//! The price monitor loop.
//!
//! Each cycle:
//!   1. Fetches one snapshot from the feed.
//!   2. Records the current price in the same-day history.
//!   3. Runs the intensity pulse and the high / low classification.
//!   4. Hands the resulting `Signals` to the listener.
//!   5. Sleeps for the feed's refresh interval (or `RETRY_DELAY` on failure).
//!
//! Cycles run strictly one after another on a single task, so fetches never
//! overlap and emissions are ordered by fetch completion.

use std::time::Duration;

use common::logger::{TraceId, child_span, root_span, warn_if_slow};
use market::pulse::{IntensityPulse, IntensityPulseResult, classify};
use market::{HistoryBuffer, PriceFeed, PriceSnapshot};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, instrument, warn};

use crate::config::MonitorConfig;
use crate::errors::MonitorError;
use crate::types::{MonitorState, Signals, SignalsListener};

/// Fixed delay before retrying after a cycle without data.
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

const SLOW_FETCH: Duration = Duration::from_secs(5);

pub struct PriceMonitor<F> {
    cfg: MonitorConfig,
    feed: F,
    pulse: IntensityPulse,
    listener: Box<dyn SignalsListener>,
    signals_tx: watch::Sender<Signals>,
    state_tx: watch::Sender<MonitorState>,
}

impl<F: PriceFeed> PriceMonitor<F> {
    pub fn new(cfg: MonitorConfig, feed: F, listener: impl SignalsListener + 'static) -> Self {
        let (signals_tx, _) = watch::channel(Signals::NO_DATA);
        let (state_tx, _) = watch::channel(MonitorState::Idle);
        let pulse = IntensityPulse::new(cfg.forecast_horizon);

        Self {
            cfg,
            feed,
            pulse,
            listener: Box::new(listener),
            signals_tx,
            state_tx,
        }
    }

    /// Most recently emitted signals, or "no data" before the first cycle.
    pub fn current_signals(&self) -> Signals {
        *self.signals_tx.borrow()
    }

    pub fn state(&self) -> MonitorState {
        *self.state_tx.borrow()
    }

    pub fn history(&self) -> &HistoryBuffer {
        self.pulse.history()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.cfg
    }

    /// Spawn the loop on the current tokio runtime. The first fetch starts
    /// immediately.
    pub fn start(self) -> MonitorHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let signals_rx = self.signals_tx.subscribe();
        let state_rx = self.state_tx.subscribe();

        let task = tokio::spawn(self.run(stop_rx));

        MonitorHandle {
            signals_rx,
            state_rx,
            stop_tx,
            task,
        }
    }

    async fn run(mut self, mut stop_rx: watch::Receiver<bool>) {
        let trace_id = TraceId::new();
        let span = root_span("price_monitor", &trace_id);
        span.record("zone", tracing::field::display(&self.cfg.zone));

        async move {
            info!(
                zone = %self.cfg.zone,
                retry_delay_s = self.cfg.retry_delay.as_secs(),
                forecast_horizon = self.cfg.forecast_horizon,
                "price monitor started"
            );

            loop {
                let next = self.run_cycle().await;

                if *stop_rx.borrow_and_update() || wait_or_stop(&mut stop_rx, next).await {
                    break;
                }
            }

            self.state_tx.send_replace(MonitorState::Stopped);
            info!("price monitor stopped");
        }
        .instrument(span)
        .await
    }

    /// Run one fetch cycle and return the delay until the next one.
    ///
    /// The listener is called exactly once, with real signals on success or
    /// with "no data" on any failure.
    pub async fn run_cycle(&mut self) -> Duration {
        let cycle_id = TraceId::new();
        let span = child_span("fetch_cycle", &cycle_id);

        async {
            self.state_tx.send_replace(MonitorState::Fetching);
            debug!("running update");

            match self.fetch_and_classify().await {
                Ok((signals, next)) => {
                    self.state_tx.send_replace(MonitorState::Settled);
                    self.emit(signals);
                    debug!(next_in_s = next.as_secs(), "update finished");
                    next
                }
                Err(e) => {
                    match &e {
                        MonitorError::Pulse(_) => {
                            warn!(error = %e, "snapshot could not be classified")
                        }
                        _ => error!(error = %e, "error fetching price data"),
                    }

                    self.state_tx.send_replace(MonitorState::Failed);
                    self.emit(Signals::NO_DATA);
                    debug!(next_in_s = self.cfg.retry_delay.as_secs(), "retry scheduled");
                    self.cfg.retry_delay
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch_and_classify(&mut self) -> Result<(Signals, Duration), MonitorError> {
        let snapshot = self.fetch().await?;
        let reading = self.pulse.evaluate(&snapshot)?;
        let signals = self.signals_for(&reading);

        info!(
            price_now = signals.display_price(),
            intensity = reading.intensity_percent,
            low = reading.low,
            high = reading.forecast_high,
            is_high = signals.is_high,
            is_low = signals.is_low,
            "price updated"
        );

        Ok((signals, snapshot.refresh_after()))
    }

    #[instrument(skip(self), fields(zone = %self.cfg.zone), level = "debug")]
    async fn fetch(&self) -> Result<PriceSnapshot, MonitorError> {
        warn_if_slow(
            "fetch_snapshot",
            SLOW_FETCH,
            self.feed.fetch_snapshot(&self.cfg.zone),
        )
        .await
        .map_err(|e| MonitorError::Fetch(e.into()))
    }

    fn signals_for(&self, reading: &IntensityPulseResult) -> Signals {
        let c = classify(
            reading.price_now,
            reading.intensity_percent,
            &self.cfg.thresholds,
        );

        Signals {
            has_data: true,
            price_now: reading.price_now,
            intensity_percent: reading.intensity_percent,
            is_high: c.is_high,
            is_low: c.is_low,
        }
    }

    fn emit(&self, signals: Signals) {
        self.signals_tx.send_replace(signals);
        self.listener.on_signals_updated(&signals);
    }
}

/// Sleep for `delay` unless a stop is requested first. Returns `true` on stop.
///
/// If every handle is gone no stop can arrive any more, so the full delay is
/// slept.
async fn wait_or_stop(stop_rx: &mut watch::Receiver<bool>, delay: Duration) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = stop_rx.changed() => match changed {
                Ok(()) if *stop_rx.borrow_and_update() => return true,
                Ok(()) => continue,
                Err(_) => {
                    (&mut sleep).await;
                    return false;
                }
            },
        }
    }
}

/// Reader and lifecycle handle for a running monitor.
///
/// Dropping the handle detaches the loop; it keeps running until the runtime
/// shuts down.
pub struct MonitorHandle {
    signals_rx: watch::Receiver<Signals>,
    state_rx: watch::Receiver<MonitorState>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Most recently emitted signals. Stable between cycles.
    pub fn current_signals(&self) -> Signals {
        *self.signals_rx.borrow()
    }

    pub fn state(&self) -> MonitorState {
        *self.state_rx.borrow()
    }

    /// A receiver that is notified on every emission.
    pub fn subscribe(&self) -> watch::Receiver<Signals> {
        self.signals_rx.clone()
    }

    /// Ask the loop to exit. An in-flight fetch finishes and is emitted first.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop task to end.
    pub async fn join(self) -> Result<(), MonitorError> {
        self.task.await?;
        Ok(())
    }

    /// `stop` followed by `join`.
    pub async fn shutdown(self) -> Result<(), MonitorError> {
        self.stop();
        self.join().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone};
    use market::pulse::PriceThresholds;
    use market::{ForecastPoint, PricePoint};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    struct FixedFeed {
        snapshot: Option<PriceSnapshot>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceFeed for FixedFeed {
        async fn fetch_snapshot(&self, _zone: &str) -> anyhow::Result<PriceSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.snapshot
                .clone()
                .ok_or_else(|| anyhow::anyhow!("upstream returned 502"))
        }
    }

    fn snapshot(now: f64) -> PriceSnapshot {
        let ts = FixedOffset::west_opt(6 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .unwrap();
        PriceSnapshot {
            current: PricePoint::new(now, ts),
            day_low_so_far: 1.0,
            forecast: [1.0, 10.0].into_iter().map(ForecastPoint::new).collect(),
            refresh_after_secs: 90,
        }
    }

    fn monitor(snapshot: Option<PriceSnapshot>) -> PriceMonitor<Arc<FixedFeed>> {
        let feed = Arc::new(FixedFeed {
            snapshot,
            calls: AtomicUsize::new(0),
        });
        let cfg = MonitorConfig::new("LZ_HOUSTON", PriceThresholds::default());
        PriceMonitor::new(cfg, feed, |_: &Signals| {})
    }

    #[tokio::test]
    #[traced_test]
    async fn successful_cycle_logs_price_and_intensity() {
        let mut m = monitor(Some(snapshot(3.0)));

        let next = m.run_cycle().await;

        assert_eq!(next, Duration::from_secs(90));
        assert!(logs_contain("price updated"));
        assert!(logs_contain("intensity=22"));
        assert!(!logs_contain("error fetching price data"));
    }

    #[tokio::test]
    #[traced_test]
    async fn fetch_error_is_logged_not_propagated() {
        let mut m = monitor(None);

        let next = m.run_cycle().await;

        assert_eq!(next, RETRY_DELAY);
        assert_eq!(m.current_signals(), Signals::NO_DATA);
        assert!(logs_contain("error fetching price data"));
        assert!(logs_contain("upstream returned 502"));
    }

    #[tokio::test]
    #[traced_test]
    async fn unusable_snapshot_is_logged_as_warning() {
        let mut s = snapshot(3.0);
        s.forecast.clear();
        let mut m = monitor(Some(s));

        m.run_cycle().await;

        assert!(logs_contain("snapshot could not be classified"));
        assert!(logs_contain("forecast is empty"));
    }

    #[tokio::test]
    async fn custom_retry_delay_is_honoured() {
        let mut m = monitor(None);
        m.cfg.retry_delay = Duration::from_secs(3);

        assert_eq!(m.run_cycle().await, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_keeps_the_loop_running() {
        let feed = Arc::new(FixedFeed {
            snapshot: Some(snapshot(3.0)),
            calls: AtomicUsize::new(0),
        });
        let cfg = MonitorConfig::new("LZ_HOUSTON", PriceThresholds::default());

        let handle = PriceMonitor::new(cfg, Arc::clone(&feed), |_: &Signals| {}).start();
        drop(handle);

        tokio::time::sleep(Duration::from_secs(90 * 3 + 1)).await;

        assert_eq!(feed.calls.load(Ordering::SeqCst), 4);
    }
}
