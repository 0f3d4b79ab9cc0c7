use serde::Serialize;

/// Derived price signals handed to the consumer once per fetch cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Signals {
    /// `false` when the last cycle failed or nothing has been fetched yet.
    pub has_data: bool,
    pub price_now: f64,
    /// Nominally 0–100 but unclamped.
    pub intensity_percent: i64,
    pub is_high: bool,
    pub is_low: bool,
}

impl Signals {
    pub const NO_DATA: Signals = Signals {
        has_data: false,
        price_now: 0.0,
        intensity_percent: 0,
        is_high: false,
        is_low: false,
    };

    pub fn no_data() -> Self {
        Self::NO_DATA
    }

    /// `price_now` rounded to three decimals, the precision shown to users.
    pub fn display_price(&self) -> f64 {
        (self.price_now * 1000.0).round() / 1000.0
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::NO_DATA
    }
}

/// Lifecycle of the scheduling loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum MonitorState {
    /// Constructed, first fetch not started.
    #[default]
    Idle,
    Fetching,
    /// Last cycle produced signals; waiting for the feed's refresh interval.
    Settled,
    /// Last cycle produced no data; waiting for the retry delay.
    Failed,
    Stopped,
}

/// Receives every signals emission, synchronously from the fetch cycle.
pub trait SignalsListener: Send + Sync {
    fn on_signals_updated(&self, signals: &Signals);
}

impl<F> SignalsListener for F
where
    F: Fn(&Signals) + Send + Sync,
{
    fn on_signals_updated(&self, signals: &Signals) {
        self(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_signals_are_no_data() {
        let s = Signals::default();

        assert!(!s.has_data);
        assert!(!s.is_high);
        assert!(!s.is_low);
        assert_eq!(s.intensity_percent, 0);
    }

    #[test]
    fn display_price_rounds_to_three_decimals() {
        let s = Signals {
            price_now: 2.34567,
            ..Signals::NO_DATA
        };

        assert_eq!(s.display_price(), 2.346);
    }
}
