use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::types::PricePoint;

/// Same-day history of observed prices.
///
/// Points are kept in insertion order, which is also chronological order.
/// Every `append` first drops all points that fall on a different calendar
/// day than the incoming point (in the incoming point's timezone), so the
/// buffer never holds more than one day of observations and recovers on its
/// own after long outages.
#[derive(Clone, Debug, Default)]
pub struct HistoryBuffer {
    points: VecDeque<PricePoint>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    /// Evict points from other calendar days, then push `point`.
    ///
    /// Duplicate timestamps are kept and count towards aggregates.
    pub fn append(&mut self, point: PricePoint) {
        let offset = *point.timestamp_local.offset();
        let today = point.day();

        self.points.retain(|p| p.day_in(&offset) == today);
        self.points.push_back(point);
    }

    /// Lowest observed price of the day, `None` when empty.
    pub fn min_price(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.price_cents_per_kwh)
            .fold(None, |acc, price| Some(acc.map_or(price, |m: f64| m.min(price))))
    }

    /// Calendar day currently held, taken from the most recent point.
    pub fn day(&self) -> Option<NaiveDate> {
        self.points.back().map(PricePoint::day)
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
