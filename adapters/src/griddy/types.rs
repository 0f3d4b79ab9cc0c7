//! Wire types for the Griddy `insights/getnow` endpoint.
//!
//! Numeric fields show up either as JSON numbers or as numeric strings
//! depending on the field, so every number is decoded leniently.

use chrono::DateTime;
use market::{ForecastPoint, PricePoint, PriceSnapshot};
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::GriddyError;

#[derive(Debug, Serialize)]
pub struct GetNowRequest<'a> {
    pub settlement_point: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetNowResponse {
    pub now: GriddyItem,

    #[serde(default)]
    pub forecast: Vec<GriddyItem>,

    #[serde(deserialize_with = "lenient_f64")]
    pub seconds_until_refresh: f64,
}

/// One hourly price entry. `now` and every forecast hour share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct GriddyItem {
    #[serde(deserialize_with = "lenient_f64")]
    pub price_ckwh: f64,

    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub low_ckwh: Option<f64>,

    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub high_ckwh: Option<f64>,

    #[serde(default)]
    pub date_local_tz: Option<String>,
}

impl GetNowResponse {
    /// Convert the wire payload into a domain snapshot.
    pub fn into_snapshot(self) -> Result<PriceSnapshot, GriddyError> {
        let raw_ts = self
            .now
            .date_local_tz
            .as_deref()
            .ok_or_else(|| GriddyError::InvalidResponse("missing now.date_local_tz".into()))?;

        let timestamp_local = DateTime::parse_from_rfc3339(raw_ts).map_err(|e| {
            GriddyError::InvalidResponse(format!("bad now.date_local_tz {raw_ts:?}: {e}"))
        })?;

        let day_low_so_far = self
            .now
            .low_ckwh
            .ok_or_else(|| GriddyError::InvalidResponse("missing now.low_ckwh".into()))?;

        let refresh = self.seconds_until_refresh;
        if !refresh.is_finite() || refresh < 1.0 {
            return Err(GriddyError::InvalidResponse(format!(
                "seconds_until_refresh must be positive, got {refresh}"
            )));
        }

        Ok(PriceSnapshot {
            current: PricePoint::new(self.now.price_ckwh, timestamp_local),
            day_low_so_far,
            forecast: self
                .forecast
                .iter()
                .map(|hour| ForecastPoint::new(hour.price_ckwh))
                .collect(),
            refresh_after_secs: refresh.ceil() as u64,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a number, got {s:?}"))),
        }
    }
}

fn lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(de)?.into_f64()
}

fn lenient_opt_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(de)?
        .map(NumberOrString::into_f64)
        .transpose()
}
