//! Turns raw snapshot fields into metric values.
//!
//! Nothing here fails: a field that is missing or does not look like it should simply resolves
//! to [`None`], so that a vendor field disappearing only takes down that one metric.

use std::borrow::Cow;

use chrono::{DateTime, Local, MappedLocalTime, NaiveDateTime, TimeZone, Utc};

use crate::core::{
    metric::{Conversion, MetricDefinition},
    snapshot::{Section, Snapshot},
};

const ONLINE_POINTER: &str = "/storeDevicePower/isOnline";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const POWER_DIRECTIONS: DirectionLabels =
    DirectionLabels { negative: "Importing", zero: "Standby", positive: "Exporting" };

const BATTERY_DIRECTIONS: DirectionLabels =
    DirectionLabels { negative: "Charging", zero: "Idle", positive: "Discharging" };

#[derive(Clone, Debug, PartialEq, derive_more::Display)]
pub enum Value {
    #[display("{_0}")]
    Number(f64),

    #[display("{_0}")]
    Label(Cow<'static, str>),

    #[display("{}", _0.to_rfc3339())]
    Timestamp(DateTime<Utc>),
}

/// Resolve the metric by its key, [`None`] stands for «absent».
#[must_use]
pub fn resolve(snapshot: &Snapshot, key: &str) -> Option<Value> {
    MetricDefinition::find(key)?.resolve(snapshot)
}

/// Whether the device reports itself online.
///
/// All the metrics become stale together when it does not, regardless of their own values.
#[must_use]
pub fn is_available(snapshot: &Snapshot) -> bool {
    snapshot
        .lookup(Section::DeviceTelemetry, ONLINE_POINTER)
        .and_then(as_integer)
        .is_some_and(|online| online != 0)
}

impl MetricDefinition {
    #[must_use]
    pub fn resolve(&self, snapshot: &Snapshot) -> Option<Value> {
        self.conversion.apply(snapshot.lookup(self.source.section, self.source.pointer)?, &Local)
    }
}

impl Conversion {
    /// Convert the raw field, interpreting naive timestamps in the time zone.
    pub fn apply<Tz: TimeZone>(self, raw: &serde_json::Value, tz: &Tz) -> Option<Value> {
        match self {
            Self::Float => as_float(raw).map(Value::Number),
            Self::Absolute => as_float(raw).map(f64::abs).map(Value::Number),
            Self::Percentage => as_percentage(raw).map(Value::Number),
            Self::Timestamp => as_timestamp(raw, tz).map(Value::Timestamp),
            Self::Direction => as_integer(raw).map(|code| Value::Label(POWER_DIRECTIONS.get(code))),
            Self::BatteryDirection => {
                as_integer(raw).map(|code| Value::Label(BATTERY_DIRECTIONS.get(code)))
            }
            Self::YesNo => {
                let label = |flag: i64| if flag == 0 { "No" } else { "Yes" };
                as_integer(raw).map(|flag| Value::Label(label(flag).into()))
            }
        }
    }
}

struct DirectionLabels {
    negative: &'static str,
    zero: &'static str,
    positive: &'static str,
}

impl DirectionLabels {
    /// Unexpected codes are surfaced as is, instead of being hidden.
    fn get(&self, code: i64) -> Cow<'static, str> {
        match code {
            -1 => self.negative.into(),
            0 => self.zero.into(),
            1 => self.positive.into(),
            _ => format!("Unknown ({code})").into(),
        }
    }
}

fn as_float(raw: &serde_json::Value) -> Option<f64> {
    match raw {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(string) => parse_finite(string),
        _ => None,
    }
}

fn as_percentage(raw: &serde_json::Value) -> Option<f64> {
    match raw {
        serde_json::Value::String(string) => parse_finite(string.trim().trim_end_matches('%')),
        _ => as_float(raw),
    }
}

/// `NaN` and infinities are not readings.
fn parse_finite(string: &str) -> Option<f64> {
    string.trim().parse().ok().filter(|value: &f64| value.is_finite())
}

/// Integers, integral floats, and integer strings. Booleans are not integers.
#[expect(clippy::cast_possible_truncation)]
fn as_integer(raw: &serde_json::Value) -> Option<i64> {
    const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

    match raw {
        serde_json::Value::Number(number) => number.as_i64().or_else(|| {
            let float = number.as_f64()?;
            (float.fract() == 0.0 && float.abs() <= MAX_EXACT_FLOAT).then_some(float as i64)
        }),
        serde_json::Value::String(string) => string.trim().parse().ok(),
        _ => None,
    }
}

fn as_timestamp<Tz: TimeZone>(raw: &serde_json::Value, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.as_str()?.trim(), TIMESTAMP_FORMAT).ok()?;
    match tz.from_local_datetime(&naive) {
        MappedLocalTime::Single(timestamp) | MappedLocalTime::Ambiguous(timestamp, _) => {
            Some(timestamp.with_timezone(&Utc))
        }
        MappedLocalTime::None => None,
    }
}
