use crate::time::{DurationError, format_duration, parse_duration};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Metric driving the visual encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Number of times the element was passed.
    #[default]
    Count,
    /// Total time spent, in minutes.
    TimeMinutes,
    /// Average time spent, in minutes.
    AvgMinutes,
}

/// Marker in a mode name that flags duration-valued metrics.
const DURATION_MARKER: &str = "_minutes";

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Count, Mode::TimeMinutes, Mode::AvgMinutes];

    /// Field name used for this mode inside a [`StatRecord`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Count => "count",
            Mode::TimeMinutes => "time_minutes",
            Mode::AvgMinutes => "avg_minutes",
        }
    }

    /// Whether labels for this mode are rendered as durations.
    pub fn is_duration(&self) -> bool {
        self.as_str().contains(DURATION_MARKER)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode {0:?} (expected one of: count, time_minutes, avg_minutes)")]
pub struct ModeError(pub String);

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModeError(s.to_string()))
    }
}

/// A single metric value: either a plain number or a duration (stored in minutes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Number(f64),
    Duration(u64),
}

impl StatValue {
    /// Parse a duration string such as `"1d 4h"`.
    pub fn duration(text: &str) -> Result<Self, DurationError> {
        parse_duration(text).map(StatValue::Duration)
    }

    /// Value on the comparable numeric scale (durations in minutes).
    pub fn magnitude(&self) -> f64 {
        match *self {
            StatValue::Number(n) => n,
            StatValue::Duration(m) => m as f64,
        }
    }

    /// Human readable label for this value under `mode`.
    pub fn label(&self, mode: Mode) -> String {
        match *self {
            StatValue::Duration(m) => format_duration(m),
            StatValue::Number(n) if mode.is_duration() => {
                format_duration(n.max(0.0).round() as u64)
            }
            StatValue::Number(n) => format_number(n),
        }
    }
}

impl From<f64> for StatValue {
    fn from(n: f64) -> Self {
        StatValue::Number(n)
    }
}

impl From<i64> for StatValue {
    fn from(n: i64) -> Self {
        StatValue::Number(n as f64)
    }
}

impl From<i32> for StatValue {
    fn from(n: i32) -> Self {
        StatValue::Number(f64::from(n))
    }
}

/// Shortest textual form: `5` rather than `5.0`, `2.5` stays `2.5`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl Serialize for StatValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            StatValue::Number(n) => serializer.serialize_f64(n),
            StatValue::Duration(0) => serializer.serialize_str("0m"),
            StatValue::Duration(m) => serializer.serialize_str(&format_duration(m)),
        }
    }
}

/// Accept either a JSON number or a duration string; malformed strings are rejected.
impl<'de> Deserialize<'de> for StatValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct StatValueVisitor;

        impl<'de> Visitor<'de> for StatValueVisitor {
            type Value = StatValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number or a duration string like \"2d 3h 15m\"")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(StatValue::Number(v as f64))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(StatValue::Number(v as f64))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(StatValue::Number(v))
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                StatValue::duration(s).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(StatValueVisitor)
    }
}

/// Per-element bag of metric values keyed by field name.
///
/// Keys that match no [`Mode`] are kept but never selected. JSON `null`
/// entries are dropped on load, so they behave like missing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Option<StatValue>>")]
pub struct StatRecord(BTreeMap<String, StatValue>);

impl From<BTreeMap<String, Option<StatValue>>> for StatRecord {
    fn from(raw: BTreeMap<String, Option<StatValue>>) -> Self {
        StatRecord(
            raw.into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        )
    }
}

impl StatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for a mode field.
    pub fn with(mut self, mode: Mode, value: impl Into<StatValue>) -> Self {
        self.0.insert(mode.as_str().to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: StatValue) {
        self.0.insert(field.into(), value);
    }

    /// Typed accessor: the value for `mode`, if this record defines it.
    pub fn get(&self, mode: Mode) -> Option<&StatValue> {
        self.0.get(mode.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Element id -> metrics. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable(BTreeMap<String, StatRecord>);

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element_id: impl Into<String>, record: StatRecord) {
        self.0.insert(element_id.into(), record);
    }

    pub fn record(&self, element_id: &str) -> Option<&StatRecord> {
        self.0.get(element_id)
    }

    /// Value of `mode` for the given element, if any.
    pub fn value(&self, element_id: &str, mode: Mode) -> Option<&StatValue> {
        self.record(element_id).and_then(|r| r.get(mode))
    }

    /// All values defined for `mode`, in element id order.
    pub fn values(&self, mode: Mode) -> impl Iterator<Item = &StatValue> {
        self.0.values().filter_map(move |r| r.get(mode))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl<K: Into<String>> FromIterator<(K, StatRecord)> for StatTable {
    fn from_iter<I: IntoIterator<Item = (K, StatRecord)>>(iter: I) -> Self {
        StatTable(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Observed `(min, max)` of the active mode across all elements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`, or 1 when the range is degenerate.
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }

    /// Position of `value` within the bounds; not clamped.
    pub fn ratio(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip_through_from_str() {
        for m in Mode::ALL {
            assert_eq!(m.as_str().parse::<Mode>().unwrap(), m);
        }
        assert!("tiem_minutes".parse::<Mode>().is_err());
        assert!(Mode::TimeMinutes.is_duration());
        assert!(Mode::AvgMinutes.is_duration());
        assert!(!Mode::Count.is_duration());
    }

    #[test]
    fn deserializes_numbers_durations_and_nulls() {
        let t = StatTable::from_json_str(
            r#"{"A": {"count": 5, "time_minutes": "1d 1h", "avg_minutes": null, "extra": 2.5}}"#,
        )
        .unwrap();
        assert_eq!(t.value("A", Mode::Count), Some(&StatValue::Number(5.0)));
        assert_eq!(t.value("A", Mode::TimeMinutes), Some(&StatValue::Duration(1500)));
        assert_eq!(t.value("A", Mode::AvgMinutes), None);
        assert_eq!(t.value("B", Mode::Count), None);
    }

    #[test]
    fn malformed_duration_fails_the_load() {
        let err = StatTable::from_json_str(r#"{"A": {"time_minutes": "3 weeks"}}"#).unwrap_err();
        assert!(err.to_string().contains("duration"), "{err}");
    }

    #[test]
    fn labels_follow_mode() {
        assert_eq!(StatValue::Number(5.0).label(Mode::Count), "5");
        assert_eq!(StatValue::Number(2.5).label(Mode::Count), "2.5");
        assert_eq!(StatValue::Number(1500.0).label(Mode::TimeMinutes), "1d 1h");
        assert_eq!(StatValue::Duration(90).label(Mode::AvgMinutes), "1h 30m");
    }

    #[test]
    fn degenerate_bounds_use_unit_span() {
        let b = Bounds::new(4.0, 4.0);
        assert_eq!(b.span(), 1.0);
        assert_eq!(b.ratio(4.0), 0.0);
        assert_eq!(b.ratio(5.0), 1.0);
    }
}
