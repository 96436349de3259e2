// src/report.rs
// Per-timeframe reports, the combined multi-timeframe document, and their log summaries.

use crate::data::{check_spacing, load_candles};
use crate::errors::DetectorError;
use crate::timeframe::Timeframe;
use crate::types::{CandleData, StructureIndicators};
use crate::zones::MarketStructureEngine;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{info, warn};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeReport {
    pub timeframe: Timeframe,
    pub candles: Vec<CandleData>,
    pub indicators: StructureIndicators,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_price: Option<f64>,
}

impl TimeframeReport {
    pub fn new(timeframe: Timeframe, candles: Vec<CandleData>, indicators: StructureIndicators) -> Self {
        let latest_price = candles.last().map(|c| c.close);
        Self {
            timeframe,
            candles,
            indicators,
            latest_price,
        }
    }

    /// JSON form of the report. With `iso_timestamps` every `timestamp`
    /// field becomes an ISO-8601 UTC string.
    pub fn to_json_value(&self, iso_timestamps: bool) -> Result<Value, DetectorError> {
        let mut value = serde_json::to_value(self)?;
        if iso_timestamps {
            rewrite_timestamps(&mut value);
        }
        Ok(value)
    }

    pub fn log_summary(&self) {
        info!(
            "[Report] --- {} structure ({} candles) ---",
            self.timeframe.label().to_uppercase(),
            self.candles.len()
        );
        for (name, len) in self.indicators.collection_sizes() {
            info!("[Report] {}: {}", name, len);
        }
        match self.latest_price {
            Some(price) => info!("[Report] Latest Price: {}", price),
            None => info!("[Report] Latest Price: n/a"),
        }
    }
}

/// Result of one timeframe in a multi-timeframe run.
#[derive(Debug, Clone)]
pub enum TimeframeOutcome {
    Analyzed(TimeframeReport),
    Failed(String),
}

impl TimeframeOutcome {
    fn to_json_value(&self, iso_timestamps: bool) -> Result<Value, DetectorError> {
        match self {
            TimeframeOutcome::Analyzed(report) => report.to_json_value(iso_timestamps),
            TimeframeOutcome::Failed(message) => Ok(Value::String(format!("Error: {}", message))),
        }
    }
}

/// Reports keyed by timeframe, kept in `Timeframe::all()` order.
#[derive(Debug, Clone, Default)]
pub struct MultiTimeframeReport {
    entries: Vec<(Timeframe, TimeframeOutcome)>,
}

impl MultiTimeframeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and analyze every input. A failing timeframe is recorded and the
    /// others still run.
    pub fn collect(engine: &MarketStructureEngine, inputs: &[(Timeframe, PathBuf)], strict: bool) -> Self {
        let mut report = Self::new();

        for (timeframe, path) in inputs {
            let outcome = match analyze_file(engine, *timeframe, path, strict) {
                Ok(tf_report) => TimeframeOutcome::Analyzed(tf_report),
                Err(e) => {
                    warn!("[Report] {} failed: {}", timeframe, e);
                    TimeframeOutcome::Failed(e.to_string())
                }
            };
            report.insert(*timeframe, outcome);
        }

        report
    }

    /// Adds or replaces the entry for `timeframe`.
    pub fn insert(&mut self, timeframe: Timeframe, outcome: TimeframeOutcome) {
        self.entries.retain(|(tf, _)| *tf != timeframe);
        self.entries.push((timeframe, outcome));
        self.entries.sort_by_key(|(tf, _)| {
            Timeframe::all()
                .iter()
                .position(|candidate| candidate == tf)
                .unwrap_or(usize::MAX)
        });
    }

    pub fn get(&self, timeframe: Timeframe) -> Option<&TimeframeOutcome> {
        self.entries
            .iter()
            .find(|(tf, _)| *tf == timeframe)
            .map(|(_, outcome)| outcome)
    }

    pub fn timeframes(&self) -> Vec<Timeframe> {
        self.entries.iter().map(|(tf, _)| *tf).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, outcome)| matches!(outcome, TimeframeOutcome::Failed(_)))
    }

    pub fn log_summary(&self) {
        for (timeframe, outcome) in &self.entries {
            match outcome {
                TimeframeOutcome::Analyzed(report) => report.log_summary(),
                TimeframeOutcome::Failed(message) => {
                    warn!("[Report] --- {} --- Error: {}", timeframe.label().to_uppercase(), message)
                }
            }
        }
    }

    /// One object keyed by timeframe label.
    pub fn to_json_value(&self, iso_timestamps: bool) -> Result<Value, DetectorError> {
        let mut map = serde_json::Map::new();
        for (timeframe, outcome) in &self.entries {
            map.insert(timeframe.label().to_string(), outcome.to_json_value(iso_timestamps)?);
        }
        Ok(Value::Object(map))
    }

    /// Same document as [`to_json_value`](Self::to_json_value), written with the
    /// timeframes in processing order.
    pub fn to_json_string(&self, iso_timestamps: bool, pretty: bool) -> Result<String, DetectorError> {
        let entries = self
            .entries
            .iter()
            .map(|(timeframe, outcome)| Ok((timeframe.label(), outcome.to_json_value(iso_timestamps)?)))
            .collect::<Result<Vec<_>, DetectorError>>()?;

        let ordered = OrderedEntries(&entries);
        let output = if pretty {
            serde_json::to_string_pretty(&ordered)?
        } else {
            serde_json::to_string(&ordered)?
        };
        Ok(output)
    }
}

fn analyze_file(
    engine: &MarketStructureEngine,
    timeframe: Timeframe,
    path: &Path,
    strict: bool,
) -> Result<TimeframeReport, DetectorError> {
    let candles = load_candles(path)?;
    check_spacing(&candles, timeframe);
    info!("[Report] Analyzing {} {} candles", candles.len(), timeframe);

    let indicators = if strict {
        engine.detect(&candles)?
    } else {
        engine.analyze(&candles)
    };
    Ok(TimeframeReport::new(timeframe, candles, indicators))
}

struct OrderedEntries<'a>(&'a [(&'static str, Value)]);

impl Serialize for OrderedEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Millisecond epoch timestamp as `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp(timestamp_ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn rewrite_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if key == "timestamp" {
                    if let Some(iso) = field.as_i64().and_then(format_timestamp) {
                        *field = Value::String(iso);
                        continue;
                    }
                }
                rewrite_timestamps(field);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(rewrite_timestamps),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UntappedExtreme;

    fn report() -> TimeframeReport {
        let candles = vec![
            CandleData::new(1_704_067_200_000, 1.0, 2.0, 0.5, 1.5),
            CandleData::new(1_704_070_800_000, 1.5, 2.5, 1.0, 2.0),
        ];
        let mut indicators = StructureIndicators::default();
        indicators.swing_highs.push(UntappedExtreme {
            timestamp: 1_704_067_200_000,
            price: 2.0,
        });
        TimeframeReport::new(Timeframe::OneHour, candles, indicators)
    }

    #[test]
    fn test_format_timestamp_matches_iso_millis() {
        assert_eq!(
            format_timestamp(1_704_067_200_000).as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_latest_price_is_last_close() {
        assert_eq!(report().latest_price, Some(2.0));
        let empty = TimeframeReport::new(Timeframe::Daily, Vec::new(), StructureIndicators::default());
        assert_eq!(empty.latest_price, None);
    }

    #[test]
    fn test_iso_rewrite_reaches_nested_collections() {
        let value = report().to_json_value(true).unwrap();
        assert_eq!(value["timeframe"], "1h");
        assert_eq!(value["candles"][1]["timestamp"], "2024-01-01T01:00:00.000Z");
        assert_eq!(
            value["indicators"]["swingHighs"][0]["timestamp"],
            "2024-01-01T00:00:00.000Z"
        );
        assert_eq!(value["latestPrice"], 2.0);
    }

    #[test]
    fn test_combined_report_follows_processing_order() {
        let mut combined = MultiTimeframeReport::new();
        combined.insert(Timeframe::FifteenMinutes, TimeframeOutcome::Failed("No 15m data found".to_string()));
        combined.insert(Timeframe::OneHour, TimeframeOutcome::Analyzed(report()));
        combined.insert(
            Timeframe::Daily,
            TimeframeOutcome::Analyzed(TimeframeReport::new(Timeframe::Daily, Vec::new(), StructureIndicators::default())),
        );

        assert_eq!(
            combined.timeframes(),
            vec![Timeframe::Daily, Timeframe::OneHour, Timeframe::FifteenMinutes]
        );
        assert!(combined.has_failures());

        let value = combined.to_json_value(true).unwrap();
        assert_eq!(value["15m"], "Error: No 15m data found");
        assert_eq!(value["1h"]["candles"][0]["timestamp"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["1h"]["latestPrice"], 2.0);

        let text = combined.to_json_string(false, false).unwrap();
        let daily = text.find("\"daily\"").unwrap();
        let hourly = text.find("\"1h\"").unwrap();
        let quarter = text.find("\"15m\"").unwrap();
        assert!(daily < hourly && hourly < quarter);
    }

    #[test]
    fn test_reinserting_a_timeframe_replaces_it() {
        let mut combined = MultiTimeframeReport::new();
        combined.insert(Timeframe::FourHours, TimeframeOutcome::Failed("first".to_string()));
        combined.insert(Timeframe::FourHours, TimeframeOutcome::Failed("second".to_string()));
        assert_eq!(combined.timeframes(), vec![Timeframe::FourHours]);
        assert!(matches!(
            combined.get(Timeframe::FourHours),
            Some(TimeframeOutcome::Failed(message)) if message == "second"
        ));
        assert!(combined.get(Timeframe::Daily).is_none());
    }

    #[test]
    fn test_epoch_timestamps_kept_by_default() {
        let value = report().to_json_value(false).unwrap();
        assert_eq!(value["candles"][0]["timestamp"], 1_704_067_200_000i64);
    }
}
