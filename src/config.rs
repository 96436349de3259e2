// src/config.rs
use crate::errors::DetectorError;
use crate::timeframe::Timeframe;
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "market-structure-detector")]
#[command(about = "Detect swing points, breakers, FVGs and order/propulsion/rejection/mitigation blocks in candle files")]
pub struct Args {
    /// Candle file to analyze, as `<timeframe>=<path>` or a bare path using --timeframe.
    /// Repeat once per timeframe (.csv with a header row, or .json array)
    #[arg(short, long, required = true)]
    pub input: Vec<String>,

    /// Timeframe of inputs given without a `<timeframe>=` prefix (daily, 4h, 1h, 15m)
    #[arg(short, long, default_value = "1h")]
    pub timeframe: String,

    /// JSON file overriding detector thresholds; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Render timestamps as ISO-8601 UTC strings instead of epoch milliseconds
    #[arg(long)]
    pub iso_timestamps: bool,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pub pretty: bool,

    /// Record a timeframe as failed instead of reporting it empty when it has too few candles
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Every `--input` resolved to its timeframe and file.
    pub fn inputs(&self) -> Result<Vec<(Timeframe, PathBuf)>, DetectorError> {
        let default_timeframe: Timeframe = self.timeframe.parse()?;
        self.input
            .iter()
            .map(|spec| parse_input(spec, default_timeframe))
            .collect()
    }
}

/// `4h=data/btc_4h.csv` or a bare `data/btc.csv` read as `default_timeframe`.
pub fn parse_input(spec: &str, default_timeframe: Timeframe) -> Result<(Timeframe, PathBuf), DetectorError> {
    match spec.split_once('=') {
        Some((label, path)) => Ok((label.parse()?, PathBuf::from(path.trim()))),
        None => Ok((default_timeframe, PathBuf::from(spec))),
    }
}

/// Thresholds shared by the detectors. Ratios are fractions, not percents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Fewest candles the engine will analyze
    pub min_candles: usize,
    /// Minimum |open - close| / open for a candle to count as a body candle
    pub min_body_ratio: f64,
    /// Minimum gap size relative to the gap's lower edge
    pub min_gap_ratio: f64,
    /// A gap whose best fill exceeds this fraction is inactive
    pub gap_fill_inactive_ratio: f64,
    /// Maximum relative distance for "near a swing / order block"
    pub proximity_ratio: f64,
    /// Minimum directional wick relative to the open for rejection candles
    pub min_wick_ratio: f64,
    pub min_cluster_size: usize,
    pub max_cluster_size: usize,
    /// Candles after a swing in which a rejection must be confirmed
    pub rejection_window: usize,
    /// Candles after a body candle in which the structure shift must happen
    pub mss_window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_candles: 3,
            min_body_ratio: 0.002,
            min_gap_ratio: 0.002,
            gap_fill_inactive_ratio: 0.8,
            proximity_ratio: 0.005,
            min_wick_ratio: 0.002,
            min_cluster_size: 2,
            max_cluster_size: 5,
            rejection_window: 5,
            mss_window: 5,
        }
    }
}

impl DetectorConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DetectorError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DetectorError> {
        info!("[Config] Loading detector thresholds from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn has_body(&self, candle: &crate::types::CandleData) -> bool {
        candle.body_ratio() >= self.min_body_ratio
    }

    /// Relative distance of `price` to `reference`, measured against `reference`.
    pub fn is_near(&self, price: f64, reference: f64) -> bool {
        (price - reference).abs() / reference <= self.proximity_ratio
    }
}

pub fn setup_logging(debug: bool) {
    use env_logger::{Builder, Target};
    use log::LevelFilter;

    let mut builder = Builder::from_default_env();
    // stdout carries the JSON report
    builder.target(Target::Stderr);

    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    builder.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = DetectorConfig::default();
        assert_eq!(config.min_candles, 3);
        assert_eq!(config.min_body_ratio, 0.002);
        assert_eq!(config.proximity_ratio, 0.005);
        assert_eq!(config.max_cluster_size, 5);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: DetectorConfig = serde_json::from_str(r#"{"mss_window": 3}"#).unwrap();
        assert_eq!(config.mss_window, 3);
        assert_eq!(config.rejection_window, 5);
    }

    #[test]
    fn test_config_file_overrides_thresholds() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("thresholds.json");
        std::fs::write(&path, r#"{"proximity_ratio": 0.01, "max_cluster_size": 3}"#).unwrap();

        let config = DetectorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.proximity_ratio, 0.01);
        assert_eq!(config.max_cluster_size, 3);
        assert_eq!(config.min_body_ratio, 0.002);
        assert!(DetectorConfig::from_reader("not json".as_bytes()).is_err());
    }

    #[test]
    fn test_input_specs_resolve_timeframes() {
        let (tf, path) = parse_input("4h=data/btc_4h.csv", Timeframe::OneHour).unwrap();
        assert_eq!((tf, path), (Timeframe::FourHours, PathBuf::from("data/btc_4h.csv")));

        let (tf, path) = parse_input("btc.json", Timeframe::Daily).unwrap();
        assert_eq!((tf, path), (Timeframe::Daily, PathBuf::from("btc.json")));

        assert!(matches!(
            parse_input("5m=btc.csv", Timeframe::Daily),
            Err(DetectorError::UnsupportedTimeframe(_))
        ));
    }

    #[test]
    fn test_repeated_inputs_parse_from_command_line() {
        let args = Args::parse_from([
            "market-structure-detector",
            "--input",
            "daily=d.csv",
            "--input",
            "15m=q.json",
            "--config",
            "thresholds.json",
        ]);
        let inputs = args.inputs().unwrap();
        assert_eq!(inputs[0].0, Timeframe::Daily);
        assert_eq!(inputs[1], (Timeframe::FifteenMinutes, PathBuf::from("q.json")));
        assert_eq!(args.config, Some(PathBuf::from("thresholds.json")));
    }

    #[test]
    fn test_is_near_uses_reference_as_denominator() {
        let config = DetectorConfig::default();
        assert!(config.is_near(100.5, 100.0));
        assert!(!config.is_near(100.6, 100.0));
    }
}
