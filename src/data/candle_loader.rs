// src/data/candle_loader.rs
// Reads a candle sequence from a local CSV or JSON file.

use crate::errors::DetectorError;
use crate::timeframe::Timeframe;
use crate::types::CandleData;
use csv::ReaderBuilder;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleFormat {
    Csv,
    Json,
}

impl CandleFormat {
    pub fn from_path(path: &Path) -> Result<Self, DetectorError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(CandleFormat::Csv),
            "json" => Ok(CandleFormat::Json),
            _ => Err(DetectorError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load and order-check the candles in `path`.
pub fn load_candles(path: &Path) -> Result<Vec<CandleData>, DetectorError> {
    let format = CandleFormat::from_path(path)?;
    info!("[CandleLoader] Loading {:?} candles from {}", format, path.display());

    let file = File::open(path)?;
    let candles = read_candles(BufReader::new(file), format)?;
    validate_order(&candles)?;

    debug!("[CandleLoader] Loaded {} candles", candles.len());
    Ok(candles)
}

pub fn read_candles<R: Read>(reader: R, format: CandleFormat) -> Result<Vec<CandleData>, DetectorError> {
    match format {
        CandleFormat::Json => Ok(serde_json::from_reader(reader)?),
        CandleFormat::Csv => {
            let mut rdr = ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_reader(reader);

            let mut candles = Vec::new();
            for record in rdr.deserialize() {
                candles.push(record?);
            }
            Ok(candles)
        }
    }
}

/// Timestamps must strictly increase.
pub fn validate_order(candles: &[CandleData]) -> Result<(), DetectorError> {
    match candles
        .windows(2)
        .position(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        Some(pos) => {
            warn!(
                "[CandleLoader] Candle {} (ts {}) does not follow ts {}",
                pos + 1,
                candles[pos + 1].timestamp,
                candles[pos].timestamp
            );
            Err(DetectorError::UnorderedCandles { index: pos + 1 })
        }
        None => Ok(()),
    }
}

/// Count of neighbouring candles not exactly one `timeframe` interval apart.
/// Gaps are reported, not rejected.
pub fn check_spacing(candles: &[CandleData], timeframe: Timeframe) -> usize {
    let expected = timeframe.interval_ms();
    let mismatched = candles
        .windows(2)
        .filter(|pair| pair[1].timestamp - pair[0].timestamp != expected)
        .count();

    if mismatched > 0 {
        warn!(
            "[CandleLoader] {} of {} {} candle steps differ from {} ms",
            mismatched,
            candles.len().saturating_sub(1),
            timeframe,
            expected
        );
    }
    mismatched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_with_provider_headers() {
        let csv_data = "timestamp,open,high,low,close,volumefrom,volumeto\n\
                        1000,1.0,2.0,0.5,1.5,10,15\n\
                        2000,1.5,2.5,1.0,2.0,11,20\n";
        let candles = read_candles(csv_data.as_bytes(), CandleFormat::Csv).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].timestamp, 2000);
        assert_eq!(candles[0].volume_base, 10.0);
        assert_eq!(candles[1].volume_quote, 20.0);
    }

    #[test]
    fn test_read_json_array() {
        let json_data = r#"[{"timestamp":1,"open":1.0,"high":2.0,"low":0.5,"close":1.5}]"#;
        let candles = read_candles(json_data.as_bytes(), CandleFormat::Json).unwrap();
        assert_eq!(candles, vec![CandleData::new(1, 1.0, 2.0, 0.5, 1.5)]);
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let candles = vec![
            CandleData::new(1, 1.0, 1.0, 1.0, 1.0),
            CandleData::new(3, 1.0, 1.0, 1.0, 1.0),
            CandleData::new(3, 1.0, 1.0, 1.0, 1.0),
        ];
        assert!(matches!(
            validate_order(&candles),
            Err(DetectorError::UnorderedCandles { index: 2 })
        ));
        assert!(validate_order(&candles[..2]).is_ok());
    }

    #[test]
    fn test_spacing_counts_steps_off_the_interval() {
        let hour = Timeframe::OneHour.interval_ms();
        let candles: Vec<CandleData> = [0, hour, 2 * hour, 4 * hour]
            .iter()
            .map(|&ts| CandleData::new(ts, 1.0, 1.0, 1.0, 1.0))
            .collect();
        assert_eq!(check_spacing(&candles, Timeframe::OneHour), 1);
        assert_eq!(check_spacing(&candles[..3], Timeframe::OneHour), 0);
        assert_eq!(check_spacing(&candles[..3], Timeframe::FifteenMinutes), 2);
        assert_eq!(check_spacing(&[], Timeframe::Daily), 0);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(CandleFormat::from_path(Path::new("a/b.CSV")).unwrap(), CandleFormat::Csv);
        assert_eq!(CandleFormat::from_path(Path::new("b.json")).unwrap(), CandleFormat::Json);
        assert!(CandleFormat::from_path(Path::new("b.parquet")).is_err());
        assert!(CandleFormat::from_path(Path::new("noext")).is_err());
    }
}
