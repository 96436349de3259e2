// src/errors.rs

#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("Not enough candles for detection: need {required}, got {actual}")]
    InsufficientCandles { required: usize, actual: usize },

    #[error("Unsupported timeframe: {0}")]
    UnsupportedTimeframe(String),

    #[error("Unsupported candle file format: {0}")]
    UnsupportedFormat(String),

    #[error("Candles are not in ascending timestamp order at index {index}")]
    UnorderedCandles { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
