// src/timeframe.rs
use crate::errors::DetectorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "15m")]
    FifteenMinutes,
}

impl Timeframe {
    /// Processing order of a full multi-timeframe run.
    pub fn all() -> [Timeframe; 4] {
        [
            Timeframe::Daily,
            Timeframe::OneHour,
            Timeframe::FourHours,
            Timeframe::FifteenMinutes,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::FourHours => "4h",
            Timeframe::OneHour => "1h",
            Timeframe::FifteenMinutes => "15m",
        }
    }

    pub fn interval_ms(&self) -> i64 {
        match self {
            Timeframe::Daily => 24 * 60 * 60 * 1000,
            Timeframe::FourHours => 4 * 60 * 60 * 1000,
            Timeframe::OneHour => 60 * 60 * 1000,
            Timeframe::FifteenMinutes => 15 * 60 * 1000,
        }
    }
}

impl FromStr for Timeframe {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "1d" => Ok(Timeframe::Daily),
            "4h" => Ok(Timeframe::FourHours),
            "1h" => Ok(Timeframe::OneHour),
            "15m" => Ok(Timeframe::FifteenMinutes),
            other => Err(DetectorError::UnsupportedTimeframe(other.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
