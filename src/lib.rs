// src/lib.rs
pub mod config;
pub mod data;
pub mod errors;
pub mod report;
pub mod timeframe;
pub mod types;
pub mod zones;

pub use config::DetectorConfig;
pub use errors::DetectorError;
pub use report::{MultiTimeframeReport, TimeframeOutcome, TimeframeReport};
pub use timeframe::Timeframe;
pub use types::{
    BlockZone, Breaker, CandleData, FairValueGap, GapStatus, StructureIndicators, UntappedExtreme,
};
pub use zones::{Direction, MarketStructureEngine};
