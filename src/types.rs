// src/types.rs
use serde::{Deserialize, Serialize};

// --- Input ---
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandleData {
    /// Open time in milliseconds since the Unix epoch
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, alias = "volumefrom", alias = "volume_base")]
    pub volume_base: f64,
    #[serde(default, alias = "volumeto", alias = "volume_quote")]
    pub volume_quote: f64,
}

impl CandleData {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume_base: 0.0,
            volume_quote: 0.0,
        }
    }

    pub fn body_size(&self) -> f64 {
        (self.open - self.close).abs()
    }

    /// Body size relative to the open. Unguarded for a zero open.
    pub fn body_ratio(&self) -> f64 {
        self.body_size() / self.open
    }

    pub fn body_midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }

    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn is_up(&self) -> bool {
        self.close > self.open
    }

    pub fn is_down(&self) -> bool {
        self.close < self.open
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.body_high()
    }

    pub fn lower_wick(&self) -> f64 {
        self.body_low() - self.low
    }
}

// --- Output ---

/// A swing extreme that price never came back to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UntappedExtreme {
    pub timestamp: i64,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Breaker {
    pub timestamp: i64,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    Active,
    PartiallyActive,
    Inactive,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FairValueGap {
    pub timestamp: i64,
    pub high: f64,
    pub low: f64,
    pub status: GapStatus,
}

/// Shared shape of order, propulsion, rejection and mitigation blocks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockZone {
    pub timestamp: i64,
    pub price: f64,
    pub is_active: bool,
}

/// Everything the engine derives from one candle sequence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructureIndicators {
    pub swing_highs: Vec<UntappedExtreme>,
    pub swing_lows: Vec<UntappedExtreme>,
    pub bullish_breakers: Vec<Breaker>,
    pub bearish_breakers: Vec<Breaker>,
    #[serde(rename = "bullishFVGs")]
    pub bullish_fvgs: Vec<FairValueGap>,
    #[serde(rename = "bearishFVGs")]
    pub bearish_fvgs: Vec<FairValueGap>,
    pub bullish_order_blocks: Vec<BlockZone>,
    pub bearish_order_blocks: Vec<BlockZone>,
    pub bullish_propulsion_blocks: Vec<BlockZone>,
    pub bearish_propulsion_blocks: Vec<BlockZone>,
    pub bullish_rejection_blocks: Vec<BlockZone>,
    pub bearish_rejection_blocks: Vec<BlockZone>,
    pub bullish_mitigation_blocks: Vec<BlockZone>,
    pub bearish_mitigation_blocks: Vec<BlockZone>,
}

impl StructureIndicators {
    pub fn is_empty(&self) -> bool {
        self.collection_sizes().iter().all(|(_, len)| *len == 0)
    }

    /// Name and length of every collection, in output order.
    pub fn collection_sizes(&self) -> [(&'static str, usize); 14] {
        [
            ("swingHighs", self.swing_highs.len()),
            ("swingLows", self.swing_lows.len()),
            ("bullishBreakers", self.bullish_breakers.len()),
            ("bearishBreakers", self.bearish_breakers.len()),
            ("bullishFVGs", self.bullish_fvgs.len()),
            ("bearishFVGs", self.bearish_fvgs.len()),
            ("bullishOrderBlocks", self.bullish_order_blocks.len()),
            ("bearishOrderBlocks", self.bearish_order_blocks.len()),
            ("bullishPropulsionBlocks", self.bullish_propulsion_blocks.len()),
            ("bearishPropulsionBlocks", self.bearish_propulsion_blocks.len()),
            ("bullishRejectionBlocks", self.bullish_rejection_blocks.len()),
            ("bearishRejectionBlocks", self.bearish_rejection_blocks.len()),
            ("bullishMitigationBlocks", self.bullish_mitigation_blocks.len()),
            ("bearishMitigationBlocks", self.bearish_mitigation_blocks.len()),
        ]
    }

    /// Sorts every collection ascending by timestamp. Stable, so equal
    /// timestamps keep discovery order.
    pub fn sort_by_timestamp(&mut self) {
        self.swing_highs.sort_by_key(|z| z.timestamp);
        self.swing_lows.sort_by_key(|z| z.timestamp);
        self.bullish_breakers.sort_by_key(|z| z.timestamp);
        self.bearish_breakers.sort_by_key(|z| z.timestamp);
        self.bullish_fvgs.sort_by_key(|z| z.timestamp);
        self.bearish_fvgs.sort_by_key(|z| z.timestamp);
        for blocks in [
            &mut self.bullish_order_blocks,
            &mut self.bearish_order_blocks,
            &mut self.bullish_propulsion_blocks,
            &mut self.bearish_propulsion_blocks,
            &mut self.bullish_rejection_blocks,
            &mut self.bearish_rejection_blocks,
            &mut self.bullish_mitigation_blocks,
            &mut self.bearish_mitigation_blocks,
        ] {
            blocks.sort_by_key(|z| z.timestamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_wicks_and_body() {
        let candle = CandleData::new(0, 100.0, 103.0, 96.0, 101.0);
        assert_eq!(candle.body_size(), 1.0);
        assert_eq!(candle.body_high(), 101.0);
        assert_eq!(candle.body_low(), 100.0);
        assert_eq!(candle.upper_wick(), 2.0);
        assert_eq!(candle.lower_wick(), 4.0);
        assert!(candle.is_up());
        assert!(!candle.is_down());
    }

    #[test]
    fn test_indicators_serialize_with_report_field_names() {
        let mut indicators = StructureIndicators::default();
        indicators.bullish_fvgs.push(FairValueGap {
            timestamp: 1,
            high: 2.0,
            low: 1.0,
            status: GapStatus::PartiallyActive,
        });
        indicators.bearish_order_blocks.push(BlockZone {
            timestamp: 2,
            price: 1.5,
            is_active: false,
        });

        let value = serde_json::to_value(&indicators).unwrap();
        assert_eq!(value["bullishFVGs"][0]["status"], "partially_active");
        assert_eq!(value["bearishOrderBlocks"][0]["isActive"], false);
        assert!(value.get("swingHighs").is_some());
        assert!(value.get("bearishMitigationBlocks").is_some());
    }

    #[test]
    fn test_candle_accepts_provider_volume_aliases() {
        let candle: CandleData = serde_json::from_str(
            r#"{"timestamp":1,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volumefrom":3.0,"volumeto":4.0}"#,
        )
        .unwrap();
        assert_eq!(candle.volume_base, 3.0);
        assert_eq!(candle.volume_quote, 4.0);
    }
}
