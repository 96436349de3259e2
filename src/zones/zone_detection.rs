// src/zones/zone_detection.rs
// Runs every recognizer over one candle sequence and assembles the sorted result.

use crate::config::DetectorConfig;
use crate::errors::DetectorError;
use crate::types::{CandleData, StructureIndicators};
use crate::zones::direction::Direction;
use crate::zones::patterns::{
    BreakerRecognizer, DetectionContext, FairValueGapRecognizer, MitigationBlockRecognizer,
    OrderBlockRecognizer, PatternRecognizer, PropulsionBlockRecognizer, RejectionBlockRecognizer,
};
use crate::zones::swing_points::SwingPoints;
use log::debug;

// ==================== CORE STRUCTURE ENGINE ====================
#[derive(Debug, Clone, Default)]
pub struct MarketStructureEngine {
    config: DetectorConfig,
}

impl MarketStructureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Analyze a candle sequence, returning all-empty collections when it is
    /// too short to hold a pattern.
    pub fn analyze(&self, candles: &[CandleData]) -> StructureIndicators {
        match self.detect(candles) {
            Ok(indicators) => indicators,
            Err(e) => {
                debug!("[StructureEngine] {}; returning empty indicators", e);
                StructureIndicators::default()
            }
        }
    }

    /// Same as [`analyze`](Self::analyze) but reports a too-short sequence as an error.
    pub fn detect(&self, candles: &[CandleData]) -> Result<StructureIndicators, DetectorError> {
        let required = self.config.min_candles.max(3);
        if candles.len() < required {
            return Err(DetectorError::InsufficientCandles {
                required,
                actual: candles.len(),
            });
        }

        debug!("[StructureEngine] Detecting structure in {} candles", candles.len());

        let swings = SwingPoints::locate(candles);
        debug!(
            "[StructureEngine] {} swing highs, {} swing lows",
            swings.highs.len(),
            swings.lows.len()
        );

        let ctx = DetectionContext::new(candles, &swings, &self.config);

        // Propulsion blocks read the order blocks, so they run first.
        let bullish_order_blocks = run(&OrderBlockRecognizer, &ctx, Direction::Up);
        let bearish_order_blocks = run(&OrderBlockRecognizer, &ctx, Direction::Down);
        let ctx = ctx.with_order_blocks(&bullish_order_blocks, &bearish_order_blocks);

        let mut indicators = StructureIndicators {
            swing_highs: swings.untapped(candles, Direction::Up),
            swing_lows: swings.untapped(candles, Direction::Down),
            bullish_breakers: run(&BreakerRecognizer, &ctx, Direction::Up),
            bearish_breakers: run(&BreakerRecognizer, &ctx, Direction::Down),
            bullish_fvgs: run(&FairValueGapRecognizer, &ctx, Direction::Up),
            bearish_fvgs: run(&FairValueGapRecognizer, &ctx, Direction::Down),
            bullish_order_blocks: Vec::new(),
            bearish_order_blocks: Vec::new(),
            bullish_propulsion_blocks: run(&PropulsionBlockRecognizer, &ctx, Direction::Up),
            bearish_propulsion_blocks: run(&PropulsionBlockRecognizer, &ctx, Direction::Down),
            bullish_rejection_blocks: run(&RejectionBlockRecognizer, &ctx, Direction::Up),
            bearish_rejection_blocks: run(&RejectionBlockRecognizer, &ctx, Direction::Down),
            bullish_mitigation_blocks: run(&MitigationBlockRecognizer, &ctx, Direction::Up),
            bearish_mitigation_blocks: run(&MitigationBlockRecognizer, &ctx, Direction::Down),
        };
        indicators.bullish_order_blocks = bullish_order_blocks;
        indicators.bearish_order_blocks = bearish_order_blocks;

        indicators.sort_by_timestamp();
        debug!(
            "[StructureEngine] {} untapped swing highs, {} untapped swing lows",
            indicators.swing_highs.len(),
            indicators.swing_lows.len()
        );

        Ok(indicators)
    }

    /// Analyze several independent sequences. Each entry is processed on its own.
    pub fn detect_batch(&self, sequences: &[Vec<CandleData>]) -> Vec<Result<StructureIndicators, DetectorError>> {
        sequences.iter().map(|candles| self.detect(candles)).collect()
    }
}

fn run<R: PatternRecognizer>(recognizer: &R, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<R::Zone> {
    let zones = recognizer.detect(ctx, direction);
    if !zones.is_empty() {
        debug!(
            "[StructureEngine] {} {}: {}",
            direction.label(),
            recognizer.name(),
            zones.len()
        );
    }
    zones
}
