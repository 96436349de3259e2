// src/zones/patterns/mod.rs
use crate::config::DetectorConfig;
use crate::types::{BlockZone, CandleData};
use crate::zones::direction::Direction;
use crate::zones::swing_points::SwingPoints;

/// Everything a recognizer may look at. Built once per run by the engine;
/// order blocks are attached after their own stage has run.
pub struct DetectionContext<'a> {
    pub candles: &'a [CandleData],
    pub swings: &'a SwingPoints,
    pub config: &'a DetectorConfig,
    pub bullish_order_blocks: &'a [BlockZone],
    pub bearish_order_blocks: &'a [BlockZone],
}

impl<'a> DetectionContext<'a> {
    pub fn new(candles: &'a [CandleData], swings: &'a SwingPoints, config: &'a DetectorConfig) -> Self {
        Self {
            candles,
            swings,
            config,
            bullish_order_blocks: &[],
            bearish_order_blocks: &[],
        }
    }

    pub fn with_order_blocks(mut self, bullish: &'a [BlockZone], bearish: &'a [BlockZone]) -> Self {
        self.bullish_order_blocks = bullish;
        self.bearish_order_blocks = bearish;
        self
    }

    pub fn order_blocks(&self, direction: Direction) -> &'a [BlockZone] {
        match direction {
            Direction::Up => self.bullish_order_blocks,
            Direction::Down => self.bearish_order_blocks,
        }
    }
}

// Trait for pattern recognizers
pub trait PatternRecognizer {
    type Zone;

    fn name(&self) -> &'static str;

    /// Zones on one side. Order follows discovery; the engine sorts.
    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<Self::Zone>;
}

// Declare submodules
mod breaker;
mod fair_value_gap;
mod mitigation_block;
mod order_block;
mod propulsion_block;
mod rejection_block;

// Export recognizers
pub use breaker::BreakerRecognizer;
pub use fair_value_gap::FairValueGapRecognizer;
pub use mitigation_block::MitigationBlockRecognizer;
pub use order_block::OrderBlockRecognizer;
pub use propulsion_block::PropulsionBlockRecognizer;
pub use rejection_block::RejectionBlockRecognizer;

/// Index of the first candle at or after `from` that closes beyond `level`.
pub(crate) fn first_close_beyond(
    candles: &[CandleData],
    from: usize,
    direction: Direction,
    level: f64,
) -> Option<usize> {
    candles
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, c)| direction.beyond(c.close, level))
        .map(|(idx, _)| idx)
}

/// A block is active until the first later close beyond `invalidation_level`.
pub(crate) fn block_zone(
    candles: &[CandleData],
    origin_idx: usize,
    timestamp: i64,
    price: f64,
    invalidation: Direction,
    invalidation_level: f64,
) -> BlockZone {
    let invalidated_at = first_close_beyond(candles, origin_idx + 1, invalidation, invalidation_level);
    BlockZone {
        timestamp,
        price,
        is_active: invalidated_at.is_none(),
    }
}
