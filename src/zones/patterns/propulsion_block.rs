// src/zones/patterns/propulsion_block.rs
use crate::types::BlockZone;
use crate::zones::direction::Direction;
use crate::zones::patterns::{block_zone, DetectionContext, PatternRecognizer};

/// Candles retesting an order block that was already found in this run.
/// Proximity to the block price is the whole test, there is no validation
/// step.
pub struct PropulsionBlockRecognizer;

impl PatternRecognizer for PropulsionBlockRecognizer {
    type Zone = BlockZone;

    fn name(&self) -> &'static str {
        "propulsion_block"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<BlockZone> {
        let candles = ctx.candles;
        let side = direction.opposite();
        let order_blocks = ctx.order_blocks(direction);
        if order_blocks.is_empty() {
            return Vec::new();
        }

        candles
            .iter()
            .enumerate()
            .filter(|(_, candle)| side.moved(candle) && ctx.config.has_body(candle))
            .filter(|(_, candle)| {
                let wick_extreme = side.extreme(candle);
                order_blocks
                    .iter()
                    .any(|block| ctx.config.is_near(wick_extreme, block.price))
            })
            .map(|(i, candle)| {
                let midpoint = candle.body_midpoint();
                block_zone(candles, i, candle.timestamp, midpoint, side, midpoint)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::zones::patterns::test_support::candles;
    use crate::zones::swing_points::SwingPoints;

    #[test]
    fn test_down_candle_near_bullish_order_block() {
        let data = candles(&[
            (101.0, 101.5, 100.0, 100.2),
            (100.5, 101.0, 99.25, 99.5),
            (99.8, 100.5, 99.5, 100.4),
        ]);
        let swings = SwingPoints::locate(&data);
        let config = DetectorConfig::default();
        let order_blocks = vec![BlockZone { timestamp: -60_000, price: 99.0, is_active: true }];
        let ctx = DetectionContext::new(&data, &swings, &config).with_order_blocks(&order_blocks, &[]);

        let blocks = PropulsionBlockRecognizer.detect(&ctx, Direction::Up);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].timestamp, data[1].timestamp);
        assert_eq!(blocks[0].price, 100.0);
        assert!(blocks[0].is_active);
        assert!(PropulsionBlockRecognizer.detect(&ctx, Direction::Down).is_empty());
    }

    #[test]
    fn test_up_candle_near_bearish_order_block() {
        let data = candles(&[
            (99.0, 99.2, 98.5, 98.8),
            (99.5, 100.75, 99.0, 100.5),
            (100.2, 100.4, 99.4, 99.6),
        ]);
        let swings = SwingPoints::locate(&data);
        let config = DetectorConfig::default();
        let order_blocks = vec![BlockZone { timestamp: -60_000, price: 101.0, is_active: true }];
        let ctx = DetectionContext::new(&data, &swings, &config).with_order_blocks(&[], &order_blocks);

        let blocks = PropulsionBlockRecognizer.detect(&ctx, Direction::Down);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].timestamp, data[1].timestamp);
        assert_eq!(blocks[0].price, 100.0);
        assert!(blocks[0].is_active);
        assert!(PropulsionBlockRecognizer.detect(&ctx, Direction::Up).is_empty());
    }

    #[test]
    fn test_no_order_blocks_means_no_propulsion() {
        let data = candles(&[
            (101.0, 101.5, 100.0, 100.2),
            (100.5, 101.0, 99.25, 99.5),
            (99.8, 100.5, 99.5, 100.4),
        ]);
        let swings = SwingPoints::locate(&data);
        let config = DetectorConfig::default();
        let ctx = DetectionContext::new(&data, &swings, &config);
        assert!(PropulsionBlockRecognizer.detect(&ctx, Direction::Up).is_empty());
    }
}
