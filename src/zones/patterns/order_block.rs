// src/zones/patterns/order_block.rs
use crate::types::{BlockZone, CandleData};
use crate::zones::direction::Direction;
use crate::zones::patterns::{block_zone, DetectionContext, PatternRecognizer};
use crate::zones::swing_points::SwingPoint;

/// Order blocks: the last opposing candle at a swing before a validated move.
///
/// A bullish block is a down candle whose low is within the proximity ratio
/// of a swing low (or that is the swing low itself), later validated by a
/// high above its own high. It stays active until a later close drops below
/// its body midpoint. Bearish mirrors on up candles and swing highs.
pub struct OrderBlockRecognizer;

impl OrderBlockRecognizer {
    fn near_swing(ctx: &DetectionContext<'_>, swings: &[SwingPoint], candle: &CandleData, idx: usize, side: Direction) -> bool {
        let wick_extreme = side.extreme(candle);
        swings
            .iter()
            .any(|swing| ctx.config.is_near(wick_extreme, swing.price) || swing.index == idx)
    }
}

impl PatternRecognizer for OrderBlockRecognizer {
    type Zone = BlockZone;

    fn name(&self) -> &'static str {
        "order_block"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<BlockZone> {
        let candles = ctx.candles;
        let side = direction.opposite();
        let swings = ctx.swings.toward(side);
        let mut blocks = Vec::new();

        for (i, candle) in candles.iter().enumerate() {
            if !side.moved(candle) || !ctx.config.has_body(candle) {
                continue;
            }

            if !Self::near_swing(ctx, swings, candle, i, side) {
                continue;
            }

            let own_extreme = direction.extreme(candle);
            let validated = candles[i + 1..]
                .iter()
                .any(|c| direction.beyond(direction.extreme(c), own_extreme));
            if !validated {
                continue;
            }

            let midpoint = candle.body_midpoint();
            blocks.push(block_zone(candles, i, candle.timestamp, midpoint, side, midpoint));
        }

        blocks
    }
}
