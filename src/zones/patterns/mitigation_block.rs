// src/zones/patterns/mitigation_block.rs
use crate::types::{BlockZone, CandleData};
use crate::zones::direction::Direction;
use crate::zones::patterns::{block_zone, DetectionContext, PatternRecognizer};
use crate::zones::swing_points::SwingPoint;

/// Mitigation blocks: the last body candle moving with a structure shift.
///
/// Bearish: a down candle after which, within `mss_window` candles, price
/// trades below a swing low formed before the candle, with no other down
/// body candle in between. The block holds until a later close above the
/// candle's high. Bullish mirrors on up candles and swing highs.
pub struct MitigationBlockRecognizer;

impl MitigationBlockRecognizer {
    /// First candle inside the window breaking any swing formed before `idx`.
    fn find_mss(
        candles: &[CandleData],
        swings: &[SwingPoint],
        idx: usize,
        window: usize,
        direction: Direction,
    ) -> Option<usize> {
        let prior: Vec<&SwingPoint> = swings.iter().filter(|s| s.index < idx).collect();
        if prior.is_empty() {
            return None;
        }

        let end = (idx + window).min(candles.len().saturating_sub(1));
        (idx + 1..=end).find(|&j| {
            let extreme = direction.extreme(&candles[j]);
            prior.iter().any(|swing| direction.beyond(extreme, swing.price))
        })
    }
}

impl PatternRecognizer for MitigationBlockRecognizer {
    type Zone = BlockZone;

    fn name(&self) -> &'static str {
        "mitigation_block"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<BlockZone> {
        let candles = ctx.candles;
        let config = ctx.config;
        let swings = ctx.swings.toward(direction);
        let is_candidate = |c: &CandleData| direction.moved(c) && config.has_body(c);
        let mut blocks = Vec::new();

        for (i, candle) in candles.iter().enumerate() {
            if !is_candidate(candle) {
                continue;
            }

            let mss_idx = match Self::find_mss(candles, swings, i, config.mss_window, direction) {
                Some(idx) => idx,
                None => continue,
            };

            let is_last = !candles[i + 1..mss_idx].iter().any(|c| is_candidate(c));
            if !is_last {
                continue;
            }

            let against = direction.opposite();
            blocks.push(block_zone(
                candles,
                i,
                candle.timestamp,
                candle.body_midpoint(),
                against,
                against.extreme(candle),
            ));
        }

        blocks
    }
}
