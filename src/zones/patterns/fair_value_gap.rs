// src/zones/patterns/fair_value_gap.rs
use crate::types::{CandleData, FairValueGap, GapStatus};
use crate::zones::direction::Direction;
use crate::zones::patterns::{DetectionContext, PatternRecognizer};

/// Three-candle fair value gaps.
///
/// `Up` reports gaps where the first candle's low sits above the third
/// candle's high, `Down` the mirror where the first high sits below the
/// third low. The zone is stamped with the middle candle and its status is
/// the best fill any later candle achieved.
pub struct FairValueGapRecognizer;

impl FairValueGapRecognizer {
    /// `(low, high)` of the price band left open between `first` and `third`.
    fn gap_band(direction: Direction, first: &CandleData, third: &CandleData) -> Option<(f64, f64)> {
        let (low, high) = match direction {
            Direction::Up => (third.high, first.low),
            Direction::Down => (first.high, third.low),
        };
        if high > low {
            Some((low, high))
        } else {
            None
        }
    }

    /// Largest share of the band covered by any single candle.
    fn max_fill(later: &[CandleData], low: f64, high: f64) -> f64 {
        let gap_size = high - low;
        later
            .iter()
            .filter(|c| c.high >= low && c.low <= high)
            .map(|c| (c.high.min(high) - c.low.max(low)) / gap_size)
            .fold(0.0, f64::max)
    }
}

impl PatternRecognizer for FairValueGapRecognizer {
    type Zone = FairValueGap;

    fn name(&self) -> &'static str {
        "fair_value_gap"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<FairValueGap> {
        let candles = ctx.candles;
        let config = ctx.config;
        let mut gaps = Vec::new();

        for (i, window) in candles.windows(3).enumerate() {
            let (first, middle, third) = (&window[0], &window[1], &window[2]);

            let (low, high) = match Self::gap_band(direction, first, third) {
                Some(band) => band,
                None => continue,
            };

            if (high - low) / low < config.min_gap_ratio {
                continue;
            }

            let max_filled = Self::max_fill(&candles[i + 3..], low, high);
            let status = if max_filled <= 0.0 {
                GapStatus::Active
            } else if max_filled > config.gap_fill_inactive_ratio {
                GapStatus::Inactive
            } else {
                GapStatus::PartiallyActive
            };

            gaps.push(FairValueGap {
                timestamp: middle.timestamp,
                high,
                low,
                status,
            });
        }

        gaps
    }
}
