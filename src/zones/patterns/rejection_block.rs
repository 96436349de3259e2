// src/zones/patterns/rejection_block.rs
use crate::config::DetectorConfig;
use crate::types::{BlockZone, CandleData};
use crate::zones::direction::Direction;
use crate::zones::patterns::{block_zone, DetectionContext, PatternRecognizer};

/// Rejection blocks: a run of long-wick candles ending at a swing.
///
/// For a bullish block the cluster is built from the swing low backwards.
/// Every member needs a lower wick at least as long as its body and at
/// least `min_wick_ratio` of its open. The block is confirmed when, within
/// `rejection_window` candles after the swing, a candle trades below the
/// cluster's lowest body edge and closes back above it.
pub struct RejectionBlockRecognizer;

/// Price levels of one wick cluster, seen from the rejected side.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ClusterLevels {
    /// Furthest wick into the rejected side
    wick_extreme: f64,
    /// Furthest body edge away from the rejected side; the block price
    far_body_edge: f64,
    /// Furthest body edge into the rejected side; the level to be swept
    near_body_edge: f64,
}

impl RejectionBlockRecognizer {
    fn has_rejection_wick(config: &DetectorConfig, candle: &CandleData, side: Direction) -> bool {
        let wick = side.wick(candle);
        wick >= candle.body_size() && wick / candle.open >= config.min_wick_ratio
    }

    /// Swing candle first (when it qualifies), then preceding candles until
    /// one fails or the cluster is full.
    fn build_cluster<'c>(
        config: &DetectorConfig,
        candles: &'c [CandleData],
        swing_idx: usize,
        side: Direction,
    ) -> Vec<&'c CandleData> {
        let mut cluster = Vec::with_capacity(config.max_cluster_size);
        if cluster.len() < config.max_cluster_size
            && Self::has_rejection_wick(config, &candles[swing_idx], side)
        {
            cluster.push(&candles[swing_idx]);
        }

        let mut j = swing_idx;
        while j > 0 && cluster.len() < config.max_cluster_size {
            let prev = &candles[j - 1];
            if !Self::has_rejection_wick(config, prev, side) {
                break;
            }
            cluster.push(prev);
            j -= 1;
        }

        cluster
    }

    fn cluster_levels(cluster: &[&CandleData], side: Direction) -> ClusterLevels {
        let away = side.opposite();
        cluster.iter().fold(
            ClusterLevels {
                wick_extreme: side.fold_start(),
                far_body_edge: away.fold_start(),
                near_body_edge: side.fold_start(),
            },
            |levels, c| ClusterLevels {
                wick_extreme: side.furthest(levels.wick_extreme, side.extreme(c)),
                far_body_edge: away.furthest(levels.far_body_edge, away.body_edge(c)),
                near_body_edge: side.furthest(levels.near_body_edge, side.body_edge(c)),
            },
        )
    }

    /// A candle that pierces `level` toward the rejected side and closes back.
    fn confirmation_within(
        candles: &[CandleData],
        swing_idx: usize,
        window: usize,
        side: Direction,
        level: f64,
    ) -> Option<usize> {
        let end = (swing_idx + window).min(candles.len().saturating_sub(1));
        (swing_idx + 1..=end).find(|&j| {
            let c = &candles[j];
            side.beyond(side.extreme(c), level) && side.opposite().beyond(c.close, level)
        })
    }
}

impl PatternRecognizer for RejectionBlockRecognizer {
    type Zone = BlockZone;

    fn name(&self) -> &'static str {
        "rejection_block"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<BlockZone> {
        let candles = ctx.candles;
        let config = ctx.config;
        // Bullish rejections happen at lows, bearish at highs.
        let side = direction.opposite();
        let mut blocks = Vec::new();

        for swing in ctx.swings.toward(side) {
            let cluster = Self::build_cluster(config, candles, swing.index, side);
            if cluster.len() < config.min_cluster_size {
                continue;
            }

            let levels = Self::cluster_levels(&cluster, side);
            if Self::confirmation_within(candles, swing.index, config.rejection_window, side, levels.near_body_edge)
                .is_none()
            {
                continue;
            }

            blocks.push(block_zone(
                candles,
                swing.index,
                swing.timestamp,
                levels.far_body_edge,
                side,
                levels.wick_extreme,
            ));
        }

        blocks
    }
}
