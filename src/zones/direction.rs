// src/zones/direction.rs
// One direction flag drives the mirrored bullish/bearish rules of every detector.

use crate::types::CandleData;
use serde::{Deserialize, Serialize};

/// `Up` is the bullish side, `Down` the bearish side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "bullish",
            Direction::Down => "bearish",
        }
    }

    /// Strictly further in this direction: `a > b` going up, `a < b` going down.
    pub fn beyond(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Up => a > b,
            Direction::Down => a < b,
        }
    }

    /// `beyond` or equal.
    pub fn reaches(self, a: f64, b: f64) -> bool {
        a == b || self.beyond(a, b)
    }

    /// The more extreme of two prices in this direction.
    pub fn furthest(self, a: f64, b: f64) -> f64 {
        match self {
            Direction::Up => a.max(b),
            Direction::Down => a.min(b),
        }
    }

    /// Starting value for folding with `furthest`.
    pub fn fold_start(self) -> f64 {
        match self {
            Direction::Up => f64::NEG_INFINITY,
            Direction::Down => f64::INFINITY,
        }
    }

    /// High going up, low going down.
    pub fn extreme(self, candle: &CandleData) -> f64 {
        match self {
            Direction::Up => candle.high,
            Direction::Down => candle.low,
        }
    }

    /// The body edge facing this direction.
    pub fn body_edge(self, candle: &CandleData) -> f64 {
        match self {
            Direction::Up => candle.body_high(),
            Direction::Down => candle.body_low(),
        }
    }

    /// Wick on this side of the body.
    pub fn wick(self, candle: &CandleData) -> f64 {
        match self {
            Direction::Up => candle.upper_wick(),
            Direction::Down => candle.lower_wick(),
        }
    }

    /// A candle that closed in this direction. Dojis move nowhere.
    pub fn moved(self, candle: &CandleData) -> bool {
        match self {
            Direction::Up => candle.is_up(),
            Direction::Down => candle.is_down(),
        }
    }
}
