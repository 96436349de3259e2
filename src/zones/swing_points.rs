// src/zones/swing_points.rs
// Swing extrema over a 3-candle window and the untapped subset of them.

use crate::types::{CandleData, UntappedExtreme};
use crate::zones::direction::Direction;

/// A local extreme. `index` is the position in the analyzed candle slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPoint {
    pub timestamp: i64,
    pub price: f64,
    pub index: usize,
}

/// Swing highs and lows of one run, each ordered by index.
#[derive(Debug, Clone, Default)]
pub struct SwingPoints {
    pub highs: Vec<SwingPoint>,
    pub lows: Vec<SwingPoint>,
}

impl SwingPoints {
    /// Compares every interior candle with its immediate neighbours only.
    /// Equal neighbours never form a swing.
    pub fn locate(candles: &[CandleData]) -> Self {
        let mut swings = SwingPoints::default();
        if candles.len() < 3 {
            return swings;
        }

        for (offset, window) in candles.windows(3).enumerate() {
            let index = offset + 1;
            let (prev, current, next) = (&window[0], &window[1], &window[2]);

            if current.high > prev.high && current.high > next.high {
                swings.highs.push(SwingPoint {
                    timestamp: current.timestamp,
                    price: current.high,
                    index,
                });
            }

            if current.low < prev.low && current.low < next.low {
                swings.lows.push(SwingPoint {
                    timestamp: current.timestamp,
                    price: current.low,
                    index,
                });
            }
        }

        swings
    }

    /// Highs for `Up`, lows for `Down`.
    pub fn toward(&self, direction: Direction) -> &[SwingPoint] {
        match direction {
            Direction::Up => &self.highs,
            Direction::Down => &self.lows,
        }
    }

    /// Swings on the `direction` side that later price never reached and that
    /// still sit beyond the last close.
    pub fn untapped(&self, candles: &[CandleData], direction: Direction) -> Vec<UntappedExtreme> {
        let latest_close = match candles.last() {
            Some(candle) => candle.close,
            None => return Vec::new(),
        };

        let mut untapped: Vec<UntappedExtreme> = self
            .toward(direction)
            .iter()
            .filter(|swing| {
                let tapped = candles[swing.index + 1..]
                    .iter()
                    .any(|c| direction.reaches(direction.extreme(c), swing.price));
                !tapped && direction.beyond(swing.price, latest_close)
            })
            .map(|swing| UntappedExtreme {
                timestamp: swing.timestamp,
                price: swing.price,
            })
            .collect();

        untapped.sort_by_key(|z| z.timestamp);
        untapped
    }
}

/// First swing (by index) strictly between two candle positions.
pub fn first_between(swings: &[SwingPoint], after: usize, before: usize) -> Option<&SwingPoint> {
    swings
        .iter()
        .find(|swing| swing.index > after && swing.index < before)
}
