// src/zones/patterns/breaker.rs
use crate::types::Breaker;
use crate::zones::direction::Direction;
use crate::zones::patterns::{DetectionContext, PatternRecognizer};
use crate::zones::swing_points::first_between;

/// Breaker zones.
///
/// Bullish: two consecutive swing lows where the second is lower, with a
/// swing high between them that a later candle's high breaks. The breaker
/// sits at that intervening swing high. Bearish is the mirror on swing
/// highs making a higher high with a swing low broken to the downside.
pub struct BreakerRecognizer;

impl PatternRecognizer for BreakerRecognizer {
    type Zone = Breaker;

    fn name(&self) -> &'static str {
        "breaker"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, direction: Direction) -> Vec<Breaker> {
        let candles = ctx.candles;
        let anchors = ctx.swings.toward(direction.opposite());
        let pivots = ctx.swings.toward(direction);
        let mut breakers = Vec::new();

        for pair in anchors.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            if !direction.opposite().beyond(current.price, prev.price) {
                continue;
            }

            let pivot = match first_between(pivots, prev.index, current.index) {
                Some(pivot) => pivot,
                None => continue,
            };

            let mss_confirmed = candles[current.index + 1..]
                .iter()
                .any(|c| direction.beyond(direction.extreme(c), pivot.price));

            if mss_confirmed {
                breakers.push(Breaker {
                    timestamp: pivot.timestamp,
                    price: pivot.price,
                });
            }
        }

        breakers
    }
}
