// src/zones/mod.rs
pub mod direction;
pub mod patterns;
pub mod swing_points;
pub mod zone_detection;

pub use direction::Direction;
pub use swing_points::{SwingPoint, SwingPoints};
pub use zone_detection::MarketStructureEngine;
