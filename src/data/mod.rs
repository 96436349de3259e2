// src/data/mod.rs
pub mod candle_loader;

pub use candle_loader::{check_spacing, load_candles, read_candles, validate_order, CandleFormat};
