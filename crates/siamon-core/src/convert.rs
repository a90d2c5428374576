//! Conversions from node-native values to gauge values.

use crate::currency::Currency;

/// Hastings per siacoin.
pub const HASTINGS_PER_SIACOIN: f64 = 1e24;

/// One block is mined roughly every ten minutes.
pub const BLOCKS_PER_HOUR: u64 = 6;

/// Target block interval in seconds.
pub const TARGET_BLOCK_SECONDS: f64 = 600.0;

/// Blocks per month (30 days of 144 blocks).
pub const BLOCKS_PER_MONTH: u128 = 30 * 24 * BLOCKS_PER_HOUR as u128;

/// Bytes per terabyte (decimal).
pub const BYTES_PER_TERABYTE: u128 = 1_000_000_000_000;

/// Scales a per-byte-per-block price to a per-terabyte-per-month price.
pub const BLOCK_BYTES_PER_MONTH_TERABYTE: u128 = BLOCKS_PER_MONTH * BYTES_PER_TERABYTE;

pub fn bool_to_gauge(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Converts hastings to siacoins. Precision loss is accepted silently.
pub fn amount_to_display(amount: Currency) -> f64 {
    amount.to_f64() / HASTINGS_PER_SIACOIN
}

/// Converts a window expressed in blocks to whole hours, truncating.
pub fn blocks_to_hours(blocks: u64) -> f64 {
    (blocks / BLOCKS_PER_HOUR) as f64
}

/// Approximate network hashrate from the current difficulty.
///
/// Difficulty is the expected number of hashes per block, so dividing by the
/// target block interval gives hashes per second. Not a measured value.
pub fn hashrate_from_difficulty(difficulty: f64) -> f64 {
    difficulty / TARGET_BLOCK_SECONDS
}
