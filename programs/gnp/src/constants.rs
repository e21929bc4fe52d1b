//! Protocol-wide constants
//! Centralized location for all configuration values

use anchor_lang::prelude::*;

// NATIVE CURRENCY
/// Token address used for purchases paid in the native currency.
/// The native currency is the canonical unit, so it never has an oracle.
pub const NATIVE_TOKEN: Pubkey = Pubkey::new_from_array([0u8; 32]);
pub const NATIVE_DECIMALS: u8 = 9;              // lamports

// PRECISION CONSTANTS
pub const BPS_PRECISION: u64 = 10_000;          // 100% = 10000 bps
pub const MAX_TOKEN_DECIMALS: u8 = 19;          // 10^19 still fits in u64

// ORACLE DEFAULTS
pub const DEFAULT_MAX_PRICE_AGE_SECS: u64 = 3_600;   // 1 hour
pub const DEFAULT_MAX_CONFIDENCE_BPS: u64 = 200;     // 2%

// TWAP FEEDS
pub const TWAP_CAPACITY: usize = 24;
pub const MIN_TWAP_WINDOW_SECS: i64 = 60;            // 1 minute
pub const MAX_TWAP_WINDOW_SECS: i64 = 604_800;       // 7 days

