//! State accounts for the GNP ledger
//! These accounts hold the running total, the oracle registry and lock bookkeeping

use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_MAX_CONFIDENCE_BPS, DEFAULT_MAX_PRICE_AGE_SECS, TWAP_CAPACITY};
use crate::error::GnpError;

/// Global ledger state - the single source of truth for Gross Network Product
/// This account is a singleton (only one exists per protocol deployment)
///
/// `gross_network_product` is private: it only moves through [`GnpState::accumulate`]

#[account]
#[derive(Debug)]
pub struct GnpState {
  /// Protocol owner (admin of the oracle registry and lock registry)
  pub owner: Pubkey,

  /// Canonical reference asset (wrapped native mint) every value is quoted in
  pub reference_asset: Pubkey,

  pub reference_decimals: u8,

  gross_network_product: u128,

  purchase_count: u64,

  /// Oldest oracle price accepted, in seconds
  pub max_price_age_secs: u64,

  /// Widest oracle confidence interval accepted, relative to price
  pub max_confidence_bps: u64,

  pub bump: u8,

  pub _reserved: [u64; 8],
}

impl GnpState {
  pub const LEN: usize = 8 + // discriminator
    32 + // owner
    32 + // reference_asset
    1 + // reference_decimals
    16 + // gross_network_product
    8 + // purchase_count
    8 + // max_price_age_secs
    8 + // max_confidence_bps
    1 + // bump
    64; // _reserved

  pub fn new(owner: Pubkey, reference_asset: Pubkey, reference_decimals: u8, bump: u8) -> Self {
    Self {
      owner,
      reference_asset,
      reference_decimals,
      gross_network_product: 0,
      purchase_count: 0,
      max_price_age_secs: DEFAULT_MAX_PRICE_AGE_SECS,
      max_confidence_bps: DEFAULT_MAX_CONFIDENCE_BPS,
      bump,
      _reserved: [0; 8],
    }
  }

  pub fn gross_network_product(&self) -> u128 {
    self.gross_network_product
  }

  pub fn purchase_count(&self) -> u64 {
    self.purchase_count
  }

  /// Add one purchase's converted value to the running total.
  /// Overflow fails the purchase; nothing is written in that case.
  ///
  /// # Returns
  /// The new running total
  pub fn accumulate(&mut self, converted_value: u64) -> Result<u128> {
    let new_total = self
      .gross_network_product
      .checked_add(converted_value as u128)
      .ok_or(GnpError::MathOverflow)?;

    self.gross_network_product = new_total;
    self.purchase_count = self.purchase_count.saturating_add(1);
    Ok(new_total)
  }
}

#[cfg(test)]
impl GnpState {
  /// Ledger that already holds `total`
  pub(crate) fn with_total(mut self, total: u128) -> Self {
    self.gross_network_product = total;
    self
  }
}

/// Which adapter prices a token
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleKind {
  /// Program-owned [`TwapFeed`] account
  Twap,
  /// Pyth price account quoting the token in the reference asset
  Pyth,
}

/// Registry entry - one per token, seeded by the token address
#[account]
#[derive(Debug)]
pub struct OracleEntry {
  pub token: Pubkey,

  /// Zero address means the entry has been cleared
  pub oracle: Pubkey,

  pub kind: OracleKind,

  pub token_decimals: u8,

  pub bump: u8,
}

impl OracleEntry {
  pub const LEN: usize = 8 + // discriminator
    32 + // token
    32 + // oracle
    1 + // kind
    1 + // token_decimals
    1; // bump

  /// The oracle address, unless the entry was cleared
  pub fn configured_oracle(&self) -> Option<Pubkey> {
    (self.oracle != Pubkey::default()).then_some(self.oracle)
  }
}

/// Lock registered with the ledger - only registered locks record purchases
#[account]
#[derive(Debug)]
pub struct LockRecord {
  pub lock: Pubkey,

  /// Sum of the converted values of this lock's purchases
  pub total_sales: u128,

  pub purchase_count: u64,

  pub bump: u8,
}

impl LockRecord {
  pub const LEN: usize = 8 + // discriminator
    32 + // lock
    16 + // total_sales
    8 + // purchase_count
    1; // bump

  pub fn new(lock: Pubkey, bump: u8) -> Self {
    Self {
      lock,
      total_sales: 0,
      purchase_count: 0,
      bump,
    }
  }

  /// Totals after one more sale, without writing them
  pub fn preview_sale(&self, converted_value: u64) -> Result<(u128, u64)> {
    let total_sales = self
      .total_sales
      .checked_add(converted_value as u128)
      .ok_or(GnpError::MathOverflow)?;
    Ok((total_sales, self.purchase_count.saturating_add(1)))
  }
}

/// One price sample of a TWAP feed
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriceObservation {
  pub timestamp: i64,
  /// Canonical base units per one whole token
  pub price: u64,
}

/// Price feed consumed by the TWAP oracle adapter
/// Observations live in a fixed ring buffer, oldest entries are overwritten
#[account]
#[derive(Debug)]
pub struct TwapFeed {
  pub token_mint: Pubkey,

  pub token_decimals: u8,

  /// Asset the prices are quoted in (the ledger's reference asset)
  pub quote_mint: Pubkey,

  /// Only this key may push observations
  pub updater: Pubkey,

  pub window_secs: i64,

  pub observations: [PriceObservation; TWAP_CAPACITY],

  /// Next slot to write
  pub head: u8,

  pub len: u8,

  pub bump: u8,
}

impl TwapFeed {
  pub const LEN: usize = 8 + // discriminator
    32 + // token_mint
    1 + // token_decimals
    32 + // quote_mint
    32 + // updater
    8 + // window_secs
    16 * TWAP_CAPACITY + // observations
    1 + // head
    1 + // len
    1; // bump

  pub fn new(
    token_mint: Pubkey,
    token_decimals: u8,
    quote_mint: Pubkey,
    updater: Pubkey,
    window_secs: i64,
    bump: u8,
  ) -> Self {
    Self {
      token_mint,
      token_decimals,
      quote_mint,
      updater,
      window_secs,
      observations: [PriceObservation::default(); TWAP_CAPACITY],
      head: 0,
      len: 0,
      bump,
    }
  }

  pub fn latest(&self) -> Option<PriceObservation> {
    if self.len == 0 {
      return None;
    }
    let idx = (self.head as usize + TWAP_CAPACITY - 1) % TWAP_CAPACITY;
    Some(self.observations[idx])
  }

  /// Observations from oldest to newest
  pub fn ordered_observations(&self) -> Vec<PriceObservation> {
    let len = self.len as usize;
    let start = (self.head as usize + TWAP_CAPACITY - len) % TWAP_CAPACITY;
    (0..len)
      .map(|i| self.observations[(start + i) % TWAP_CAPACITY])
      .collect()
  }

  /// Append a sample. Timestamps must strictly increase and prices be non-zero.
  pub fn record(&mut self, timestamp: i64, price: u64) -> Result<()> {
    require!(price > 0, GnpError::InvalidPrice);
    if let Some(last) = self.latest() {
      require!(timestamp > last.timestamp, GnpError::NonMonotonicTimestamp);
    }

    self.observations[self.head as usize] = PriceObservation { timestamp, price };
    self.head = ((self.head as usize + 1) % TWAP_CAPACITY) as u8;
    if (self.len as usize) < TWAP_CAPACITY {
      self.len += 1;
    }
    Ok(())
  }
}

/// Outcome of one purchase, returned to the calling lock
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseRecord {
  pub token: Pubkey,
  pub raw_amount: u64,
  pub lock: Pubkey,
  pub converted_value: u64,
  pub running_total_after: u128,
}

pub const GNP_STATE_SEED: &[u8] = b"gnp_state";

pub const ORACLE_ENTRY_SEED: &[u8] = b"oracle_entry";

pub const LOCK_RECORD_SEED: &[u8] = b"lock_record";

pub const TWAP_FEED_SEED: &[u8] = b"twap_feed";
