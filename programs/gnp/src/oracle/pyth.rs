//! Pyth oracle adapter.
//!
//! The price account must quote the token directly in the reference asset
//! (price of one whole token, `price * 10^expo` whole reference units).

use anchor_lang::prelude::*;
use pyth_sdk_solana::state::{load_price_account, PriceStatus};
use pyth_sdk_solana::Price;

use super::{OracleSettings, PriceOracle};
use crate::constants::BPS_PRECISION;
use crate::error::GnpError;
use crate::math::{mul_div_down, value_at_exponent_price};
use crate::state::OracleEntry;

/// Oracle adapter over one freshness-checked Pyth price
#[derive(Debug)]
pub struct PythOracle {
  token: Pubkey,
  token_decimals: u8,
  reference_decimals: u8,
  max_confidence_bps: u64,
  price: Price,
}

impl PythOracle {
  pub fn new(
    token: Pubkey,
    token_decimals: u8,
    reference_decimals: u8,
    max_confidence_bps: u64,
    price: Price,
  ) -> Self {
    Self {
      token,
      token_decimals,
      reference_decimals,
      max_confidence_bps,
      price,
    }
  }

  /// Read the aggregate price from a Pyth price account and reject it when
  /// it is not trading or older than the configured maximum age
  pub fn load(info: &AccountInfo, entry: &OracleEntry, settings: &OracleSettings) -> Result<Self> {
    let data = info.try_borrow_data()?;
    let account = load_price_account::<32, ()>(&data[..])
      .map_err(|_| GnpError::InvalidOracleAccount)?;

    require!(account.agg.status == PriceStatus::Trading, GnpError::OracleUnavailable);

    let price = Price {
      price: account.agg.price,
      conf: account.agg.conf,
      expo: account.expo,
      publish_time: account.timestamp,
    };
    check_freshness(&price, settings.now, settings.max_price_age_secs)?;

    Ok(Self::new(
      entry.token,
      entry.token_decimals,
      settings.reference_decimals,
      settings.max_confidence_bps,
      price,
    ))
  }
}

/// Reject prices published more than `max_age_secs` before `now`
pub fn check_freshness(price: &Price, now: i64, max_age_secs: u64) -> Result<()> {
  let age = now.saturating_sub(price.publish_time);
  let max_age = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
  require!(age <= max_age, GnpError::StalePrice);
  Ok(())
}

/// Reject non-positive prices and confidence intervals wider than
/// `max_confidence_bps` of the price
pub fn check_quality(price: &Price, max_confidence_bps: u64) -> Result<()> {
  require!(price.price > 0, GnpError::InvalidPrice);

  let max_conf = mul_div_down(price.price as u64, max_confidence_bps, BPS_PRECISION)
    .ok_or(GnpError::MathOverflow)?;
  require!(price.conf <= max_conf, GnpError::ConfidenceTooWide);
  Ok(())
}

impl PriceOracle for PythOracle {
  fn consult(&self, token: &Pubkey, amount: u64, _reference: &Pubkey) -> Result<u64> {
    require_keys_eq!(*token, self.token, GnpError::OracleTokenMismatch);
    check_quality(&self.price, self.max_confidence_bps)?;

    let value = value_at_exponent_price(
      amount,
      self.price.price,
      self.price.expo,
      self.token_decimals,
      self.reference_decimals,
    )
    .ok_or(GnpError::MathOverflow)?;
    Ok(value)
  }
}
