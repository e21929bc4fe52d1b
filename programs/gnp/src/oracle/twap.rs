//! TWAP (Time-Weighted Average Price) oracle adapter.
//!
//! Averages the observations of a [`TwapFeed`] over the feed's window ending
//! at the current clock time:
//!
//! ```text
//! TWAP = sum(price_i * duration_i) / window
//! ```
//!
//! where `duration_i` is the part of the window during which observation `i`
//! was the latest one. The newest observation prevails until `now`.

use anchor_lang::prelude::*;

use super::{OracleSettings, PriceOracle};
use crate::error::GnpError;
use crate::math::value_at_unit_price;
use crate::state::{PriceObservation, TwapFeed};

/// Compute the TWAP of `observations` (oldest first) over `[now - window_secs, now]`.
///
/// # Errors
///
/// - `InsufficientPriceHistory` if no observation is at or before the window start
/// - `StalePrice` if the newest observation is older than `max_age_secs`
/// - `NonMonotonicTimestamp` if an observation lies in the future
pub fn compute_twap(
  observations: &[PriceObservation],
  now: i64,
  window_secs: i64,
  max_age_secs: u64,
) -> Result<u64> {
  require!(window_secs > 0, GnpError::InvalidParameter);

  let newest = observations.last().ok_or(GnpError::InsufficientPriceHistory)?;
  require!(newest.timestamp <= now, GnpError::NonMonotonicTimestamp);

  let age = now.checked_sub(newest.timestamp).ok_or(GnpError::MathOverflow)?;
  require!(age as u64 <= max_age_secs, GnpError::StalePrice);

  let start = now.checked_sub(window_secs).ok_or(GnpError::MathOverflow)?;
  require!(
    observations[0].timestamp <= start,
    GnpError::InsufficientPriceHistory
  );

  let mut weighted_sum: u128 = 0;
  for (i, obs) in observations.iter().enumerate() {
    let seg_start = obs.timestamp.max(start);
    let seg_end = observations.get(i + 1).map_or(now, |next| next.timestamp);
    if seg_end <= seg_start {
      continue;
    }

    let duration = (seg_end - seg_start) as u128;
    weighted_sum = weighted_sum
      .checked_add((obs.price as u128).checked_mul(duration).ok_or(GnpError::MathOverflow)?)
      .ok_or(GnpError::MathOverflow)?;
  }

  let twap = weighted_sum / window_secs as u128;
  Ok(u64::try_from(twap).map_err(|_| GnpError::MathOverflow)?)
}

/// Oracle adapter over a snapshot of a [`TwapFeed`] account
#[derive(Debug)]
pub struct TwapOracle {
  feed: TwapFeed,
  now: i64,
  max_age_secs: u64,
}

impl TwapOracle {
  pub fn new(feed: TwapFeed, now: i64, max_age_secs: u64) -> Self {
    Self {
      feed,
      now,
      max_age_secs,
    }
  }

  /// Deserialize a feed account owned by this program
  pub fn load(info: &AccountInfo, settings: &OracleSettings) -> Result<Self> {
    require_keys_eq!(*info.owner, crate::ID, GnpError::InvalidOracleAccount);

    let data = info.try_borrow_data()?;
    let feed = TwapFeed::try_deserialize(&mut &data[..])
      .map_err(|_| GnpError::InvalidOracleAccount)?;
    Ok(Self::new(feed, settings.now, settings.max_price_age_secs))
  }

  /// Average price of one whole token, in canonical base units
  pub fn price(&self) -> Result<u64> {
    compute_twap(
      &self.feed.ordered_observations(),
      self.now,
      self.feed.window_secs,
      self.max_age_secs,
    )
  }
}

impl PriceOracle for TwapOracle {
  fn consult(&self, token: &Pubkey, amount: u64, reference: &Pubkey) -> Result<u64> {
    require_keys_eq!(*token, self.feed.token_mint, GnpError::OracleTokenMismatch);
    require_keys_eq!(*reference, self.feed.quote_mint, GnpError::OracleQuoteMismatch);

    let price = self.price()?;
    let value = value_at_unit_price(amount, price, self.feed.token_decimals)
      .ok_or(GnpError::MathOverflow)?;
    Ok(value)
  }
}
