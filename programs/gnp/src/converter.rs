//! Value conversion into the canonical reference asset
//!
//! - native currency is already canonical: value = raw amount
//! - token without an oracle: value = 0 (policy, not an error)
//! - token with an oracle: value = oracle.consult(token, amount, reference)
//!
//! Oracle failures propagate; they are never folded into a zero value.

use anchor_lang::prelude::*;

use crate::constants::NATIVE_TOKEN;
use crate::oracle::OracleResolver;

pub fn is_native(token: &Pubkey) -> bool {
  *token == NATIVE_TOKEN
}

/// Convert `raw_amount` of `token` into canonical base units.
///
/// # Arguments
/// * `resolver` - Registry lookup for the token's oracle
/// * `token` - Token paid with (zero address for native currency)
/// * `raw_amount` - Amount in the token's base units
/// * `reference_asset` - Canonical asset passed to the oracle as quote
pub fn convert<R: OracleResolver + ?Sized>(
  resolver: &R,
  token: &Pubkey,
  raw_amount: u64,
  reference_asset: &Pubkey,
) -> Result<u64> {
  if is_native(token) {
    return Ok(raw_amount);
  }

  match resolver.resolve(token)? {
    None => {
      msg!("No oracle for token {}: counted as zero value", token);
      Ok(0)
    }
    Some(oracle) => oracle.consult(token, raw_amount, reference_asset),
  }
}
