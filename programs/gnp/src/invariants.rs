//! Invariant assertions for the GNP ledger
//! Every state-changing instruction calls these before committing

use anchor_lang::prelude::*;

use crate::{
  constants::{BPS_PRECISION, MAX_TOKEN_DECIMALS, MAX_TWAP_WINDOW_SECS, MIN_TWAP_WINDOW_SECS, NATIVE_TOKEN},
  error::GnpError,
};

/// Assert that `signer` is the protocol owner
///
/// # Arguments
/// * `owner` - Owner recorded in GnpState
/// * `signer` - Key that signed the instruction
pub fn assert_owner(owner: &Pubkey, signer: &Pubkey) -> Result<()> {
  require_keys_eq!(*owner, *signer, GnpError::Unauthorized);
  Ok(())
}

/// Assert that `token` is not the native-currency sentinel
pub fn assert_not_native(token: &Pubkey) -> Result<()> {
  require_keys_neq!(*token, NATIVE_TOKEN, GnpError::NativeTokenHasNoOracle);
  Ok(())
}

/// Assert that a token's decimal count can be scaled without overflow
pub fn assert_supported_decimals(decimals: u8) -> Result<()> {
  require!(decimals <= MAX_TOKEN_DECIMALS, GnpError::InvalidDecimals);
  Ok(())
}

pub fn assert_twap_window(window_secs: i64) -> Result<()> {
  require!(
    (MIN_TWAP_WINDOW_SECS..=MAX_TWAP_WINDOW_SECS).contains(&window_secs),
    GnpError::InvalidParameter
  );
  Ok(())
}

pub fn assert_confidence_bound(max_confidence_bps: u64) -> Result<()> {
  require!(
    max_confidence_bps > 0 && max_confidence_bps <= BPS_PRECISION,
    GnpError::InvalidParameter
  );
  Ok(())
}
