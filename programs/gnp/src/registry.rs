//! Oracle registry - token -> oracle mapping, owner-only writes
//! Last write wins; writing the zero address clears the mapping

use anchor_lang::prelude::*;

use crate::invariants::{assert_not_native, assert_owner, assert_supported_decimals};
use crate::state::{GnpState, OracleEntry, OracleKind};

/// Point `token` at `oracle`. Every check runs before `entry` is touched.
///
/// # Arguments
/// * `state` - Ledger singleton (holds the owner)
/// * `signer` - Key that signed the instruction
/// * `entry` - Registry PDA for `token`, freshly created or existing
/// * `token` - Token being priced (never the native sentinel)
/// * `token_decimals` - Decimals read from the token mint
/// * `oracle` - Oracle account, zero address to clear
/// * `kind` - Adapter that reads `oracle`
/// * `bump` - PDA bump of `entry`
///
/// # Returns
/// The oracle that was configured before this call
#[allow(clippy::too_many_arguments)]
pub fn set_oracle(
  state: &GnpState,
  signer: &Pubkey,
  entry: &mut OracleEntry,
  token: Pubkey,
  token_decimals: u8,
  oracle: Pubkey,
  kind: OracleKind,
  bump: u8,
) -> Result<Option<Pubkey>> {
  assert_owner(&state.owner, signer)?;
  assert_not_native(&token)?;
  assert_supported_decimals(token_decimals)?;

  // A fresh PDA deserializes with a zero token
  let previous = if entry.token == token {
    entry.configured_oracle()
  } else {
    None
  };

  entry.token = token;
  entry.oracle = oracle;
  entry.kind = kind;
  entry.token_decimals = token_decimals;
  entry.bump = bump;

  Ok(previous)
}

/// Pure lookup: the oracle configured for the entry, if any
pub fn get_oracle(entry: Option<&OracleEntry>) -> Option<Pubkey> {
  entry.and_then(OracleEntry::configured_oracle)
}
