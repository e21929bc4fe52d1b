//! Price oracle capability and the registry-backed resolver
//!
//! Every adapter implements [`PriceOracle`]; the ledger never looks past
//! `consult`. [`AccountResolver`] turns a token's registry entry and the
//! oracle account supplied with an instruction into a live adapter.

use anchor_lang::prelude::*;

use crate::error::GnpError;
use crate::state::{GnpState, OracleEntry, OracleKind};

pub mod pyth;
pub mod twap;

pub use pyth::PythOracle;
pub use twap::TwapOracle;

/// Quote `amount` base units of `token` in base units of `reference`.
///
/// Decimal normalization between the token and the reference asset is the
/// adapter's job; callers use the result as-is.
pub trait PriceOracle {
  fn consult(&self, token: &Pubkey, amount: u64, reference: &Pubkey) -> Result<u64>;
}

/// Token -> oracle lookup used by the value converter.
///
/// `Ok(None)` means no oracle is configured. Any `Err` is a hard failure.
pub trait OracleResolver {
  fn resolve(&self, token: &Pubkey) -> Result<Option<Box<dyn PriceOracle + '_>>>;
}

/// Runtime parameters every adapter is built with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleSettings {
  pub now: i64,
  pub reference_decimals: u8,
  pub max_price_age_secs: u64,
  pub max_confidence_bps: u64,
}

impl OracleSettings {
  pub fn from_state(state: &GnpState, now: i64) -> Self {
    Self {
      now,
      reference_decimals: state.reference_decimals,
      max_price_age_secs: state.max_price_age_secs,
      max_confidence_bps: state.max_confidence_bps,
    }
  }
}

/// Read a registry entry PDA. An account this program does not own, or an
/// empty one, means the token was never configured.
pub fn read_entry(info: &AccountInfo) -> Result<Option<OracleEntry>> {
  if info.owner != &crate::ID || info.data_is_empty() {
    return Ok(None);
  }

  let data = info.try_borrow_data()?;
  let entry = OracleEntry::try_deserialize(&mut &data[..])?;
  Ok(Some(entry))
}

/// Resolver backed by the instruction's accounts
pub struct AccountResolver<'a, 'info> {
  entry: Option<OracleEntry>,
  oracle_account: Option<&'a AccountInfo<'info>>,
  settings: OracleSettings,
}

impl<'a, 'info> AccountResolver<'a, 'info> {
  pub fn new(
    entry: Option<OracleEntry>,
    oracle_account: Option<&'a AccountInfo<'info>>,
    settings: OracleSettings,
  ) -> Self {
    Self {
      entry,
      oracle_account,
      settings,
    }
  }

  pub fn load(
    entry_info: &AccountInfo,
    oracle_account: Option<&'a AccountInfo<'info>>,
    settings: OracleSettings,
  ) -> Result<Self> {
    Ok(Self::new(read_entry(entry_info)?, oracle_account, settings))
  }

  /// Oracle address configured for the loaded entry, if any
  pub fn configured_oracle(&self) -> Option<Pubkey> {
    self.entry.as_ref().and_then(OracleEntry::configured_oracle)
  }
}

impl<'a, 'info> OracleResolver for AccountResolver<'a, 'info> {
  fn resolve(&self, token: &Pubkey) -> Result<Option<Box<dyn PriceOracle + '_>>> {
    let Some(entry) = self.entry.as_ref() else {
      return Ok(None);
    };
    require_keys_eq!(entry.token, *token, GnpError::OracleTokenMismatch);

    let Some(oracle_key) = entry.configured_oracle() else {
      return Ok(None);
    };

    let account = self.oracle_account.ok_or(GnpError::OracleAccountMissing)?;
    require_keys_eq!(*account.key, oracle_key, GnpError::OracleAccountMismatch);

    let oracle: Box<dyn PriceOracle> = match entry.kind {
      OracleKind::Twap => Box::new(TwapOracle::load(account, &self.settings)?),
      OracleKind::Pyth => Box::new(PythOracle::load(account, entry, &self.settings)?),
    };
    Ok(Some(oracle))
  }
}
