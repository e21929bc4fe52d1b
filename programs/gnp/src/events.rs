use anchor_lang::prelude::*;

use crate::state::{OracleKind, PurchaseRecord};

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerInitialized {
  pub owner: Pubkey,
  pub reference_asset: Pubkey,
  pub reference_decimals: u8,
  pub timestamp: i64,
}

/// One record per purchase. Replaying the stream in order rebuilds every
/// intermediate value of `gross_network_product`.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GnpChanged {
  pub gross_network_product: u128,
  pub value_in_canonical_unit: u64,
  pub token_address: Pubkey,
  pub raw_value: u64,
  pub lock_address: Pubkey,
}

impl From<&PurchaseRecord> for GnpChanged {
  fn from(record: &PurchaseRecord) -> Self {
    Self {
      gross_network_product: record.running_total_after,
      value_in_canonical_unit: record.converted_value,
      token_address: record.token,
      raw_value: record.raw_amount,
      lock_address: record.lock,
    }
  }
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleSet {
  pub token: Pubkey,
  pub previous_oracle: Option<Pubkey>,
  pub oracle: Option<Pubkey>,
  pub kind: OracleKind,
  pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTransferred {
  pub previous_owner: Pubkey,
  pub new_owner: Pubkey,
  pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRegistered {
  pub lock: Pubkey,
  pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfigUpdated {
  pub owner: Pubkey,
  pub old_max_price_age_secs: u64,
  pub new_max_price_age_secs: u64,
  pub old_max_confidence_bps: u64,
  pub new_max_confidence_bps: u64,
  pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwapFeedCreated {
  pub feed: Pubkey,
  pub token_mint: Pubkey,
  pub token_decimals: u8,
  pub quote_mint: Pubkey,
  pub updater: Pubkey,
  pub window_secs: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwapObservationRecorded {
  pub feed: Pubkey,
  pub price: u64,
  pub timestamp: i64,
}
