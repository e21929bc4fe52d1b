//! Gross Network Product accumulation
//!
//! One purchase is one atomic transition:
//! (GNP = S) --purchase(token, amount)--> (GNP = S + convert(token, amount))
//! plus exactly one `GnpChanged` event. Every fallible step runs before the
//! first write, so a failed purchase leaves no trace.

use anchor_lang::prelude::*;

use crate::converter::convert;
use crate::emitter::{emit_purchase, PurchaseEventSink};
use crate::error::GnpError;
use crate::oracle::OracleResolver;
use crate::state::{GnpState, LockRecord, PurchaseRecord};

/// A purchase reported by a lock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
  pub token: Pubkey,
  pub raw_amount: u64,
  pub lock: Pubkey,
}

/// Convert, accumulate and emit one purchase.
///
/// # Arguments
/// * `state` - Ledger singleton
/// * `lock_record` - Registry record of the reporting lock
/// * `resolver` - Oracle lookup for `purchase.token`
/// * `purchase` - Token, raw amount and lock of the sale
/// * `sink` - Where the purchase event goes
///
/// # Returns
/// The converted value and the running total after this purchase
pub fn record_purchase<R, S>(
  state: &mut GnpState,
  lock_record: &mut LockRecord,
  resolver: &R,
  purchase: Purchase,
  sink: &mut S,
) -> Result<PurchaseRecord>
where
  R: OracleResolver + ?Sized,
  S: PurchaseEventSink + ?Sized,
{
  require_keys_eq!(lock_record.lock, purchase.lock, GnpError::UnknownLock);

  let converted_value = convert(
    resolver,
    &purchase.token,
    purchase.raw_amount,
    &state.reference_asset,
  )?;

  let (lock_total_sales, lock_purchase_count) = lock_record.preview_sale(converted_value)?;

  // First write. accumulate() itself fails before touching the total.
  let running_total_after = state.accumulate(converted_value)?;

  lock_record.total_sales = lock_total_sales;
  lock_record.purchase_count = lock_purchase_count;

  let record = PurchaseRecord {
    token: purchase.token,
    raw_amount: purchase.raw_amount,
    lock: purchase.lock,
    converted_value,
    running_total_after,
  };
  emit_purchase(sink, &record);

  msg!(
    "Purchase recorded: lock={} token={} raw={} value={} gnp={}",
    record.lock,
    record.token,
    record.raw_amount,
    record.converted_value,
    record.running_total_after
  );

  Ok(record)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::NATIVE_TOKEN;
  use crate::events::GnpChanged;
  use crate::oracle::PriceOracle;

  struct NoOracles;

  impl OracleResolver for NoOracles {
    fn resolve(&self, _token: &Pubkey) -> Result<Option<Box<dyn PriceOracle + '_>>> {
      Ok(None)
    }
  }

  fn error_name(err: anchor_lang::error::Error) -> String {
    match err {
      anchor_lang::error::Error::AnchorError(e) => e.error_name.clone(),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  fn native(lock: Pubkey, raw_amount: u64) -> Purchase {
    Purchase {
      token: NATIVE_TOKEN,
      raw_amount,
      lock,
    }
  }

  #[test]
  fn test_ledger_overflow_leaves_no_trace() {
    let lock = Pubkey::new_unique();
    let mut state = GnpState::new(Pubkey::new_unique(), Pubkey::new_unique(), 9, 255)
      .with_total(u128::MAX - 5);
    let mut lock_record = LockRecord::new(lock, 254);
    let mut events: Vec<GnpChanged> = Vec::new();

    let err = record_purchase(&mut state, &mut lock_record, &NoOracles, native(lock, 6), &mut events)
      .unwrap_err();

    assert_eq!(error_name(err), "MathOverflow");
    assert_eq!(state.gross_network_product(), u128::MAX - 5);
    assert_eq!(state.purchase_count(), 0);
    assert_eq!(lock_record.total_sales, 0);
    assert_eq!(lock_record.purchase_count, 0);
    assert!(events.is_empty());

    let record = record_purchase(&mut state, &mut lock_record, &NoOracles, native(lock, 5), &mut events)
      .unwrap();
    assert_eq!(record.running_total_after, u128::MAX);
    assert_eq!(events.len(), 1);
  }

  #[test]
  fn test_lock_overflow_leaves_no_trace() {
    let lock = Pubkey::new_unique();
    let mut state = GnpState::new(Pubkey::new_unique(), Pubkey::new_unique(), 9, 255);
    let mut lock_record = LockRecord::new(lock, 254);
    lock_record.total_sales = u128::MAX;
    let mut events: Vec<GnpChanged> = Vec::new();

    let err = record_purchase(&mut state, &mut lock_record, &NoOracles, native(lock, 1), &mut events)
      .unwrap_err();

    assert_eq!(error_name(err), "MathOverflow");
    assert_eq!(state.gross_network_product(), 0);
    assert_eq!(state.purchase_count(), 0);
    assert_eq!(lock_record.total_sales, u128::MAX);
    assert_eq!(lock_record.purchase_count, 0);
    assert!(events.is_empty());
  }

  #[test]
  fn test_purchase_writes_state_lock_and_event() {
    let lock = Pubkey::new_unique();
    let mut state = GnpState::new(Pubkey::new_unique(), Pubkey::new_unique(), 9, 255);
    let mut lock_record = LockRecord::new(lock, 254);
    let mut events: Vec<GnpChanged> = Vec::new();

    let record = record_purchase(&mut state, &mut lock_record, &NoOracles, native(lock, 700), &mut events)
      .unwrap();

    assert_eq!(record.converted_value, 700);
    assert_eq!(record.running_total_after, 700);
    assert_eq!(lock_record.total_sales, 700);
    assert_eq!(lock_record.purchase_count, 1);
    assert_eq!(events, vec![GnpChanged::from(&record)]);
  }
}
