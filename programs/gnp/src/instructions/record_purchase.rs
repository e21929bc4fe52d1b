//! record_purchase instruction - called by a lock for every successful sale
//! Converts the payment, adds it to GNP and emits GnpChanged.
//! Any failure here must fail the lock's purchase as well.

use anchor_lang::prelude::*;

use crate::accumulator::{record_purchase, Purchase};
use crate::emitter::ProgramLog;
use crate::error::GnpError;
use crate::oracle::{AccountResolver, OracleSettings};
use crate::state::*;

pub fn handler(ctx: Context<RecordPurchase>, token: Pubkey, raw_amount: u64) -> Result<PurchaseRecord> {
  let accounts = ctx.accounts;
  let now = Clock::get()?.unix_timestamp;

  let settings = OracleSettings::from_state(&accounts.gnp_state, now);
  let resolver = AccountResolver::load(
    &accounts.oracle_entry,
    accounts.oracle.as_deref(),
    settings,
  )?;

  let purchase = Purchase {
    token,
    raw_amount,
    lock: accounts.lock.key(),
  };

  record_purchase(
    &mut accounts.gnp_state,
    &mut accounts.lock_record,
    &resolver,
    purchase,
    &mut ProgramLog,
  )
}

#[derive(Accounts)]
#[instruction(token: Pubkey)]
pub struct RecordPurchase<'info> {
  /// The lock reporting the sale (a PDA signing through CPI)
  pub lock: Signer<'info>,

  #[account(
    mut,
    seeds = [LOCK_RECORD_SEED, lock.key().as_ref()],
    bump = lock_record.bump,
    has_one = lock @ GnpError::UnknownLock,
  )]
  pub lock_record: Account<'info, LockRecord>,

  #[account(
    mut,
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
  )]
  pub gnp_state: Account<'info, GnpState>,

  /// CHECK: Registry PDA for `token`; left uninitialized when the token has no oracle
  #[account(
    seeds = [ORACLE_ENTRY_SEED, token.as_ref()],
    bump
  )]
  pub oracle_entry: UncheckedAccount<'info>,

  /// CHECK: Matched against the registry entry before it is read
  pub oracle: Option<UncheckedAccount<'info>>,
}
