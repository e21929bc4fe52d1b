//! register_lock instruction - owner allows a lock to record purchases

use anchor_lang::prelude::*;

use crate::error::GnpError;
use crate::events::LockRegistered;
use crate::invariants::assert_owner;
use crate::state::*;

pub fn handler(ctx: Context<RegisterLock>, lock: Pubkey) -> Result<()> {
  assert_owner(&ctx.accounts.gnp_state.owner, &ctx.accounts.owner.key())?;
  require_keys_neq!(lock, Pubkey::default(), GnpError::InvalidParameter);

  ctx.accounts
    .lock_record
    .set_inner(LockRecord::new(lock, ctx.bumps.lock_record));

  msg!("Lock registered: {}", lock);

  emit!(LockRegistered {
    lock,
    timestamp: Clock::get()?.unix_timestamp,
  });

  Ok(())
}

#[derive(Accounts)]
#[instruction(lock: Pubkey)]
pub struct RegisterLock<'info> {
  #[account(mut)]
  pub owner: Signer<'info>,

  #[account(
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
    has_one = owner @ GnpError::Unauthorized,
  )]
  pub gnp_state: Account<'info, GnpState>,

  #[account(
    init,
    payer = owner,
    space = LockRecord::LEN,
    seeds = [LOCK_RECORD_SEED, lock.as_ref()],
    bump
  )]
  pub lock_record: Account<'info, LockRecord>,

  pub system_program: Program<'info, System>,
}
