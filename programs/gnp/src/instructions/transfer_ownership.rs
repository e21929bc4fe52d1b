use anchor_lang::prelude::*;

use crate::error::GnpError;
use crate::events::OwnershipTransferred;
use crate::invariants::assert_owner;
use crate::state::*;

pub fn handler(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
  let gnp_state = &mut ctx.accounts.gnp_state;
  assert_owner(&gnp_state.owner, &ctx.accounts.owner.key())?;
  require_keys_neq!(new_owner, Pubkey::default(), GnpError::InvalidParameter);

  let previous_owner = gnp_state.owner;
  gnp_state.owner = new_owner;

  msg!("Ownership transferred: {} -> {}", previous_owner, new_owner);

  emit!(OwnershipTransferred {
    previous_owner,
    new_owner,
    timestamp: Clock::get()?.unix_timestamp,
  });

  Ok(())
}

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
  pub owner: Signer<'info>,

  #[account(
    mut,
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
    has_one = owner @ GnpError::Unauthorized,
  )]
  pub gnp_state: Account<'info, GnpState>,
}
