//! update_oracle_config instruction - owner tunes price freshness and confidence bounds

use anchor_lang::prelude::*;

use crate::error::GnpError;
use crate::events::OracleConfigUpdated;
use crate::invariants::{assert_confidence_bound, assert_owner};
use crate::state::*;

pub fn handler(
  ctx: Context<UpdateOracleConfig>,
  max_price_age_secs: u64,
  max_confidence_bps: u64,
) -> Result<()> {
  let gnp_state = &mut ctx.accounts.gnp_state;
  assert_owner(&gnp_state.owner, &ctx.accounts.owner.key())?;
  require!(max_price_age_secs > 0, GnpError::InvalidParameter);
  assert_confidence_bound(max_confidence_bps)?;

  let old_max_price_age_secs = gnp_state.max_price_age_secs;
  let old_max_confidence_bps = gnp_state.max_confidence_bps;
  gnp_state.max_price_age_secs = max_price_age_secs;
  gnp_state.max_confidence_bps = max_confidence_bps;

  msg!("Max price age: {}s -> {}s", old_max_price_age_secs, max_price_age_secs);
  msg!("Max confidence: {}bps -> {}bps", old_max_confidence_bps, max_confidence_bps);

  emit!(OracleConfigUpdated {
    owner: gnp_state.owner,
    old_max_price_age_secs,
    new_max_price_age_secs: max_price_age_secs,
    old_max_confidence_bps,
    new_max_confidence_bps: max_confidence_bps,
    timestamp: Clock::get()?.unix_timestamp,
  });

  Ok(())
}

#[derive(Accounts)]
pub struct UpdateOracleConfig<'info> {
  pub owner: Signer<'info>,

  #[account(
    mut,
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
    has_one = owner @ GnpError::Unauthorized,
  )]
  pub gnp_state: Account<'info, GnpState>,
}
