//! Initialize instruction - sets up the ledger
//! Creates GnpState and pins the canonical reference asset

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::constants::NATIVE_DECIMALS;
use crate::error::GnpError;
use crate::events::LedgerInitialized;
use crate::state::*;

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
  let reference_mint = &ctx.accounts.reference_mint;

  // Native purchases are counted 1:1, so the reference asset must share the native precision
  require!(reference_mint.decimals == NATIVE_DECIMALS, GnpError::InvalidDecimals);

  let owner = ctx.accounts.owner.key();
  let reference_asset = reference_mint.key();
  let reference_decimals = reference_mint.decimals;

  ctx.accounts.gnp_state.set_inner(GnpState::new(
    owner,
    reference_asset,
    reference_decimals,
    ctx.bumps.gnp_state,
  ));

  msg!("GNP ledger initialized!");
  msg!("Owner: {}", owner);
  msg!("Reference asset: {} ({} decimals)", reference_asset, reference_decimals);

  emit!(LedgerInitialized {
    owner,
    reference_asset,
    reference_decimals,
    timestamp: Clock::get()?.unix_timestamp,
  });

  Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
  #[account(mut)]
  pub owner: Signer<'info>,

  /// GnpState PDA - stores the running total
  #[account(
    init,
    payer = owner,
    space = GnpState::LEN,
    seeds = [GNP_STATE_SEED],
    bump
  )]
  pub gnp_state: Account<'info, GnpState>,

  /// Canonical reference asset (wrapped native mint)
  pub reference_mint: InterfaceAccount<'info, Mint>,

  pub system_program: Program<'info, System>,
}
