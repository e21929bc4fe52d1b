//! Read-only instructions; results travel as return data

use anchor_lang::prelude::*;

use crate::oracle::read_entry;
use crate::registry;
use crate::state::*;

pub fn get_oracle_handler(ctx: Context<GetOracle>, _token: Pubkey) -> Result<Option<Pubkey>> {
  let entry = read_entry(&ctx.accounts.oracle_entry)?;
  Ok(registry::get_oracle(entry.as_ref()))
}

pub fn gross_network_product_handler(ctx: Context<ReadLedger>) -> Result<u128> {
  Ok(ctx.accounts.gnp_state.gross_network_product())
}

#[derive(Accounts)]
#[instruction(token: Pubkey)]
pub struct GetOracle<'info> {
  /// CHECK: Registry PDA for `token`; may not exist yet
  #[account(
    seeds = [ORACLE_ENTRY_SEED, token.as_ref()],
    bump
  )]
  pub oracle_entry: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadLedger<'info> {
  #[account(
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
  )]
  pub gnp_state: Account<'info, GnpState>,
}
