//! set_oracle instruction - owner points a token at its price oracle
//! Overwrites any previous mapping; the zero address clears it

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::error::GnpError;
use crate::events::OracleSet;
use crate::registry;
use crate::state::*;

pub fn handler(
  ctx: Context<SetOracle>,
  token: Pubkey,
  oracle: Pubkey,
  kind: OracleKind,
) -> Result<()> {
  let bump = ctx.bumps.oracle_entry;
  let accounts = ctx.accounts;

  let previous_oracle = registry::set_oracle(
    &accounts.gnp_state,
    &accounts.owner.key(),
    &mut accounts.oracle_entry,
    token,
    accounts.token_mint.decimals,
    oracle,
    kind,
    bump,
  )?;

  let current = accounts.oracle_entry.configured_oracle();
  msg!("Oracle for {} set: {:?} -> {:?} ({:?})", token, previous_oracle, current, kind);

  emit!(OracleSet {
    token,
    previous_oracle,
    oracle: current,
    kind,
    timestamp: Clock::get()?.unix_timestamp,
  });

  Ok(())
}

#[derive(Accounts)]
#[instruction(token: Pubkey)]
pub struct SetOracle<'info> {
  #[account(mut)]
  pub owner: Signer<'info>,

  #[account(
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
    has_one = owner @ GnpError::Unauthorized,
  )]
  pub gnp_state: Account<'info, GnpState>,

  /// Mint of the priced token; its decimals are stored with the entry
  #[account(address = token @ GnpError::InvalidParameter)]
  pub token_mint: InterfaceAccount<'info, Mint>,

  #[account(
    init_if_needed,
    payer = owner,
    space = OracleEntry::LEN,
    seeds = [ORACLE_ENTRY_SEED, token.as_ref()],
    bump
  )]
  pub oracle_entry: Account<'info, OracleEntry>,

  pub system_program: Program<'info, System>,
}
