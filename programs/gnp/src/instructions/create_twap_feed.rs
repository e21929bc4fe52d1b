//! create_twap_feed instruction - owner opens an on-chain price feed for a token
//! Prices are quoted in the ledger's reference asset

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::error::GnpError;
use crate::events::TwapFeedCreated;
use crate::invariants::{assert_not_native, assert_owner, assert_supported_decimals, assert_twap_window};
use crate::state::*;

pub fn handler(ctx: Context<CreateTwapFeed>, window_secs: i64, updater: Pubkey) -> Result<()> {
  let gnp_state = &ctx.accounts.gnp_state;
  let token_mint = &ctx.accounts.token_mint;

  assert_owner(&gnp_state.owner, &ctx.accounts.owner.key())?;
  assert_not_native(&token_mint.key())?;
  assert_supported_decimals(token_mint.decimals)?;
  assert_twap_window(window_secs)?;
  require_keys_neq!(updater, Pubkey::default(), GnpError::InvalidParameter);

  let feed = TwapFeed::new(
    token_mint.key(),
    token_mint.decimals,
    gnp_state.reference_asset,
    updater,
    window_secs,
    ctx.bumps.twap_feed,
  );
  let event = TwapFeedCreated {
    feed: ctx.accounts.twap_feed.key(),
    token_mint: feed.token_mint,
    token_decimals: feed.token_decimals,
    quote_mint: feed.quote_mint,
    updater,
    window_secs,
  };
  ctx.accounts.twap_feed.set_inner(feed);

  msg!("TWAP feed created: {}", event.feed);
  msg!("Token: {} ({} decimals)", event.token_mint, event.token_decimals);
  msg!("Window: {}s, updater: {}", window_secs, updater);

  emit!(event);

  Ok(())
}

#[derive(Accounts)]
pub struct CreateTwapFeed<'info> {
  #[account(mut)]
  pub owner: Signer<'info>,

  #[account(
    seeds = [GNP_STATE_SEED],
    bump = gnp_state.bump,
    has_one = owner @ GnpError::Unauthorized,
  )]
  pub gnp_state: Account<'info, GnpState>,

  pub token_mint: InterfaceAccount<'info, Mint>,

  #[account(
    init,
    payer = owner,
    space = TwapFeed::LEN,
    seeds = [TWAP_FEED_SEED, token_mint.key().as_ref()],
    bump
  )]
  pub twap_feed: Box<Account<'info, TwapFeed>>,

  pub system_program: Program<'info, System>,
}
