//! push_twap_observation instruction - the feed's updater records a price
//! Timestamped with the cluster clock

use anchor_lang::prelude::*;

use crate::error::GnpError;
use crate::events::TwapObservationRecorded;
use crate::state::*;

pub fn handler(ctx: Context<PushTwapObservation>, price: u64) -> Result<()> {
  let timestamp = Clock::get()?.unix_timestamp;
  let feed_key = ctx.accounts.twap_feed.key();

  ctx.accounts.twap_feed.record(timestamp, price)?;

  msg!("TWAP observation: {} @ {}", price, timestamp);

  emit!(TwapObservationRecorded {
    feed: feed_key,
    price,
    timestamp,
  });

  Ok(())
}

#[derive(Accounts)]
pub struct PushTwapObservation<'info> {
  pub updater: Signer<'info>,

  #[account(
    mut,
    seeds = [TWAP_FEED_SEED, twap_feed.token_mint.as_ref()],
    bump = twap_feed.bump,
    has_one = updater @ GnpError::Unauthorized,
  )]
  pub twap_feed: Box<Account<'info, TwapFeed>>,
}
