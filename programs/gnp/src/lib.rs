use anchor_lang::prelude::*;

pub mod accumulator;
pub mod constants;
pub mod converter;
pub mod emitter;
pub mod error;
pub mod events;
pub mod instructions;
pub mod invariants;
pub mod math;
pub mod oracle;
pub mod registry;
pub mod state;

use instructions::*;
use state::{OracleKind, PurchaseRecord};

declare_id!("EjrrkoVLrwMvp5GYjSFqiPrShpTcT423UiAAfCRt6dpM");

#[program]
pub mod gnp {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Point a token at its price oracle (zero address clears it)
    pub fn set_oracle(
        ctx: Context<SetOracle>,
        token: Pubkey,
        oracle: Pubkey,
        kind: OracleKind,
    ) -> Result<()> {
        instructions::set_oracle::handler(ctx, token, oracle, kind)
    }

    pub fn get_oracle(ctx: Context<GetOracle>, token: Pubkey) -> Result<Option<Pubkey>> {
        instructions::views::get_oracle_handler(ctx, token)
    }

    pub fn gross_network_product(ctx: Context<ReadLedger>) -> Result<u128> {
        instructions::views::gross_network_product_handler(ctx)
    }

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership::handler(ctx, new_owner)
    }

    /// Allow a lock to report purchases
    pub fn register_lock(ctx: Context<RegisterLock>, lock: Pubkey) -> Result<()> {
        instructions::register_lock::handler(ctx, lock)
    }

    pub fn update_oracle_config(
        ctx: Context<UpdateOracleConfig>,
        max_price_age_secs: u64,
        max_confidence_bps: u64,
    ) -> Result<()> {
        instructions::update_oracle_config::handler(ctx, max_price_age_secs, max_confidence_bps)
    }

    pub fn create_twap_feed(
        ctx: Context<CreateTwapFeed>,
        window_secs: i64,
        updater: Pubkey,
    ) -> Result<()> {
        instructions::create_twap_feed::handler(ctx, window_secs, updater)
    }

    pub fn push_twap_observation(ctx: Context<PushTwapObservation>, price: u64) -> Result<()> {
        instructions::push_twap_observation::handler(ctx, price)
    }

    /// Record a completed sale: convert, accumulate, emit GnpChanged
    pub fn record_purchase(
        ctx: Context<RecordPurchase>,
        token: Pubkey,
        raw_amount: u64,
    ) -> Result<PurchaseRecord> {
        instructions::record_purchase::handler(ctx, token, raw_amount)
    }
}
