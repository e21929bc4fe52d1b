//! Minimal lock that sells keys and reports every sale to the GNP ledger.
//!
//! The lock PDA is the address registered with the ledger; it signs the
//! `record_purchase` CPI, so a ledger failure reverts the whole sale.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use gnp::constants::NATIVE_TOKEN;
use gnp::program::Gnp;

declare_id!("Hqqzq98ABJsLhL4zKjXnr1HNoxKeEXay8vH9GvnSZGAe");

pub const SALE_LOCK_SEED: &[u8] = b"sale_lock";

#[program]
pub mod sale_lock {
    use super::*;

    /// Open a lock selling keys for `key_price` base units of `payment_token`
    /// (the zero address for native currency)
    pub fn create_lock(ctx: Context<CreateLock>, key_price: u64, payment_token: Pubkey) -> Result<()> {
        require!(key_price > 0, SaleLockError::InvalidKeyPrice);

        ctx.accounts.lock.set_inner(SaleLock {
            merchant: ctx.accounts.merchant.key(),
            payment_token,
            key_price,
            keys_sold: 0,
            bump: ctx.bumps.lock,
        });

        msg!("Lock created: {} ({} of {})", ctx.accounts.lock.key(), key_price, payment_token);
        Ok(())
    }

    /// Buyer pays the merchant, then the sale is recorded with the ledger
    pub fn purchase_key(ctx: Context<PurchaseKey>) -> Result<()> {
        let key_price = ctx.accounts.lock.key_price;
        let payment_token = ctx.accounts.lock.payment_token;

        if payment_token == NATIVE_TOKEN {
            pay_native(&ctx, key_price)?;
        } else {
            pay_token(&ctx, payment_token, key_price)?;
        }

        let record = forward_record_purchase(&ctx, payment_token, key_price)?;

        let lock = &mut ctx.accounts.lock;
        lock.keys_sold = lock.keys_sold.checked_add(1).ok_or(SaleLockError::MathOverflow)?;

        msg!("Key #{} sold, GNP now {}", lock.keys_sold, record.running_total_after);
        Ok(())
    }
}

fn pay_native(ctx: &Context<PurchaseKey>, amount: u64) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        ctx.accounts.system_program.to_account_info(),
        Transfer {
            from: ctx.accounts.buyer.to_account_info(),
            to: ctx.accounts.merchant.to_account_info(),
        },
    );
    system_program::transfer(cpi_ctx, amount)
}

fn pay_token(ctx: &Context<PurchaseKey>, payment_token: Pubkey, amount: u64) -> Result<()> {
    let (Some(mint), Some(from), Some(to), Some(token_program)) = (
        ctx.accounts.payment_mint.as_ref(),
        ctx.accounts.buyer_token_account.as_ref(),
        ctx.accounts.merchant_token_account.as_ref(),
        ctx.accounts.token_program.as_ref(),
    ) else {
        return err!(SaleLockError::PaymentAccountsMissing);
    };
    require_keys_eq!(mint.key(), payment_token, SaleLockError::WrongPaymentMint);
    require_keys_eq!(to.owner, ctx.accounts.merchant.key(), SaleLockError::WrongPaymentAccount);

    let transfer_accounts = TransferChecked {
        from: from.to_account_info(),
        mint: mint.to_account_info(),
        to: to.to_account_info(),
        authority: ctx.accounts.buyer.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(token_program.to_account_info(), transfer_accounts);
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)
}

/// Report the sale to the ledger, signed by the lock PDA
fn forward_record_purchase(
    ctx: &Context<PurchaseKey>,
    payment_token: Pubkey,
    amount: u64,
) -> Result<gnp::state::PurchaseRecord> {
    let merchant = ctx.accounts.merchant.key();
    let seeds = &[SALE_LOCK_SEED, merchant.as_ref(), &[ctx.accounts.lock.bump]];
    let signer = &[&seeds[..]];

    let cpi_accounts = gnp::cpi::accounts::RecordPurchase {
        lock: ctx.accounts.lock.to_account_info(),
        lock_record: ctx.accounts.lock_record.to_account_info(),
        gnp_state: ctx.accounts.gnp_state.to_account_info(),
        oracle_entry: ctx.accounts.oracle_entry.to_account_info(),
        oracle: ctx.accounts.oracle.as_ref().map(|oracle| oracle.to_account_info()),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.gnp_program.to_account_info(),
        cpi_accounts,
        signer,
    );
    Ok(gnp::cpi::record_purchase(cpi_ctx, payment_token, amount)?.get())
}

#[account]
#[derive(Debug)]
pub struct SaleLock {
    pub merchant: Pubkey,
    /// Zero address for native currency
    pub payment_token: Pubkey,
    pub key_price: u64,
    pub keys_sold: u64,
    pub bump: u8,
}

impl SaleLock {
    pub const LEN: usize = 8 + // discriminator
        32 + // merchant
        32 + // payment_token
        8 + // key_price
        8 + // keys_sold
        1; // bump
}

#[derive(Accounts)]
pub struct CreateLock<'info> {
    #[account(mut)]
    pub merchant: Signer<'info>,

    #[account(
        init,
        payer = merchant,
        space = SaleLock::LEN,
        seeds = [SALE_LOCK_SEED, merchant.key().as_ref()],
        bump
    )]
    pub lock: Account<'info, SaleLock>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct PurchaseKey<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(mut)]
    pub merchant: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [SALE_LOCK_SEED, merchant.key().as_ref()],
        bump = lock.bump,
        has_one = merchant,
    )]
    pub lock: Account<'info, SaleLock>,

    pub payment_mint: Option<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub buyer_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub merchant_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Option<Interface<'info, TokenInterface>>,

    /// Ledger LockRecord for this lock.
    /// CHECK: Validated by the GNP program during CPI.
    #[account(mut)]
    pub lock_record: UncheckedAccount<'info>,

    /// Ledger GnpState.
    /// CHECK: Validated by the GNP program during CPI.
    #[account(mut)]
    pub gnp_state: UncheckedAccount<'info>,

    /// Registry entry for the payment token.
    /// CHECK: Validated by the GNP program during CPI.
    pub oracle_entry: UncheckedAccount<'info>,

    /// Oracle named by the registry entry, when one is configured.
    /// CHECK: Validated by the GNP program during CPI.
    pub oracle: Option<UncheckedAccount<'info>>,

    pub gnp_program: Program<'info, Gnp>,

    pub system_program: Program<'info, System>,
}

#[error_code]
pub enum SaleLockError {
    #[msg("Key price must be positive")]
    InvalidKeyPrice,

    #[msg("Token payment requires mint, token accounts and token program")]
    PaymentAccountsMissing,

    #[msg("Payment mint does not match the lock")]
    WrongPaymentMint,

    #[msg("Payment must go to the merchant")]
    WrongPaymentAccount,

    #[msg("Math overflow")]
    MathOverflow,
}
