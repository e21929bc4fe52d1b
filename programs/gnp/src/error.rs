use anchor_lang::prelude::*;

#[error_code]
#[derive(PartialEq,Eq)]
pub enum GnpError {
  #[msg("Signer is not the protocol owner")]
  Unauthorized,

  #[msg("Native currency is the canonical unit and cannot be given an oracle")]
  NativeTokenHasNoOracle,

  #[msg("Math overflow occurred - values exceeded integer bounds")]
  MathOverflow,

  #[msg("Lock is not registered with the ledger")]
  UnknownLock,

  #[msg("An oracle is configured for this token but its account was not supplied")]
  OracleAccountMissing,

  #[msg("Supplied oracle account does not match the registry entry")]
  OracleAccountMismatch,

  #[msg("Oracle account is not owned by this program or has the wrong layout")]
  InvalidOracleAccount,

  #[msg("Oracle was consulted for a token it does not price")]
  OracleTokenMismatch,

  #[msg("Oracle was consulted for a quote asset it does not price in")]
  OracleQuoteMismatch,

  #[msg("Oracle does not hold enough price history to cover its window")]
  InsufficientPriceHistory,

  #[msg("Oracle price is older than the maximum accepted age")]
  StalePrice,

  #[msg("Oracle price is zero or negative")]
  InvalidPrice,

  #[msg("Oracle confidence interval is wider than the accepted bound")]
  ConfidenceTooWide,

  #[msg("Oracle could not produce a price")]
  OracleUnavailable,

  #[msg("Observation timestamp must be later than the previous one")]
  NonMonotonicTimestamp,

  #[msg("Token decimals exceed the supported maximum")]
  InvalidDecimals,

  #[msg("Invalid parameter value provided")]
  InvalidParameter,
}
