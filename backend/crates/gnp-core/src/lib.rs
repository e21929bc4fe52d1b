//! Off-chain model of the GNP ledger.
//!
//! Mirrors the `GnpChanged` event stream and rebuilds the running total from
//! it. Replay is exact: every record must carry the previous total plus its
//! own value.

pub mod error;
pub mod history;
pub mod record;
pub mod tolerance;

pub use error::CoreError;
pub use history::{GnpHistory, Opening};
pub use record::PurchaseRecord;
pub use tolerance::Tolerance;
