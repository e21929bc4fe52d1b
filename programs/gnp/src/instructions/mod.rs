//! Ledger instructions
//! Owner administration, oracle configuration and purchase recording

pub mod create_twap_feed;
pub mod initialize;
pub mod push_twap_observation;
pub mod record_purchase;
pub mod register_lock;
pub mod set_oracle;
pub mod transfer_ownership;
pub mod update_oracle_config;
pub mod views;

#[allow(ambiguous_glob_reexports)]
pub use create_twap_feed::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize::*;
#[allow(ambiguous_glob_reexports)]
pub use push_twap_observation::*;
#[allow(ambiguous_glob_reexports)]
pub use record_purchase::*;
#[allow(ambiguous_glob_reexports)]
pub use register_lock::*;
#[allow(ambiguous_glob_reexports)]
pub use set_oracle::*;
#[allow(ambiguous_glob_reexports)]
pub use transfer_ownership::*;
#[allow(ambiguous_glob_reexports)]
pub use update_oracle_config::*;
pub use views::*;
