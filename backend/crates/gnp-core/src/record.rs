use serde::{Deserialize, Serialize};

/// One decoded `GnpChanged` event. Addresses are base58.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub gross_network_product: u128,
    pub value_in_canonical_unit: u64,
    pub token_address: String,
    pub raw_value: u64,
    pub lock_address: String,
}

impl PurchaseRecord {
    /// Running total before this purchase was added
    pub fn total_before(&self) -> Option<u128> {
        self.gross_network_product
            .checked_sub(self.value_in_canonical_unit as u128)
    }
}
