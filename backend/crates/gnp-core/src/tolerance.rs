use serde::{Deserialize, Serialize};

/// Accepted gap between a ledger value and an independently consulted quote:
/// `max(ceil(reference * bps / 10000), floor)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerance {
    pub bps: u64,
    pub floor: u64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { bps: 1, floor: 1_000 }
    }
}

impl Tolerance {
    pub fn allowed(&self, reference: u128) -> u128 {
        let relative = (reference.saturating_mul(self.bps as u128)).div_ceil(10_000);
        relative.max(self.floor as u128)
    }

    pub fn accepts(&self, expected: u128, actual: u128) -> bool {
        expected.abs_diff(actual) <= self.allowed(expected)
    }
}
