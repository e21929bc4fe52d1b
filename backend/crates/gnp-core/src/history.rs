use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::PurchaseRecord;

/// Where the replayed total starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opening {
    /// The stream starts at the ledger's first purchase
    #[default]
    Genesis,
    /// The ledger already held this total before the first replayed record
    Total(u128),
    /// Take the total before the first replayed record from that record
    FirstRecord,
}

impl FromStr for Opening {
    type Err = CoreError;

    /// `genesis`, `first`, or a decimal total
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "genesis" => Ok(Self::Genesis),
            "first" => Ok(Self::FirstRecord),
            other => other
                .parse()
                .map(Self::Total)
                .map_err(|_| CoreError::InvalidOpening(s.to_string())),
        }
    }
}

/// Running total rebuilt from the event stream, in emission order
#[derive(Debug, Default, Clone)]
pub struct GnpHistory {
    opening: Opening,
    opening_total: u128,
    records: Vec<PurchaseRecord>,
    total: u128,
}

impl GnpHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opening(opening: Opening) -> Self {
        let opening_total = match opening {
            Opening::Total(total) => total,
            Opening::Genesis | Opening::FirstRecord => 0,
        };
        Self {
            opening,
            opening_total,
            records: Vec::new(),
            total: opening_total,
        }
    }

    /// History for a stream that starts after `total` was already recorded
    pub fn starting_at(total: u128) -> Self {
        Self::with_opening(Opening::Total(total))
    }

    /// Append one record. Rejected unless its total is exactly the previous
    /// total plus its value; the history is unchanged on error.
    pub fn apply(&mut self, record: PurchaseRecord) -> Result<&PurchaseRecord, CoreError> {
        let index = self.records.len();

        let base = if index == 0 && self.opening == Opening::FirstRecord {
            record.total_before().ok_or(CoreError::ValueExceedsTotal {
                index,
                value: record.value_in_canonical_unit,
                total: record.gross_network_product,
            })?
        } else {
            self.total
        };

        let expected = base
            .checked_add(record.value_in_canonical_unit as u128)
            .ok_or(CoreError::Overflow { index })?;

        if record.gross_network_product != expected {
            return Err(CoreError::TotalMismatch {
                index,
                expected,
                found: record.gross_network_product,
            });
        }

        if index == 0 {
            self.opening_total = base;
        }
        self.total = expected;
        self.records.push(record);
        Ok(&self.records[index])
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    /// Total held before the first replayed record
    pub fn opening_total(&self) -> u128 {
        self.opening_total
    }

    /// Value added by the replayed records
    pub fn replayed_value(&self) -> u128 {
        self.total - self.opening_total
    }

    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Converted value per lock
    pub fn totals_by_lock(&self) -> BTreeMap<&str, u128> {
        let mut totals = BTreeMap::new();
        for record in &self.records {
            let total: &mut u128 = totals.entry(record.lock_address.as_str()).or_insert(0);
            *total = total.saturating_add(record.value_in_canonical_unit as u128);
        }
        totals
    }

    /// Raw amount and converted value per payment token
    pub fn totals_by_token(&self) -> BTreeMap<&str, (u128, u128)> {
        let mut totals = BTreeMap::new();
        for record in &self.records {
            let (raw, value): &mut (u128, u128) = totals
                .entry(record.token_address.as_str())
                .or_insert((0, 0));
            *raw = raw.saturating_add(record.raw_value as u128);
            *value = value.saturating_add(record.value_in_canonical_unit as u128);
        }
        totals
    }
}
