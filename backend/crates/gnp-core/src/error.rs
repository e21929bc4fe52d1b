use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("record {index}: running total {found}, expected {expected}")]
    TotalMismatch {
        index: usize,
        expected: u128,
        found: u128,
    },

    #[error("record {index}: running total overflows")]
    Overflow { index: usize },

    #[error("record {index}: value {value} exceeds its running total {total}")]
    ValueExceedsTotal { index: usize, value: u64, total: u128 },

    #[error("invalid opening {0:?}: expected genesis, first or a total")]
    InvalidOpening(String),
}
