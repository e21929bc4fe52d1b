//! Replays the ledger's `GnpChanged` events from transaction logs.
//!
//! Anchor's `emit!` writes `Program data: <base64>` lines holding the event
//! discriminator and the borsh-encoded event. Only data logged while the
//! ledger program is the executing program counts, and events are committed
//! once their transaction's outermost invocation succeeds.

use anchor_lang::{AnchorDeserialize, Discriminator};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gnp::events::GnpChanged;
use gnp_core::{CoreError, GnpHistory, PurchaseRecord};
use thiserror::Error;

pub use anchor_lang::prelude::Pubkey;

pub const PROGRAM_PREFIX: &str = "Program ";

pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("malformed GnpChanged payload: {0}")]
    Borsh(#[from] std::io::Error),

    #[error(transparent)]
    History(#[from] CoreError),
}

impl From<&GnpChanged> for PurchaseRecord {
    fn from(event: &GnpChanged) -> Self {
        Self {
            gross_network_product: event.gross_network_product,
            value_in_canonical_unit: event.value_in_canonical_unit,
            token_address: event.token_address.to_string(),
            raw_value: event.raw_value,
            lock_address: event.lock_address.to_string(),
        }
    }
}

/// Decode one event payload. Other events of the program yield `None`.
pub fn decode_gnp_changed(data: &[u8]) -> Result<Option<PurchaseRecord>, IndexerError> {
    let Some(body) = data.strip_prefix(GnpChanged::DISCRIMINATOR) else {
        return Ok(None);
    };
    let event = GnpChanged::try_from_slice(body)?;
    Ok(Some(PurchaseRecord::from(&event)))
}

/// Decode the text after `Program data: `. Events are a single base64 field;
/// anything with more fields is not one.
pub fn parse_program_data(payload: &str) -> Result<Option<PurchaseRecord>, IndexerError> {
    let mut fields = payload.split_whitespace();
    let (Some(field), None) = (fields.next(), fields.next()) else {
        return Ok(None);
    };
    let data = STANDARD.decode(field)?;
    decode_gnp_changed(&data)
}

/// Runtime log lines the indexer reacts to
#[derive(Debug, PartialEq, Eq)]
enum LogLine<'a> {
    Invoke(&'a str),
    Success,
    Failed,
    Data(&'a str),
    Other,
}

fn classify(line: &str) -> LogLine<'_> {
    let Some(rest) = line.trim().strip_prefix(PROGRAM_PREFIX) else {
        return LogLine::Other;
    };
    if let Some(payload) = rest.strip_prefix("data: ") {
        return LogLine::Data(payload);
    }
    if rest.starts_with("log: ") || rest.starts_with("return: ") {
        return LogLine::Other;
    }

    let (program, tail) = rest.split_once(' ').unwrap_or((rest, ""));
    if tail.starts_with("invoke [") {
        LogLine::Invoke(program)
    } else if tail == "success" {
        LogLine::Success
    } else if tail.starts_with("failed") {
        LogLine::Failed
    } else {
        LogLine::Other
    }
}

/// Feeds the ledger's events into a [`GnpHistory`], one transaction at a time
#[derive(Debug)]
pub struct Indexer {
    program_id: String,
    history: GnpHistory,
    invocations: Vec<String>,
    pending: Vec<PurchaseRecord>,
    skipped_payloads: usize,
    discarded_events: usize,
}

impl Indexer {
    /// Indexer for the ledger program this crate is built against
    pub fn new(history: GnpHistory) -> Self {
        Self::for_program(gnp::ID, history)
    }

    pub fn for_program(program_id: Pubkey, history: GnpHistory) -> Self {
        Self {
            program_id: program_id.to_string(),
            history,
            invocations: Vec::new(),
            pending: Vec::new(),
            skipped_payloads: 0,
            discarded_events: 0,
        }
    }

    /// Ingest one log line; returns the records it committed to the history
    pub fn ingest_line(&mut self, line: &str) -> Result<&[PurchaseRecord], IndexerError> {
        let committed_from = self.history.len();

        match classify(line) {
            LogLine::Invoke(program) => self.invocations.push(program.to_string()),
            LogLine::Success => {
                self.invocations.pop();
                if self.invocations.is_empty() {
                    for record in std::mem::take(&mut self.pending) {
                        self.history.apply(record)?;
                    }
                }
            }
            LogLine::Failed => {
                // A failed invocation reverts the whole transaction
                self.invocations.clear();
                self.discard_pending("transaction failed");
            }
            LogLine::Data(payload) => self.ingest_data(payload),
            LogLine::Other => {}
        }

        Ok(&self.history.records()[committed_from..])
    }

    fn ingest_data(&mut self, payload: &str) {
        if self.invocations.last() != Some(&self.program_id) {
            return;
        }

        match parse_program_data(payload) {
            Ok(Some(record)) => {
                tracing::debug!(
                    total = %record.gross_network_product,
                    value = record.value_in_canonical_unit,
                    token = %record.token_address,
                    lock = %record.lock_address,
                    "purchase event"
                );
                self.pending.push(record);
            }
            Ok(None) => {}
            Err(err) => {
                self.skipped_payloads += 1;
                tracing::warn!(%err, "skipping undecodable program data");
            }
        }
    }

    fn discard_pending(&mut self, reason: &str) {
        if !self.pending.is_empty() {
            tracing::warn!(events = self.pending.len(), reason, "discarding uncommitted events");
            self.discarded_events += self.pending.len();
            self.pending.clear();
        }
    }

    /// End of input: events of a transaction whose logs were cut off are dropped
    pub fn finish(&mut self) {
        self.invocations.clear();
        self.discard_pending("log ended mid-transaction");
    }

    pub fn history(&self) -> &GnpHistory {
        &self.history
    }

    pub fn skipped_payloads(&self) -> usize {
        self.skipped_payloads
    }

    pub fn discarded_events(&self) -> usize {
        self.discarded_events
    }
}
