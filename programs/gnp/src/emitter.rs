//! Purchase event emission
//! Exactly one `GnpChanged` per recorded purchase, published in processing order

use anchor_lang::prelude::*;

use crate::events::GnpChanged;
use crate::state::PurchaseRecord;

/// Destination for purchase events
pub trait PurchaseEventSink {
  fn publish(&mut self, event: GnpChanged);
}

/// Publishes to the transaction log via `emit!`
pub struct ProgramLog;

impl PurchaseEventSink for ProgramLog {
  fn publish(&mut self, event: GnpChanged) {
    emit!(event);
  }
}

/// Collects events in memory
impl PurchaseEventSink for Vec<GnpChanged> {
  fn publish(&mut self, event: GnpChanged) {
    self.push(event);
  }
}

/// Build the event for `record` and hand it to `sink`
pub fn emit_purchase<S: PurchaseEventSink + ?Sized>(sink: &mut S, record: &PurchaseRecord) {
  sink.publish(GnpChanged::from(record));
}
