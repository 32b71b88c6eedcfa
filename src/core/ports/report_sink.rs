//! Reporting sink port
//!
//! Receives every decision the run makes, in the order it makes them.

use crate::core::models::ReportEvent;

/// Destination for report events
pub trait ReportSink {
    /// Record one event
    fn record(&mut self, event: ReportEvent);
}

/// Collects events in memory
impl ReportSink for Vec<ReportEvent> {
    fn record(&mut self, event: ReportEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record(&mut self, _event: ReportEvent) {}
}
