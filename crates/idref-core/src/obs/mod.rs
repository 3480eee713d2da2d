//! Observability: codec counters and the sink boundary that feeds them.
//!
//! The codec never touches counters directly; it emits `CodecEvent`s through
//! `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{CodecEvent, EventSink, event_report, event_reset_all, with_event_sink};
