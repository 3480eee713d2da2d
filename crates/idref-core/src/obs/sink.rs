//! Event sink boundary.
//!
//! This module is the only bridge between codec logic and the per-thread
//! counter state.

use crate::{
    codec::CodecErrorKind,
    handler::Direction,
    obs::metrics::{self, EventReport},
};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// CodecEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodecEvent<'a> {
    Call {
        direction: Direction,
        entity_name: Option<&'a str>,
    },
    NullShortCircuit {
        direction: Direction,
        entity_name: Option<&'a str>,
    },
    Failed {
        direction: Direction,
        entity_name: Option<&'a str>,
        kind: CodecErrorKind,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: CodecEvent<'_>);
}

///
/// GlobalEventSink
/// Default sink that writes into the thread-local counter state.
/// Acts as the concrete sink when no scoped override is installed.
///

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: CodecEvent<'_>) {
        match event {
            CodecEvent::Call {
                direction,
                entity_name,
            } => {
                metrics::with_state_mut(|m| {
                    match direction {
                        Direction::Serialization => {
                            m.ops.encode_calls = m.ops.encode_calls.saturating_add(1);
                        }
                        Direction::Deserialization => {
                            m.ops.decode_calls = m.ops.decode_calls.saturating_add(1);
                        }
                    }

                    if let Some(name) = entity_name {
                        let entry = m.entities.entry(name.to_string()).or_default();
                        match direction {
                            Direction::Serialization => {
                                entry.encode_calls = entry.encode_calls.saturating_add(1);
                            }
                            Direction::Deserialization => {
                                entry.decode_calls = entry.decode_calls.saturating_add(1);
                            }
                        }
                    }
                });
            }

            CodecEvent::NullShortCircuit { entity_name, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.null_short_circuits = m.ops.null_short_circuits.saturating_add(1);
                    if let Some(name) = entity_name {
                        let entry = m.entities.entry(name.to_string()).or_default();
                        entry.null_short_circuits = entry.null_short_circuits.saturating_add(1);
                    }
                });
            }

            CodecEvent::Failed {
                entity_name, kind, ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.failures = m.ops.failures.saturating_add(1);
                    let by_kind = m
                        .ops
                        .failures_by_kind
                        .entry(kind.as_str().to_string())
                        .or_default();
                    *by_kind = by_kind.saturating_add(1);

                    if let Some(name) = entity_name {
                        let entry = m.entities.entry(name.to_string()).or_default();
                        entry.failures = entry.failures.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) fn record(event: CodecEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GlobalEventSink.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn event_report() -> EventReport {
    metrics::report()
}

/// Reset the current thread's counters.
pub fn event_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary event sink override.
/// The previous sink is restored on every exit, including unwind.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
