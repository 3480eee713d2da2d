use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for codec calls.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) entities: BTreeMap<String, EntityCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Entry points
    pub encode_calls: u64,
    pub decode_calls: u64,

    // Outcomes
    pub null_short_circuits: u64,
    pub failures: u64,
    pub failures_by_kind: BTreeMap<String, u64>,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub encode_calls: u64,
    pub decode_calls: u64,
    pub null_short_circuits: u64,
    pub failures: u64,
}

///
/// EventReport
/// Point-in-time snapshot; entities ordered by total calls, busiest first.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: Vec<(String, EntityCounters)>,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

pub(crate) fn report() -> EventReport {
    with_state(|m| {
        let mut entities: Vec<_> = m
            .entities
            .iter()
            .map(|(name, counters)| (name.clone(), counters.clone()))
            .collect();
        entities.sort_by(|(a_name, a), (b_name, b)| {
            let a_total = a.encode_calls.saturating_add(a.decode_calls);
            let b_total = b.encode_calls.saturating_add(b.decode_calls);
            b_total.cmp(&a_total).then_with(|| a_name.cmp(b_name))
        });

        EventReport {
            ops: m.ops.clone(),
            entities,
        }
    })
}
