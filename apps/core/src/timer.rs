use std::collections::BTreeMap;

use crate::model::{AlertId, Millis, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    Debounce,
    AlertFade(AlertId),
    AlertRemove(AlertId),
    CardReveal(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub purpose: TimerPurpose,
    pub deadline: Millis,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    deadline: Millis,
    purpose: TimerPurpose,
}

#[derive(Debug, Default)]
pub struct TimerWheel {
    now: Millis,
    next_id: u64,
    pending: BTreeMap<TimerId, PendingTimer>,
}

impl TimerWheel {
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn arm(&mut self, delay: Millis, purpose: TimerPurpose) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert(
            id,
            PendingTimer {
                deadline: self.now.saturating_add(delay),
                purpose,
            },
        );
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn count_pending(&self, purpose: TimerPurpose) -> usize {
        self.pending
            .values()
            .filter(|timer| timer.purpose == purpose)
            .count()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.values().map(|timer| timer.deadline).min()
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the clock to its deadline so timers armed while handling it
    /// are measured from the moment it fired.
    pub fn pop_due(&mut self, until: Millis) -> Option<FiredTimer> {
        let (&id, timer) = self
            .pending
            .iter()
            .filter(|(_, timer)| timer.deadline <= until)
            .min_by_key(|(id, timer)| (timer.deadline, **id))?;
        let fired = FiredTimer {
            id,
            purpose: timer.purpose,
            deadline: timer.deadline,
        };
        self.pending.remove(&id);
        self.now = self.now.max(fired.deadline);
        Some(fired)
    }

    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

#[derive(Debug, Default)]
pub struct CancellableTimer {
    pending: Option<TimerId>,
}

impl CancellableTimer {
    pub fn arm(&mut self, wheel: &mut TimerWheel, delay: Millis, purpose: TimerPurpose) -> TimerId {
        self.cancel(wheel);
        let id = wheel.arm(delay, purpose);
        self.pending = Some(id);
        id
    }

    pub fn cancel(&mut self, wheel: &mut TimerWheel) -> bool {
        match self.pending.take() {
            Some(id) => wheel.cancel(id),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn claim(&mut self, fired: TimerId) -> bool {
        if self.pending == Some(fired) {
            self.pending = None;
            return true;
        }
        false
    }
}
