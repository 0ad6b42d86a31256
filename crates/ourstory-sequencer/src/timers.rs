//! Arena of pending timers addressed by generation-checked handles.

use std::time::Duration;

/// Handle to a scheduled timer. Becomes stale once the timer fires or is
/// cancelled; cancelling a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId {
    slot: usize,
    generation: u64,
}

#[derive(Debug)]
struct Scheduled<A> {
    due: Duration,
    seq: u64,
    action: A,
}

#[derive(Debug)]
struct Slot<A> {
    generation: u64,
    entry: Option<Scheduled<A>>,
}

/// Pending timers keyed by due time, with scheduling order breaking ties.
#[derive(Debug)]
pub struct TimerArena<A> {
    slots: Vec<Slot<A>>,
    free: Vec<usize>,
    next_seq: u64,
}

impl<A> Default for TimerArena<A> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> TimerArena<A> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to become due at `due`.
    pub fn schedule(&mut self, due: Duration, action: A) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = Some(Scheduled { due, seq, action });

        if let Some(slot) = self.free.pop() {
            let cell = &mut self.slots[slot];
            cell.entry = entry;
            TimerId {
                slot,
                generation: cell.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                entry,
            });
            TimerId {
                slot: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    /// Whether `id` still refers to a pending timer.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.slots
            .get(id.slot)
            .is_some_and(|cell| cell.generation == id.generation && cell.entry.is_some())
    }

    /// Cancels a pending timer. Returns `false` if the handle is stale.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        self.release(id.slot);
        true
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        for slot in 0..self.slots.len() {
            if self.slots[slot].entry.is_some() {
                self.release(slot);
            }
        }
    }

    /// Returns the due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        let slot = self.earliest()?;
        self.slots[slot].entry.as_ref().map(|s| s.due)
    }

    /// Removes and returns the earliest timer due at or before `at`.
    pub fn pop_due(&mut self, at: Duration) -> Option<(Duration, A)> {
        let slot = self.earliest()?;
        let due = self.slots[slot].entry.as_ref()?.due;
        if due > at {
            return None;
        }
        let scheduled = self.release(slot)?;
        Some((scheduled.due, scheduled.action))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|c| c.entry.is_some()).count()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn earliest(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, cell)| cell.entry.as_ref().map(|s| (slot, s.due, s.seq)))
            .min_by_key(|(_, due, seq)| (*due, *seq))
            .map(|(slot, _, _)| slot)
    }

    fn release(&mut self, slot: usize) -> Option<Scheduled<A>> {
        let cell = &mut self.slots[slot];
        let entry = cell.entry.take();
        cell.generation += 1;
        self.free.push(slot);
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pop_due_returns_earliest_first() {
        // Arrange
        let mut arena = TimerArena::new();
        arena.schedule(ms(300), "late");
        arena.schedule(ms(100), "early");

        // Act / Assert
        assert_eq!(arena.pop_due(ms(1000)), Some((ms(100), "early")));
        assert_eq!(arena.pop_due(ms(1000)), Some((ms(300), "late")));
        assert_eq!(arena.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_equal_due_times_fire_in_scheduling_order() {
        let mut arena = TimerArena::new();
        arena.schedule(ms(100), 1);
        arena.schedule(ms(100), 2);
        arena.schedule(ms(100), 3);

        let fired: Vec<_> = std::iter::from_fn(|| arena.pop_due(ms(100)).map(|(_, a)| a)).collect();

        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_pop_due_leaves_future_timers_pending() {
        let mut arena = TimerArena::new();
        arena.schedule(ms(500), ());

        assert_eq!(arena.pop_due(ms(499)), None);
        assert_eq!(arena.next_due(), Some(ms(500)));
    }

    #[test]
    fn test_cancel_removes_timer() {
        let mut arena = TimerArena::new();
        let id = arena.schedule(ms(100), ());

        assert!(arena.cancel(id));
        assert!(arena.is_empty());
        assert_eq!(arena.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_stale_handle_does_not_cancel_reused_slot() {
        // Arrange
        let mut arena = TimerArena::new();
        let stale = arena.schedule(ms(100), "old");
        arena.cancel(stale);
        let fresh = arena.schedule(ms(200), "new");

        // Act
        let cancelled = arena.cancel(stale);

        // Assert
        assert!(!cancelled);
        assert_ne!(stale, fresh);
        assert_eq!(arena.pop_due(ms(1000)), Some((ms(200), "new")));
    }

    #[test]
    fn test_handle_is_pending_until_fired() {
        let mut arena = TimerArena::new();
        let id = arena.schedule(ms(100), ());

        assert!(arena.is_pending(id));
        arena.pop_due(ms(100));
        assert!(!arena.is_pending(id));
    }

    #[test]
    fn test_cancel_all_clears_arena() {
        let mut arena = TimerArena::new();
        arena.schedule(ms(100), ());
        arena.schedule(ms(200), ());

        arena.cancel_all();

        assert_eq!(arena.len(), 0);
        assert_eq!(arena.next_due(), None);
    }
}
