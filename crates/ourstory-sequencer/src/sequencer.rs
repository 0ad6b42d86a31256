//! The timed phase state machine.
//!
//! Time is virtual: the owner reports elapsed time through
//! [`Sequencer::advance_to`] and raises signals through [`Sequencer::signal`].
//! Each call returns the notifications produced, in order. The current phase
//! can only change through these two entry points.

use std::time::Duration;

use tracing::{debug, trace};

use crate::phase::{Phase, PhaseGraph, SceneCue, Signal, Trigger};
use crate::timers::{TimerArena, TimerId};

/// Output events for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<P, T> {
    /// The phase was left.
    PhaseExited(P),
    /// A cue attached to the firing edge.
    Cue(SceneCue),
    /// The phase became current.
    PhaseEntered(P),
    /// One step of a rewind sub-loop, counting down from the last item.
    RewindItem {
        /// Index of the item in the sequencer's item list.
        index: usize,
        /// The item itself.
        item: T,
    },
    /// A terminal phase was reached; the renderer should hand off to the
    /// final presentation.
    Finished(P),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Ready,
    Running,
    Finished,
    TornDown,
}

#[derive(Debug, Clone, Copy)]
enum TimerAction {
    Fire { edge: usize },
    RewindTick { edge: usize },
}

/// Drives a [`PhaseGraph`] through a single traversal.
#[derive(Debug)]
pub struct Sequencer<P: Phase, T> {
    graph: PhaseGraph<P>,
    items: Vec<T>,
    current: P,
    now: Duration,
    lifecycle: Lifecycle,
    timers: TimerArena<TimerAction>,
    phase_timers: Vec<TimerId>,
    rewind_cursor: Option<usize>,
}

impl<P: Phase, T: Clone> Sequencer<P, T> {
    /// Creates a sequencer over `graph`. `items` feed any rewind edge.
    #[must_use]
    pub fn new(graph: PhaseGraph<P>, items: Vec<T>) -> Self {
        let current = graph.initial();
        Self {
            graph,
            items,
            current,
            now: Duration::ZERO,
            lifecycle: Lifecycle::Ready,
            timers: TimerArena::new(),
            phase_timers: Vec::new(),
            rewind_cursor: None,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn current_phase(&self) -> P {
        self.current
    }

    /// Virtual time elapsed since [`Sequencer::start`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether the sequencer has started and not yet finished or been torn down.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Whether a terminal phase has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.lifecycle == Lifecycle::Finished
    }

    /// Whether [`Sequencer::teardown`] has been called.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    /// Due time of the next pending timer, while running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.is_running() {
            self.timers.next_due()
        } else {
            None
        }
    }

    /// Enters the initial phase. Only the first call has any effect.
    pub fn start(&mut self) -> Vec<Notification<P, T>> {
        let mut out = Vec::new();
        if self.lifecycle != Lifecycle::Ready {
            return out;
        }
        self.lifecycle = Lifecycle::Running;
        self.enter(self.graph.initial(), &mut out);
        out
    }

    /// Raises an external signal. Ignored unless the current phase has an edge
    /// for it, so repeated signals produce at most one transition.
    pub fn signal(&mut self, signal: Signal) -> Vec<Notification<P, T>> {
        let mut out = Vec::new();
        if !self.is_running() {
            return out;
        }
        let edge = self
            .graph
            .edges(self.current)
            .iter()
            .position(|e| e.trigger == Trigger::On(signal));
        match edge {
            Some(edge) => self.transition(edge, &mut out),
            None => debug!(?signal, phase = ?self.current, "ignoring signal"),
        }
        out
    }

    /// Moves virtual time forward to `at`, firing due timers in order. Time
    /// never moves backwards.
    pub fn advance_to(&mut self, at: Duration) -> Vec<Notification<P, T>> {
        let mut out = Vec::new();
        while self.is_running() {
            let Some((due, action)) = self.timers.pop_due(at) else {
                break;
            };
            self.now = self.now.max(due);
            self.fire(action, &mut out);
        }
        self.now = self.now.max(at);
        out
    }

    /// Invalidates every pending timer. No further notifications are produced.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.phase_timers.clear();
        self.rewind_cursor = None;
        self.lifecycle = Lifecycle::TornDown;
        debug!(phase = ?self.current, "sequencer torn down");
    }

    fn fire(&mut self, action: TimerAction, out: &mut Vec<Notification<P, T>>) {
        match action {
            TimerAction::Fire { edge } => self.transition(edge, out),
            TimerAction::RewindTick { edge } => self.rewind_tick(edge, out),
        }
    }

    fn rewind_tick(&mut self, edge: usize, out: &mut Vec<Notification<P, T>>) {
        let Some(index) = self.rewind_cursor else {
            return;
        };
        let Trigger::Rewind { tick, trailing } = self.graph.edges(self.current)[edge].trigger
        else {
            return;
        };

        trace!(index, "rewind tick");
        out.push(Notification::RewindItem {
            index,
            item: self.items[index].clone(),
        });

        if index == 0 {
            self.rewind_cursor = None;
            self.schedule(trailing, TimerAction::Fire { edge });
        } else {
            self.rewind_cursor = Some(index - 1);
            self.schedule(tick, TimerAction::RewindTick { edge });
        }
    }

    fn transition(&mut self, edge: usize, out: &mut Vec<Notification<P, T>>) {
        let edge = self.graph.edges(self.current)[edge].clone();

        for id in self.phase_timers.drain(..) {
            self.timers.cancel(id);
        }
        self.rewind_cursor = None;

        debug!(from = ?self.current, to = ?edge.to, at = ?self.now, "phase transition");
        out.push(Notification::PhaseExited(self.current));
        out.extend(edge.cues.iter().copied().map(Notification::Cue));
        self.enter(edge.to, out);
    }

    fn enter(&mut self, phase: P, out: &mut Vec<Notification<P, T>>) {
        self.current = phase;
        out.push(Notification::PhaseEntered(phase));

        if self.graph.is_terminal(phase) {
            self.lifecycle = Lifecycle::Finished;
            out.push(Notification::Finished(phase));
            return;
        }

        let triggers: Vec<Trigger> = self.graph.edges(phase).iter().map(|e| e.trigger).collect();
        for (edge, trigger) in triggers.into_iter().enumerate() {
            match trigger {
                Trigger::After(delay) => self.schedule(delay, TimerAction::Fire { edge }),
                Trigger::On(_) => {}
                Trigger::Rewind { tick, trailing } => {
                    if self.items.is_empty() {
                        self.schedule(trailing, TimerAction::Fire { edge });
                    } else {
                        self.rewind_cursor = Some(self.items.len() - 1);
                        self.schedule(tick, TimerAction::RewindTick { edge });
                    }
                }
            }
        }
    }

    fn schedule(&mut self, delay: Duration, action: TimerAction) {
        let timers = &self.timers;
        self.phase_timers.retain(|id| timers.is_pending(*id));
        let id = self.timers.schedule(self.now + delay, action);
        self.phase_timers.push(id);
    }
}
