//! Phase graph description: edges, triggers, signals and cues.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Marker for types usable as phase names.
pub trait Phase: Copy + Eq + Hash + Debug + Send + 'static {}

impl<T: Copy + Eq + Hash + Debug + Send + 'static> Phase for T {}

/// External events the renderer can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// The recipient accepted the proposal.
    Accept,
    /// The recipient chose the dramatic acceptance.
    DramaticAccept,
    /// The recipient chose the cinematic acceptance.
    CinematicAccept,
    /// The recipient confirmed the final reveal.
    Confirm,
}

/// Side effects the renderer or audio layer should perform when an edge fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneCue {
    /// Start the looping heartbeat sound.
    StartHeartbeat,
    /// Stop the heartbeat sound.
    StopHeartbeat,
    /// Start the tape-rewind sound.
    StartRewindSound,
    /// Stop the tape-rewind sound.
    StopRewindSound,
    /// Start the ambient music bed.
    StartAmbientMusic,
    /// Start the orchestral swell.
    StartOrchestra,
    /// Play the short success chime.
    PlaySuccessSound,
    /// Fire the celebration effect.
    FireCelebration,
}

/// What makes an edge fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A fixed delay after the phase is entered.
    After(Duration),
    /// An external signal while the phase is current.
    On(Signal),
    /// Replays the sequencer's items from last to first, one per `tick`, then
    /// fires `trailing` after the last item. With no items only the trailing
    /// delay applies.
    Rewind {
        /// Interval between items.
        tick: Duration,
        /// Delay after the final item.
        trailing: Duration,
    },
}

/// An outgoing transition from a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<P> {
    /// What fires the edge.
    pub trigger: Trigger,
    /// The phase entered when the edge fires.
    pub to: P,
    /// Cues emitted between leaving the current phase and entering `to`.
    pub cues: Vec<SceneCue>,
}

impl<P> Edge<P> {
    /// An edge that fires `delay` after the phase is entered.
    #[must_use]
    pub fn after(delay: Duration, to: P) -> Self {
        Self {
            trigger: Trigger::After(delay),
            to,
            cues: Vec::new(),
        }
    }

    /// An edge that fires on `signal`.
    #[must_use]
    pub fn on(signal: Signal, to: P) -> Self {
        Self {
            trigger: Trigger::On(signal),
            to,
            cues: Vec::new(),
        }
    }

    /// An edge that fires when the rewind sub-loop has finished.
    #[must_use]
    pub fn rewind(tick: Duration, trailing: Duration, to: P) -> Self {
        Self {
            trigger: Trigger::Rewind { tick, trailing },
            to,
            cues: Vec::new(),
        }
    }

    /// Attaches cues to this edge.
    #[must_use]
    pub fn with_cues(mut self, cues: impl IntoIterator<Item = SceneCue>) -> Self {
        self.cues.extend(cues);
        self
    }
}

/// A directed graph of phases. A phase without outgoing edges is terminal.
#[derive(Debug, Clone)]
pub struct PhaseGraph<P: Phase> {
    initial: P,
    edges: HashMap<P, Vec<Edge<P>>>,
}

impl<P: Phase> PhaseGraph<P> {
    /// Creates a graph that starts in `initial`.
    #[must_use]
    pub fn new(initial: P) -> Self {
        Self {
            initial,
            edges: HashMap::new(),
        }
    }

    /// Adds an outgoing edge to `from`.
    #[must_use]
    pub fn edge(mut self, from: P, edge: Edge<P>) -> Self {
        self.edges.entry(from).or_default().push(edge);
        self
    }

    /// The starting phase.
    #[must_use]
    pub fn initial(&self) -> P {
        self.initial
    }

    /// Outgoing edges of `phase`, in insertion order.
    #[must_use]
    pub fn edges(&self, phase: P) -> &[Edge<P>] {
        self.edges.get(&phase).map_or(&[], Vec::as_slice)
    }

    /// Whether `phase` has no outgoing edges.
    #[must_use]
    pub fn is_terminal(&self, phase: P) -> bool {
        self.edges(phase).is_empty()
    }
}
