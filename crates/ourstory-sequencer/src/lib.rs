//! Our Story Sequencer — cinematic scene progression.
//!
//! A [`Sequencer`] walks a [`PhaseGraph`] of named phases. Edges fire after a
//! fixed delay, on an external [`Signal`], or at the end of a rewind sub-loop
//! that replays a list of items from last to first. Every transition emits
//! [`Notification`]s for the renderer and audio layer. Timers are owned by the
//! phase that scheduled them and are dropped when that phase is left.

pub mod driver;
pub mod flows;
pub mod phase;
pub mod sequencer;
pub mod timers;

pub use driver::{SequencerHandle, spawn_sequencer};
pub use flows::{
    CinematicPhase, DramaticPhase, FlowTimings, SimplePhase, cinematic_accept_flow,
    dramatic_accept_flow, simple_accept_flow,
};
pub use phase::{Edge, PhaseGraph, SceneCue, Signal, Trigger};
pub use sequencer::{Notification, Sequencer};
