//! The two proposal flows and their timings.

use std::time::Duration;

use serde::Deserialize;

use crate::phase::{Edge, PhaseGraph, SceneCue, Signal};

/// Phases of the simple accept flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimplePhase {
    /// Mounted, nothing shown yet.
    Idle,
    /// Opening lines.
    Intro,
    /// The question is on screen; waits for [`Signal::Accept`].
    Question,
    /// Acceptance celebration.
    Accepted,
    /// Hand-off to the credits.
    Terminal,
}

/// Phases of the dramatic accept flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DramaticPhase {
    /// Waits for [`Signal::DramaticAccept`].
    Idle,
    /// Frozen frame with heartbeat.
    Freeze,
    /// Replays the timeline backwards.
    Rewind,
    /// Black screen before the future.
    Darkness,
    /// Future memories; waits for [`Signal::Confirm`].
    Future,
    /// Final reveal.
    Reveal,
    /// Hand-off to the credits.
    Terminal,
}

/// Phases of the cinematic accept flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CinematicPhase {
    /// Waits for [`Signal::CinematicAccept`].
    Idle,
    /// Frozen frame with heartbeat.
    Freezing,
    /// Screen goes black.
    Blackout,
    /// Orchestra and celebration burst.
    Explosion,
    /// Closing text; hand-off to the renderer.
    Finale,
}

/// Delays used by the proposal flows, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlowTimings {
    /// `Idle → Intro` in the simple flow.
    pub intro_delay_ms: u64,
    /// `Intro → Question` in the simple flow.
    pub question_delay_ms: u64,
    /// `Accepted → Terminal` in the simple flow.
    pub accepted_hold_ms: u64,
    /// `Freeze → Rewind` in the dramatic flow.
    pub freeze_hold_ms: u64,
    /// Interval between rewound items.
    pub rewind_tick_ms: u64,
    /// Delay after the last rewound item before `Darkness`.
    pub rewind_trailing_ms: u64,
    /// `Darkness → Future`.
    pub darkness_hold_ms: u64,
    /// `Reveal → Terminal`.
    pub reveal_hold_ms: u64,
    /// `Freezing → Blackout` in the cinematic flow.
    pub blackout_delay_ms: u64,
    /// `Blackout → Explosion`.
    pub explosion_delay_ms: u64,
    /// `Explosion → Finale`.
    pub finale_delay_ms: u64,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            intro_delay_ms: 1_000,
            question_delay_ms: 3_000,
            accepted_hold_ms: 8_000,
            freeze_hold_ms: 2_000,
            rewind_tick_ms: 200,
            rewind_trailing_ms: 500,
            darkness_hold_ms: 4_000,
            reveal_hold_ms: 10_000,
            blackout_delay_ms: 800,
            explosion_delay_ms: 1_200,
            finale_delay_ms: 3_000,
        }
    }
}

/// Builds `Idle → Intro → Question → Accepted → Terminal`.
#[must_use]
pub fn simple_accept_flow(timings: &FlowTimings) -> PhaseGraph<SimplePhase> {
    use SimplePhase::{Accepted, Idle, Intro, Question, Terminal};

    PhaseGraph::new(Idle)
        .edge(Idle, Edge::after(ms(timings.intro_delay_ms), Intro))
        .edge(Intro, Edge::after(ms(timings.question_delay_ms), Question))
        .edge(
            Question,
            Edge::on(Signal::Accept, Accepted)
                .with_cues([SceneCue::PlaySuccessSound, SceneCue::FireCelebration]),
        )
        .edge(Accepted, Edge::after(ms(timings.accepted_hold_ms), Terminal))
}

/// Builds `Idle → Freeze → Rewind → Darkness → Future → Reveal → Terminal`.
#[must_use]
pub fn dramatic_accept_flow(timings: &FlowTimings) -> PhaseGraph<DramaticPhase> {
    use DramaticPhase::{Darkness, Freeze, Future, Idle, Reveal, Rewind, Terminal};

    PhaseGraph::new(Idle)
        .edge(
            Idle,
            Edge::on(Signal::DramaticAccept, Freeze).with_cues([SceneCue::StartHeartbeat]),
        )
        .edge(
            Freeze,
            Edge::after(ms(timings.freeze_hold_ms), Rewind)
                .with_cues([SceneCue::StopHeartbeat, SceneCue::StartRewindSound]),
        )
        .edge(
            Rewind,
            Edge::rewind(
                ms(timings.rewind_tick_ms),
                ms(timings.rewind_trailing_ms),
                Darkness,
            )
            .with_cues([SceneCue::StopRewindSound]),
        )
        .edge(
            Darkness,
            Edge::after(ms(timings.darkness_hold_ms), Future)
                .with_cues([SceneCue::StartAmbientMusic]),
        )
        .edge(
            Future,
            Edge::on(Signal::Confirm, Reveal).with_cues([SceneCue::FireCelebration]),
        )
        .edge(Reveal, Edge::after(ms(timings.reveal_hold_ms), Terminal))
}

/// Builds `Idle → Freezing → Blackout → Explosion → Finale`.
#[must_use]
pub fn cinematic_accept_flow(timings: &FlowTimings) -> PhaseGraph<CinematicPhase> {
    use CinematicPhase::{Blackout, Explosion, Finale, Freezing, Idle};

    PhaseGraph::new(Idle)
        .edge(
            Idle,
            Edge::on(Signal::CinematicAccept, Freezing).with_cues([SceneCue::StartHeartbeat]),
        )
        .edge(Freezing, Edge::after(ms(timings.blackout_delay_ms), Blackout))
        .edge(
            Blackout,
            Edge::after(ms(timings.explosion_delay_ms), Explosion)
                .with_cues([SceneCue::StartOrchestra, SceneCue::FireCelebration]),
        )
        .edge(Explosion, Edge::after(ms(timings.finale_delay_ms), Finale))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
