//! Match lifecycle: Ready → Playing → Ended.
//!
//! The clock only runs while Playing. Running out of time hands the win to
//! the fish; a capture (or a fish caught after a failed escape) hands it to
//! the fisher. Ended is final until a restart.

use bevy::prelude::*;

use crate::config::{GameTuning, TuningLoaded};
use crate::shared::*;

pub struct MatchPlugin;

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, auto_start_match.after(TuningLoaded))
            .add_systems(
                Update,
                (
                    handle_match_commands,
                    resolve_match_events,
                    tick_match_timer.run_if(match_running),
                )
                    .chain()
                    .in_set(GameSet::Match),
            );
    }
}

impl MatchState {
    /// Ready → Playing. Returns false (and changes nothing) from any other
    /// phase.
    pub fn start(&mut self, duration: f32) -> bool {
        if self.phase != MatchPhase::Ready {
            return false;
        }
        let duration = duration.max(0.0);
        self.phase = MatchPhase::Playing;
        self.duration = duration;
        self.remaining_time = duration;
        self.result = MatchResult::Undecided;
        true
    }

    /// Back to Ready, then straight into a fresh match.
    pub fn restart(&mut self, duration: f32) {
        *self = Self {
            phase: MatchPhase::Ready,
            remaining_time: duration,
            duration,
            result: MatchResult::Undecided,
        };
        self.start(duration);
    }

    /// Count down. Returns the result if the clock ran out this tick.
    pub fn tick(&mut self, dt: f32) -> Option<MatchResult> {
        if !self.is_running() || dt <= 0.0 {
            return None;
        }
        self.remaining_time -= dt;
        if self.remaining_time <= 0.0 {
            self.remaining_time = 0.0;
            return Some(self.finish(MatchResult::FishWins));
        }
        None
    }

    /// The fisher landed the fish. Ignored unless Playing.
    pub fn report_capture(&mut self) -> Option<MatchResult> {
        if !self.is_running() {
            return None;
        }
        Some(self.finish(MatchResult::FisherWins))
    }

    fn finish(&mut self, result: MatchResult) -> MatchResult {
        self.phase = MatchPhase::Ended;
        self.result = result;
        result
    }
}

// ─── Systems ─────────────────────────────────────────────────────────────────

pub fn auto_start_match(
    tuning: Res<GameTuning>,
    mut match_state: ResMut<MatchState>,
    mut started: EventWriter<MatchStartedEvent>,
) {
    if !tuning.match_rules.auto_start {
        info!("[Match] Waiting for a start command");
        return;
    }
    let duration = tuning.match_rules.duration;
    if match_state.start(duration) {
        info!("[Match] Started ({})", match_state.formatted_time());
        started.send(MatchStartedEvent { duration });
    }
}

pub fn handle_match_commands(
    mut commands: EventReader<MatchCommand>,
    tuning: Res<GameTuning>,
    mut match_state: ResMut<MatchState>,
    mut started: EventWriter<MatchStartedEvent>,
) {
    let duration = tuning.match_rules.duration;
    for command in commands.read() {
        match command {
            MatchCommand::Start => {
                if !match_state.start(duration) {
                    warn!(
                        "[Match] Start ignored, match is {:?}",
                        match_state.phase
                    );
                    continue;
                }
                info!("[Match] Started ({})", match_state.formatted_time());
            }
            MatchCommand::Restart => {
                match_state.restart(duration);
                info!("[Match] Restarted ({})", match_state.formatted_time());
            }
        }
        started.send(MatchStartedEvent { duration });
    }
}

/// Captures and failed escapes end the match in the fisher's favour.
pub fn resolve_match_events(
    mut captures: EventReader<CaptureEvent>,
    mut caught: EventReader<FishCaughtEvent>,
    mut match_state: ResMut<MatchState>,
    mut ended: EventWriter<MatchEndedEvent>,
) {
    for capture in captures.read() {
        match match_state.report_capture() {
            Some(result) => {
                info!("[Match] Fisher caught {:?}, {:?}", capture.fish, result);
                ended.send(MatchEndedEvent { result });
            }
            None => warn!(
                "[Match] Capture of {:?} ignored, match is {:?}",
                capture.fish, match_state.phase
            ),
        }
    }

    for event in caught.read() {
        match match_state.report_capture() {
            Some(result) => {
                info!("[Match] {:?} failed to escape, {:?}", event.fish, result);
                ended.send(MatchEndedEvent { result });
            }
            None => debug!(
                "[Match] Caught {:?} outside play, match is {:?}",
                event.fish, match_state.phase
            ),
        }
    }
}

pub fn tick_match_timer(
    time: Res<Time>,
    mut match_state: ResMut<MatchState>,
    mut ended: EventWriter<MatchEndedEvent>,
) {
    if let Some(result) = match_state.tick(time.delta_secs()) {
        info!("[Match] Time up, {:?}", result);
        ended.send(MatchEndedEvent { result });
    }
}
