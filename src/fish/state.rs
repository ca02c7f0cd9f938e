//! Fish behaviour state machine, stamina and the escape struggle.
//!
//! `FishStatus` is only mutated through its methods; every transition funnels
//! through [`FishStatus::transition_to`], which applies the entry side effects
//! (input gating, escape counter reset) and records a [`FishSignal`]. Systems
//! turn those signals into events.
//!
//! # Escape struggle
//! While Escaping, progress leaks away at `decay_rate` and struggle presses
//! push it back up. Each tick success is checked first, then decay, then the
//! timeout. Reaching the threshold on the same tick the clock runs out is an
//! escape, not a catch.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::movement::FishKinematics;
use crate::config::GameTuning;
use crate::shared::*;

/// Something observers should hear about, produced by a status mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FishSignal {
    StateChanged { from: FishState, to: FishState },
    EscapeSuccess,
    Caught,
    /// New stamina fraction.
    StaminaChanged(f32),
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct FishStatus {
    pub state: FishState,
    pub previous_state: FishState,
    /// Seconds spent in the current state.
    pub state_timer: f32,
    pub stamina: f32,
    pub escape_progress: f32,
    pub escaping_timer: f32,
    /// Length of the current (or next) stun.
    pub stun_duration: f32,
    /// Cleared on Stunned/Caught entry, set again on Idle/Swimming/Escaping
    /// entry.
    pub input_enabled: bool,
    last_reported_stamina: f32,
}

impl FishStatus {
    pub fn new(tuning: &GameTuning) -> Self {
        let max = tuning.fish_state.max_stamina;
        Self {
            state: FishState::Idle,
            previous_state: FishState::Idle,
            state_timer: 0.0,
            stamina: max,
            escape_progress: 0.0,
            escaping_timer: 0.0,
            stun_duration: tuning.fish_state.stunned_duration,
            input_enabled: true,
            last_reported_stamina: max,
        }
    }

    pub fn can_move(&self) -> bool {
        self.state.can_move()
    }

    pub fn can_accelerate(&self) -> bool {
        self.state.can_accelerate()
    }

    pub fn stamina_fraction(&self, tuning: &GameTuning) -> f32 {
        (self.stamina / tuning.fish_state.max_stamina).clamp(0.0, 1.0)
    }

    pub fn escape_fraction(&self, tuning: &GameTuning) -> f32 {
        let threshold = tuning.escape.success_threshold;
        if threshold <= 0.0 {
            return 1.0;
        }
        (self.escape_progress / threshold).clamp(0.0, 1.0)
    }

    /// Switch state. A no-op when already in `to`, and once Caught.
    pub fn transition_to(&mut self, to: FishState, out: &mut Vec<FishSignal>) {
        if self.state == to || self.state == FishState::Caught {
            return;
        }

        let from = self.state;
        self.previous_state = from;
        self.state = to;
        self.state_timer = 0.0;

        match to {
            FishState::Stunned => self.input_enabled = false,
            FishState::Escaping => {
                self.escaping_timer = 0.0;
                self.escape_progress = 0.0;
                // A hooked fish always gets to fight back, even straight out of a stun.
                self.input_enabled = true;
            }
            FishState::Caught => self.input_enabled = false,
            FishState::Swimming | FishState::Idle => self.input_enabled = true,
            FishState::Sprinting | FishState::Turning => {}
        }

        out.push(FishSignal::StateChanged { from, to });
        if to == FishState::Caught {
            out.push(FishSignal::Caught);
        }
    }

    /// Stun for `duration` seconds (the tuned default when not positive).
    pub fn apply_stun(&mut self, duration: f32, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        if self.state == FishState::Caught {
            return;
        }
        self.stun_duration = if duration > 0.0 {
            duration
        } else {
            tuning.fish_state.stunned_duration
        };
        self.transition_to(FishState::Stunned, out);
    }

    /// The hook landed: start struggling.
    pub fn hook(&mut self, out: &mut Vec<FishSignal>) {
        if self.state == FishState::Caught {
            return;
        }
        self.transition_to(FishState::Escaping, out);
    }

    /// Struggle. Ignored unless Escaping.
    pub fn add_escape_progress(&mut self, amount: f32, tuning: &GameTuning) {
        if self.state != FishState::Escaping {
            return;
        }
        self.escape_progress =
            (self.escape_progress + amount.max(0.0)).min(tuning.escape.success_threshold);
    }

    pub fn consume_stamina(&mut self, amount: f32, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        self.stamina = (self.stamina - amount.max(0.0)).max(0.0);
        self.report_stamina(tuning, out);
    }

    pub fn recover_stamina(&mut self, amount: f32, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        self.stamina = (self.stamina + amount.max(0.0)).min(tuning.fish_state.max_stamina);
        self.report_stamina(tuning, out);
    }

    /// Back to a freshly spawned fish.
    pub fn reset(&mut self, tuning: &GameTuning) {
        *self = Self::new(tuning);
    }

    /// Advance one tick. `speed` and `heading_gap` come from the fish's
    /// kinematics after this frame's integration.
    pub fn tick(
        &mut self,
        dt: f32,
        speed: f32,
        heading_gap: f32,
        tuning: &GameTuning,
    ) -> Vec<FishSignal> {
        let mut out = Vec::new();
        let dt = dt.max(0.0);
        let entered_with = self.state;

        self.update_current_state(dt, tuning, &mut out);
        self.update_stamina(dt, tuning, &mut out);

        let just_changed = self.state != entered_with;
        self.check_automatic_transitions(speed, heading_gap, just_changed, tuning, &mut out);
        out
    }

    fn update_current_state(&mut self, dt: f32, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        let rules = &tuning.fish_state;
        match self.state {
            FishState::Idle | FishState::Swimming => self.state_timer += dt,
            FishState::Sprinting => {
                self.state_timer += dt;
                if self.stamina <= 0.0 {
                    self.transition_to(FishState::Swimming, out);
                }
            }
            FishState::Turning => {
                self.state_timer += dt;
                if self.state_timer > rules.turn_state_duration {
                    let back_to = self.previous_state;
                    self.transition_to(back_to, out);
                }
            }
            FishState::Stunned => {
                self.state_timer += dt;
                if self.state_timer >= self.stun_duration {
                    self.transition_to(FishState::Swimming, out);
                }
            }
            FishState::Escaping => {
                self.state_timer += dt;
                self.escaping_timer += dt;
                self.resolve_escape(dt, tuning, out);
            }
            FishState::Caught => {}
        }
    }

    fn resolve_escape(&mut self, dt: f32, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        let rules = &tuning.escape;

        if self.escape_progress >= rules.success_threshold {
            self.transition_to(FishState::Swimming, out);
            out.push(FishSignal::EscapeSuccess);
            return;
        }

        self.escape_progress = (self.escape_progress - rules.decay_rate * dt).max(0.0);

        if self.escaping_timer >= rules.max_duration {
            self.transition_to(FishState::Caught, out);
        }
    }

    fn update_stamina(&mut self, dt: f32, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        let rules = &tuning.fish_state;
        if self.state == FishState::Sprinting {
            self.stamina = (self.stamina - rules.stamina_drain_rate * dt).max(0.0);
        } else if self.state.regenerates_stamina() {
            self.stamina = (self.stamina + rules.stamina_recovery_rate * dt).min(rules.max_stamina);
        }

        if (self.stamina - self.last_reported_stamina).abs() > rules.stamina_event_epsilon {
            self.report_stamina(tuning, out);
        }
    }

    fn report_stamina(&mut self, tuning: &GameTuning, out: &mut Vec<FishSignal>) {
        self.last_reported_stamina = self.stamina;
        out.push(FishSignal::StaminaChanged(self.stamina_fraction(tuning)));
    }

    fn check_automatic_transitions(
        &mut self,
        speed: f32,
        heading_gap: f32,
        just_changed: bool,
        tuning: &GameTuning,
        out: &mut Vec<FishSignal>,
    ) {
        if self.state.blocks_auto_transitions() {
            return;
        }
        let rules = &tuning.fish_state;

        let hard_turn = heading_gap >= rules.turn_state_angle && rules.turn_state_duration > 0.0;
        let next = if hard_turn && !just_changed && self.state.can_start_turn() {
            FishState::Turning
        } else if speed < rules.idle_speed {
            FishState::Idle
        } else if speed > rules.sprint_speed && self.stamina > rules.sprint_min_stamina {
            FishState::Sprinting
        } else {
            FishState::Swimming
        };
        self.transition_to(next, out);
    }

    pub fn state_info(&self, tuning: &GameTuning) -> String {
        format!(
            "State: {:?} | Stamina: {:.0}/{:.0}",
            self.state, self.stamina, tuning.fish_state.max_stamina
        )
    }
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Writers for every fish notification.
#[derive(SystemParam)]
pub struct FishNotifier<'w> {
    state_changed: EventWriter<'w, FishStateChangedEvent>,
    escaped: EventWriter<'w, EscapeSuccessEvent>,
    caught: EventWriter<'w, FishCaughtEvent>,
    stamina: EventWriter<'w, StaminaChangedEvent>,
}

impl FishNotifier<'_> {
    pub fn emit(&mut self, fish: Entity, signals: &[FishSignal]) {
        for signal in signals {
            match *signal {
                FishSignal::StateChanged { from, to } => {
                    info!("[Fish] {:?} -> {:?}", from, to);
                    self.state_changed.send(FishStateChangedEvent { fish, from, to });
                }
                FishSignal::EscapeSuccess => {
                    info!("[Fish] Broke free of the hook");
                    self.escaped.send(EscapeSuccessEvent { fish });
                }
                FishSignal::Caught => {
                    info!("[Fish] Caught");
                    self.caught.send(FishCaughtEvent { fish });
                }
                FishSignal::StaminaChanged(fraction) => {
                    self.stamina.send(StaminaChangedEvent { fish, fraction });
                }
            }
        }
    }
}

/// Apply stun / hook / struggle commands sent this frame.
pub fn apply_fish_commands(
    mut commands: EventReader<FishCommand>,
    mut fish_query: Query<&mut FishStatus, With<Fish>>,
    tuning: Res<GameTuning>,
    mut notifier: FishNotifier,
) {
    for command in commands.read() {
        let Ok(mut status) = fish_query.get_mut(command.fish) else {
            warn!("[Fish] Command {:?} for unknown fish {:?}", command.kind, command.fish);
            continue;
        };

        let mut signals = Vec::new();
        match command.kind {
            FishCommandKind::Stun(duration) => status.apply_stun(duration, &tuning, &mut signals),
            FishCommandKind::Hook => {
                if status.state == FishState::Caught {
                    debug!("[Fish] Ignoring hook on a caught fish");
                }
                status.hook(&mut signals);
            }
            FishCommandKind::AddEscapeProgress(amount) => {
                status.add_escape_progress(amount, &tuning)
            }
        }
        notifier.emit(command.fish, &signals);
    }
}

/// Tick every fish's state machine after movement has been integrated.
pub fn update_fish_states(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    mut fish_query: Query<(Entity, &mut FishStatus, &FishKinematics), With<Fish>>,
    mut notifier: FishNotifier,
) {
    let dt = time.delta_secs();
    for (entity, mut status, kinematics) in &mut fish_query {
        let signals = status.tick(
            dt,
            kinematics.current_speed,
            kinematics.heading_gap(),
            &tuning,
        );
        notifier.emit(entity, &signals);
    }
}
