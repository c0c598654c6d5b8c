//! Session lifecycle
//!
//! `SessionController` owns all mutable game state and the collaborator
//! handles. Phases: Menu -> Playing <-> Paused -> Ended -> Menu.
//!
//! Invalid transitions are silent no-ops. Every start/end bumps a
//! generation counter; scheduled timers from an older generation are
//! dropped when they come due.

use crate::config::Config;
use crate::consts::AMBIENT_VOLUME_SCALE;
use crate::error::ConfigError;
use crate::format_clock;
use crate::input::{InputEvent, KeyAction, action_for_code};
use crate::platform::{Collaborators, FrameView, HudSnapshot, SessionSummary};
use crate::sim::{
    AntagonistState, Clock, EndReason, HeldKeys, HidingSpotRegistry, MoveKey, MovementIntegrator,
    PlayerState, RandomSource, ScareDecision, ScareScheduler, SessionPhase, SessionState,
    TimerKind, TimerQueue, ViewController,
};

pub struct SessionController {
    config: Config,
    registry: HidingSpotRegistry,
    movement: MovementIntegrator,
    view: ViewController,
    scheduler: ScareScheduler,
    session: SessionState,
    player: PlayerState,
    antagonist: AntagonistState,
    keys: HeldKeys,
    pointer_captured: bool,
    timers: TimerQueue,
    generation: u64,
    last_summary: Option<SessionSummary>,
    clock: Box<dyn Clock>,
    dice: Box<dyn RandomSource>,
    io: Collaborators,
}

impl SessionController {
    /// Build a controller parked in the menu. Fails on an unusable config.
    pub fn new(
        config: Config,
        clock: Box<dyn Clock>,
        dice: Box<dyn RandomSource>,
        io: Collaborators,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = HidingSpotRegistry::new(config.house.hiding_spots.clone())?;
        let antagonist = AntagonistState::new(&registry);

        Ok(Self {
            movement: MovementIntegrator::new(config.move_speed, config.house.bounds),
            view: ViewController::new(config.mouse_sensitivity),
            scheduler: ScareScheduler::new(&config),
            session: SessionState::new(config.session_duration_seconds),
            player: PlayerState::at(config.house.spawn, config.house.spawn_yaw),
            antagonist,
            registry,
            keys: HeldKeys::default(),
            pointer_captured: false,
            timers: TimerQueue::new(),
            generation: 0,
            last_summary: None,
            clock,
            dice,
            io,
            config,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn antagonist(&self) -> &AntagonistState {
        &self.antagonist
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Result of the most recent `end()`, cleared on start
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    // === Transitions ===

    /// Menu | Ended -> Playing, with fresh counters and a new hiding spot
    pub fn start(&mut self) {
        if !matches!(self.session.phase, SessionPhase::Menu | SessionPhase::Ended) {
            log::debug!("start() ignored while {:?}", self.session.phase);
            return;
        }

        let now = self.clock.now_ms();
        self.generation += 1;
        self.session.reset(self.config.session_duration_seconds);
        self.player = PlayerState::at(self.config.house.spawn, self.config.house.spawn_yaw);
        self.antagonist
            .respawn_hidden(&self.registry, self.dice.as_mut());
        self.scheduler
            .arm(&mut self.session, now, self.dice.as_mut());
        self.last_summary = None;

        self.set_phase(SessionPhase::Playing);
        self.player.can_move = true;
        log::info!(
            "Session {} started, first scare eligible in {:.0}ms",
            self.generation,
            self.session.next_scare_eligible_at - now
        );

        self.io.ambient.play();
        self.io.pointer.request();
        self.publish_hud();
    }

    /// Playing -> Paused
    pub fn pause(&mut self) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        self.set_phase(SessionPhase::Paused);
        self.player.can_move = false;
        self.io.pointer.release();
        log::info!("Paused");
    }

    /// Paused -> Playing
    pub fn resume(&mut self) {
        if self.session.phase != SessionPhase::Paused {
            return;
        }
        self.set_phase(SessionPhase::Playing);
        self.player.can_move = true;
        self.io.pointer.request();
        log::info!("Resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.session.phase {
            SessionPhase::Playing => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Playing | Paused -> Ended. Pending timers are invalidated.
    pub fn end(&mut self, reason: EndReason) {
        if !self.session.phase.is_active() {
            log::debug!("end({reason}) ignored while {:?}", self.session.phase);
            return;
        }

        self.generation += 1;
        // The hide timer just went stale, so a scare on screen is cut short here
        if self.player.is_scared || self.antagonist.visible {
            self.end_scare_display();
        }
        self.set_phase(SessionPhase::Ended);
        self.player.can_move = false;
        self.io.ambient.stop();
        self.io.pointer.release();

        let summary = SessionSummary {
            reason,
            score: self.session.score,
            scare_count: self.session.scare_count,
            max_scares: self.config.max_scares,
        };
        log::info!(
            "Session {} ended: {} (score {}, scares {}/{})",
            self.generation - 1,
            reason,
            summary.score,
            summary.scare_count,
            summary.max_scares
        );

        self.publish_hud();
        self.io.hud.show_summary(&summary);
        self.last_summary = Some(summary);
    }

    /// `end(Restarting)` followed by `start()`
    pub fn restart(&mut self) {
        self.end(EndReason::Restarting);
        self.start();
    }

    /// Paused | Ended -> Menu
    pub fn return_to_menu(&mut self) {
        if !matches!(self.session.phase, SessionPhase::Paused | SessionPhase::Ended) {
            return;
        }
        self.generation += 1;
        self.set_phase(SessionPhase::Menu);
        self.player.can_move = false;
        self.io.ambient.stop();
        self.io.pointer.release();
    }

    // === Frame ===

    /// Per-frame driver: movement, timer, scare check, HUD. No-op unless playing.
    pub fn tick(&mut self, dt: f32) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let now = self.clock.now_ms();

        self.fire_due_timers(now);

        self.movement.step(&mut self.player, self.keys, dt);

        if self.session.drain_time(dt) {
            self.end(EndReason::TimeLimit);
            self.present();
            return;
        }

        let decision = self.scheduler.evaluate(
            now,
            &mut self.session,
            &mut self.player,
            &mut self.antagonist,
            self.dice.as_mut(),
        );
        if let ScareDecision::Triggered { hide_at } = decision {
            self.on_scare(hide_at);
            if self.session.phase != SessionPhase::Playing {
                self.present();
                return;
            }
        }

        self.publish_hud();
        self.present();
    }

    /// Push the current view to the renderer (also usable while paused)
    pub fn present(&mut self) {
        let frame = self.frame_view();
        self.io.renderer.present(&frame);
    }

    fn on_scare(&mut self, hide_at: f64) {
        self.io.scare_sound.play();
        self.timers
            .schedule(hide_at, self.generation, TimerKind::HideAntagonist);
        log::info!(
            "Scared from {}! {}/{} (score {})",
            self.antagonist.spot_name,
            self.session.scare_count,
            self.config.max_scares,
            self.session.score
        );

        if self.session.scare_count >= self.config.max_scares {
            self.end(EndReason::ScareLimit);
        }
    }

    fn fire_due_timers(&mut self, now: f64) {
        for timer in self.timers.take_due(now) {
            if timer.generation != self.generation {
                log::debug!(
                    "Dropping stale {:?} from session {}",
                    timer.kind,
                    timer.generation
                );
                continue;
            }
            match timer.kind {
                TimerKind::HideAntagonist => self.end_scare_display(),
            }
        }
    }

    fn end_scare_display(&mut self) {
        self.antagonist
            .respawn_hidden(&self.registry, self.dice.as_mut());
        self.player.is_scared = false;
        if self.session.phase == SessionPhase::Playing {
            self.player.can_move = true;
        }
    }

    // === Input ===

    /// Mouse look; ignored unless playing with the pointer captured
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        if self.session.phase != SessionPhase::Playing || !self.pointer_captured {
            return;
        }
        self.view.apply_look(&mut self.player, dx, dy);
    }

    pub fn set_key(&mut self, key: MoveKey, down: bool) {
        self.keys.set(key, down);
    }

    /// Pointer lock state reported by the platform
    pub fn pointer_capture_changed(&mut self, captured: bool) {
        self.pointer_captured = captured;
        if captured {
            log::info!("Pointer lock acquired");
            return;
        }
        log::info!("Pointer lock released");
        if self.config.pause_on_pointer_loss {
            self.pause();
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(code) => match action_for_code(code) {
                Some(KeyAction::Move(key)) => self.set_key(key, true),
                Some(KeyAction::TogglePause) => self.toggle_pause(),
                None => {}
            },
            InputEvent::KeyUp(code) => {
                if let Some(KeyAction::Move(key)) = action_for_code(code) {
                    self.set_key(key, false);
                }
            }
            InputEvent::PointerMotion { dx, dy } => self.apply_look(*dx, *dy),
            InputEvent::PointerCaptureChanged { captured } => {
                self.pointer_capture_changed(*captured)
            }
        }
    }

    /// Master volume slider (0.0 - 1.0)
    pub fn set_volume(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.io.ambient.set_volume(level * AMBIENT_VOLUME_SCALE);
        self.io.scare_sound.set_volume(level);
    }

    // === Outputs ===

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.session.score,
            scare_count: self.session.scare_count,
            max_scares: self.config.max_scares,
            time_remaining: format_clock(self.session.time_remaining),
            scare_active: self.player.is_scared,
        }
    }

    pub fn frame_view(&self) -> FrameView {
        FrameView {
            player_position: self.player.position,
            yaw: self.player.yaw,
            pitch: self.player.pitch,
            antagonist_position: self.antagonist.hiding_position,
            antagonist_visible: self.antagonist.visible,
            antagonist_yaw: self.antagonist.facing_yaw,
        }
    }

    fn publish_hud(&mut self) {
        let hud = self.hud_snapshot();
        self.io.hud.publish(&hud);
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        self.session.phase = phase;
        self.io.hud.phase_changed(phase);
    }
}
