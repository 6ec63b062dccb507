//! Game session lifecycle
//!
//! Owns the world, the per-session RNG, and the best score. The host's
//! frame scheduler calls `frame` once per animation frame; everything else
//! here is bookkeeping around the Idle -> Running -> Crashed machine. There
//! is no pause state: a crash is terminal for the session and `reset` just
//! starts a new one.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscore;
use crate::input::InputState;
use crate::sim::{StepResult, Viewport, WorldState, apply_resize, step};

/// Where the session is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No run started yet (or awaiting the first start after load)
    Idle,
    /// A world exists and steps every scheduled frame
    Running,
    /// Terminal for this session; a new one can be started
    Crashed,
}

/// Session controller: sole owner of the world's lifecycle
pub struct GameSession {
    phase: SessionPhase,
    world: Option<WorldState>,
    rng: Pcg32,
    viewport: Viewport,
    best_score: u64,
    final_score: u64,
}

impl GameSession {
    /// Create an idle session. The best score is read from storage once,
    /// here; a malformed value reads as zero.
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            phase: SessionPhase::Idle,
            world: None,
            rng: Pcg32::seed_from_u64(seed),
            viewport: viewport.sane(),
            best_score: highscore::load_best_score(),
            final_score: 0,
        }
    }

    /// Start (or restart) a run. The previous world, if any, is discarded
    /// outright - only viewport and best score survive across sessions.
    pub fn start(&mut self) {
        self.world = Some(WorldState::new(self.viewport, LANE_COUNT));
        self.final_score = 0;
        self.phase = SessionPhase::Running;
        log::info!(
            "Session started ({}x{})",
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Reset is just a fresh start
    pub fn reset(&mut self) {
        self.start();
    }

    /// Run one frame at the host's timestamp (ms). Steps only while
    /// Running; after a crash this is a no-op until the next `start`.
    pub fn frame(&mut self, timestamp_ms: f64, input: &InputState) -> SessionPhase {
        if self.phase != SessionPhase::Running {
            return self.phase;
        }
        let Some(world) = self.world.as_mut() else {
            return self.phase;
        };

        let elapsed_ms = if world.last_timestamp > 0.0 {
            (timestamp_ms - world.last_timestamp) as f32
        } else {
            FRAME_MS
        };
        world.last_timestamp = timestamp_ms;

        if step(world, elapsed_ms, input, &mut self.rng) == StepResult::Crashed {
            self.finish();
        }
        self.phase
    }

    /// Terminal transition: freeze the world, capture the score, persist a
    /// new best if this run beat it
    fn finish(&mut self) {
        self.phase = SessionPhase::Crashed;
        let score = self
            .world
            .as_ref()
            .map(|w| w.distance.floor() as u64)
            .unwrap_or(0);
        self.final_score = score;
        log::info!("Crashed at distance {score}");

        if score > self.best_score {
            self.best_score = score;
            highscore::save_best_score(score);
        }
    }

    /// Adopt a new viewport. Safe before the first start; a running world
    /// is re-projected in place so the car stays in its lane.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport.sane();
        if let Some(world) = self.world.as_mut() {
            apply_resize(world, self.viewport);
        }
    }

    /// Read-only world snapshot for the render sink
    pub fn world(&self) -> Option<&WorldState> {
        self.world.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_crashed(&self) -> bool {
        self.phase == SessionPhase::Crashed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current score: live distance while running, the frozen final score
    /// after a crash
    pub fn score(&self) -> u64 {
        match self.phase {
            SessionPhase::Running => self
                .world
                .as_ref()
                .map(|w| w.distance.floor() as u64)
                .unwrap_or(0),
            SessionPhase::Crashed => self.final_score,
            SessionPhase::Idle => 0,
        }
    }

    /// HUD speed readout; zero outside a run
    pub fn display_speed(&self) -> i32 {
        match (&self.phase, &self.world) {
            (SessionPhase::Running, Some(world)) => (world.speed * 12.0).round() as i32,
            _ => 0,
        }
    }

    /// HUD boost percentage; shows a full bar outside a run
    pub fn boost_percent(&self) -> u8 {
        match (&self.phase, &self.world) {
            (SessionPhase::Running, Some(world)) => world.boost.value.round() as u8,
            _ => 100,
        }
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn session() -> GameSession {
        let mut session = GameSession::new(42, Viewport::new(640.0, 880.0, 1.0));
        session.start();
        session.world.as_mut().unwrap().spawn_enabled = false;
        session
    }

    fn crash(session: &mut GameSession) -> u64 {
        let world = session.world.as_mut().unwrap();
        world.obstacles.push(crate::sim::Obstacle {
            pos: world.vehicle.pos - Vec2::new(0.0, 100.0),
            size: world.vehicle.size + Vec2::new(0.0, 200.0),
            fall_speed: 8.0,
            hue: 260.0,
        });
        let next = session.world().unwrap().last_timestamp + 16.666;
        let phase = session.frame(next, &InputState::default());
        assert_eq!(phase, SessionPhase::Crashed);
        session.score()
    }

    #[test]
    fn new_session_is_idle_and_frames_are_noops() {
        let mut session = GameSession::new(1, Viewport::new(640.0, 880.0, 1.0));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.frame(16.0, &InputState::default()), SessionPhase::Idle);
        assert!(session.world().is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn running_session_accumulates_score() {
        let mut session = session();
        for i in 1..=120 {
            session.frame(i as f64 * 16.666, &InputState::default());
        }
        assert!(session.is_running());
        assert!(session.score() > 0);
        assert!(session.display_speed() > 0);
        assert_eq!(session.boost_percent(), 100);
    }

    #[test]
    fn crash_freezes_the_session_until_restart() {
        let mut session = session();
        for i in 1..=60 {
            session.frame(i as f64 * 16.666, &InputState::default());
        }
        let final_score = crash(&mut session);
        assert!(session.is_crashed());
        assert!(final_score > 0);

        // Frames after the crash change nothing
        let distance = session.world().unwrap().distance;
        session.frame(10_000.0, &InputState::default());
        assert_eq!(session.world().unwrap().distance, distance);
        assert_eq!(session.score(), final_score);
        assert_eq!(session.display_speed(), 0);
    }

    #[test]
    fn best_score_updates_only_when_beaten() {
        let mut session = session();
        for i in 1..=200 {
            session.frame(i as f64 * 16.666, &InputState::default());
        }
        let first = crash(&mut session);
        assert_eq!(session.best_score(), first);

        // A shorter second run leaves the best untouched
        session.reset();
        session.world.as_mut().unwrap().spawn_enabled = false;
        session.frame(16.666, &InputState::default());
        let second = crash(&mut session);
        assert!(second < first);
        assert_eq!(session.best_score(), first);
    }

    #[test]
    fn reset_builds_a_fresh_world() {
        let mut session = session();
        for i in 1..=60 {
            session.frame(i as f64 * 16.666, &InputState::default());
        }
        crash(&mut session);

        session.reset();
        let world = session.world().unwrap();
        assert!(session.is_running());
        assert_eq!(world.distance, 0.0);
        assert_eq!(world.boost.value, 100.0);
        assert!(world.obstacles.is_empty());
        assert_eq!(world.flash_timer, 0.0);
    }

    #[test]
    fn resize_is_safe_with_and_without_a_world() {
        let mut idle = GameSession::new(3, Viewport::new(640.0, 880.0, 1.0));
        idle.resize(Viewport::new(760.0, 900.0, 2.0));
        assert!(idle.world().is_none());

        let mut session = session();
        session.resize(Viewport::new(760.0, 900.0, 2.0));
        let world = session.world().unwrap();
        assert_eq!(world.viewport.width, 760.0);
        assert_eq!(world.track.lane_for_center(world.vehicle.center_x()), 1);
    }

    #[test]
    fn degenerate_viewport_is_sanitized_at_the_boundary() {
        let mut session = GameSession::new(4, Viewport::new(0.0, 0.0, 0.0));
        session.start();
        let world = session.world().unwrap();
        assert!(world.track.lane_width > 0.0);
        assert!(world.viewport.height > 0.0);
    }
}
