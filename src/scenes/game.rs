//! Main gameplay screen

use serde::{Deserialize, Serialize};

use super::{Scene, SceneId, SceneTransition};
use crate::frames_to_secs;
use crate::settings::GameConfig;
use crate::sim::{RoundController, RoundEvent, Scheduler, TickInput};

/// How long a feedback banner stays up
pub const FEEDBACK_SECS: f32 = 1.5;

/// Text shown over the play area after a serve or walk-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub success: bool,
}

/// Hosts one round at a time
#[derive(Debug)]
pub struct GameScene {
    config: GameConfig,
    next_seed: u64,
    round_seed: u64,
    rounds_played: u32,
    round: Option<RoundController>,
    /// Events from the last tick, for the presentation layer
    events: Vec<RoundEvent>,
    feedback: Option<Feedback>,
    feedback_timer: Scheduler<()>,
}

impl GameScene {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            next_seed: seed,
            round_seed: seed,
            rounds_played: 0,
            round: None,
            events: Vec::new(),
            feedback: None,
            feedback_timer: Scheduler::new(),
        }
    }

    pub fn round(&self) -> Option<&RoundController> {
        self.round.as_ref()
    }

    pub fn round_seed(&self) -> u64 {
        self.round_seed
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Forward player input to the running round
    pub fn apply(&mut self, input: &TickInput) {
        if let Some(round) = self.round.as_mut() {
            round.apply(input);
            self.collect_events();
        }
    }

    /// Events gathered since the last call
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    fn show_feedback(&mut self, message: String, success: bool) {
        self.feedback_timer.cancel_all();
        self.feedback = Some(Feedback { message, success });
        self.feedback_timer.schedule(FEEDBACK_SECS, ());
    }

    fn collect_events(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let events = round.drain_events();
        for event in &events {
            match event {
                RoundEvent::Served { result, .. } => {
                    self.show_feedback(result.message.clone(), result.is_correct);
                }
                RoundEvent::CustomerLeft { .. } => {
                    self.show_feedback("The customer lost patience!".to_string(), false);
                }
                RoundEvent::CustomerArrived { .. } | RoundEvent::RoundOver { .. } => {}
            }
        }
        self.events.extend(events);
    }
}

impl Scene for GameScene {
    fn id(&self) -> SceneId {
        SceneId::Game
    }

    fn initialize(&mut self) {
        self.round_seed = self.next_seed;
        // Each replay gets its own queue
        self.next_seed = self.next_seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.rounds_played += 1;

        let mut round = RoundController::new(self.config.clone(), self.round_seed);
        round.start();
        self.round = Some(round);
        self.events.clear();
        self.feedback = None;
        self.feedback_timer.cancel_all();
        self.collect_events();
        log::info!("Round {} (seed {})", self.rounds_played, self.round_seed);
    }

    fn tick(&mut self, dt_frames: f32) -> Option<SceneTransition> {
        if !self
            .feedback_timer
            .advance(frames_to_secs(dt_frames, self.config.frame_rate))
            .is_empty()
        {
            self.feedback = None;
        }

        let round = self.round.as_mut()?;
        round.tick(dt_frames);
        self.collect_events();

        self.round
            .as_ref()
            .and_then(|r| r.final_score())
            .map(|final_score| SceneTransition::GameOver { final_score })
    }

    fn teardown(&mut self) {
        self.round = None;
        self.feedback = None;
        self.feedback_timer.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::IngredientKind;

    #[test]
    fn test_feedback_shown_then_hidden() {
        let mut scene = GameScene::new(GameConfig::default(), 3);
        scene.initialize();
        scene.apply(&TickInput {
            add: vec![IngredientKind::Onion],
            serve: true,
            ..Default::default()
        });

        let feedback = scene.feedback().unwrap();
        assert!(!feedback.success);
        assert!(feedback.message.starts_with("Wrong order!"));

        // 1.5 s at 60 FPS
        scene.tick(90.0);
        assert!(scene.feedback().is_none());
    }

    #[test]
    fn test_events_forwarded() {
        let mut scene = GameScene::new(GameConfig::default(), 3);
        scene.initialize();
        let events = scene.drain_events();
        assert!(matches!(events[..], [RoundEvent::CustomerArrived { .. }]));
    }

    #[test]
    fn test_tick_without_round_is_noop() {
        let mut scene = GameScene::new(GameConfig::default(), 3);
        assert_eq!(scene.tick(1.0), None);
    }
}
