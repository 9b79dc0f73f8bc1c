//! End-of-round screen

use super::{Scene, SceneId, SceneTransition};
use crate::hud::performance_message;

/// Shows the final score and offers a replay or the menu
#[derive(Debug, Default)]
pub struct GameOverScene {
    final_score: i64,
    pending: Option<SceneTransition>,
}

impl GameOverScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_score(&mut self, score: i64) {
        self.final_score = score;
    }

    pub fn final_score(&self) -> i64 {
        self.final_score
    }

    /// Rating line shown under the score
    pub fn message(&self) -> &'static str {
        performance_message(self.final_score)
    }

    pub fn request_restart(&mut self) {
        self.pending = Some(SceneTransition::Restart);
    }

    pub fn request_main_menu(&mut self) {
        self.pending = Some(SceneTransition::MainMenu);
    }
}

impl Scene for GameOverScene {
    fn id(&self) -> SceneId {
        SceneId::GameOver
    }

    fn initialize(&mut self) {
        self.pending = None;
        log::info!("Final score {}: {}", self.final_score, self.message());
    }

    fn tick(&mut self, _dt_frames: f32) -> Option<SceneTransition> {
        self.pending.take()
    }

    fn teardown(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_follows_score() {
        let mut scene = GameOverScene::new();
        scene.set_score(320);
        scene.initialize();
        assert_eq!(scene.message(), "Excellent work!");
        assert_eq!(scene.tick(1.0), None);

        scene.request_restart();
        assert_eq!(scene.tick(1.0), Some(SceneTransition::Restart));
        assert_eq!(scene.tick(1.0), None);
    }
}
