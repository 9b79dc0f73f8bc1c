//! Title screen

use super::{Scene, SceneId, SceneTransition};

/// Waits for the player to press start
#[derive(Debug, Default)]
pub struct MenuScene {
    start_requested: bool,
}

impl MenuScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_start(&mut self) {
        self.start_requested = true;
    }
}

impl Scene for MenuScene {
    fn id(&self) -> SceneId {
        SceneId::Menu
    }

    fn initialize(&mut self) {
        self.start_requested = false;
    }

    fn tick(&mut self, _dt_frames: f32) -> Option<SceneTransition> {
        std::mem::take(&mut self.start_requested).then_some(SceneTransition::StartGame)
    }

    fn teardown(&mut self) {
        self.start_requested = false;
    }
}
