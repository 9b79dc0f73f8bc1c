//! Screen lifecycle
//!
//! Each screen implements [`Scene`]. Screens never call each other; a tick
//! may return a [`SceneTransition`] and the [`SceneManager`] acts on it.

pub mod game;
pub mod game_over;
pub mod menu;

pub use game::{Feedback, GameScene};
pub use game_over::GameOverScene;
pub use menu::MenuScene;

use serde::{Deserialize, Serialize};

use crate::settings::GameConfig;

/// Identifies a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneId {
    Menu,
    Game,
    GameOver,
}

/// Request to move to another screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneTransition {
    StartGame,
    GameOver { final_score: i64 },
    Restart,
    MainMenu,
}

/// Lifecycle shared by every screen
pub trait Scene {
    fn id(&self) -> SceneId;

    /// Build fresh state; called each time the screen becomes active
    fn initialize(&mut self);

    /// Advance by `dt_frames` frame units
    fn tick(&mut self, dt_frames: f32) -> Option<SceneTransition>;

    /// Release state; called when the screen is left
    fn teardown(&mut self);
}

/// Owns the screens and routes transitions between them
#[derive(Debug)]
pub struct SceneManager {
    menu: MenuScene,
    game: GameScene,
    game_over: GameOverScene,
    current: SceneId,
}

impl SceneManager {
    /// Start on the menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut manager = Self {
            menu: MenuScene::new(),
            game: GameScene::new(config, seed),
            game_over: GameOverScene::new(),
            current: SceneId::Menu,
        };
        manager.menu.initialize();
        manager
    }

    pub fn current(&self) -> SceneId {
        self.current
    }

    fn scene_mut(&mut self, id: SceneId) -> &mut dyn Scene {
        match id {
            SceneId::Menu => &mut self.menu,
            SceneId::Game => &mut self.game,
            SceneId::GameOver => &mut self.game_over,
        }
    }

    /// Tear down the active screen and bring up `next`
    pub fn switch_to(&mut self, next: SceneId) {
        log::info!("Scene {:?} -> {:?}", self.current, next);
        let current = self.current;
        let leaving = self.scene_mut(current);
        debug_assert_eq!(leaving.id(), current);
        leaving.teardown();

        self.current = next;
        let entering = self.scene_mut(next);
        debug_assert_eq!(entering.id(), next);
        entering.initialize();
    }

    /// Tick the active screen and apply any transition it asks for
    pub fn tick(&mut self, dt_frames: f32) {
        let current = self.current;
        if let Some(transition) = self.scene_mut(current).tick(dt_frames) {
            self.handle(transition);
        }
    }

    fn handle(&mut self, transition: SceneTransition) {
        match transition {
            SceneTransition::StartGame | SceneTransition::Restart => self.switch_to(SceneId::Game),
            SceneTransition::GameOver { final_score } => {
                self.game_over.set_score(final_score);
                self.switch_to(SceneId::GameOver);
            }
            SceneTransition::MainMenu => self.switch_to(SceneId::Menu),
        }
    }

    pub fn menu_mut(&mut self) -> &mut MenuScene {
        &mut self.menu
    }

    pub fn game(&self) -> &GameScene {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameScene {
        &mut self.game
    }

    pub fn game_over(&self) -> &GameOverScene {
        &self.game_over
    }

    pub fn game_over_mut(&mut self) -> &mut GameOverScene {
        &mut self.game_over
    }
}
