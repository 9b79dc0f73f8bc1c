//! Falafel King entry point
//!
//! On the web, exposes a `WebGame` handle the page drives once per animation
//! frame. Natively, plays a logged demo round with a scripted cook.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use falafel_king::GameConfig;
    use falafel_king::hud::HudView;
    use falafel_king::scenes::{SceneId, SceneManager};
    use falafel_king::sim::{IngredientKind, TickInput, display_name_for_id};

    fn to_json<T: Serialize>(value: &T) -> String {
        match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize game output: {}", e);
                "null".to_string()
            }
        }
    }

    fn parse_kind(id: &str) -> Option<IngredientKind> {
        let kind = IngredientKind::from_id(id);
        if kind.is_none() {
            log::warn!("Unknown ingredient '{}' ignored", id);
        }
        kind
    }

    /// Game handle owned by the page
    #[wasm_bindgen]
    pub struct WebGame {
        scenes: SceneManager,
    }

    #[wasm_bindgen]
    impl WebGame {
        /// Create a game; `config_json` may override any tuning value
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> WebGame {
            let config = match config_json {
                Some(json) => GameConfig::from_json_or_default(&json),
                None => GameConfig::default(),
            };
            let seed = js_sys::Date::now() as u64;
            log::info!("New game with seed: {}", seed);
            WebGame {
                scenes: SceneManager::new(config, seed),
            }
        }

        /// Menu "start" button
        pub fn start(&mut self) {
            if self.scenes.current() == SceneId::Menu {
                self.scenes.menu_mut().request_start();
            }
        }

        /// Game-over "play again" button
        pub fn restart(&mut self) {
            if self.scenes.current() == SceneId::GameOver {
                self.scenes.game_over_mut().request_restart();
            }
        }

        /// Game-over "main menu" button
        pub fn main_menu(&mut self) {
            if self.scenes.current() == SceneId::GameOver {
                self.scenes.game_over_mut().request_main_menu();
            }
        }

        /// Advance by the ticker's frame delta
        pub fn tick(&mut self, delta: f32) {
            self.scenes.tick(delta);
        }

        /// Ingredient dropped on (or clicked into) the pita
        pub fn add_ingredient(&mut self, id: &str) {
            if let Some(kind) = parse_kind(id) {
                self.scenes.game_mut().apply(&TickInput {
                    add: vec![kind],
                    ..Default::default()
                });
            }
        }

        pub fn remove_ingredient(&mut self, id: &str) {
            if let Some(kind) = parse_kind(id) {
                self.scenes.game_mut().apply(&TickInput {
                    remove: vec![kind],
                    ..Default::default()
                });
            }
        }

        /// "Clear" button
        pub fn clear(&mut self) {
            self.scenes.game_mut().apply(&TickInput {
                clear: true,
                ..Default::default()
            });
        }

        /// "Serve" button
        pub fn serve(&mut self) {
            self.scenes.game_mut().apply(&TickInput {
                serve: true,
                ..Default::default()
            });
        }

        /// Current HUD state as JSON
        pub fn hud_json(&self) -> String {
            to_json(&HudView::from_scenes(&self.scenes))
        }

        /// Round events since the last call, as a JSON array
        pub fn drain_events_json(&mut self) -> String {
            to_json(&self.scenes.game_mut().drain_events())
        }

        /// Display name for an ingredient id (unknown ids come back unchanged)
        pub fn ingredient_name(id: &str) -> String {
            display_name_for_id(id).to_string()
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Falafel King (web) starting...");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Falafel King (native) starting...");
    log::info!("Native mode runs a scripted demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use falafel_king::GameConfig;
    use falafel_king::hud::HudView;
    use falafel_king::scenes::{SceneId, SceneManager};
    use falafel_king::sim::{IngredientKind, RoundEvent, TickInput};

    /// Frames the scripted cook spends per ingredient
    const FRAMES_PER_INGREDIENT: u32 = 25;
    /// Every Nth customer gets one falafel short
    const FUMBLE_EVERY: u32 = 3;
    /// Hard stop in case the round never ends
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Builds each order one ingredient at a time, then serves
    #[derive(Debug, Default)]
    struct ScriptedCook {
        to_add: Vec<IngredientKind>,
        cooldown: u32,
        customers_seen: u32,
    }

    impl ScriptedCook {
        fn observe(&mut self, events: &[RoundEvent]) {
            for event in events {
                match event {
                    RoundEvent::CustomerArrived { order, .. } => {
                        self.customers_seen += 1;
                        self.to_add = order
                            .items
                            .iter()
                            .flat_map(|line| std::iter::repeat_n(line.kind, line.quantity as usize))
                            .collect();
                        if self.customers_seen % FUMBLE_EVERY == 0 {
                            if let Some(pos) = self.to_add.iter().position(|k| *k == IngredientKind::FalafelBall) {
                                self.to_add.remove(pos);
                            }
                        }
                        log::info!("{} wants {} item(s)", order.customer_name, order.total_quantity());
                    }
                    RoundEvent::Served { customer_id, result } => {
                        log::info!("{}: {} (+{})", customer_id, result.message.replace('\n', " | "), result.score);
                    }
                    RoundEvent::CustomerLeft { customer_id, penalty } => {
                        log::info!("{} walked out ({})", customer_id, penalty);
                    }
                    RoundEvent::RoundOver { final_score, reason } => {
                        log::info!("Round over ({:?}), final score {}", reason, final_score);
                    }
                }
            }
        }

        fn next_input(&mut self, has_customer: bool) -> TickInput {
            let mut input = TickInput::default();
            if self.cooldown > 0 {
                self.cooldown -= 1;
            } else if let Some(kind) = self.to_add.pop() {
                input.add.push(kind);
                self.cooldown = FRAMES_PER_INGREDIENT;
            } else if has_customer {
                input.serve = true;
            }
            input
        }
    }

    /// Plays the running round to the end and returns every event it produced
    fn play_round(scenes: &mut SceneManager) -> Vec<RoundEvent> {
        let mut cook = ScriptedCook::default();
        let mut history = Vec::new();

        for _ in 0..MAX_FRAMES {
            if scenes.current() != SceneId::Game {
                break;
            }

            // Take in new orders before choosing this frame's input
            let events = scenes.game_mut().drain_events();
            cook.observe(&events);
            history.extend(events);

            let has_customer = scenes
                .game()
                .round()
                .is_some_and(|r| r.active_customer().is_some());
            let input = cook.next_input(has_customer);
            scenes.game_mut().apply(&input);
            scenes.tick(1.0);
        }

        let events = scenes.game_mut().drain_events();
        cook.observe(&events);
        history.extend(events);
        history
    }

    pub fn run(seed: u64) {
        let mut scenes = SceneManager::new(GameConfig::default(), seed);
        scenes.menu_mut().request_start();
        scenes.tick(1.0);
        play_round(&mut scenes);

        let hud = HudView::from_scenes(&scenes);
        match (hud.final_score, hud.rating) {
            (Some(score), Some(rating)) => println!("Final score: {} - {}", score, rating),
            _ => println!(
                "Demo stopped before the round ended (time left {})",
                hud.time_text.as_deref().unwrap_or("-")
            ),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use falafel_king::sim::Verdict;

        fn started(seed: u64) -> SceneManager {
            let mut scenes = SceneManager::new(GameConfig::default(), seed);
            scenes.menu_mut().request_start();
            scenes.tick(1.0);
            scenes
        }

        fn verdicts(events: &[RoundEvent]) -> Vec<Verdict> {
            events
                .iter()
                .filter_map(|event| match event {
                    RoundEvent::Served { result, .. } => Some(result.verdict),
                    _ => None,
                })
                .collect()
        }

        #[test]
        fn test_first_customer_gets_full_order() {
            let mut scenes = started(42);
            let events = play_round(&mut scenes);
            let verdicts = verdicts(&events);
            assert_eq!(verdicts.first(), Some(&Verdict::Perfect));
            assert_eq!(verdicts.get(1), Some(&Verdict::Perfect));
        }

        #[test]
        fn test_round_plays_to_game_over() {
            let mut scenes = started(7);
            let events = play_round(&mut scenes);
            assert_eq!(scenes.current(), SceneId::GameOver);
            assert!(matches!(events.last(), Some(RoundEvent::RoundOver { .. })));
            assert!(!events.iter().any(|e| matches!(e, RoundEvent::CustomerLeft { .. })));
        }

        #[test]
        fn test_cook_waits_for_an_order_before_serving() {
            let mut cook = ScriptedCook::default();
            let input = cook.next_input(false);
            assert!(!input.serve);
            assert!(input.add.is_empty());
        }
    }
}
