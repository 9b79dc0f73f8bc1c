//! HUD helpers
//!
//! Turns simulation numbers into what the screen shows: clock text, urgency
//! colors for the clock and patience bar, and the end-of-round rating.

use serde::{Deserialize, Serialize};

use crate::scenes::{Feedback, SceneId, SceneManager};
use crate::sim::RoundSnapshot;

/// Format seconds as `M:SS`
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Clock color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUrgency {
    Normal,
    /// 30 seconds or less
    Warning,
    /// 10 seconds or less
    Critical,
}

impl TimeUrgency {
    pub fn for_time_left(seconds: f32) -> Self {
        if seconds <= 10.0 {
            TimeUrgency::Critical
        } else if seconds <= 30.0 {
            TimeUrgency::Warning
        } else {
            TimeUrgency::Normal
        }
    }

    /// CSS color for the clock text
    pub fn color(&self) -> &'static str {
        match self {
            TimeUrgency::Normal => "#FFFFFF",
            TimeUrgency::Warning => "#FFAA00",
            TimeUrgency::Critical => "#FF4444",
        }
    }
}

/// Patience bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatienceBand {
    Calm,
    /// Below 60%
    Impatient,
    /// Below 30%
    Angry,
}

impl PatienceBand {
    pub fn for_percent(percent: f32) -> Self {
        if percent < 30.0 {
            PatienceBand::Angry
        } else if percent < 60.0 {
            PatienceBand::Impatient
        } else {
            PatienceBand::Calm
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PatienceBand::Calm => "#44CC44",
            PatienceBand::Impatient => "#FFAA00",
            PatienceBand::Angry => "#FF4444",
        }
    }
}

/// Game-over rating for a final score
pub fn performance_message(score: i64) -> &'static str {
    match score {
        s if s >= 400 => "The true Falafel King!",
        s if s >= 300 => "Excellent work!",
        s if s >= 200 => "Not bad at all!",
        s if s >= 100 => "Needs more practice",
        _ => "Try again...",
    }
}

/// Everything the page needs to draw one frame, ready for JSON
#[derive(Debug, Clone, Serialize)]
pub struct HudView {
    pub scene: SceneId,
    pub round: Option<RoundSnapshot>,
    /// Clock text and color, absent when no round is running
    pub time_text: Option<String>,
    pub time_color: Option<&'static str>,
    pub patience_color: Option<&'static str>,
    pub feedback: Option<Feedback>,
    pub final_score: Option<i64>,
    pub rating: Option<&'static str>,
}

impl HudView {
    pub fn from_scenes(scenes: &SceneManager) -> Self {
        let round = scenes.game().round().map(|r| r.snapshot());
        let time_left = round.as_ref().map(|r| r.time_left);
        let patience_color = round
            .as_ref()
            .and_then(|r| r.patience_percent)
            .map(|pct| PatienceBand::for_percent(pct).color());

        let (final_score, rating) = if scenes.current() == SceneId::GameOver {
            let game_over = scenes.game_over();
            (Some(game_over.final_score()), Some(game_over.message()))
        } else {
            (None, None)
        };

        Self {
            scene: scenes.current(),
            time_text: time_left.map(format_time),
            time_color: time_left.map(|secs| TimeUrgency::for_time_left(secs).color()),
            patience_color,
            feedback: scenes.game().feedback().cloned(),
            round,
            final_score,
            rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(150.0), "2:30");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn test_time_urgency_bands() {
        assert_eq!(TimeUrgency::for_time_left(90.0), TimeUrgency::Normal);
        assert_eq!(TimeUrgency::for_time_left(30.0), TimeUrgency::Warning);
        assert_eq!(TimeUrgency::for_time_left(10.0), TimeUrgency::Critical);
        assert_eq!(TimeUrgency::for_time_left(0.0), TimeUrgency::Critical);
    }

    #[test]
    fn test_patience_bands() {
        assert_eq!(PatienceBand::for_percent(100.0), PatienceBand::Calm);
        assert_eq!(PatienceBand::for_percent(60.0), PatienceBand::Calm);
        assert_eq!(PatienceBand::for_percent(59.9), PatienceBand::Impatient);
        assert_eq!(PatienceBand::for_percent(29.9), PatienceBand::Angry);
    }

    #[test]
    fn test_hud_view_tracks_scene() {
        use crate::settings::GameConfig;

        let mut scenes = SceneManager::new(GameConfig::default(), 11);
        let view = HudView::from_scenes(&scenes);
        assert_eq!(view.scene, SceneId::Menu);
        assert!(view.round.is_none());
        assert!(view.time_text.is_none());
        assert!(view.time_color.is_none());

        scenes.menu_mut().request_start();
        scenes.tick(1.0);
        let view = HudView::from_scenes(&scenes);
        assert_eq!(view.scene, SceneId::Game);
        assert_eq!(view.time_text.as_deref(), Some("2:30"));
        assert_eq!(view.time_color, Some(TimeUrgency::Normal.color()));
        assert_eq!(view.patience_color, Some(PatienceBand::Calm.color()));
        assert!(view.final_score.is_none());
        assert!(serde_json::to_string(&view).is_ok());
    }

    #[test]
    fn test_game_over_view_has_no_clock() {
        use crate::settings::GameConfig;

        let config = GameConfig {
            round_seconds: 1.0,
            ..Default::default()
        };
        let mut scenes = SceneManager::new(config, 11);
        scenes.menu_mut().request_start();
        scenes.tick(1.0);
        scenes.tick(60.0);

        let view = HudView::from_scenes(&scenes);
        assert_eq!(view.scene, SceneId::GameOver);
        assert!(view.time_text.is_none());
        assert!(view.time_color.is_none());
        assert_eq!(view.final_score, Some(0));
        assert_eq!(view.rating, Some("Try again..."));
    }

    #[test]
    fn test_performance_message() {
        assert_eq!(performance_message(500), "The true Falafel King!");
        assert_eq!(performance_message(400), "The true Falafel King!");
        assert_eq!(performance_message(399), "Excellent work!");
        assert_eq!(performance_message(200), "Not bad at all!");
        assert_eq!(performance_message(100), "Needs more practice");
        assert_eq!(performance_message(-40), "Try again...");
    }
}
