//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Frame-unit deltas, converted with the configured frame rate
//! - Outputs leave as events and snapshots, never as callbacks into the UI

pub mod generator;
pub mod round;
pub mod schedule;
pub mod state;
pub mod timer;
pub mod validator;

pub use generator::OrderGenerator;
pub use round::{RoundController, RoundSnapshot, TickInput};
pub use schedule::{Scheduler, TaskId};
pub use state::{
    AssembledContent, Customer, Ingredient, IngredientKind, Order, RoundEvent, RoundOverReason,
    RoundPhase, RoundState, display_name_for_id,
};
pub use timer::{PatienceTimer, RoundTimer};
pub use validator::{ExtraItem, MissingItem, ValidationResult, Verdict, validate};
