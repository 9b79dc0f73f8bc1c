//! Round controller
//!
//! Drives one timed round: presents customers one at a time, validates
//! serves, applies walk-out penalties and ends the round when the queue is
//! empty or the clock runs out. Driven by a per-frame `tick`; all transitions
//! happen synchronously inside the call that triggers them.
//!
//! ```text
//! AwaitingCustomer --pop--> OrderInProgress --serve/walk-out--> PostServeDelay
//!        ^                                                          |
//!        +--------------------- delay elapsed ----------------------+
//! any phase --time up / queue empty--> RoundOver
//! ```

use serde::{Deserialize, Serialize};

use super::generator::OrderGenerator;
use super::schedule::{Scheduler, TaskId};
use super::state::{
    AssembledContent, Customer, IngredientKind, Order, RoundEvent, RoundOverReason, RoundPhase,
    RoundState,
};
use super::timer::{PatienceTimer, RoundTimer};
use super::validator::{ValidationResult, validate};
use crate::frames_to_secs;
use crate::settings::GameConfig;

/// Player input gathered during one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Ingredients dropped onto the pita
    pub add: Vec<IngredientKind>,
    /// Ingredients taken back off
    pub remove: Vec<IngredientKind>,
    /// Empty the pita
    pub clear: bool,
    /// Hand the pita to the customer
    pub serve: bool,
}

/// Work deferred past the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    PresentNextCustomer,
}

/// Read-only view of the round for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub score: i64,
    pub time_left: f32,
    pub max_time: f32,
    pub current_order: Option<Order>,
    pub customer_name: Option<String>,
    pub patience_percent: Option<f32>,
    pub customers_waiting: usize,
    pub completed_count: u32,
    pub failed_count: u32,
    pub assembled: Vec<(IngredientKind, u32)>,
}

/// Owns all round state; the only thing that mutates it
#[derive(Debug)]
pub struct RoundController {
    config: GameConfig,
    state: RoundState,
    phase: RoundPhase,
    round_timer: RoundTimer,
    assembled: AssembledContent,
    scheduler: Scheduler<DeferredAction>,
    pending_advance: Option<TaskId>,
    events: Vec<RoundEvent>,
}

impl RoundController {
    /// New round with a freshly generated customer queue
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let customers = OrderGenerator::seeded(seed)
            .with_patience(config.max_patience, config.patience_decay_per_frame)
            .generate_customers(config.customers_per_round);
        Self::with_customers(config, customers)
    }

    /// New round with a fixed customer queue (front is served first)
    pub fn with_customers(config: GameConfig, customers: Vec<Customer>) -> Self {
        let round_timer = RoundTimer::new(config.round_seconds, config.frame_rate);
        Self {
            state: RoundState::new(round_timer.max_time(), customers),
            phase: RoundPhase::AwaitingCustomer,
            round_timer,
            assembled: AssembledContent::new(),
            scheduler: Scheduler::new(),
            pending_advance: None,
            events: Vec::new(),
            config,
        }
    }

    /// Queue built from plain orders, using the configured patience
    pub fn with_orders(config: GameConfig, orders: Vec<Order>) -> Self {
        let customers = orders
            .into_iter()
            .map(|order| {
                Customer::new(
                    order,
                    PatienceTimer::new(config.max_patience, config.patience_decay_per_frame),
                )
            })
            .collect();
        Self::with_customers(config, customers)
    }

    /// Present the first customer
    pub fn start(&mut self) {
        if self.phase != RoundPhase::AwaitingCustomer {
            return;
        }
        log::info!(
            "Round started: {} customers, {}s",
            self.state.customers.len(),
            self.state.max_time
        );
        self.present_next_customer();
    }

    /// Apply one frame of player input
    pub fn apply(&mut self, input: &TickInput) {
        if input.clear {
            self.clear_assembly();
        }
        for &kind in &input.remove {
            self.remove_ingredient(kind);
        }
        for &kind in &input.add {
            self.add_ingredient(kind);
        }
        if input.serve {
            self.serve();
        }
    }

    /// Advance the round by `dt_frames` frame units
    pub fn tick(&mut self, dt_frames: f32) {
        if self.phase == RoundPhase::RoundOver || dt_frames <= 0.0 {
            return;
        }

        let expired = self.round_timer.tick(dt_frames);
        self.state.time_left = self.round_timer.time_left();
        if expired {
            self.end_round(RoundOverReason::TimeUp);
            return;
        }

        let phase_at_start = self.phase;
        for action in self.scheduler.advance(frames_to_secs(dt_frames, self.config.frame_rate)) {
            match action {
                DeferredAction::PresentNextCustomer => {
                    self.pending_advance = None;
                    if self.phase == RoundPhase::PostServeDelay {
                        self.phase = RoundPhase::AwaitingCustomer;
                        self.present_next_customer();
                    }
                }
            }
        }

        // A customer who just stepped up starts losing patience next frame
        if self.phase != phase_at_start {
            return;
        }

        match self.phase {
            RoundPhase::AwaitingCustomer => self.present_next_customer(),
            RoundPhase::OrderInProgress => {
                let walked_out = match self.state.customers.first_mut() {
                    Some(customer) => {
                        customer.patience.tick(dt_frames);
                        customer.patience.is_expired()
                    }
                    None => false,
                };
                if walked_out {
                    self.resolve_timeout();
                }
            }
            RoundPhase::PostServeDelay | RoundPhase::RoundOver => {}
        }
    }

    /// Validate the pita against the current order. No-op without one.
    pub fn serve(&mut self) -> Option<ValidationResult> {
        if self.phase != RoundPhase::OrderInProgress {
            log::debug!("Serve ignored in phase {:?}", self.phase);
            return None;
        }
        let order = self.state.current_order.as_ref()?;

        let result = validate(&self.assembled, order);
        self.state.score += i64::from(result.score);
        if result.is_correct {
            self.state.completed_count += 1;
        } else {
            self.state.failed_count += 1;
        }
        log::debug!(
            "Served {}: {:?}, +{} (total {})",
            order.id,
            result.verdict,
            result.score,
            self.state.score
        );

        let customer_id = order.id.clone();
        self.events.push(RoundEvent::Served {
            customer_id,
            result: result.clone(),
        });
        self.resolve_current();
        Some(result)
    }

    /// Drop an ingredient onto the pita. Returns false if input is closed.
    pub fn add_ingredient(&mut self, kind: IngredientKind) -> bool {
        if !self.accepting_input() {
            return false;
        }
        self.assembled.add(kind);
        true
    }

    pub fn remove_ingredient(&mut self, kind: IngredientKind) -> bool {
        if !self.accepting_input() {
            return false;
        }
        self.assembled.remove(kind);
        true
    }

    pub fn clear_assembly(&mut self) -> bool {
        if !self.accepting_input() {
            return false;
        }
        self.assembled.clear();
        true
    }

    fn accepting_input(&self) -> bool {
        self.phase == RoundPhase::OrderInProgress
    }

    fn present_next_customer(&mut self) {
        let Some(customer) = self.state.customers.first() else {
            self.end_round(RoundOverReason::AllCustomersServed);
            return;
        };

        log::debug!("{} arrives with {}", customer.name, customer.order.id);
        self.state.current_order = Some(customer.order.clone());
        self.events.push(RoundEvent::CustomerArrived {
            customer_id: customer.id.clone(),
            order: customer.order.clone(),
        });
        self.phase = RoundPhase::OrderInProgress;
    }

    fn resolve_timeout(&mut self) {
        let penalty = self.config.timeout_penalty;
        self.state.score += i64::from(penalty);
        self.state.failed_count += 1;

        if let Some(customer) = self.state.customers.first() {
            log::debug!("{} lost patience ({})", customer.name, penalty);
            self.events.push(RoundEvent::CustomerLeft {
                customer_id: customer.id.clone(),
                penalty,
            });
        }
        self.resolve_current();
    }

    /// Remove the active customer and start the pacing delay
    fn resolve_current(&mut self) {
        if !self.state.customers.is_empty() {
            self.state.customers.remove(0);
        }
        self.state.current_order = None;
        self.assembled.clear();
        self.phase = RoundPhase::PostServeDelay;
        self.pending_advance = Some(
            self.scheduler
                .schedule(self.config.post_serve_delay_secs, DeferredAction::PresentNextCustomer),
        );
    }

    fn end_round(&mut self, reason: RoundOverReason) {
        if self.phase == RoundPhase::RoundOver {
            return;
        }
        if let Some(id) = self.pending_advance.take() {
            self.scheduler.cancel(id);
        }
        self.state.current_order = None;
        self.assembled.clear();
        self.phase = RoundPhase::RoundOver;

        log::info!(
            "Round over ({:?}): score {}, {} completed, {} failed",
            reason,
            self.state.score,
            self.state.completed_count,
            self.state.failed_count
        );
        self.events.push(RoundEvent::RoundOver {
            final_score: self.state.score,
            reason,
        });
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn assembled(&self) -> &AssembledContent {
        &self.assembled
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    /// Final score once the round has ended
    pub fn final_score(&self) -> Option<i64> {
        self.is_over().then_some(self.state.score)
    }

    /// The customer whose order is current
    pub fn active_customer(&self) -> Option<&Customer> {
        if self.phase == RoundPhase::OrderInProgress {
            self.state.customers.first()
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let active = self.active_customer();
        RoundSnapshot {
            phase: self.phase,
            score: self.state.score,
            time_left: self.state.time_left,
            max_time: self.state.max_time,
            current_order: self.state.current_order.clone(),
            customer_name: active.map(|c| c.name.clone()),
            patience_percent: active.map(|c| c.patience.percent_remaining()),
            customers_waiting: self
                .state
                .customers
                .len()
                .saturating_sub(usize::from(active.is_some())),
            completed_count: self.state.completed_count,
            failed_count: self.state.failed_count,
            assembled: self.assembled.iter().collect(),
        }
    }
}
