//! Random order and customer generation
//!
//! The generator owns its id counter and random source, so two rounds (or two
//! tests) never share sequence state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Customer, Ingredient, IngredientKind, Order};
use super::timer::PatienceTimer;
use crate::consts::*;

/// Names customers are drawn from
pub const CUSTOMER_NAMES: [&str; 10] = [
    "Moshe", "Sarah", "David", "Rachel", "Yossi", "Miriam", "Avi", "Dina", "Yishai", "Tamar",
];

/// Falafel ball count range (inclusive)
pub const MIN_FALAFEL: u32 = 2;
pub const MAX_FALAFEL: u32 = 5;

/// Optional toppings and their inclusion probability
pub const TOPPING_ODDS: [(IngredientKind, f64); 6] = [
    (IngredientKind::Hummus, 0.5),
    (IngredientKind::Tahini, 0.5),
    (IngredientKind::Salad, 0.5),
    (IngredientKind::Pickles, 0.7),
    (IngredientKind::Fries, 0.3),
    (IngredientKind::Onion, 0.3),
];

/// Produces orders and customers from an injected random source
#[derive(Debug, Clone)]
pub struct OrderGenerator<R: Rng = Pcg32> {
    rng: R,
    order_counter: u64,
    max_patience: f32,
    patience_decay_per_frame: f32,
}

impl OrderGenerator<Pcg32> {
    /// Deterministic generator for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> OrderGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            order_counter: 0,
            max_patience: MAX_PATIENCE,
            patience_decay_per_frame: PATIENCE_DECAY_PER_FRAME,
        }
    }

    /// Override the patience given to generated customers
    pub fn with_patience(mut self, max_patience: f32, decay_per_frame: f32) -> Self {
        self.max_patience = max_patience;
        self.patience_decay_per_frame = decay_per_frame;
        self
    }

    /// Number of orders generated so far
    pub fn orders_generated(&self) -> u64 {
        self.order_counter
    }

    pub fn generate_order(&mut self) -> Order {
        let mut items = Vec::with_capacity(2 + TOPPING_ODDS.len());

        // Always a pita
        items.push(Ingredient::new(IngredientKind::Pita, 1));

        items.push(Ingredient::new(
            IngredientKind::FalafelBall,
            self.rng.random_range(MIN_FALAFEL..=MAX_FALAFEL),
        ));

        for (kind, odds) in TOPPING_ODDS {
            if self.rng.random_bool(odds) {
                items.push(Ingredient::new(kind, 1));
            }
        }

        let name = CUSTOMER_NAMES[self.rng.random_range(0..CUSTOMER_NAMES.len())];

        self.order_counter += 1;
        let id = format!("order-{}", self.order_counter);

        Order {
            id,
            items,
            customer_name: name.to_string(),
        }
    }

    pub fn generate_customer(&mut self) -> Customer {
        let order = self.generate_order();
        Customer::new(
            order,
            PatienceTimer::new(self.max_patience, self.patience_decay_per_frame),
        )
    }

    /// A round's worth of customers, front of the queue first
    pub fn generate_customers(&mut self, count: usize) -> Vec<Customer> {
        (0..count).map(|_| self.generate_customer()).collect()
    }
}
