//! Round state and core data model
//!
//! Everything the round controller owns lives here. Presentation reads it
//! through events and snapshots and never holds references into it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::timer::PatienceTimer;
use super::validator::ValidationResult;

/// Ingredient types available on the counter
///
/// Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    /// Base - every order starts with one
    Pita,
    /// Protein
    FalafelBall,
    Hummus,
    Tahini,
    Salad,
    Fries,
    Pickles,
    Onion,
}

impl IngredientKind {
    pub const ALL: [IngredientKind; 8] = [
        IngredientKind::Pita,
        IngredientKind::FalafelBall,
        IngredientKind::Hummus,
        IngredientKind::Tahini,
        IngredientKind::Salad,
        IngredientKind::Fries,
        IngredientKind::Pickles,
        IngredientKind::Onion,
    ];

    /// Stable identifier used at the JS boundary
    pub fn id(&self) -> &'static str {
        match self {
            IngredientKind::Pita => "pita",
            IngredientKind::FalafelBall => "falafel_ball",
            IngredientKind::Hummus => "hummus",
            IngredientKind::Tahini => "tahini",
            IngredientKind::Salad => "salad",
            IngredientKind::Fries => "fries",
            IngredientKind::Pickles => "pickles",
            IngredientKind::Onion => "onion",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == s)
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            IngredientKind::Pita => "Pita",
            IngredientKind::FalafelBall => "Falafel",
            IngredientKind::Hummus => "Hummus",
            IngredientKind::Tahini => "Tahini",
            IngredientKind::Salad => "Salad",
            IngredientKind::Fries => "Fries",
            IngredientKind::Pickles => "Pickles",
            IngredientKind::Onion => "Onion",
        }
    }
}

/// Display name for a raw identifier; unknown ids are returned unchanged
pub fn display_name_for_id(id: &str) -> &str {
    match IngredientKind::from_id(id) {
        Some(kind) => kind.display_name(),
        None => id,
    }
}

/// One line of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub kind: IngredientKind,
    pub quantity: u32,
}

impl Ingredient {
    pub fn new(kind: IngredientKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

/// A customer's request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<Ingredient>,
    pub customer_name: String,
}

impl Order {
    /// Build an order, merging repeated kinds and dropping zero-quantity lines
    pub fn new(id: impl Into<String>, customer_name: impl Into<String>, lines: &[Ingredient]) -> Self {
        let mut items: Vec<Ingredient> = Vec::with_capacity(lines.len());
        for line in lines.iter().filter(|l| l.quantity > 0) {
            match items.iter_mut().find(|i| i.kind == line.kind) {
                Some(existing) => existing.quantity += line.quantity,
                None => items.push(*line),
            }
        }
        Self {
            id: id.into(),
            items,
            customer_name: customer_name.into(),
        }
    }

    /// Required quantity for a kind (0 if not ordered)
    pub fn quantity_of(&self, kind: IngredientKind) -> u32 {
        self.items
            .iter()
            .find(|i| i.kind == kind)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// Sum of all required quantities
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// A queued customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub order: Order,
    pub patience: PatienceTimer,
}

impl Customer {
    pub fn new(order: Order, patience: PatienceTimer) -> Self {
        Self {
            id: order.id.clone(),
            name: order.customer_name.clone(),
            order,
            patience,
        }
    }
}

/// The pita currently being assembled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledContent {
    counts: BTreeMap<IngredientKind, u32>,
}

impl AssembledContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build content from (kind, count) pairs; later pairs add to earlier ones
    pub fn from_counts(pairs: &[(IngredientKind, u32)]) -> Self {
        let mut content = Self::new();
        for &(kind, count) in pairs {
            content.add_many(kind, count);
        }
        content
    }

    pub fn add(&mut self, kind: IngredientKind) {
        self.add_many(kind, 1);
    }

    pub fn add_many(&mut self, kind: IngredientKind, count: u32) {
        if count == 0 {
            return;
        }
        *self.counts.entry(kind).or_insert(0) += count;
    }

    /// Take one away; removing from an empty slot is a no-op
    pub fn remove(&mut self, kind: IngredientKind) {
        if let Some(count) = self.counts.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(&kind);
            }
        }
    }

    pub fn count(&self, kind: IngredientKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Non-zero entries in canonical kind order
    pub fn iter(&self) -> impl Iterator<Item = (IngredientKind, u32)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

/// Phase of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ready to present the next customer
    AwaitingCustomer,
    /// A customer is waiting on the current order
    OrderInProgress,
    /// Pacing pause after a serve or walk-out; input is ignored
    PostServeDelay,
    /// Round finished (terminal)
    RoundOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOverReason {
    AllCustomersServed,
    TimeUp,
}

/// Outputs emitted by the round controller, drained by presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A new customer stepped up; their order is now current
    CustomerArrived { customer_id: String, order: Order },
    /// The player served the current order
    Served {
        customer_id: String,
        result: ValidationResult,
    },
    /// The customer ran out of patience
    CustomerLeft { customer_id: String, penalty: i32 },
    /// Round finished
    RoundOver {
        final_score: i64,
        reason: RoundOverReason,
    },
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Running score (penalties may push it negative)
    pub score: i64,
    /// Seconds remaining
    pub time_left: f32,
    /// Round length
    pub max_time: f32,
    /// Order of the active customer, if any
    pub current_order: Option<Order>,
    /// Customers still waiting, front is next
    pub customers: Vec<Customer>,
    /// Orders served with `is_correct`
    pub completed_count: u32,
    /// Wrong orders and walk-outs
    pub failed_count: u32,
}

impl RoundState {
    pub fn new(max_time: f32, customers: Vec<Customer>) -> Self {
        Self {
            score: 0,
            time_left: max_time,
            max_time,
            current_order: None,
            customers,
            completed_count: 0,
            failed_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_ids_round_trip() {
        for kind in IngredientKind::ALL {
            assert_eq!(IngredientKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(IngredientKind::from_id("shawarma"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_raw_id() {
        assert_eq!(display_name_for_id("tahini"), "Tahini");
        assert_eq!(display_name_for_id("amba"), "amba");
    }

    #[test]
    fn test_assembled_content_never_negative() {
        let mut content = AssembledContent::new();
        content.remove(IngredientKind::Hummus);
        assert_eq!(content.count(IngredientKind::Hummus), 0);

        content.add(IngredientKind::Hummus);
        content.add(IngredientKind::Hummus);
        content.remove(IngredientKind::Hummus);
        assert_eq!(content.count(IngredientKind::Hummus), 1);
        content.remove(IngredientKind::Hummus);
        content.remove(IngredientKind::Hummus);
        assert_eq!(content.count(IngredientKind::Hummus), 0);
        assert!(content.is_empty());
    }

    #[test]
    fn test_order_merges_duplicate_kinds() {
        let order = Order::new(
            "order-1",
            "Dina",
            &[
                Ingredient::new(IngredientKind::Pita, 1),
                Ingredient::new(IngredientKind::FalafelBall, 2),
                Ingredient::new(IngredientKind::FalafelBall, 1),
                Ingredient::new(IngredientKind::Onion, 0),
            ],
        );
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.quantity_of(IngredientKind::FalafelBall), 3);
        assert_eq!(order.quantity_of(IngredientKind::Onion), 0);
        assert_eq!(order.total_quantity(), 4);
    }

    #[test]
    fn test_customer_takes_identity_from_order() {
        let order = Order::new("order-7", "Tamar", &[Ingredient::new(IngredientKind::Pita, 1)]);
        let customer = Customer::new(order, PatienceTimer::new(100.0, 0.15));
        assert_eq!(customer.id, "order-7");
        assert_eq!(customer.name, "Tamar");
    }
}
