//! Order validation and scoring
//!
//! Compares an assembled pita against the customer's order. Pure: no state,
//! no randomness, no side effects.
//!
//! Scoring tiers (first match wins):
//! - exact match, nothing extra: 100
//! - accuracy >= 0.8: floor(accuracy * 80), still counts as correct
//! - accuracy >= 0.5: floor(accuracy * 40)
//! - otherwise: 0
//!
//! Accuracy only credits lines whose quantity matches exactly. Extra items
//! block the perfect tier but do not otherwise reduce the score.

use serde::{Deserialize, Serialize};

use super::state::{AssembledContent, IngredientKind, Order};
use crate::consts::*;

/// A required ingredient the pita is short on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingItem {
    pub kind: IngredientKind,
    pub required: u32,
    pub actual: u32,
}

/// An ingredient the pita has too much of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraItem {
    pub kind: IngredientKind,
    pub surplus: u32,
    /// The kind was not part of the order at all
    pub unordered: bool,
}

impl MissingItem {
    fn describe(&self) -> String {
        format!(
            "{} (need {}, have {})",
            self.kind.display_name(),
            self.required,
            self.actual
        )
    }
}

impl ExtraItem {
    fn describe(&self) -> String {
        if self.unordered {
            format!("{} (not in the order)", self.kind.display_name())
        } else {
            format!("{} (too many: {})", self.kind.display_name(), self.surplus)
        }
    }
}

/// Outcome tier of a validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Perfect,
    Good,
    Partial,
    Wrong,
}

impl Verdict {
    /// Pick the tier for an accuracy; extras rule out `Perfect`
    pub fn classify(accuracy: f64, has_extras: bool) -> Self {
        if accuracy == 1.0 && !has_extras {
            Verdict::Perfect
        } else if accuracy >= GOOD_ACCURACY {
            Verdict::Good
        } else if accuracy >= PARTIAL_ACCURACY {
            Verdict::Partial
        } else {
            Verdict::Wrong
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Perfect | Verdict::Good)
    }

    pub fn score(&self, accuracy: f64) -> i32 {
        match self {
            Verdict::Perfect => PERFECT_SCORE,
            Verdict::Good => (accuracy * GOOD_SCORE_SCALE).floor() as i32,
            Verdict::Partial => (accuracy * PARTIAL_SCORE_SCALE).floor() as i32,
            Verdict::Wrong => 0,
        }
    }
}

/// Score for an accuracy value with no extras present
pub fn score_for_accuracy(accuracy: f64) -> i32 {
    Verdict::classify(accuracy, false).score(accuracy)
}

/// Result of checking a pita against an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_correct: bool,
    pub score: i32,
    pub verdict: Verdict,
    /// Fraction of required quantity matched exactly (0-1)
    pub accuracy: f64,
    /// Feedback banner text
    pub message: String,
    pub missing: Vec<MissingItem>,
    pub extra: Vec<ExtraItem>,
}

/// Validate assembled content against an order
pub fn validate(assembled: &AssembledContent, order: &Order) -> ValidationResult {
    let mut correct_count: u32 = 0;
    let mut total_required: u32 = 0;
    let mut missing = Vec::new();
    let mut extra = Vec::new();

    for line in &order.items {
        let required = line.quantity;
        let actual = assembled.count(line.kind);
        total_required += required;

        if actual == required {
            correct_count += required;
        } else if actual < required {
            missing.push(MissingItem {
                kind: line.kind,
                required,
                actual,
            });
        } else {
            extra.push(ExtraItem {
                kind: line.kind,
                surplus: actual - required,
                unordered: false,
            });
        }
    }

    // Anything on the pita the customer never asked for
    for (kind, actual) in assembled.iter() {
        if actual > 0 && order.quantity_of(kind) == 0 {
            extra.push(ExtraItem {
                kind,
                surplus: actual,
                unordered: true,
            });
        }
    }

    let accuracy = if total_required > 0 {
        f64::from(correct_count) / f64::from(total_required)
    } else {
        0.0
    };

    let verdict = Verdict::classify(accuracy, !extra.is_empty());
    let details = build_error_message(&missing, &extra);
    let message = match verdict {
        Verdict::Perfect => "Perfect! Correct order!".to_string(),
        Verdict::Good => {
            let headline = format!("Good! {}% correct", (accuracy * 100.0).floor() as i32);
            if details.is_empty() {
                headline
            } else {
                format!("{}\n{}", headline, details)
            }
        }
        Verdict::Partial => format!("Not bad, but...\n{}", details),
        Verdict::Wrong => format!("Wrong order!\n{}", details),
    };

    ValidationResult {
        is_correct: verdict.is_correct(),
        score: verdict.score(accuracy),
        verdict,
        accuracy,
        message,
        missing,
        extra,
    }
}

/// "Missing: ..." and "Extra: ..." lines, each only when non-empty
fn build_error_message(missing: &[MissingItem], extra: &[ExtraItem]) -> String {
    let mut lines = Vec::with_capacity(2);

    if !missing.is_empty() {
        let items: Vec<String> = missing.iter().map(MissingItem::describe).collect();
        lines.push(format!("Missing: {}", items.join(", ")));
    }

    if !extra.is_empty() {
        let items: Vec<String> = extra.iter().map(ExtraItem::describe).collect();
        lines.push(format!("Extra: {}", items.join(", ")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Ingredient;
    use proptest::prelude::*;
    use IngredientKind::*;

    fn order(lines: &[(IngredientKind, u32)]) -> Order {
        let items: Vec<Ingredient> = lines.iter().map(|&(k, q)| Ingredient::new(k, q)).collect();
        Order::new("order-1", "Avi", &items)
    }

    #[test]
    fn test_exact_match_is_perfect() {
        let order = order(&[(Pita, 1), (FalafelBall, 3), (Tahini, 1)]);
        let pita = AssembledContent::from_counts(&[(Pita, 1), (FalafelBall, 3), (Tahini, 1)]);
        let result = validate(&pita, &order);
        assert!(result.is_correct);
        assert_eq!(result.score, 100);
        assert_eq!(result.verdict, Verdict::Perfect);
        assert_eq!(result.message, "Perfect! Correct order!");
        assert!(result.missing.is_empty());
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_good_tier_reports_percentage() {
        // Falafel off by one: 8 of 10 credited
        let order = order(&[(Pita, 1), (FalafelBall, 2), (Hummus, 1), (Tahini, 1), (Salad, 1), (Pickles, 4)]);
        let pita = AssembledContent::from_counts(&[
            (Pita, 1),
            (FalafelBall, 1),
            (Hummus, 1),
            (Tahini, 1),
            (Salad, 1),
            (Pickles, 4),
        ]);
        let result = validate(&pita, &order);
        assert_eq!(result.accuracy, 0.8);
        assert!(result.is_correct);
        assert_eq!(result.verdict, Verdict::Good);
        assert_eq!(result.score, 64);
        assert_eq!(
            result.message,
            "Good! 80% correct\nMissing: Falafel (need 2, have 1)"
        );
    }

    #[test]
    fn test_missing_only_scores_zero() {
        let order = order(&[(Pita, 1), (FalafelBall, 4), (Onion, 1)]);
        let result = validate(&AssembledContent::new(), &order);
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.verdict, Verdict::Wrong);
        assert_eq!(
            result.message,
            "Wrong order!\nMissing: Pita (need 1, have 0), Falafel (need 4, have 0), Onion (need 1, have 0)"
        );
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_unordered_extra_blocks_perfect() {
        let order = order(&[(Pita, 1), (FalafelBall, 3)]);
        let pita = AssembledContent::from_counts(&[(Pita, 1), (FalafelBall, 3), (Fries, 2)]);
        let result = validate(&pita, &order);
        assert_eq!(result.accuracy, 1.0);
        assert_ne!(result.verdict, Verdict::Perfect);
        assert!(result.is_correct);
        assert_eq!(result.score, 80);
        assert_eq!(
            result.extra,
            vec![ExtraItem {
                kind: Fries,
                surplus: 2,
                unordered: true
            }]
        );
        assert!(result.message.contains("Extra: Fries (not in the order)"));
    }

    #[test]
    fn test_surplus_on_ordered_kind() {
        let order = order(&[(Pita, 1), (FalafelBall, 2)]);
        let pita = AssembledContent::from_counts(&[(Pita, 1), (FalafelBall, 5)]);
        let result = validate(&pita, &order);
        // Only the pita is credited: 1 of 3
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
        assert_eq!(result.message, "Wrong order!\nExtra: Falafel (too many: 3)");
    }

    #[test]
    fn test_partial_tier_lists_both_lines() {
        // Pita + falafel credited: 3 of 5
        let order = order(&[(Pita, 1), (FalafelBall, 2), (Hummus, 1), (Salad, 1)]);
        let pita = AssembledContent::from_counts(&[(Pita, 1), (FalafelBall, 2), (Onion, 1)]);
        let result = validate(&pita, &order);
        assert_eq!(result.accuracy, 0.6);
        assert_eq!(result.verdict, Verdict::Partial);
        assert!(!result.is_correct);
        assert_eq!(result.score, 24);
        assert_eq!(
            result.message,
            "Not bad, but...\nMissing: Hummus (need 1, have 0), Salad (need 1, have 0)\nExtra: Onion (not in the order)"
        );
    }

    #[test]
    fn test_empty_order_does_not_divide_by_zero() {
        let order = Order::new("order-0", "Yossi", &[]);
        let result = validate(&AssembledContent::new(), &order);
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.score, 0);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Verdict::classify(0.8, false), Verdict::Good);
        assert_eq!(score_for_accuracy(0.8), 64);
        assert_eq!(Verdict::classify(0.7999, false), Verdict::Partial);
        assert_eq!(score_for_accuracy(0.7999), 31);
        assert_eq!(Verdict::classify(0.5, false), Verdict::Partial);
        assert_eq!(score_for_accuracy(0.5), 20);
        assert_eq!(Verdict::classify(0.4999, false), Verdict::Wrong);
        assert_eq!(score_for_accuracy(0.4999), 0);
        assert_eq!(score_for_accuracy(1.0), 100);
        assert_eq!(Verdict::classify(1.0, true), Verdict::Good);
        assert_eq!(Verdict::classify(1.0, true).score(1.0), 80);
    }

    #[test]
    fn test_end_to_end_second_serve_message() {
        let order = order(&[(Pita, 1), (FalafelBall, 3)]);
        let pita = AssembledContent::from_counts(&[(Pita, 1), (FalafelBall, 2)]);
        let result = validate(&pita, &order);
        assert_eq!(result.accuracy, 0.25);
        assert_eq!(result.score, 0);
        assert!(!result.is_correct);
        assert_eq!(result.message, "Wrong order!\nMissing: Falafel (need 3, have 2)");
    }

    fn arb_order() -> impl Strategy<Value = Order> {
        proptest::sample::subsequence(IngredientKind::ALL.to_vec(), 1..=IngredientKind::ALL.len())
            .prop_flat_map(|kinds| {
                let n = kinds.len();
                (Just(kinds), proptest::collection::vec(1u32..6, n))
            })
            .prop_map(|(kinds, quantities)| {
                let items: Vec<Ingredient> = kinds
                    .into_iter()
                    .zip(quantities)
                    .map(|(k, q)| Ingredient::new(k, q))
                    .collect();
                Order::new("order-p", "Miriam", &items)
            })
    }

    proptest! {
        #[test]
        fn prop_exact_copy_is_perfect(order in arb_order()) {
            let pairs: Vec<_> = order.items.iter().map(|i| (i.kind, i.quantity)).collect();
            let result = validate(&AssembledContent::from_counts(&pairs), &order);
            prop_assert!(result.is_correct);
            prop_assert_eq!(result.score, 100);
        }

        #[test]
        fn prop_scores_follow_tier_formula(a in 0.0f64..1.0) {
            let score = score_for_accuracy(a);
            if a >= 0.8 {
                prop_assert_eq!(score, (a * 80.0).floor() as i32);
            } else if a >= 0.5 {
                prop_assert_eq!(score, (a * 40.0).floor() as i32);
            } else {
                prop_assert_eq!(score, 0);
            }
        }

        #[test]
        fn prop_score_within_bounds(
            order in arb_order(),
            counts in proptest::collection::vec(0u32..7, IngredientKind::ALL.len()),
        ) {
            let pairs: Vec<_> = IngredientKind::ALL.iter().copied().zip(counts).collect();
            let result = validate(&AssembledContent::from_counts(&pairs), &order);
            prop_assert!((0..=100).contains(&result.score));
            prop_assert!((0.0..=1.0).contains(&result.accuracy));
            prop_assert_eq!(result.is_correct, result.accuracy >= 0.8);
        }
    }
}
