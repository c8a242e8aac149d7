//! # Truck Loading
//!
//! Assigns every ordered unit to a capacity-bounded truck.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Greedy Emptiest-Truck Loading                       │
//! │                                                                         │
//! │  1. Sort lines by total weight: stable ascending sort, then reverse    │
//! │     (equal-weight lines come out in reverse input order)               │
//! │                                                                         │
//! │  2. For each line, while units remain:                                 │
//! │                                                                         │
//! │     emptiest = lightest open truck (first one on ties)                 │
//! │          │                                                              │
//! │          ├── emptiest + remaining × unit <= capacity                   │
//! │          │       └── load every remaining unit there, next line        │
//! │          │                                                              │
//! │          └── otherwise open a fresh truck and add units                │
//! │                  while weight + unit < capacity   (strict!)            │
//! │                  append it, continue with the residual                 │
//! │                                                                         │
//! │  3. Return all trucks (always at least one, possibly empty)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole-line check uses `<=` and the fresh-truck fill uses `<`. With a
//! capacity of 2 000 000 g and 500 000 g units, a fresh truck therefore
//! takes 3 units, not 4.
//!
//! The projected whole-line weight is summed unit by unit, the same way the
//! truck accumulates it, so rounding cannot push a loaded truck over capacity.
//!
//! ## Usage
//! ```rust
//! use haulage_core::loading::TruckLoader;
//! use haulage_core::types::{OrderLine, ProductRef};
//! use haulage_core::weight::Grams;
//!
//! let bricks = ProductRef::new("p-1", "0000", Grams::from_grams(900_000.0));
//! let trucks = TruckLoader::default()
//!     .pack(&[OrderLine::new(bricks, 5)])
//!     .unwrap();
//!
//! let per_truck: Vec<usize> = trucks.iter().map(|t| t.len()).collect();
//! assert_eq!(per_truck, vec![1, 2, 2]);
//! ```

use tracing::{debug, info, instrument};

use crate::error::{LoadingError, LoadingResult};
use crate::types::{OrderLine, ProductRef, TruckLoad};
use crate::weight::Grams;
use crate::TRUCK_CAPACITY;

// =============================================================================
// Truck Loader
// =============================================================================

/// Stateless truck loader for a fixed capacity.
///
/// Every call to [`TruckLoader::pack`] owns its trucks and returns them; no
/// state survives between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruckLoader {
    capacity: Grams,
}

impl Default for TruckLoader {
    fn default() -> Self {
        TruckLoader::new(TRUCK_CAPACITY)
    }
}

impl TruckLoader {
    /// Creates a loader for trucks of the given capacity.
    pub const fn new(capacity: Grams) -> Self {
        TruckLoader { capacity }
    }

    /// Maximum load of one truck.
    #[inline]
    pub const fn capacity(&self) -> Grams {
        self.capacity
    }

    /// Packs order lines into trucks.
    ///
    /// ## Guarantees
    /// - at least one truck is returned, even for no lines
    /// - the units over all trucks add up to the ordered quantities
    /// - no truck exceeds the capacity
    /// - the caller's lines are not modified
    ///
    /// ## Errors
    /// - [`LoadingError::InvalidQuantity`] if any line has `quantity <= 0`;
    ///   checked for all lines before loading starts
    /// - [`LoadingError::UnitExceedsCapacity`] if a fresh truck cannot take
    ///   a single unit of a line that needs one
    #[instrument(skip(self, lines), fields(lines = lines.len(), capacity = %self.capacity))]
    pub fn pack(&self, lines: &[OrderLine]) -> LoadingResult<Vec<TruckLoad>> {
        if let Some(line) = lines.iter().find(|line| line.quantity <= 0) {
            return Err(LoadingError::InvalidQuantity {
                gtin: line.product.gtin.clone(),
                quantity: line.quantity,
            });
        }

        let mut trucks = vec![TruckLoad::new()];

        for line in sort_by_descending_weight(lines) {
            self.fit_line(line, &mut trucks)?;
        }

        info!(
            trucks = trucks.len(),
            units = trucks.iter().map(TruckLoad::len).sum::<usize>(),
            "Order lines packed"
        );

        Ok(trucks)
    }

    /// Places every unit of one line, opening trucks as needed.
    fn fit_line(&self, line: &OrderLine, trucks: &mut Vec<TruckLoad>) -> LoadingResult<()> {
        let product = &line.product;
        let mut remaining = line.quantity;

        while remaining > 0 {
            let emptiest = emptiest_truck(trucks);

            if trucks[emptiest].weight_after(product.weight, remaining) <= self.capacity {
                trucks[emptiest].load(product, remaining);
                return Ok(());
            }

            let fresh = self.fill_fresh_truck(product, remaining);
            if fresh.is_empty() {
                return Err(LoadingError::UnitExceedsCapacity {
                    gtin: product.gtin.clone(),
                    unit_weight: product.weight,
                    capacity: self.capacity,
                });
            }

            remaining -= fresh.len() as i64;
            debug!(
                gtin = %product.gtin,
                loaded = fresh.len(),
                remaining,
                truck = trucks.len(),
                "Opened truck"
            );
            trucks.push(fresh);
        }

        Ok(())
    }

    /// Fills an empty truck with up to `limit` units, strictly under capacity.
    fn fill_fresh_truck(&self, product: &ProductRef, limit: i64) -> TruckLoad {
        let mut truck = TruckLoad::new();

        while (truck.len() as i64) < limit && truck.weight() + product.weight < self.capacity {
            truck.push(product.clone());
        }

        truck
    }
}

/// Packs order lines using the standard truck capacity.
pub fn pack_orders_into_trucks(lines: &[OrderLine]) -> LoadingResult<Vec<TruckLoad>> {
    TruckLoader::default().pack(lines)
}

// =============================================================================
// Helpers
// =============================================================================

/// Heaviest line first; equal weights end up in reverse input order.
fn sort_by_descending_weight(lines: &[OrderLine]) -> Vec<&OrderLine> {
    let mut sorted: Vec<&OrderLine> = lines.iter().collect();
    sorted.sort_by(|a, b| a.total_weight().total_cmp(&b.total_weight()));
    sorted.reverse();
    sorted
}

/// Index of the lightest truck; the earliest one wins ties.
fn emptiest_truck(trucks: &[TruckLoad]) -> usize {
    let mut best = 0;
    for (index, truck) in trucks.iter().enumerate().skip(1) {
        if truck.weight() < trucks[best].weight() {
            best = index;
        }
    }
    best
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(gtin: &str, grams: f64) -> ProductRef {
        ProductRef::new(format!("id-{}", gtin), gtin, Grams::from_grams(grams))
    }

    fn line(gtin: &str, grams: f64, quantity: i64) -> OrderLine {
        OrderLine::new(product(gtin, grams), quantity)
    }

    fn units_per_truck(trucks: &[TruckLoad]) -> Vec<usize> {
        trucks.iter().map(TruckLoad::len).collect()
    }

    fn total_units(trucks: &[TruckLoad]) -> usize {
        trucks.iter().map(TruckLoad::len).sum()
    }

    fn gtins(truck: &TruckLoad) -> Vec<&str> {
        truck.items().iter().map(|u| u.gtin.as_str()).collect()
    }

    #[test]
    fn test_empty_order_yields_one_empty_truck() {
        let trucks = pack_orders_into_trucks(&[]).unwrap();
        assert_eq!(trucks.len(), 1);
        assert!(trucks[0].is_empty());
        assert!(trucks[0].weight().is_zero());
    }

    #[test]
    fn test_small_order_fits_first_truck() {
        let trucks = pack_orders_into_trucks(&[line("0000", 1_000.0, 3)]).unwrap();
        assert_eq!(units_per_truck(&trucks), vec![3]);
        assert_eq!(trucks[0].weight().grams(), 3_000.0);
    }

    #[test]
    fn test_whole_line_fit_is_inclusive() {
        // 4 × 500 000 = 2 000 000 exactly: fits an empty truck.
        let trucks = pack_orders_into_trucks(&[line("0000", 500_000.0, 4)]).unwrap();
        assert_eq!(units_per_truck(&trucks), vec![4]);
        assert_eq!(trucks[0].weight().grams(), 2_000_000.0);
    }

    #[test]
    fn test_fresh_truck_fill_is_strict() {
        // 5 × 500 000 does not fit; a fresh truck stops at 3 because a 4th
        // unit would reach exactly 2 000 000. The residual 2 then fit the
        // still-empty first truck.
        let trucks = pack_orders_into_trucks(&[line("0000", 500_000.0, 5)]).unwrap();
        assert_eq!(units_per_truck(&trucks), vec![2, 3]);
        assert_eq!(trucks[1].weight().grams(), 1_500_000.0);
    }

    #[test]
    fn test_residuals_fill_fresh_trucks_of_three() {
        let lines = vec![line("0001", 900_000.0, 1), line("0000", 500_000.0, 8)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();

        // Sorted: 0000 (4 000 000) before 0001 (900 000).
        // 0000 × 8: fresh truck 3, residual 5 → fresh 3, residual 2 → truck 0.
        // 0001 × 1: emptiest is truck 0 (1 000 000) → fits.
        assert_eq!(units_per_truck(&trucks), vec![3, 3, 3]);
        assert_eq!(gtins(&trucks[0]), vec!["0000", "0000", "0001"]);
        assert_eq!(trucks[0].weight().grams(), 1_900_000.0);
        assert_eq!(trucks[1].weight().grams(), 1_500_000.0);
        assert_eq!(trucks[2].weight().grams(), 1_500_000.0);
    }

    #[test]
    fn test_multi_truck_overflow_distribution() {
        // 5 × 900 000: fresh truck takes 2 (2 700 000 is not < capacity),
        // residual 3 → another fresh truck of 2, residual 1 → fits the empty
        // first truck.
        let trucks = pack_orders_into_trucks(&[line("0000", 900_000.0, 5)]).unwrap();
        assert_eq!(units_per_truck(&trucks), vec![1, 2, 2]);
        assert_eq!(trucks[0].weight().grams(), 900_000.0);
        assert_eq!(trucks[1].weight().grams(), 1_800_000.0);
        assert_eq!(trucks[2].weight().grams(), 1_800_000.0);
    }

    #[test]
    fn test_heaviest_line_loaded_first() {
        let lines = vec![line("0000", 1_000.0, 1), line("0001", 1_000.0, 5)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(gtins(&trucks[0]), vec!["0001", "0001", "0001", "0001", "0001", "0000"]);
    }

    #[test]
    fn test_equal_weight_ties_are_reversed() {
        // A and B weigh the same in total; B is processed first.
        let lines = vec![line("A", 2_000.0, 1), line("B", 1_000.0, 2)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(gtins(&trucks[0]), vec!["B", "B", "A"]);

        let lines = vec![line("B", 1_000.0, 2), line("A", 2_000.0, 1)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(gtins(&trucks[0]), vec!["A", "B", "B"]);
    }

    #[test]
    fn test_three_way_tie_order() {
        let lines = vec![
            line("A", 100.0, 1),
            line("B", 100.0, 1),
            line("C", 100.0, 1),
            line("D", 500.0, 1),
        ];
        let trucks = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(gtins(&trucks[0]), vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_emptiest_truck_tie_prefers_earliest() {
        let loader = TruckLoader::new(Grams::from_grams(100.0));

        // A × 2 overflows: fresh truck 1 takes one unit (120 is not < 100),
        // the residual unit fits truck 0. Both trucks now weigh 60.
        let lines = vec![line("A", 60.0, 2), line("B", 10.0, 1)];
        let trucks = loader.pack(&lines).unwrap();

        assert_eq!(gtins(&trucks[0]), vec!["A", "B"]);
        assert_eq!(gtins(&trucks[1]), vec!["A"]);
    }

    #[test]
    fn test_lines_spread_across_lightest_trucks() {
        let capacity = Grams::from_grams(100.0);
        let loader = TruckLoader::new(capacity);
        let lines = vec![
            line("A", 60.0, 1),
            line("B", 50.0, 1),
            line("C", 30.0, 1),
            line("D", 20.0, 1),
        ];
        let trucks = loader.pack(&lines).unwrap();

        // A → truck 0 (60). B: 60 + 50 > 100 → fresh truck 1 with B (50).
        // C: emptiest is truck 1 (50) → 80. D: emptiest is truck 0 (60) → 80.
        assert_eq!(trucks.len(), 2);
        assert_eq!(gtins(&trucks[0]), vec!["A", "D"]);
        assert_eq!(gtins(&trucks[1]), vec!["B", "C"]);
    }

    #[test]
    fn test_conservation_and_capacity_invariants() {
        let lines = vec![
            line("0000", 123_456.0, 17),
            line("0001", 999_999.0, 4),
            line("0002", 0.0, 12),
            line("0003", 77_777.5, 31),
            line("0004", 1_999_999.0, 2),
            line("0005", 1.0, 1),
        ];
        let capacity = TRUCK_CAPACITY;
        let trucks = pack_orders_into_trucks(&lines).unwrap();

        let ordered: i64 = lines.iter().map(|l| l.quantity).sum();
        assert_eq!(total_units(&trucks) as i64, ordered);

        for truck in &trucks {
            assert!(truck.weight() <= capacity, "truck over capacity: {}", truck.weight());
        }

        for l in &lines {
            let loaded: usize = trucks.iter().map(|t| t.count_of(&l.product.product_id)).sum();
            assert_eq!(loaded as i64, l.quantity, "units lost for {}", l.product.gtin);
        }
    }

    #[test]
    fn test_whole_line_fit_uses_accumulated_weight() {
        // 17_543 × unit lands on capacity when multiplied, but adding the
        // units one by one rounds past it.
        let lines = vec![line("0000", 114.00558627372739, 17_543)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();

        assert_eq!(total_units(&trucks), 17_543);
        for truck in &trucks {
            assert!(truck.weight() <= TRUCK_CAPACITY, "truck over capacity: {}", truck.weight());
        }
    }

    #[test]
    fn test_fresh_truck_never_takes_more_than_needed() {
        // The first truck is nearly full when the light line arrives, so the
        // line overflows into a fresh truck that could hold far more units.
        let lines = vec![line("0000", 1_500_000.0, 1), line("0001", 300_000.0, 2)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();

        assert_eq!(units_per_truck(&trucks), vec![1, 2]);
        assert_eq!(total_units(&trucks), 3);
    }

    #[test]
    fn test_units_of_a_line_are_contiguous() {
        let lines = vec![line("0000", 10.0, 3), line("0001", 20.0, 3)];
        let trucks = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(
            gtins(&trucks[0]),
            vec!["0001", "0001", "0001", "0000", "0000", "0000"]
        );
    }

    #[test]
    fn test_unit_heavier_than_capacity_fails() {
        let err = pack_orders_into_trucks(&[line("0000", 2_500_000.0, 1)]).unwrap_err();
        assert_eq!(
            err,
            LoadingError::UnitExceedsCapacity {
                gtin: "0000".to_string(),
                unit_weight: Grams::from_grams(2_500_000.0),
                capacity: TRUCK_CAPACITY,
            }
        );
    }

    #[test]
    fn test_unit_equal_to_capacity() {
        // A single unit exactly at capacity fits the empty first truck.
        let trucks = pack_orders_into_trucks(&[line("0000", 2_000_000.0, 1)]).unwrap();
        assert_eq!(units_per_truck(&trucks), vec![1]);

        // A second one needs a fresh truck, which admits nothing.
        let err = pack_orders_into_trucks(&[line("0000", 2_000_000.0, 2)]).unwrap_err();
        assert!(matches!(err, LoadingError::UnitExceedsCapacity { .. }));
    }

    #[test]
    fn test_nan_weight_fails_instead_of_looping() {
        let err = pack_orders_into_trucks(&[line("0000", f64::NAN, 1)]).unwrap_err();
        assert!(matches!(err, LoadingError::UnitExceedsCapacity { .. }));
    }

    #[test]
    fn test_invalid_quantity_rejected_before_loading() {
        let lines = vec![line("0000", 1_000.0, 2), line("0001", 1_000.0, 0)];
        let err = pack_orders_into_trucks(&lines).unwrap_err();
        assert_eq!(
            err,
            LoadingError::InvalidQuantity {
                gtin: "0001".to_string(),
                quantity: 0,
            }
        );

        let err = pack_orders_into_trucks(&[line("0002", 1_000.0, -4)]).unwrap_err();
        assert!(matches!(err, LoadingError::InvalidQuantity { quantity: -4, .. }));
    }

    #[test]
    fn test_custom_capacity() {
        let loader = TruckLoader::new(Grams::from_grams(10.0));
        assert_eq!(loader.capacity().grams(), 10.0);

        // 7 × 3: fresh trucks take 3 (9 < 10); residual 4 → fresh 3, residual
        // 1 → first truck.
        let trucks = loader.pack(&[line("0000", 3.0, 7)]).unwrap();
        assert_eq!(units_per_truck(&trucks), vec![1, 3, 3]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let lines = vec![line("0000", 900_000.0, 5), line("0001", 1.0, 1)];
        let before = lines.clone();
        let _ = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(lines, before);
    }

    #[test]
    fn test_independent_calls_are_equal() {
        let lines = vec![
            line("0000", 900_000.0, 5),
            line("0001", 450_000.0, 3),
            line("0002", 12.5, 40),
        ];
        let first = pack_orders_into_trucks(&lines).unwrap();
        let second = pack_orders_into_trucks(&lines).unwrap();
        assert_eq!(first, second);
    }
}
