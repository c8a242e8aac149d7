//! # Weight Module
//!
//! Provides the `Grams` type for product and truck weights.
//!
//! ## Why Real-Valued Grams?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE WEIGHTS COME FROM                                                │
//! │                                                                         │
//! │  Catalog:   unit weight per product, recorded in grams (may be 0.5 g)  │
//! │  Order:     unit weight × quantity          → line total               │
//! │  Truck:     sum of every unit loaded so far → compared to capacity     │
//! │                                                                         │
//! │  The loading rules compare weights with `<=` and `<`, so the type      │
//! │  must expose ordinary IEEE comparisons, not rounded ones.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use haulage_core::weight::Grams;
//!
//! let pallet = Grams::from_kilograms(450.0);
//! let line = pallet * 3;                  // 1 350 kg
//! assert_eq!(line.grams(), 1_350_000.0);
//! assert!(line < Grams::from_grams(2_000_000.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Grams Type
// =============================================================================

/// A weight in grams.
///
/// ## Design Decisions
/// - **f64**: catalog weights are real numbers; the allocator's boundary
///   rules depend on plain floating point comparison
/// - **Single field tuple struct**: zero-cost wrapper, serialized as a bare number
/// - **No `Eq`/`Ord`**: use [`Grams::total_cmp`] when a total order is needed
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Grams(f64);

impl Grams {
    /// Creates a weight from grams.
    ///
    /// ## Example
    /// ```rust
    /// use haulage_core::weight::Grams;
    ///
    /// let unit = Grams::from_grams(500_000.0);
    /// assert_eq!(unit.grams(), 500_000.0);
    /// ```
    #[inline]
    pub const fn from_grams(grams: f64) -> Self {
        Grams(grams)
    }

    /// Creates a weight from kilograms.
    #[inline]
    pub fn from_kilograms(kg: f64) -> Self {
        Grams(kg * 1_000.0)
    }

    /// Returns the weight in grams.
    #[inline]
    pub const fn grams(&self) -> f64 {
        self.0
    }

    /// Returns the weight in kilograms (for display only).
    #[inline]
    pub fn kilograms(&self) -> f64 {
        self.0 / 1_000.0
    }

    /// Zero weight (an empty truck).
    #[inline]
    pub const fn zero() -> Self {
        Grams(0.0)
    }

    /// Checks if the weight is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the weight is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Multiplies a unit weight by a unit count.
    ///
    /// ## Example
    /// ```rust
    /// use haulage_core::weight::Grams;
    ///
    /// let unit = Grams::from_grams(900_000.0);
    /// assert_eq!(unit.multiply_quantity(5).grams(), 4_500_000.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Grams(self.0 * qty as f64)
    }

    /// Total ordering over weights (IEEE 754 `totalOrder`).
    ///
    /// Used for sorting order lines, where a `PartialOrd` comparator would
    /// need an `unwrap`.
    #[inline]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows tonnes above 1 000 kg, kilograms below.
impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kg = self.kilograms();
        if kg.abs() >= 1_000.0 {
            write!(f, "{:.3} t", kg / 1_000.0)
        } else {
            write!(f, "{:.3} kg", kg)
        }
    }
}

impl Default for Grams {
    fn default() -> Self {
        Grams::zero()
    }
}

impl Add for Grams {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Grams(self.0 + other.0)
    }
}

impl AddAssign for Grams {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Grams {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Grams(self.0 - other.0)
    }
}

/// Multiplication by a unit count.
impl Mul<i64> for Grams {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Sums left to right, starting from zero.
impl Sum for Grams {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Grams::zero(), |acc, w| acc + w)
    }
}

impl<'a> Sum<&'a Grams> for Grams {
    fn sum<I: Iterator<Item = &'a Grams>>(iter: I) -> Self {
        iter.fold(Grams::zero(), |acc, w| acc + *w)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kilograms() {
        let w = Grams::from_kilograms(1.5);
        assert_eq!(w.grams(), 1_500.0);
        assert_eq!(w.kilograms(), 1.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Grams::from_grams(2_000_000.0).to_string(), "2.000 t");
        assert_eq!(Grams::from_grams(1_500.0).to_string(), "1.500 kg");
        assert_eq!(Grams::zero().to_string(), "0.000 kg");
    }

    #[test]
    fn test_arithmetic() {
        let a = Grams::from_grams(1_000.0);
        let b = Grams::from_grams(250.0);

        assert_eq!((a + b).grams(), 1_250.0);
        assert_eq!((a - b).grams(), 750.0);
        assert_eq!((a * 3).grams(), 3_000.0);

        let mut c = a;
        c += b;
        assert_eq!(c.grams(), 1_250.0);
    }

    #[test]
    fn test_sum() {
        let weights = vec![
            Grams::from_grams(1.0),
            Grams::from_grams(2.0),
            Grams::from_grams(3.5),
        ];
        let by_ref: Grams = weights.iter().sum();
        let by_value: Grams = weights.into_iter().sum();
        assert_eq!(by_ref.grams(), 6.5);
        assert_eq!(by_value, by_ref);

        let empty: Grams = Vec::<Grams>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_total_cmp() {
        let light = Grams::from_grams(1.0);
        let heavy = Grams::from_grams(2.0);
        assert_eq!(light.total_cmp(&heavy), Ordering::Less);
        assert_eq!(heavy.total_cmp(&light), Ordering::Greater);
        assert_eq!(light.total_cmp(&light), Ordering::Equal);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Grams::from_grams(500_000.0)).unwrap();
        assert_eq!(json, "500000.0");

        let parsed: Grams = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed.grams(), 12.5);
    }

    #[test]
    fn test_finite() {
        assert!(Grams::from_grams(1.0).is_finite());
        assert!(!Grams::from_grams(f64::NAN).is_finite());
        assert!(!Grams::from_grams(f64::INFINITY).is_finite());
    }
}
