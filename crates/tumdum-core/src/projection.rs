//! # Order-Volume Projection
//!
//! Scales the per-order earnings of a [`ComparisonResult`] across a range of
//! order volumes, producing the rows of the profit table and chart.
//!
//! ```text
//!  orders │ Zomato profit │ TumDum profit │ difference │ gain
//! ────────┼───────────────┼───────────────┼────────────┼──────
//!       1 │       ₹160.00 │       ₹168.00 │      ₹8.00 │ 5.0%
//!     100 │    ₹16000.00  │    ₹16800.00  │    ₹800.00 │ 5.0%
//! ```
//!
//! The projection is lazy. [`Projection`] is `Clone`, so cloning it before
//! iterating gives a fresh pass over the same rows.

use rust_decimal::Decimal;

use crate::format;
use crate::money::Money;
use crate::types::{ComparisonResult, OrderVolumeRow};

/// Volumes shown when the caller does not supply its own.
pub const DEFAULT_ORDER_VOLUMES: [u32; 8] = [1, 5, 10, 25, 50, 100, 200, 500];

/// Lazy sequence of [`OrderVolumeRow`]s.
#[derive(Debug, Clone)]
pub struct Projection<'a, I> {
    comparison: Option<&'a ComparisonResult>,
    volumes: I,
}

impl<I> Iterator for Projection<'_, I>
where
    I: Iterator<Item = u32>,
{
    type Item = OrderVolumeRow;

    fn next(&mut self) -> Option<Self::Item> {
        let comparison = self.comparison?;
        let orders = self.volumes.next()?;
        Some(row_for(comparison, orders))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.comparison {
            Some(_) => self.volumes.size_hint(),
            None => (0, Some(0)),
        }
    }
}

/// Projects `comparison` over the given volumes.
///
/// A missing comparison (incomplete input) yields an empty sequence.
///
/// ## Example
/// ```rust
/// use tumdum_core::projection::project;
///
/// let mut rows = project(None, [1, 10]);
/// assert!(rows.next().is_none());
/// ```
pub fn project<'a, V>(
    comparison: Option<&'a ComparisonResult>,
    volumes: V,
) -> Projection<'a, V::IntoIter>
where
    V: IntoIterator<Item = u32>,
{
    Projection {
        comparison,
        volumes: volumes.into_iter(),
    }
}

/// Projects `comparison` over [`DEFAULT_ORDER_VOLUMES`].
pub fn project_default(
    comparison: Option<&ComparisonResult>,
) -> Projection<'_, std::array::IntoIter<u32, 8>> {
    project(comparison, DEFAULT_ORDER_VOLUMES)
}

impl ComparisonResult {
    /// Projects this result over the given volumes.
    pub fn project<V>(&self, volumes: V) -> Projection<'_, V::IntoIter>
    where
        V: IntoIterator<Item = u32>,
    {
        project(Some(self), volumes)
    }
}

fn row_for(comparison: &ComparisonResult, orders: u32) -> OrderVolumeRow {
    let competitor_profit = comparison.competitor.restaurant_earning * orders;
    let alternative_profit = comparison.alternative.restaurant_earning * orders;
    let profit_difference = alternative_profit - competitor_profit;

    OrderVolumeRow {
        orders,
        competitor_profit,
        alternative_profit,
        profit_difference,
        percentage_gain: percentage_gain(profit_difference, competitor_profit),
    }
}

/// One-decimal gain string, or `"0"` when there is no positive base.
fn percentage_gain(difference: Money, base: Money) -> String {
    if !base.is_positive() {
        return "0".to_string();
    }
    format::format_percent(difference.amount() / base.amount() * Decimal::ONE_HUNDRED)
}

// =============================================================================
// Unit Tests
// =============================================================================
