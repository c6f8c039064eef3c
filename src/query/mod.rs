//! Query and aggregation engine
//!
//! Pure functions over the current order set, recomputed on every read. No
//! incremental index is maintained; order volumes here are small.

use std::collections::BTreeMap;

use crate::models::{Order, Size};

/// Order list filter. Empty fields pass everything; set fields AND together.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Case-insensitive free-text match over customer fields, model and size
    pub text: String,
    /// Exact model name
    pub model: String,
    /// Exact size
    pub size: Option<Size>,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        let match_text = if self.text.is_empty() {
            true
        } else {
            let haystack = [
                order.name.as_str(),
                order.email.as_str(),
                order.phone.as_str(),
                order.address.as_str(),
                order.notes.as_str(),
                order.model.as_str(),
                order.size.as_str(),
            ]
            .join(" ")
            .to_lowercase();
            haystack.contains(&self.text.to_lowercase())
        };
        let match_model = self.model.is_empty() || order.model == self.model;
        let match_size = self.size.map_or(true, |s| order.size == s);

        match_text && match_model && match_size
    }
}

/// Filter orders, preserving their (most-recent-first) ordering
pub fn filter<'a>(orders: &'a [Order], f: &OrderFilter) -> Vec<&'a Order> {
    orders.iter().filter(|o| f.matches(o)).collect()
}

/// Per-size quantity totals for one model row. Every row carries all seven
/// sizes, zero-filled for sizes with no orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBreakdown {
    counts: BTreeMap<Size, u32>,
}

impl SizeBreakdown {
    fn new() -> Self {
        Self {
            counts: Size::ALL.into_iter().map(|s| (s, 0)).collect(),
        }
    }

    pub fn qty(&self, size: Size) -> u32 {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// Sum across all sizes
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// (size, qty) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Size, u32)> + '_ {
        self.counts.iter().map(|(s, q)| (*s, *q))
    }
}

/// Per-model, per-size aggregated quantities.
///
/// Derived from Orders, not from the Model collection: models with zero
/// orders are absent, and deleted models with surviving orders still appear
/// under their snapshotted name.
pub fn breakdown(orders: &[Order]) -> BTreeMap<String, SizeBreakdown> {
    let mut by_model: BTreeMap<String, SizeBreakdown> = BTreeMap::new();
    for order in orders {
        let row = by_model
            .entry(order.model.clone())
            .or_insert_with(SizeBreakdown::new);
        *row.counts.entry(order.size).or_insert(0) += order.qty;
    }
    by_model
}

/// Distinct model names appearing in orders, for the filter dropdown
pub fn distinct_models(orders: &[Order]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for order in orders {
        if !names.contains(&order.model) {
            names.push(order.model.clone());
        }
    }
    names
}
