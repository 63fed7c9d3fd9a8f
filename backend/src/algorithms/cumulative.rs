//! Dense (slot × vote type) grid with running totals.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::bucketing::{check_event, TimeSlot, TimeSlots};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::VoteEvent;

/// Number of votes of one type inside one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTrendCell {
    pub slot: TimeSlot,
    pub category: String,
    /// Votes of `category` inside `slot`.
    pub count: u64,
    /// Votes of `category` in this slot and every earlier one.
    pub cumulative_count: u64,
}

impl VoteTrendCell {
    pub fn slot_index(&self) -> usize {
        self.slot.index
    }
}

/// Distinct vote types of the event set, lexicographically ordered.
pub fn distinct_categories(events: &[VoteEvent]) -> Vec<String> {
    events
        .iter()
        .map(|e| e.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Count every event into its (slot, vote type) cell and accumulate per type.
///
/// Every slot gets a cell for every vote type seen in `events`, including
/// empty ones, so the result always holds `slots.len() * categories` cells,
/// ordered by `(slot index, vote type)`.
///
/// # Errors
/// * `InvalidArgument` if an event falls outside the slot range, has a
///   non-finite timestamp or an empty vote type
pub fn aggregate(slots: &TimeSlots, events: &[VoteEvent]) -> AnalyticsResult<Vec<VoteTrendCell>> {
    let categories = distinct_categories(events);
    if categories.is_empty() || slots.is_empty() {
        return Ok(Vec::new());
    }

    let category_index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    // counts[category][slot]
    let mut counts = vec![vec![0u64; slots.len()]; categories.len()];
    for event in events {
        check_event(event)?;
        let slot = slots.slot_index(event.occurred_at).ok_or_else(|| {
            AnalyticsError::invalid_argument(format!(
                "timestamp {} is outside the slot range [{}, {}]",
                event.occurred_at,
                slots.min_ts(),
                slots.max_ts()
            ))
        })?;
        let cat = category_index[event.category.as_str()];
        counts[cat][slot] += 1;
    }

    // Running totals restart for every category.
    let cumulative: Vec<Vec<u64>> = counts
        .iter()
        .map(|per_slot| {
            per_slot
                .iter()
                .scan(0u64, |running, &count| {
                    *running += count;
                    Some(*running)
                })
                .collect()
        })
        .collect();

    let mut cells = Vec::with_capacity(slots.len() * categories.len());
    for slot in slots {
        for (cat, category) in categories.iter().enumerate() {
            cells.push(VoteTrendCell {
                slot: *slot,
                category: category.clone(),
                count: counts[cat][slot.index],
                cumulative_count: cumulative[cat][slot.index],
            });
        }
    }

    Ok(cells)
}

/// Full pipeline over an in-memory event set: slots, grid, running totals.
///
/// An empty event set yields an empty grid rather than an error. The grid
/// has `divisions * vote types` cells, so `divisions` is capped at
/// [`MAX_DIVISIONS`](super::MAX_DIVISIONS).
///
/// # Errors
/// * `InvalidArgument` if `divisions` is outside `1..=MAX_DIVISIONS`, a
///   timestamp is not finite, a vote type is empty or the span of the
///   timestamps overflows
pub fn compute_vote_trend(
    events: &[VoteEvent],
    divisions: usize,
) -> AnalyticsResult<Vec<VoteTrendCell>> {
    let slots = match TimeSlots::from_events(events, divisions) {
        Ok(slots) => slots,
        Err(AnalyticsError::EmptyInput) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    log::debug!(
        "Bucketing {} votes into {} slots over {}s",
        events.len(),
        slots.len(),
        slots.span()
    );
    aggregate(&slots, events)
}
