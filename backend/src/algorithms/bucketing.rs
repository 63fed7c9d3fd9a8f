//! Uniform time slots over the span of an event set.
//!
//! The span `[min, max]` of the event timestamps is cut into `N` contiguous
//! slots. Every slot except the last is half-open `[start, end)`; the last slot
//! is closed `[start, end]` and its `end` is the maximum timestamp itself, not
//! the arithmetic boundary, so the latest event is never lost to rounding.
//!
//! # Example
//!
//! ```
//! use forum_analytics::algorithms::TimeSlots;
//! use forum_analytics::models::VoteEvent;
//!
//! let events = vec![VoteEvent::new(0.0, "up"), VoteEvent::new(10.0, "down")];
//! let slots = TimeSlots::from_events(&events, 2).unwrap();
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots.slot_index(5.0), Some(1));
//! assert_eq!(slots.slot_index(10.0), Some(1));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::VoteEvent;

/// One window of the partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// 0-based position, `0 <= index < N`.
    pub index: usize,
    /// Inclusive lower bound, Unix seconds.
    pub start: f64,
    /// Upper bound, Unix seconds. Exclusive except for the last slot.
    pub end: f64,
}

/// The `N` slots covering one event set.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlots {
    slots: Vec<TimeSlot>,
    min_ts: f64,
    max_ts: f64,
}

/// Largest slot count accepted. The grid holds one cell per slot and vote
/// type, so this bounds its memory.
pub const MAX_DIVISIONS: usize = 100_000;

/// Reject a division count outside `1..=MAX_DIVISIONS`.
pub fn validate_divisions(divisions: usize) -> AnalyticsResult<()> {
    if divisions < 1 {
        return Err(AnalyticsError::invalid_argument(format!(
            "divisions must be at least 1, got {}",
            divisions
        )));
    }
    if divisions > MAX_DIVISIONS {
        return Err(AnalyticsError::invalid_argument(format!(
            "divisions must be at most {}, got {}",
            MAX_DIVISIONS, divisions
        )));
    }
    Ok(())
}

/// Reject an event with a non-finite timestamp or an empty vote type.
pub(crate) fn check_event(event: &VoteEvent) -> AnalyticsResult<()> {
    if !event.occurred_at.is_finite() {
        return Err(AnalyticsError::invalid_argument(format!(
            "non-finite timestamp {} for vote type '{}'",
            event.occurred_at, event.category
        )));
    }
    if event.category.is_empty() {
        return Err(AnalyticsError::invalid_argument(format!(
            "empty vote type at timestamp {}",
            event.occurred_at
        )));
    }
    Ok(())
}

impl TimeSlots {
    /// Compute `divisions` slots covering the timestamps of `events`.
    ///
    /// # Errors
    /// * `InvalidArgument` if `divisions` is outside `1..=MAX_DIVISIONS`, a
    ///   timestamp is not finite, a vote type is empty or the span of the
    ///   timestamps overflows
    /// * `EmptyInput` if `events` is empty
    pub fn from_events(events: &[VoteEvent], divisions: usize) -> AnalyticsResult<Self> {
        validate_divisions(divisions)?;

        let mut bounds: Option<(f64, f64)> = None;
        for event in events {
            check_event(event)?;
            let ts = event.occurred_at;
            bounds = Some(match bounds {
                None => (ts, ts),
                Some((lo, hi)) => (lo.min(ts), hi.max(ts)),
            });
        }

        let (min_ts, max_ts) = bounds.ok_or(AnalyticsError::EmptyInput)?;
        Self::from_range(min_ts, max_ts, divisions)
    }

    /// Compute `divisions` slots covering `[min_ts, max_ts]`.
    ///
    /// # Errors
    /// * `InvalidArgument` if `divisions` is outside `1..=MAX_DIVISIONS`, a
    ///   bound is not finite, `min_ts > max_ts` or the span is too wide to
    ///   cut without overflowing
    pub fn from_range(min_ts: f64, max_ts: f64, divisions: usize) -> AnalyticsResult<Self> {
        validate_divisions(divisions)?;
        if !min_ts.is_finite() || !max_ts.is_finite() {
            return Err(AnalyticsError::invalid_argument(
                "slot range bounds must be finite",
            ));
        }
        if min_ts > max_ts {
            return Err(AnalyticsError::invalid_argument(format!(
                "slot range is inverted: {} > {}",
                min_ts, max_ts
            )));
        }

        let span = max_ts - min_ts;
        // Boundaries scale the span by up to `divisions` before dividing.
        if !(span * divisions as f64).is_finite() {
            return Err(AnalyticsError::invalid_argument(format!(
                "slot range [{}, {}] is too wide",
                min_ts, max_ts
            )));
        }
        let boundary = |i: usize| min_ts + span * i as f64 / divisions as f64;
        let last = divisions - 1;

        let slots = (0..divisions)
            .map(|index| TimeSlot {
                index,
                start: boundary(index),
                end: if index == last {
                    max_ts
                } else {
                    boundary(index + 1)
                },
            })
            .collect();

        Ok(Self {
            slots,
            min_ts,
            max_ts,
        })
    }

    /// Index of the slot containing `ts`, or `None` when `ts` lies outside
    /// `[min, max]` or is not finite.
    ///
    /// The lower bound always maps to slot 0, which also covers a zero span
    /// where every slot starts at the same instant.
    pub fn slot_index(&self, ts: f64) -> Option<usize> {
        if !ts.is_finite() || ts < self.min_ts || ts > self.max_ts {
            return None;
        }
        if ts <= self.min_ts {
            return Some(0);
        }
        let last = self.slots.len() - 1;
        // Ends of the half-open slots are non-decreasing; the first one
        // strictly above `ts` is the owner, otherwise the closed last slot.
        let idx = self.slots[..last].partition_point(|slot| slot.end <= ts);
        Some(idx)
    }

    /// Earliest timestamp covered.
    pub fn min_ts(&self) -> f64 {
        self.min_ts
    }

    /// Latest timestamp covered.
    pub fn max_ts(&self) -> f64 {
        self.max_ts
    }

    /// `max - min`; zero when every event shares one timestamp.
    pub fn span(&self) -> f64 {
        self.max_ts - self.min_ts
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSlot> {
        self.slots.iter()
    }
}

impl<'a> IntoIterator for &'a TimeSlots {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
