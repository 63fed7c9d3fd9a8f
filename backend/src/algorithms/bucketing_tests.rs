use crate::algorithms::bucketing::{validate_divisions, TimeSlots, MAX_DIVISIONS};
use crate::error::AnalyticsError;
use crate::models::VoteEvent;

fn events(times: &[f64]) -> Vec<VoteEvent> {
    times.iter().map(|t| VoteEvent::new(*t, "up")).collect()
}

#[test]
fn test_zero_divisions_rejected() {
    let err = TimeSlots::from_events(&events(&[1.0]), 0).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
    assert!(validate_divisions(0).is_err());
    assert!(validate_divisions(1).is_ok());
}

#[test]
fn test_zero_divisions_rejected_before_empty_check() {
    let err = TimeSlots::from_events(&[], 0).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
}

#[test]
fn test_empty_input() {
    let err = TimeSlots::from_events(&[], 4).unwrap_err();
    assert!(matches!(err, AnalyticsError::EmptyInput));
}

#[test]
fn test_nan_timestamp_rejected() {
    let err = TimeSlots::from_events(&events(&[1.0, f64::NAN]), 2).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
}

#[test]
fn test_infinite_timestamp_rejected() {
    let err = TimeSlots::from_events(&events(&[f64::INFINITY]), 2).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
}

#[test]
fn test_inverted_range_rejected() {
    assert!(TimeSlots::from_range(10.0, 0.0, 2).is_err());
}

#[test]
fn test_two_slot_boundaries() {
    let slots = TimeSlots::from_events(&events(&[0.0, 5.0, 10.0]), 2).unwrap();
    let s = slots.as_slice();
    assert_eq!(s.len(), 2);
    assert_eq!((s[0].index, s[0].start, s[0].end), (0, 0.0, 5.0));
    assert_eq!((s[1].index, s[1].start, s[1].end), (1, 5.0, 10.0));
}

#[test]
fn test_slots_are_contiguous() {
    let slots = TimeSlots::from_range(3.0, 1003.7, 7).unwrap();
    let s = slots.as_slice();
    assert_eq!(s[0].start, 3.0);
    assert_eq!(s[6].end, 1003.7);
    for pair in s.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn test_last_end_is_exact_max() {
    // 1/3 is not representable; the last end must still equal the max.
    let slots = TimeSlots::from_range(0.1, 0.4, 3).unwrap();
    assert_eq!(slots.as_slice()[2].end, 0.4);
    assert_eq!(slots.slot_index(0.4), Some(2));
}

#[test]
fn test_half_open_membership() {
    let slots = TimeSlots::from_range(0.0, 10.0, 2).unwrap();
    assert_eq!(slots.slot_index(0.0), Some(0));
    assert_eq!(slots.slot_index(4.999), Some(0));
    assert_eq!(slots.slot_index(5.0), Some(1));
    assert_eq!(slots.slot_index(10.0), Some(1));
}

#[test]
fn test_outside_range_has_no_slot() {
    let slots = TimeSlots::from_range(0.0, 10.0, 2).unwrap();
    assert_eq!(slots.slot_index(-0.5), None);
    assert_eq!(slots.slot_index(10.5), None);
    assert_eq!(slots.slot_index(f64::NAN), None);
}

#[test]
fn test_single_division_is_inclusive_both_ends() {
    let slots = TimeSlots::from_range(2.0, 8.0, 1).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots.slot_index(2.0), Some(0));
    assert_eq!(slots.slot_index(8.0), Some(0));
}

#[test]
fn test_zero_span_goes_to_first_slot() {
    let slots = TimeSlots::from_events(&events(&[7.0, 7.0, 7.0]), 3).unwrap();
    assert_eq!(slots.span(), 0.0);
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|s| s.start == 7.0 && s.end == 7.0));
    assert_eq!(slots.slot_index(7.0), Some(0));
}

#[test]
fn test_unordered_input_uses_min_and_max() {
    let slots = TimeSlots::from_events(&events(&[9.0, 1.0, 5.0]), 4).unwrap();
    assert_eq!(slots.min_ts(), 1.0);
    assert_eq!(slots.max_ts(), 9.0);
    assert_eq!(slots.slot_index(1.0), Some(0));
    assert_eq!(slots.slot_index(9.0), Some(3));
}

#[test]
fn test_more_divisions_than_events() {
    let slots = TimeSlots::from_events(&events(&[0.0, 1.0]), 100).unwrap();
    assert_eq!(slots.len(), 100);
    assert_eq!(slots.slot_index(0.0), Some(0));
    assert_eq!(slots.slot_index(1.0), Some(99));
    assert_eq!(slots.slot_index(0.5), Some(50));
}

#[test]
fn test_divisions_above_cap_rejected() {
    assert!(validate_divisions(MAX_DIVISIONS).is_ok());
    let err = TimeSlots::from_events(&events(&[0.0, 1.0]), MAX_DIVISIONS + 1).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
}

#[test]
fn test_overflowing_span_rejected() {
    let err = TimeSlots::from_events(&events(&[-1e308, 1e308]), 3).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
    assert!(TimeSlots::from_range(-f64::MAX, f64::MAX, 1).is_err());
}

#[test]
fn test_wide_finite_span_rejected_when_boundaries_overflow() {
    // The span itself is finite but scaling it by the slot count is not.
    assert!(TimeSlots::from_range(0.0, 1e308, 1).is_ok());
    assert!(TimeSlots::from_range(0.0, 1e308, 4).is_err());
}

#[test]
fn test_empty_vote_type_rejected() {
    let err = TimeSlots::from_events(&[VoteEvent::new(1.0, "up"), VoteEvent::new(2.0, "")], 2)
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
}
