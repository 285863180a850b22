//! Interval overlap rules.
//!
//! Intervals are half-open: `[start, end)`. A zero-length interval is the single
//! instant `start`. Two intervals overlap when they share at least one instant, so
//! events that only touch at a boundary never conflict.

use chrono::NaiveDateTime;

use crate::event::{Event, EventId};

pub type Interval = (NaiveDateTime, NaiveDateTime);

/// Whether two intervals share at least one instant.
pub fn overlaps(a: Interval, b: Interval) -> bool {
    let (s1, e1) = a;
    let (s2, e2) = b;

    match (s1 == e1, s2 == e2) {
        (true, true) => s1 == s2,
        (true, false) => contains_instant(b, s1),
        (false, true) => contains_instant(a, s2),
        (false, false) => s1 < e2 && s2 < e1,
    }
}

fn contains_instant((start, end): Interval, t: NaiveDateTime) -> bool {
    start <= t && t < end
}

/// First event in `existing` that overlaps `candidate`, skipping `exclude`.
///
/// Scans in collection order and stops at the first match.
pub fn find_conflict<'a>(
    candidate: Interval,
    existing: &'a [Event],
    exclude: Option<EventId>,
) -> Option<&'a Event> {
    existing
        .iter()
        .filter(|event| Some(event.id) != exclude)
        .find(|event| overlaps(candidate, event.interval()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStyle;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn event(id: u64, start: u32, end: u32) -> Event {
        Event {
            id: EventId(id),
            title: format!("event {}", id),
            start: day(start),
            end: day(end),
            category: None,
            color: None,
            all_day: false,
            style: EventStyle {
                background_color: "#3174ad".into(),
            },
        }
    }

    #[test]
    fn partial_overlap_either_side() {
        assert!(overlaps((day(7), day(10)), (day(9), day(12))));
        assert!(overlaps((day(9), day(12)), (day(7), day(10))));
    }

    #[test]
    fn containment_is_overlap() {
        // The legacy endpoint check missed this case.
        assert!(overlaps((day(1), day(30)), (day(7), day(10))));
        assert!(overlaps((day(7), day(10)), (day(1), day(30))));
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        assert!(!overlaps((day(7), day(10)), (day(10), day(12))));
        assert!(!overlaps((day(10), day(12)), (day(7), day(10))));
    }

    #[test]
    fn disjoint_intervals() {
        assert!(!overlaps((day(11), day(19)), (day(7), day(10))));
        assert!(!overlaps((day(11), day(19)), (day(20), day(23))));
    }

    #[test]
    fn identical_intervals_overlap() {
        assert!(overlaps((day(7), day(10)), (day(7), day(10))));
    }

    #[test]
    fn zero_length_instants() {
        // same instant
        assert!(overlaps((day(5), day(5)), (day(5), day(5))));
        assert!(!overlaps((day(5), day(5)), (day(6), day(6))));
        // inside another interval
        assert!(overlaps((day(8), day(8)), (day(7), day(10))));
        assert!(overlaps((day(7), day(10)), (day(8), day(8))));
        // at the start boundary the instant is covered, at the end it is not
        assert!(overlaps((day(7), day(7)), (day(7), day(10))));
        assert!(!overlaps((day(10), day(10)), (day(7), day(10))));
    }

    #[test]
    fn find_conflict_returns_first_match_in_order() {
        let events = vec![event(1, 1, 5), event(2, 3, 8), event(3, 20, 23)];
        let found = find_conflict((day(4), day(6)), &events, None).unwrap();
        assert_eq!(found.id, EventId(1));
    }

    #[test]
    fn find_conflict_skips_excluded_event() {
        let events = vec![event(1, 7, 10), event(2, 20, 23)];
        assert!(find_conflict((day(8), day(9)), &events, Some(EventId(1))).is_none());
        assert_eq!(
            find_conflict((day(8), day(21)), &events, Some(EventId(1)))
                .map(|e| e.id),
            Some(EventId(2))
        );
    }

    #[test]
    fn find_conflict_on_empty_collection() {
        assert!(find_conflict((day(1), day(2)), &[], None).is_none());
    }
}
