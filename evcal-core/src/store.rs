//! In-memory event store.
//!
//! The store is the only place the event collection changes. Every operation
//! validates completely before it mutates, so a rejected call leaves the
//! collection exactly as it was.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tracing::debug;

use crate::config::StoreConfig;
use crate::date_range::DateRange;
use crate::error::{EventError, Field};
use crate::event::{Event, EventDraft, EventId, EventStyle, non_blank};
use crate::overlap::find_conflict;
use crate::seed::demo_events;

/// Read-only view of the collection at one point in time.
pub type Snapshot = Arc<Vec<Event>>;

/// Issues time-based ids that strictly increase, so deleted ids never come back.
#[derive(Debug, Clone)]
struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    fn after(events: &[Event]) -> Self {
        IdGenerator {
            last: events.iter().map(|e| e.id.0).max(),
        }
    }

    fn next(&mut self) -> EventId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) => now.max(last + 1),
            None => now,
        };
        self.last = Some(id);
        EventId(id)
    }
}

/// Fields of a draft that passed validation.
struct Accepted {
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    category: Option<String>,
    color: Option<String>,
    all_day: bool,
}

#[derive(Debug, Clone)]
pub struct EventStore {
    events: Snapshot,
    config: StoreConfig,
    ids: IdGenerator,
}

impl EventStore {
    /// An empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self::from_events(Vec::new(), config)
    }

    /// A store holding the demo events when `config.seed_demo_events` is set.
    pub fn with_seed(config: StoreConfig) -> Self {
        let events = if config.seed_demo_events {
            demo_events(&config.default_color)
        } else {
            Vec::new()
        };
        Self::from_events(events, config)
    }

    fn from_events(events: Vec<Event>, config: StoreConfig) -> Self {
        let ids = IdGenerator::after(&events);
        EventStore {
            events: Arc::new(events),
            config,
            ids,
        }
    }

    /// Validate and append a candidate.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<Event, EventError> {
        let accepted = self.validate(&draft).inspect_err(|err| {
            debug!(error = %err, title = %draft.title, "add rejected");
        })?;

        if let Some(existing) = find_conflict((accepted.start, accepted.end), &self.events, None) {
            debug!(conflicting = %existing.id, title = %accepted.title, "add rejected: overlap");
            return Err(EventError::OverlapConflict {
                conflicting: existing.id,
                title: existing.title.clone(),
            });
        }

        let id = self.ids.next();
        let event = self.build(id, accepted);
        Arc::make_mut(&mut self.events).push(event.clone());

        debug!(id = %event.id, title = %event.title, "event added");
        Ok(event)
    }

    /// Replace the event with `id` in place, keeping its position.
    pub fn edit_event(&mut self, id: EventId, draft: EventDraft) -> Result<Event, EventError> {
        let Some(index) = self.position(id) else {
            debug!(%id, "edit rejected: not found");
            return Err(EventError::NotFound(id));
        };

        let accepted = self.validate(&draft).inspect_err(|err| {
            debug!(%id, error = %err, "edit rejected");
        })?;

        if self.config.check_overlap_on_edit {
            let candidate = (accepted.start, accepted.end);
            if let Some(existing) = find_conflict(candidate, &self.events, Some(id)) {
                debug!(%id, conflicting = %existing.id, "edit rejected: overlap");
                return Err(EventError::OverlapConflict {
                    conflicting: existing.id,
                    title: existing.title.clone(),
                });
            }
        }

        let event = self.build(id, accepted);
        Arc::make_mut(&mut self.events)[index] = event.clone();

        debug!(%id, title = %event.title, "event edited");
        Ok(event)
    }

    /// Remove the event with `id` and hand it back.
    ///
    /// Unknown ids leave the collection untouched; callers that don't care can
    /// drop the error.
    pub fn delete_event(&mut self, id: EventId) -> Result<Event, EventError> {
        let Some(index) = self.position(id) else {
            debug!(%id, "delete rejected: not found");
            return Err(EventError::NotFound(id));
        };

        let removed = Arc::make_mut(&mut self.events).remove(index);
        debug!(%id, title = %removed.title, "event deleted");
        Ok(removed)
    }

    /// Snapshot of all events in insertion order.
    pub fn list_events(&self) -> Snapshot {
        Arc::clone(&self.events)
    }

    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events visible in `range`, in insertion order.
    pub fn events_in_range(&self, range: &DateRange) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| range.contains_event(e))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    fn validate(&self, draft: &EventDraft) -> Result<Accepted, EventError> {
        let title = draft.title.trim();
        let category = non_blank(&draft.category);
        let color = non_blank(&draft.color);

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push(Field::Title);
        }
        if draft.start.is_none() {
            missing.push(Field::Start);
        }
        if draft.end.is_none() {
            missing.push(Field::End);
        }
        if self.config.require_category_and_color {
            if category.is_none() {
                missing.push(Field::Category);
            }
            if color.is_none() {
                missing.push(Field::Color);
            }
        }

        let (Some(start), Some(end), true) = (draft.start, draft.end, missing.is_empty()) else {
            return Err(EventError::MissingFields(missing));
        };

        if end < start {
            return Err(EventError::InvertedInterval);
        }

        Ok(Accepted {
            title: title.to_string(),
            start,
            end,
            category,
            color,
            all_day: draft.all_day,
        })
    }

    fn build(&self, id: EventId, accepted: Accepted) -> Event {
        let background_color = accepted
            .color
            .clone()
            .unwrap_or_else(|| self.config.default_color.clone());

        Event {
            id,
            title: accepted.title,
            start: accepted.start,
            end: accepted.end,
            category: accepted.category,
            color: accepted.color,
            all_day: accepted.all_day,
            style: EventStyle { background_color },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::CalendarView;
    use crate::overlap::overlaps;
    use chrono::NaiveDate;

    fn july(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn draft(title: &str, start: u32, end: u32) -> EventDraft {
        EventDraft::new().title(title).span(july(start), july(end))
    }

    fn seeded() -> EventStore {
        EventStore::with_seed(StoreConfig::default())
    }

    fn empty() -> EventStore {
        EventStore::new(StoreConfig::default())
    }

    fn assert_no_overlaps(store: &EventStore) {
        let events = store.list_events();
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert!(!overlaps(a.interval(), b.interval()), "{} overlaps {}", a, b);
            }
        }
    }

    // --- add_event ---

    #[test]
    fn seed_scenario() {
        let mut store = seeded();
        assert_eq!(store.len(), 3);

        let err = store.add_event(draft("Trip", 9, 12)).unwrap_err();
        assert_eq!(
            err,
            EventError::OverlapConflict {
                conflicting: EventId(1),
                title: "Vacation".into()
            }
        );
        assert_eq!(store.len(), 3);

        store.add_event(draft("Workshop", 11, 19)).unwrap();
        assert_eq!(store.len(), 4);
        assert_no_overlaps(&store);
    }

    #[test]
    fn add_appends_with_assigned_style() {
        let mut store = seeded();
        let added = store
            .add_event(draft("Workshop", 11, 19).category("work"))
            .unwrap();

        assert_eq!(added.title, "Workshop");
        assert_eq!(added.start, july(11));
        assert_eq!(added.end, july(19));
        assert_eq!(added.category.as_deref(), Some("work"));
        assert_eq!(added.style.background_color, "#3174ad");
        assert_eq!(store.list_events().last(), Some(&added));
    }

    #[test]
    fn add_uses_color_for_style() {
        let mut store = empty();
        let added = store.add_event(draft("Gym", 1, 2).color("#ff8800")).unwrap();
        assert_eq!(added.color.as_deref(), Some("#ff8800"));
        assert_eq!(added.style.background_color, "#ff8800");
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = empty();
        store.add_event(draft("Late", 20, 21)).unwrap();
        store.add_event(draft("Early", 1, 2)).unwrap();
        let titles: Vec<_> = store.list_events().iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, vec!["Late", "Early"]);
    }

    #[test]
    fn add_missing_fields_leaves_collection_unchanged() {
        let mut store = seeded();
        let before = store.list_events();

        let err = store.add_event(EventDraft::new()).unwrap_err();
        assert_eq!(
            err,
            EventError::MissingFields(vec![Field::Title, Field::Start, Field::End])
        );

        let err = store
            .add_event(EventDraft::new().title("   ").span(july(1), july(2)))
            .unwrap_err();
        assert_eq!(err, EventError::MissingFields(vec![Field::Title]));

        let mut no_end = draft("Open ended", 1, 2);
        no_end.end = None;
        assert_eq!(
            store.add_event(no_end).unwrap_err(),
            EventError::MissingFields(vec![Field::End])
        );

        assert_eq!(store.list_events(), before);
    }

    #[test]
    fn add_requires_category_and_color_when_configured() {
        let mut store = EventStore::new(StoreConfig {
            require_category_and_color: true,
            ..StoreConfig::default()
        });

        let err = store.add_event(draft("Gym", 1, 2)).unwrap_err();
        assert_eq!(
            err,
            EventError::MissingFields(vec![Field::Category, Field::Color])
        );

        let ok = store.add_event(draft("Gym", 1, 2).category("health").color("#00ff00"));
        assert!(ok.is_ok());
    }

    #[test]
    fn add_rejects_inverted_interval() {
        let mut store = empty();
        assert_eq!(
            store.add_event(draft("Backwards", 5, 3)).unwrap_err(),
            EventError::InvertedInterval
        );
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_candidate_containing_existing_event() {
        let mut store = seeded();
        let err = store.add_event(draft("Whole month", 1, 31)).unwrap_err();
        assert!(matches!(err, EventError::OverlapConflict { .. }));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn zero_length_seed_event_is_an_instant() {
        let june = |day: u32, hour: u32| {
            NaiveDate::from_ymd_opt(2021, 6, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap()
        };
        let mut store = seeded();

        let err = store
            .add_event(EventDraft::new().title("Prep").span(june(30, 0), june(30, 9)))
            .unwrap_err();
        assert_eq!(
            err,
            EventError::OverlapConflict {
                conflicting: EventId(0),
                title: "Big Meeting".into()
            }
        );

        let day_before = EventDraft::new().title("Travel").span(june(29, 0), june(30, 0));
        assert!(store.add_event(day_before).is_ok());
        assert_eq!(store.len(), 4);
        assert_no_overlaps(&store);
    }

    #[test]
    fn add_back_to_back_events() {
        let mut store = seeded();
        store.add_event(draft("Right after vacation", 10, 12)).unwrap();
        store.add_event(draft("Right before conference", 18, 20)).unwrap();
        assert_no_overlaps(&store);
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut store = empty();
        let first = store.add_event(draft("A", 1, 2)).unwrap();
        store.delete_event(first.id).unwrap();
        let second = store.add_event(draft("B", 1, 2)).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn ids_start_above_seed() {
        let mut store = seeded();
        let added = store.add_event(draft("New", 11, 12)).unwrap();
        assert!(added.id > EventId(2));
    }

    // --- edit_event ---

    #[test]
    fn edit_keeps_position_and_id() {
        let mut store = seeded();
        let edited = store
            .edit_event(EventId(1), draft("Long vacation", 6, 12).color("#123456"))
            .unwrap();

        assert_eq!(edited.id, EventId(1));
        let events = store.list_events();
        assert_eq!(events[1], edited);
        assert_eq!(events[1].title, "Long vacation");
        assert_eq!(events[1].style.background_color, "#123456");
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn edit_ignores_overlap_with_itself() {
        let mut store = seeded();
        assert!(store.edit_event(EventId(1), draft("Vacation", 8, 9)).is_ok());
    }

    #[test]
    fn edit_rejects_overlap_with_other_events() {
        let mut store = seeded();
        let before = store.list_events();
        let err = store
            .edit_event(EventId(1), draft("Vacation", 7, 21))
            .unwrap_err();
        assert_eq!(
            err,
            EventError::OverlapConflict {
                conflicting: EventId(2),
                title: "Conference".into()
            }
        );
        assert_eq!(store.list_events(), before);
    }

    #[test]
    fn edit_overlap_check_can_be_disabled() {
        let mut store = EventStore::with_seed(StoreConfig {
            check_overlap_on_edit: false,
            ..StoreConfig::default()
        });
        assert!(store.edit_event(EventId(1), draft("Vacation", 7, 21)).is_ok());
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let mut store = seeded();
        assert_eq!(
            store.edit_event(EventId(99), draft("Ghost", 1, 2)).unwrap_err(),
            EventError::NotFound(EventId(99))
        );
    }

    #[test]
    fn edit_validates_fields() {
        let mut store = seeded();
        let err = store
            .edit_event(EventId(1), EventDraft::new().span(july(7), july(10)))
            .unwrap_err();
        assert_eq!(err, EventError::MissingFields(vec![Field::Title]));
        assert_eq!(store.get_event(EventId(1)).unwrap().title, "Vacation");
    }

    // --- delete_event ---

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = seeded();
        let removed = store.delete_event(EventId(1)).unwrap();
        assert_eq!(removed.title, "Vacation");
        let ids: Vec<_> = store.list_events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId(0), EventId(2)]);
    }

    #[test]
    fn delete_twice_is_not_found() {
        let mut store = seeded();
        store.delete_event(EventId(2)).unwrap();
        assert_eq!(
            store.delete_event(EventId(2)).unwrap_err(),
            EventError::NotFound(EventId(2))
        );
        assert_eq!(store.len(), 2);
    }

    // --- snapshots and queries ---

    #[test]
    fn snapshot_is_unaffected_by_later_mutations() {
        let mut store = seeded();
        let snapshot = store.list_events();
        store.delete_event(EventId(0)).unwrap();
        store.add_event(draft("Later", 11, 12)).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].title, "Big Meeting");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn events_in_range_by_view() {
        let store = seeded();
        let week = DateRange::for_view(
            CalendarView::Week,
            NaiveDate::from_ymd_opt(2021, 7, 8).unwrap(),
        )
        .unwrap();
        let found = store.events_in_range(&week);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Vacation");
    }

    #[test]
    fn unseeded_store_starts_empty() {
        let store = EventStore::with_seed(StoreConfig {
            seed_demo_events: false,
            ..StoreConfig::default()
        });
        assert!(store.is_empty());
    }
}
