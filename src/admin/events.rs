use crate::admin::{
    dashboard, opt_trimmed, Confirm, DeleteOutcome, EditorError, EditorPhase, RefreshOutcome,
    SaveOutcome, ValidationError,
};
use crate::helper::slot_helpers::{collect_slots, spread_slots};
use crate::models::{
    decode_list_column, encode_list_column, Event, EventData, EventStatus, RecordId,
};
use crate::store::RecordStore;

/// Fixed slot counts of the event form's list sections.
pub const LEARNING_POINT_SLOTS: usize = 6;
pub const SCHEDULE_SLOTS: usize = 8;

pub const DEFAULT_EVENT_TYPE: &str = "Workshop";
pub const DEFAULT_ORGANIZER: &str = "E-Cell Team";

/// Transient form state for one event. List sections are fixed-size slot
/// vectors; the JSON list columns are decoded into them on open and
/// reassembled (blank slots dropped) on save.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub event_type: String,
    pub organizer: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub status: EventStatus,
    pub image: String,
    pub description: String,
    pub overview: String,
    pub learning_description: String,
    pub learning_points: Vec<String>,
    pub schedule_description: String,
    pub schedule: Vec<String>,
    pub registration_link: String,
    pub registration_note: String,
    pub rating: String,
    pub contact_email: String,
    pub tags: String,
    pub special_notes: String,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            event_type: String::new(),
            organizer: String::new(),
            category: String::new(),
            date: String::new(),
            time: String::new(),
            duration: String::new(),
            location: String::new(),
            status: EventStatus::Upcoming,
            image: String::new(),
            description: String::new(),
            overview: String::new(),
            learning_description: String::new(),
            learning_points: vec![String::new(); LEARNING_POINT_SLOTS],
            schedule_description: String::new(),
            schedule: vec![String::new(); SCHEDULE_SLOTS],
            registration_link: String::new(),
            registration_note: String::new(),
            rating: String::new(),
            contact_email: String::new(),
            tags: String::new(),
            special_notes: String::new(),
        }
    }
}

/// Edit-state controller for the events section.
#[derive(Debug, Default)]
pub struct EventController {
    phase: EditorPhase,
    editing: Option<RecordId>,
    form: EventForm,
}

impl EventController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    /// Opens a blank creation form with the section defaults applied.
    pub fn open_blank(&mut self) {
        self.editing = None;
        self.form = EventForm {
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            organizer: DEFAULT_ORGANIZER.to_string(),
            status: EventStatus::Upcoming,
            ..EventForm::default()
        };
        self.phase = EditorPhase::OpenForCreate;
    }

    /// Opens the form populated from a fetched record, decoding the JSON
    /// list columns into slots and falling back to the section defaults
    /// where the stored value is blank.
    pub fn open(&mut self, event: &Event) {
        let data = &event.data;
        self.editing = Some(event.id);
        self.form = EventForm {
            title: data.title.clone(),
            event_type: non_blank_or(&data.event_type, DEFAULT_EVENT_TYPE),
            organizer: non_blank_or(&data.organizer, DEFAULT_ORGANIZER),
            category: data.category.clone(),
            date: data.date.clone(),
            time: data.time.clone(),
            duration: data.duration.clone(),
            location: data.location.clone(),
            status: data.status,
            image: data.image.clone().unwrap_or_default(),
            description: data.description.clone(),
            overview: data.overview.clone(),
            learning_description: data.learning_description.clone(),
            learning_points: spread_slots(
                &decode_list_column(data.learning_points.as_deref()),
                LEARNING_POINT_SLOTS,
            ),
            schedule_description: data.schedule_description.clone(),
            schedule: spread_slots(&decode_list_column(data.schedule.as_deref()), SCHEDULE_SLOTS),
            registration_link: data.registration_link.clone(),
            registration_note: data.registration_note.clone(),
            rating: data.rating.map(|r| r.to_string()).unwrap_or_default(),
            contact_email: data.contact_email.clone(),
            tags: data.tags.clone(),
            special_notes: data.special_notes.clone(),
        };
        self.phase = EditorPhase::OpenForEdit;
    }

    /// Fetch-then-open, the edit-button path.
    pub fn open_by_id(&mut self, store: &dyn RecordStore, id: RecordId) -> Result<(), EditorError> {
        match store.get_event(id)? {
            Some(event) => {
                self.open(&event);
                Ok(())
            }
            None => Err(EditorError::Persistence(crate::store::StoreError::new(
                format!("Event {id} not found"),
            ))),
        }
    }

    /// Maps the form onto the persisted shape. Mandatory: title,
    /// description, date, location. Slot sections keep only the filled
    /// slots in order; a lenient parse turns the rating field into an
    /// optional integer.
    pub fn collect_and_validate(&self) -> Result<EventData, ValidationError> {
        let mut missing = Vec::new();
        if self.form.title.trim().is_empty() {
            missing.push("title");
        }
        if self.form.description.trim().is_empty() {
            missing.push("description");
        }
        if self.form.date.trim().is_empty() {
            missing.push("date");
        }
        if self.form.location.trim().is_empty() {
            missing.push("location");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(EventData {
            title: self.form.title.trim().to_string(),
            event_type: self.form.event_type.trim().to_string(),
            organizer: self.form.organizer.trim().to_string(),
            category: self.form.category.trim().to_string(),
            date: self.form.date.trim().to_string(),
            time: self.form.time.trim().to_string(),
            duration: self.form.duration.trim().to_string(),
            location: self.form.location.trim().to_string(),
            status: self.form.status,
            image: opt_trimmed(&self.form.image),
            description: self.form.description.trim().to_string(),
            overview: self.form.overview.trim().to_string(),
            learning_description: self.form.learning_description.trim().to_string(),
            learning_points: encode_list_column(&collect_slots(&self.form.learning_points)),
            schedule_description: self.form.schedule_description.trim().to_string(),
            schedule: encode_list_column(&collect_slots(&self.form.schedule)),
            registration_link: self.form.registration_link.trim().to_string(),
            registration_note: self.form.registration_note.trim().to_string(),
            rating: self.form.rating.trim().parse::<i32>().ok(),
            contact_email: self.form.contact_email.trim().to_string(),
            tags: self.form.tags.trim().to_string(),
            special_notes: self.form.special_notes.trim().to_string(),
        })
    }

    /// Validates and persists the open form; see the blogs controller for
    /// the shared contract (id presence decides insert vs update, failure
    /// keeps the form open, success closes and re-fetches).
    pub fn save(&mut self, store: &dyn RecordStore) -> Result<SaveOutcome<Event>, EditorError> {
        let open_phase = match self.phase {
            EditorPhase::OpenForCreate | EditorPhase::OpenForEdit => self.phase,
            EditorPhase::Validating | EditorPhase::Persisting => return Err(EditorError::Busy),
            EditorPhase::Closed => return Err(EditorError::NotOpen),
        };

        self.phase = EditorPhase::Validating;
        let data = match self.collect_and_validate() {
            Ok(data) => data,
            Err(e) => {
                self.phase = open_phase;
                return Err(e.into());
            }
        };

        self.phase = EditorPhase::Persisting;
        let written = match self.editing {
            Some(id) => store.update_event(id, data),
            None => store.insert_event(data),
        };
        let saved = match written {
            Ok(event) => event,
            Err(e) => {
                log::error!("Failed to save event: {}", e);
                self.phase = open_phase;
                return Err(e.into());
            }
        };

        self.close();
        let refresh =
            RefreshOutcome::collect(store.list_events(), dashboard::load_counts(store), "event");
        Ok(SaveOutcome { saved, refresh })
    }

    pub fn delete(
        &mut self,
        store: &dyn RecordStore,
        id: RecordId,
        confirm: Confirm,
    ) -> Result<DeleteOutcome<Event>, EditorError> {
        if matches!(self.phase, EditorPhase::Validating | EditorPhase::Persisting) {
            return Err(EditorError::Busy);
        }
        if confirm == Confirm::Declined {
            return Ok(DeleteOutcome::Declined);
        }

        store.delete_event(id).map_err(|e| {
            log::error!("Failed to delete event {}: {}", id, e);
            e
        })?;

        let refresh =
            RefreshOutcome::collect(store.list_events(), dashboard::load_counts(store), "event");
        Ok(DeleteOutcome::Deleted { refresh })
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.phase = EditorPhase::Closed;
        self.editing = None;
        self.form = EventForm::default();
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::RecordingStore;
    use crate::store::EventStore;

    fn fill_mandatory(form: &mut EventForm) {
        form.title = "Startup Summit".to_string();
        form.description = "Two days of founder talks.".to_string();
        form.date = "2026-03-05".to_string();
        form.location = "Main Auditorium".to_string();
    }

    #[test]
    fn blank_form_applies_section_defaults() {
        let mut controller = EventController::new();
        controller.open_blank();
        assert_eq!(controller.form().organizer, DEFAULT_ORGANIZER);
        assert_eq!(controller.form().event_type, DEFAULT_EVENT_TYPE);
        assert_eq!(controller.form().status, EventStatus::Upcoming);
        assert_eq!(controller.form().learning_points.len(), LEARNING_POINT_SLOTS);
        assert_eq!(controller.form().schedule.len(), SCHEDULE_SLOTS);
    }

    #[test]
    fn mandatory_fields_alone_are_enough_to_save() {
        let store = RecordingStore::new();
        let mut controller = EventController::new();
        controller.open_blank();
        fill_mandatory(controller.form_mut());

        let outcome = controller.save(&store).expect("save");
        assert_eq!(outcome.saved.data.learning_points, None);
        assert_eq!(outcome.saved.data.rating, None);
        assert!(store.calls().contains(&"insert_event"));
    }

    #[test]
    fn blank_location_is_reported_and_blocks_the_store_call() {
        let store = RecordingStore::new();
        let mut controller = EventController::new();
        controller.open_blank();
        fill_mandatory(controller.form_mut());
        controller.form_mut().location = "   ".to_string();

        let err = controller.save(&store).expect_err("validation must fail");
        assert_eq!(
            err,
            EditorError::Validation(ValidationError::MissingFields(vec!["location"]))
        );
        assert!(store.calls().is_empty());
    }

    #[test]
    fn filled_slots_persist_in_order_with_blanks_dropped() {
        let store = RecordingStore::new();
        let mut controller = EventController::new();
        controller.open_blank();
        fill_mandatory(controller.form_mut());
        controller.form_mut().learning_points[0] = "A".to_string();
        controller.form_mut().learning_points[2] = "B".to_string();

        let saved = controller.save(&store).expect("save").saved;
        assert_eq!(
            saved.data.learning_points.as_deref(),
            Some("[\"A\",\"B\"]")
        );
    }

    #[test]
    fn stored_list_columns_decode_front_filled_into_slots() {
        let store = RecordingStore::new();
        let mut controller = EventController::new();
        controller.open_blank();
        fill_mandatory(controller.form_mut());
        controller.form_mut().learning_points[0] = "A".to_string();
        controller.form_mut().learning_points[2] = "B".to_string();
        let saved = controller.save(&store).expect("save").saved;

        controller.open_by_id(&store, saved.id).expect("reopen");
        let slots = &controller.form().learning_points;
        assert_eq!(slots[0], "A");
        assert_eq!(slots[1], "B");
        assert!(slots[2..].iter().all(|slot| slot.is_empty()));
    }

    #[test]
    fn populate_falls_back_to_defaults_for_blank_descriptors() {
        let store = RecordingStore::new();
        let mut data = EventData {
            title: "Ideathon".to_string(),
            event_type: String::new(),
            organizer: String::new(),
            category: String::new(),
            date: "2026-01-10".to_string(),
            time: String::new(),
            duration: String::new(),
            location: "Seminar Hall".to_string(),
            status: EventStatus::Completed,
            image: None,
            description: "Pitch day".to_string(),
            overview: String::new(),
            learning_description: String::new(),
            learning_points: None,
            schedule_description: String::new(),
            schedule: None,
            registration_link: String::new(),
            registration_note: String::new(),
            rating: Some(4),
            contact_email: String::new(),
            tags: String::new(),
            special_notes: String::new(),
        };
        data.schedule = Some("[\"10:00 Check-in\"]".to_string());
        let seeded = store.inner.insert_event(data).expect("seed");

        let mut controller = EventController::new();
        controller.open_by_id(&store, seeded.id).expect("open");
        assert_eq!(controller.form().event_type, DEFAULT_EVENT_TYPE);
        assert_eq!(controller.form().organizer, DEFAULT_ORGANIZER);
        assert_eq!(controller.form().status, EventStatus::Completed);
        assert_eq!(controller.form().rating, "4");
        assert_eq!(controller.form().schedule[0], "10:00 Check-in");
    }

    #[test]
    fn rating_parses_leniently() {
        let mut controller = EventController::new();
        controller.open_blank();
        fill_mandatory(controller.form_mut());
        controller.form_mut().rating = "not a number".to_string();
        assert_eq!(controller.collect_and_validate().expect("valid").rating, None);

        controller.form_mut().rating = " 5 ".to_string();
        assert_eq!(
            controller.collect_and_validate().expect("valid").rating,
            Some(5)
        );
    }

    #[test]
    fn edit_flow_updates_and_refreshes_by_event_date() {
        let store = RecordingStore::new();
        let mut controller = EventController::new();
        controller.open_blank();
        fill_mandatory(controller.form_mut());
        let saved = controller.save(&store).expect("save").saved;

        controller.open_by_id(&store, saved.id).expect("open");
        controller.form_mut().status = EventStatus::Cancelled;
        let outcome = controller.save(&store).expect("save");
        assert_eq!(outcome.saved.data.status, EventStatus::Cancelled);
        assert!(store.calls().contains(&"update_event"));
        assert_eq!(outcome.refresh.counts.expect("counts").events, 1);
    }
}
