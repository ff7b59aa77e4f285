use crate::admin::{
    dashboard, Confirm, DeleteOutcome, EditorError, EditorPhase, RefreshOutcome, SaveOutcome,
    ValidationError,
};
use crate::models::{
    Advertisement, AdvertisementData, AdvertisementStatus, RecordId,
};
use crate::store::{RecordStore, StoreError};

/// Transient form state for one advertisement popup. The event link is the
/// typed id the host's dropdown resolved, not a raw string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertisementForm {
    pub title: String,
    pub image_url: String,
    pub event_id: Option<RecordId>,
    pub status: AdvertisementStatus,
}

/// Edit-state controller for the advertisements section. Owns the
/// single-active invariant: saving a record into `active` first issues a
/// best-effort deactivate-all write. The two writes are separate round
/// trips; a concurrent activation can interleave between them, which the
/// host mitigates by disabling the save control while a save is in flight.
#[derive(Debug, Default)]
pub struct AdvertisementController {
    phase: EditorPhase,
    editing: Option<RecordId>,
    form: AdvertisementForm,
}

impl AdvertisementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn form(&self) -> &AdvertisementForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AdvertisementForm {
        &mut self.form
    }

    pub fn open_blank(&mut self) {
        self.editing = None;
        self.form = AdvertisementForm::default();
        self.phase = EditorPhase::OpenForCreate;
    }

    pub fn open(&mut self, advertisement: &Advertisement) {
        self.editing = Some(advertisement.id);
        self.form = AdvertisementForm {
            title: advertisement.data.title.clone(),
            image_url: advertisement.data.image_url.clone(),
            event_id: advertisement.data.event_id,
            status: advertisement.data.status,
        };
        self.phase = EditorPhase::OpenForEdit;
    }

    pub fn open_by_id(&mut self, store: &dyn RecordStore, id: RecordId) -> Result<(), EditorError> {
        match store.get_advertisement(id)? {
            Some(ad) => {
                self.open(&ad);
                Ok(())
            }
            None => Err(EditorError::Persistence(StoreError::new(format!(
                "Advertisement {id} not found"
            )))),
        }
    }

    /// Maps the form onto the persisted shape. Title and image are
    /// mandatory; the image reference must be an http(s) URL or an
    /// embedded `data:` image.
    pub fn collect_and_validate(&self) -> Result<AdvertisementData, ValidationError> {
        let title = self.form.title.trim();
        let image_url = self.form.image_url.trim();

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if image_url.is_empty() {
            missing.push("image");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if !image_url.starts_with("data:") && !image_url.starts_with("http") {
            return Err(ValidationError::InvalidImageReference);
        }

        Ok(AdvertisementData {
            title: title.to_string(),
            image_url: image_url.to_string(),
            event_id: self.form.event_id,
            status: self.form.status,
        })
    }

    /// Validates and persists the open form. When the target status is
    /// `active`, every other active advertisement is deactivated first;
    /// that bulk write happens exactly once, before the insert/update,
    /// never after. A failure in either write leaves the form open.
    pub fn save(
        &mut self,
        store: &dyn RecordStore,
    ) -> Result<SaveOutcome<Advertisement>, EditorError> {
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
        if data.status == AdvertisementStatus::Active {
            if let Err(e) = store.deactivate_all_active() {
                log::error!("Failed to deactivate other advertisements: {}", e);
                self.phase = open_phase;
                return Err(e.into());
            }
        }

        let written = match self.editing {
            Some(id) => store.update_advertisement(id, data),
            None => store.insert_advertisement(data),
        };
        let saved = match written {
            Ok(ad) => ad,
            Err(e) => {
                log::error!("Failed to save advertisement: {}", e);
                self.phase = open_phase;
                return Err(e.into());
            }
        };

        self.close();
        let refresh = RefreshOutcome::collect(
            store.list_advertisements(None),
            dashboard::load_counts(store),
            "advertisement",
        );
        Ok(SaveOutcome { saved, refresh })
    }

    pub fn delete(
        &mut self,
        store: &dyn RecordStore,
        id: RecordId,
        confirm: Confirm,
    ) -> Result<DeleteOutcome<Advertisement>, EditorError> {
        if matches!(self.phase, EditorPhase::Validating | EditorPhase::Persisting) {
            return Err(EditorError::Busy);
        }
        if confirm == Confirm::Declined {
            return Ok(DeleteOutcome::Declined);
        }

        store.delete_advertisement(id).map_err(|e| {
            log::error!("Failed to delete advertisement {}: {}", id, e);
            e
        })?;

        let refresh = RefreshOutcome::collect(
            store.list_advertisements(None),
            dashboard::load_counts(store),
            "advertisement",
        );
        Ok(DeleteOutcome::Deleted { refresh })
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.phase = EditorPhase::Closed;
        self.editing = None;
        self.form = AdvertisementForm::default();
    }
}

/// An event the advertisement form can link to, labeled the way the
/// dropdown shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventChoice {
    pub id: RecordId,
    pub label: String,
}

/// Loads the events the form's link dropdown offers, most recent first.
pub fn event_choices(store: &dyn RecordStore) -> Result<Vec<EventChoice>, StoreError> {
    let events = store.list_events()?;
    Ok(events
        .into_iter()
        .map(|event| {
            let label = if event.data.date.is_empty() {
                event.data.title.clone()
            } else {
                format!("{} ({})", event.data.title, event.data.date)
            };
            EventChoice {
                id: event.id,
                label,
            }
        })
        .collect())
}
