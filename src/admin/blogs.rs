use crate::admin::{
    dashboard, opt_trimmed, Confirm, DeleteOutcome, EditorError, EditorPhase, RefreshOutcome,
    SaveOutcome, ValidationError,
};
use crate::helper::sanitization_helpers::{sanitize_rich_content, strip_all_html};
use crate::models::{Blog, BlogData, BlogStatus, RecordId};
use crate::store::RecordStore;

/// Transient form state for one blog post. Field slots mirror the admin
/// form inputs; everything stays a string until `collect_and_validate`
/// maps it onto the persisted shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub author: String,
    pub date: String,
    pub status: BlogStatus,
    pub image: String,
    pub excerpt: String,
    pub content: String,
}

/// Edit-state controller for the blogs section.
#[derive(Debug, Default)]
pub struct BlogController {
    phase: EditorPhase,
    editing: Option<RecordId>,
    form: BlogForm,
}

impl BlogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn form(&self) -> &BlogForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BlogForm {
        &mut self.form
    }

    /// Opens a blank creation form.
    pub fn open_blank(&mut self) {
        self.editing = None;
        self.form = BlogForm::default();
        self.phase = EditorPhase::OpenForCreate;
    }

    /// Opens the form populated from an already-fetched record.
    pub fn open(&mut self, blog: &Blog) {
        self.editing = Some(blog.id);
        self.form = BlogForm {
            title: blog.data.title.clone(),
            author: blog.data.author.clone(),
            date: blog.data.date.clone(),
            status: blog.data.status,
            image: blog.data.image.clone().unwrap_or_default(),
            excerpt: blog.data.excerpt.clone().unwrap_or_default(),
            content: blog.data.content.clone(),
        };
        self.phase = EditorPhase::OpenForEdit;
    }

    /// Fetch-then-open, the edit-button path. On any failure the
    /// controller is left exactly as it was.
    pub fn open_by_id(&mut self, store: &dyn RecordStore, id: RecordId) -> Result<(), EditorError> {
        match store.get_blog(id)? {
            Some(blog) => {
                self.open(&blog);
                Ok(())
            }
            None => Err(EditorError::Persistence(crate::store::StoreError::new(
                format!("Blog {id} not found"),
            ))),
        }
    }

    /// Maps the current form onto the persisted shape, enumerating every
    /// blank mandatory field in one pass. No store call happens here.
    pub fn collect_and_validate(&self) -> Result<BlogData, ValidationError> {
        let mut missing = Vec::new();
        if self.form.title.trim().is_empty() {
            missing.push("title");
        }
        if self.form.author.trim().is_empty() {
            missing.push("author");
        }
        if self.form.date.trim().is_empty() {
            missing.push("date");
        }
        if self.form.content.trim().is_empty() {
            missing.push("content");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(BlogData {
            title: strip_all_html(self.form.title.trim()),
            author: strip_all_html(self.form.author.trim()),
            date: self.form.date.trim().to_string(),
            status: self.form.status,
            image: opt_trimmed(&self.form.image),
            excerpt: opt_trimmed(&self.form.excerpt).map(|e| strip_all_html(&e)),
            content: sanitize_rich_content(&self.form.content),
        })
    }

    /// Validates and persists the open form. Insert vs update is decided
    /// solely by whether an identifier is present. On success the form
    /// closes and the list and dashboard counters are re-fetched
    /// independently; on failure the form stays open, untouched.
    pub fn save(&mut self, store: &dyn RecordStore) -> Result<SaveOutcome<Blog>, EditorError> {
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
            Some(id) => store.update_blog(id, data),
            None => store.insert_blog(data),
        };
        let saved = match written {
            Ok(blog) => blog,
            Err(e) => {
                log::error!("Failed to save blog: {}", e);
                self.phase = open_phase;
                return Err(e.into());
            }
        };

        self.close();
        let refresh =
            RefreshOutcome::collect(store.list_blogs(), dashboard::load_counts(store), "blog");
        Ok(SaveOutcome { saved, refresh })
    }

    /// Deletes a record from the list view. Requires explicit operator
    /// confirmation; without it the store is never called.
    pub fn delete(
        &mut self,
        store: &dyn RecordStore,
        id: RecordId,
        confirm: Confirm,
    ) -> Result<DeleteOutcome<Blog>, EditorError> {
        if matches!(self.phase, EditorPhase::Validating | EditorPhase::Persisting) {
            return Err(EditorError::Busy);
        }
        if confirm == Confirm::Declined {
            return Ok(DeleteOutcome::Declined);
        }

        store.delete_blog(id).map_err(|e| {
            log::error!("Failed to delete blog {}: {}", id, e);
            e
        })?;

        let refresh =
            RefreshOutcome::collect(store.list_blogs(), dashboard::load_counts(store), "blog");
        Ok(DeleteOutcome::Deleted { refresh })
    }

    /// Discards the transient form unconditionally.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.phase = EditorPhase::Closed;
        self.editing = None;
        self.form = BlogForm::default();
    }
}
