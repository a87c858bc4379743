//! Draft Editor
//!
//! One edit/cancel/validate controller shared by every editable page:
//! - Viewing: fields are read-only and mirror the last saved snapshot
//! - Editing: the draft may diverge from the snapshot taken on `edit()`
//! - Save persists through a [`DraftSaver`] and returns to Viewing
//! - Cancel on a dirty draft asks for confirmation before discarding

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

use crate::domain::error::{AppError, Result};

/// An editable record with named, string-addressable fields.
pub trait Draft: Clone + PartialEq + Validate + Send + Sync {
    /// Every field `field`/`set_field` understand, in display order.
    fn field_names() -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<String>;

    fn set_field(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Persists a draft and returns what the backend stored.
#[async_trait]
pub trait DraftSaver<T: Draft>: Send + Sync {
    async fn save(&self, draft: &T) -> Result<T>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Nothing changed; back to Viewing.
    Closed,
    /// The draft is dirty; the caller must ask "Discard changes?".
    ConfirmDiscard,
}

/// First message per field, keyed by field name.
pub fn field_error_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

pub struct DraftEditor<T: Draft> {
    draft: T,
    initial: T,
    errors: BTreeMap<String, String>,
    mode: EditMode,
    confirming_discard: bool,
}

impl<T: Draft> DraftEditor<T> {
    pub fn new(snapshot: T) -> Self {
        Self {
            draft: snapshot.clone(),
            initial: snapshot,
            errors: BTreeMap::new(),
            mode: EditMode::Viewing,
            confirming_discard: false,
        }
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn is_confirming_discard(&self) -> bool {
        self.confirming_discard
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }

    pub fn edit(&mut self) {
        if self.mode == EditMode::Editing {
            return;
        }
        self.initial = self.draft.clone();
        self.mode = EditMode::Editing;
        debug!("Draft editing started");
    }

    /// Fields are read-only while Viewing.
    pub fn change(&mut self, field: &str, value: &str) -> Result<()> {
        if self.mode != EditMode::Editing {
            return Err(AppError::ValidationError(
                "Switch to edit mode before changing fields".to_string(),
            ));
        }
        self.draft.set_field(field, value)
    }

    /// Re-validates one field and records or clears its error.
    pub fn blur(&mut self, field: &str) {
        let messages = match self.draft.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => field_error_messages(&errors),
        };
        match messages.get(field) {
            Some(message) => {
                self.errors.insert(field.to_string(), message.clone());
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    pub fn blur_all(&mut self) {
        for field in T::field_names() {
            self.blur(field);
        }
    }

    pub fn can_save(&self) -> bool {
        self.is_editing() && self.errors.is_empty() && self.draft.validate().is_ok()
    }

    /// On failure the editor stays in Editing with the draft untouched.
    pub async fn save(&mut self, saver: &dyn DraftSaver<T>) -> Result<()> {
        if !self.can_save() {
            self.blur_all();
            let summary = self
                .errors
                .values()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::ValidationError(if summary.is_empty() {
                "Nothing to save".to_string()
            } else {
                summary
            }));
        }

        match saver.save(&self.draft).await {
            Ok(saved) => {
                self.draft = saved.clone();
                self.initial = saved;
                self.errors.clear();
                self.mode = EditMode::Viewing;
                info!("Draft saved");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Draft save failed");
                Err(err)
            }
        }
    }

    pub fn cancel(&mut self) -> CancelOutcome {
        if self.is_dirty() {
            self.confirming_discard = true;
            return CancelOutcome::ConfirmDiscard;
        }
        self.close();
        CancelOutcome::Closed
    }

    pub fn confirm_discard(&mut self) {
        self.draft = self.initial.clone();
        self.close();
        debug!("Draft changes discarded");
    }

    pub fn keep_editing(&mut self) {
        self.confirming_discard = false;
    }

    /// Replaces the snapshot, e.g. after the page re-fetched the record.
    pub fn reset(&mut self, snapshot: T) {
        self.draft = snapshot.clone();
        self.initial = snapshot;
        self.close();
    }

    fn close(&mut self) {
        self.errors.clear();
        self.confirming_discard = false;
        self.mode = EditMode::Viewing;
    }
}
