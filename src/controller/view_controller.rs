use std::cell::{Ref, RefCell};

use tracing::{debug, warn};

use crate::api::{FormDraft, RecordStore};

use super::phase::Action;
use super::view_state::{BusyGuard, ViewState};

pub const CREATED_MESSAGE: &str = "User created successfully!";
pub const DELETED_MESSAGE: &str = "User deleted successfully!";
pub const FETCH_FAILED_PREFIX: &str = "Error fetching users: ";
pub const CREATE_FAILED_PREFIX: &str = "Error creating user: ";
pub const DELETE_FAILED_PREFIX: &str = "Error deleting user: ";

/// Owns the view state and the form draft, and mutates them only through
/// [`refresh`](Self::refresh), [`submit`](Self::submit) and
/// [`remove`](Self::remove).
///
/// All methods take `&self` so that actions can interleave on a single
/// thread: each one suspends only at its store call, and no state borrow is
/// held across that await. Nothing serializes actions; a slow Refresh issued
/// before a fast Remove can land last and overwrite the newer list.
pub struct ViewController<S> {
    store: S,
    state: RefCell<ViewState>,
    draft: RefCell<FormDraft>,
}

impl<S: RecordStore> ViewController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RefCell::new(ViewState::default()),
            draft: RefCell::new(FormDraft::default()),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read access for rendering. Do not hold across an await.
    pub fn state(&self) -> Ref<'_, ViewState> {
        self.state.borrow()
    }

    pub fn draft(&self) -> FormDraft {
        self.draft.borrow().clone()
    }

    pub fn set_draft(&self, draft: FormDraft) {
        *self.draft.borrow_mut() = draft;
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.draft.borrow_mut().name = name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.draft.borrow_mut().email = email.into();
    }

    /// Re-fetches the full list. On success `records` is replaced wholesale
    /// and `message` is left alone.
    pub async fn refresh(&self) {
        let _busy = BusyGuard::acquire(&self.state, Action::Fetch);
        debug!("refreshing user list");
        match self.store.list().await {
            Ok(records) => {
                debug!(count = records.len(), "user list refreshed");
                self.state.borrow_mut().records = records;
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch users");
                self.set_message(format!("{FETCH_FAILED_PREFIX}{err}"));
            }
        }
    }

    /// Sends the current draft to the store. On success the draft is cleared
    /// and the list is re-fetched; on failure the draft is kept as typed.
    ///
    /// Required-field checks belong to the caller; see
    /// [`FormDraft::missing_field`].
    pub async fn submit(&self) {
        let draft = self.draft();
        let created = {
            let _busy = BusyGuard::acquire(&self.state, Action::Create);
            self.store.create(&draft).await
        };
        match created {
            Ok(echo) => {
                debug!(id = ?echo.map(|r| r.id), "user created");
                self.set_draft(FormDraft::default());
                self.set_message(CREATED_MESSAGE);
                self.refresh().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to create user");
                self.set_message(format!("{CREATE_FAILED_PREFIX}{err}"));
            }
        }
    }

    /// Deletes record `id`, then re-fetches the list.
    pub async fn remove(&self, id: i64) {
        let deleted = {
            let _busy = BusyGuard::acquire(&self.state, Action::Delete);
            self.store.delete(id).await
        };
        match deleted {
            Ok(()) => {
                debug!(id, "user deleted");
                self.set_message(DELETED_MESSAGE);
                self.refresh().await;
            }
            Err(err) => {
                warn!(id, error = %err, "failed to delete user");
                self.set_message(format!("{DELETE_FAILED_PREFIX}{err}"));
            }
        }
    }

    fn set_message(&self, message: impl Into<String>) {
        self.state.borrow_mut().message = message.into();
    }
}
