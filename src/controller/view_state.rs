use std::cell::RefCell;

use crate::api::Record;

use super::phase::{Action, ActionPhases};

/// Everything the view renders from, apart from the form draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Records in server order; never re-sorted locally.
    pub records: Vec<Record>,
    /// Outcome of the most recently completed action. Empty until one
    /// reports something.
    pub message: String,
    phases: ActionPhases,
}

impl ViewState {
    pub fn busy(&self) -> bool {
        self.phases.busy()
    }

    #[cfg(test)]
    pub fn phase(&self, action: Action) -> super::phase::Phase {
        self.phases.phase(action)
    }
}

/// Marks `action` as in flight for as long as the guard lives.
///
/// Dropping the guard on any exit path (success, failure, or the future
/// being dropped mid-await) returns the action to idle.
pub struct BusyGuard<'a> {
    state: &'a RefCell<ViewState>,
    action: Action,
}

impl<'a> BusyGuard<'a> {
    pub fn acquire(state: &'a RefCell<ViewState>, action: Action) -> Self {
        state.borrow_mut().phases.begin(action);
        Self { state, action }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().phases.finish(self.action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::phase::Phase;

    #[test]
    fn guard_releases_on_drop() {
        let state = RefCell::new(ViewState::default());
        {
            let _guard = BusyGuard::acquire(&state, Action::Fetch);
            assert!(state.borrow().busy());
            assert_eq!(state.borrow().phase(Action::Fetch), Phase::Loading);
        }
        assert!(!state.borrow().busy());
    }

    #[test]
    fn nested_guards_release_in_any_order() {
        let state = RefCell::new(ViewState::default());
        let create = BusyGuard::acquire(&state, Action::Create);
        let fetch = BusyGuard::acquire(&state, Action::Fetch);
        drop(create);
        assert!(state.borrow().busy());
        drop(fetch);
        assert!(!state.borrow().busy());
    }
}
