use chrono::{DateTime, Utc};
use userdesk_states::State;
use ustr::Ustr;

use crate::users::model::User;
use crate::users::selection::Selection;

/// What the users panel shows right now.
///
/// Owned by the UI thread and never snapshotted: commands do not read rows
/// or the selection directly. The rows are only ever replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct UsersState {
    users: Vec<User>,
    selection: Selection,
    last_loaded: Option<DateTime<Utc>>,
    pub(crate) seen_list_generation: u64,
    pub(crate) acknowledged_action_generation: u64,
}

impl UsersState {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(Ustr::from(id))
    }

    /// Checks or unchecks one row. Ids that are not in the current list are ignored.
    pub fn set_selected(&mut self, id: &str, checked: bool) {
        if !self.users.iter().any(|user| user.id == id) {
            log::debug!("ignoring selection of unknown user {id}");
            return;
        }
        self.selection = self.selection.toggled(Ustr::from(id), checked);
    }

    /// Replaces the rows with a fresh server response and clears the selection.
    pub fn replace_users(&mut self, users: Vec<User>, now: DateTime<Utc>) {
        self.users = users;
        self.selection = Selection::new();
        self.last_loaded = Some(now);
    }

    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.last_loaded
    }
}

impl State for UsersState {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
