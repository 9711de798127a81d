//! User list state and the operations that move it: fetch, add, delete, and
//! the modal transitions around them.

use anyhow::Context;
use shared::{
    domain::{NewUser, User, UserId},
    protocol::CreateUserRequest,
};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    busy::{Activity, BusyFlag, BusyKind},
    error::UserListError,
    UserApi,
};

pub const FILL_ALL_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add user";
pub const ADD_SUCCEEDED_MESSAGE: &str = "User added successfully!";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete user";
pub const DELETE_SUCCEEDED_MESSAGE: &str = "User deleted successfully!";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load users";
pub const CONFIRM_DELETION_TITLE: &str = "Confirm deletion";

pub fn confirm_deletion_message(user_name: &str) -> String {
    format!("Are you sure you want to delete user \"{user_name}\"?")
}

/// Modals shown after an operation completes. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeModal {
    Success,
    Error,
    AddSuccess,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub users: Vec<User>,
    pub loading: bool,
    pub adding_user: bool,
    pub new_user: NewUser,
    pub show_add_form: bool,
    pub show_confirmation_modal: bool,
    pub show_success_modal: bool,
    pub show_error_modal: bool,
    pub show_add_success_modal: bool,
    pub modal_user_id: Option<UserId>,
    pub modal_title: String,
    pub modal_message: String,
    pub success_message: String,
    pub error_message: String,
    pub add_success_message: String,
    /// Blocking notice; only list failures report here.
    pub alert: Option<String>,
}

impl ControllerState {
    pub fn open_outcome(&self) -> Option<OutcomeModal> {
        if self.show_success_modal {
            Some(OutcomeModal::Success)
        } else if self.show_error_modal {
            Some(OutcomeModal::Error)
        } else if self.show_add_success_modal {
            Some(OutcomeModal::AddSuccess)
        } else {
            None
        }
    }

    fn show_outcome(&mut self, modal: OutcomeModal, message: &str) {
        for other in [
            OutcomeModal::Success,
            OutcomeModal::Error,
            OutcomeModal::AddSuccess,
        ] {
            if other != modal {
                self.close_outcome(other);
            }
        }
        let (flag, slot) = self.outcome_slot(modal);
        *flag = true;
        *slot = message.to_string();
    }

    fn close_outcome(&mut self, modal: OutcomeModal) {
        let (flag, slot) = self.outcome_slot(modal);
        *flag = false;
        slot.clear();
    }

    fn outcome_slot(&mut self, modal: OutcomeModal) -> (&mut bool, &mut String) {
        match modal {
            OutcomeModal::Success => (&mut self.show_success_modal, &mut self.success_message),
            OutcomeModal::Error => (&mut self.show_error_modal, &mut self.error_message),
            OutcomeModal::AddSuccess => (
                &mut self.show_add_success_modal,
                &mut self.add_success_message,
            ),
        }
    }

    fn close_confirmation(&mut self) {
        self.show_confirmation_modal = false;
        self.modal_user_id = None;
        self.modal_title.clear();
        self.modal_message.clear();
    }
}

pub struct UserListController<A: UserApi> {
    api: A,
    state: ControllerState,
    activity: watch::Sender<Activity>,
}

impl<A: UserApi> UserListController<A> {
    pub fn new(api: A) -> Self {
        let (activity, _) = watch::channel(Activity::default());
        Self {
            api,
            state: ControllerState::default(),
            activity,
        }
    }

    /// Follows `loading`/`adding_user` while an operation holds the controller.
    pub fn watch_activity(&self) -> watch::Receiver<Activity> {
        self.activity.subscribe()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Direct access for form input such as `new_user`.
    pub fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    pub fn into_state(self) -> ControllerState {
        self.state
    }

    pub async fn fetch_users(&mut self) -> Result<(), UserListError> {
        let result = {
            let _busy =
                BusyFlag::raise(&mut self.state.loading, BusyKind::Loading, &self.activity);
            self.api.list_users().await
        };

        match result {
            Ok(users) => {
                info!(count = users.len(), "loaded users");
                self.state.users = users;
                Ok(())
            }
            Err(err) => {
                error!("error fetching users: {err:#}");
                self.state.alert = Some(FETCH_FAILED_MESSAGE.to_string());
                Err(err.context("failed to fetch users").into())
            }
        }
    }

    pub async fn add_user(&mut self) -> Result<(), UserListError> {
        if !self.state.new_user.is_complete() {
            self.state.show_outcome(OutcomeModal::Error, FILL_ALL_FIELDS_MESSAGE);
            return Err(UserListError::Validation(FILL_ALL_FIELDS_MESSAGE));
        }

        let request = CreateUserRequest::from(&self.state.new_user);
        let result = {
            let _busy = BusyFlag::raise(
                &mut self.state.adding_user,
                BusyKind::AddingUser,
                &self.activity,
            );
            self.api.create_user(request).await
        };

        match result {
            Ok(user) => {
                info!(user_id = %user.id, "user added");
                self.state.users.push(user);
                self.state.new_user = NewUser::default();
                self.state.show_add_form = false;
                self.state.show_outcome(OutcomeModal::AddSuccess, ADD_SUCCEEDED_MESSAGE);
                Ok(())
            }
            Err(err) => {
                error!("error adding user: {err:#}");
                self.state.show_outcome(OutcomeModal::Error, ADD_FAILED_MESSAGE);
                Err(err.context("failed to add user").into())
            }
        }
    }

    pub fn show_delete_confirmation(&mut self, user_id: UserId, user_name: &str) {
        self.state.modal_user_id = Some(user_id);
        self.state.modal_title = CONFIRM_DELETION_TITLE.to_string();
        self.state.modal_message = confirm_deletion_message(user_name);
        self.state.show_confirmation_modal = true;
    }

    pub fn cancel_deletion(&mut self) {
        self.state.close_confirmation();
    }

    pub async fn confirm_deletion(&mut self) -> Result<(), UserListError> {
        let Some(user_id) = self.state.modal_user_id else {
            return Ok(());
        };

        let result = self
            .api
            .delete_user(user_id)
            .await
            .with_context(|| format!("failed to delete user {user_id}"));
        self.state.close_confirmation();

        match result {
            Ok(()) => {
                info!(%user_id, "user deleted");
                self.state.users.retain(|user| user.id != user_id);
                self.state.show_outcome(OutcomeModal::Success, DELETE_SUCCEEDED_MESSAGE);
                Ok(())
            }
            Err(err) => {
                warn!("error deleting user: {err:#}");
                self.state.show_outcome(OutcomeModal::Error, DELETE_FAILED_MESSAGE);
                Err(err.into())
            }
        }
    }

    pub fn close_success_modal(&mut self) {
        self.state.close_outcome(OutcomeModal::Success);
    }

    pub fn close_error_modal(&mut self) {
        self.state.close_outcome(OutcomeModal::Error);
    }

    pub fn close_add_success_modal(&mut self) {
        self.state.close_outcome(OutcomeModal::AddSuccess);
    }

    pub fn toggle_add_form(&mut self) {
        self.state.show_add_form = !self.state.show_add_form;
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alert = None;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
