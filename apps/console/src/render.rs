//! Plain-text view of the controller state.

use std::fmt;

use client_core::{controller::OutcomeModal, ControllerState};

pub struct StateView<'a>(pub &'a ControllerState);

impl fmt::Display for StateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        if let Some(alert) = &state.alert {
            writeln!(f, "! {alert}")?;
        }
        if state.loading {
            writeln!(f, "Loading users...")?;
        }
        if state.adding_user {
            writeln!(f, "Adding user...")?;
        }
        if state.show_confirmation_modal {
            writeln!(f, "[{}] {}", state.modal_title, state.modal_message)?;
        }
        match state.open_outcome() {
            Some(OutcomeModal::Success) => writeln!(f, "[OK] {}", state.success_message)?,
            Some(OutcomeModal::AddSuccess) => writeln!(f, "[OK] {}", state.add_success_message)?,
            Some(OutcomeModal::Error) => writeln!(f, "[Error] {}", state.error_message)?,
            None => {}
        }

        if state.users.is_empty() {
            return writeln!(f, "No users.");
        }

        let id_width = state
            .users
            .iter()
            .map(|u| u.id.to_string().len())
            .chain(std::iter::once("ID".len()))
            .max()
            .unwrap_or_default();
        let name_width = state
            .users
            .iter()
            .map(|u| u.name.chars().count())
            .chain(std::iter::once("NAME".len()))
            .max()
            .unwrap_or_default();

        writeln!(f, "{:<id_width$}  {:<name_width$}  EMAIL", "ID", "NAME")?;
        for user in &state.users {
            writeln!(
                f,
                "{:<id_width$}  {:<name_width$}  {}",
                user.id.to_string(),
                user.name,
                user.email
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
